//! # Directory-Core
//!
//! Person directory service for the Confero conference engine.
//!
//! This crate provides:
//! - Person identities and roles (attendee, organizer, speaker, VIP)
//! - The `PersonDirectory` lookup trait the scheduling engine consumes
//! - An in-memory directory implementation for single-session deployments
//!
//! ## Architecture
//!
//! Directory-Core answers identity questions ("does this person exist",
//! "what is their standing") while schedule-core owns all booking state.
//! Credentials, contact lists and messaging live outside this crate.

pub mod directory;
pub mod error;
pub mod types;

pub use directory::{InMemoryDirectory, PersonDirectory};
pub use error::{DirectoryError, Result};
pub use types::{PersonId, PersonProfile, Role, Standing};
