//! # Schedule-Core
//!
//! Scheduling and resource-allocation engine for the Confero conference
//! backend.
//!
//! This crate provides:
//! - Room allocation over a discrete day grid (`RoomRegistry`)
//! - Event records with soft-delete and roster management (`EventCatalog`)
//! - Per-person slot calendars (`PersonCalendar`)
//! - The `ScheduleCoordinator`, the only component allowed to sequence
//!   writes across more than one store in a single logical operation
//!
//! ## Architecture
//!
//! The four stores expose no shared transaction mechanism. Every
//! compound operation in the coordinator runs its checks before any
//! write, in a fixed documented order, so no partially-applied state is
//! ever observable to the next operation. Unknown identities surface as
//! [`ScheduleError`]; expected conflicts (occupied slots, full rosters,
//! wrong event type) are ordinary [`BookingOutcome`] values.

pub mod api;
pub mod calendar;
pub mod coordinator;
pub mod errors;
pub mod events;
pub mod rooms;

pub use api::types::{
    BookingOutcome, DayGrid, EventCreation, EventId, EventKind, RoomId, SchedulerConfig, Slot,
};
pub use calendar::PersonCalendar;
pub use coordinator::ScheduleCoordinator;
pub use errors::{Result, ScheduleError};
pub use events::{EventCatalog, EventRecord, EventStatus, Placement};
pub use rooms::{Room, RoomRegistry};

// Re-exported so engine callers don't need a direct directory-core
// dependency for the common types.
pub use confero_directory_core::{PersonDirectory, PersonId, Standing};
