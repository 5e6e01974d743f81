//! Error types for schedule-core
//!
//! Expected conflicts (occupied slots, full rosters, wrong event type)
//! are reported as `BookingOutcome` values, not errors. These variants
//! cover unknown identities, invalid construction input, and invariant
//! breaches that indicate a coordinator bug.

use thiserror::Error;

use crate::api::types::{EventId, RoomId};
use confero_directory_core::PersonId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Person not found: {0}")]
    PersonNotFound(PersonId),

    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),

    #[error("Invalid time window: {0}")]
    InvalidTime(String),

    #[error("Consistency violation: {0}")]
    ConsistencyViolation(String),
}

impl ScheduleError {
    /// Helper for invalid-time failures
    pub fn invalid_time(message: impl Into<String>) -> Self {
        Self::InvalidTime(message.into())
    }

    /// Helper for invalid-capacity failures
    pub fn invalid_capacity(message: impl Into<String>) -> Self {
        Self::InvalidCapacity(message.into())
    }

    /// Helper for cross-store invariant breaches. These are fatal to the
    /// operation in progress and are never silently repaired.
    pub fn consistency(message: impl Into<String>) -> Self {
        Self::ConsistencyViolation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
