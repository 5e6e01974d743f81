//! Public API types for the scheduling engine

pub mod types;

pub use types::{
    BookingOutcome, DayGrid, EventCreation, EventId, EventKind, RoomId, SchedulerConfig, Slot,
};
