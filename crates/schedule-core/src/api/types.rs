//! Core types shared across the engine

use serde::{Deserialize, Serialize};

/// Unique room identity, allocated monotonically by the registry
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RoomId(pub u32);

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique event identity, allocated monotonically by the catalog.
/// Cancelled events keep their id forever; ids are never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EventId(pub u32);

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One discrete bookable hour in a room's day grid
pub type Slot = u16;

/// Admission rules for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// At most one speaker (the default for new events)
    SingleSpeaker,
    /// Any number of speakers
    MultiSpeaker,
    /// Attendance restricted to VIP standing
    VipOnly,
}

/// Bookable day grid: `slot_count` one-hour slots starting at
/// `opening_hour`.
///
/// Time ranges are half-open: an event spanning `[start, end)` occupies
/// `end - start` slots and must satisfy `end <= opening_hour + slot_count`.
/// The default grid covers hours 9 through 17.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayGrid {
    pub opening_hour: Slot,
    pub slot_count: u16,
}

impl DayGrid {
    pub const DEFAULT_OPENING_HOUR: Slot = 9;
    pub const DEFAULT_SLOT_COUNT: u16 = 9;

    pub fn new(opening_hour: Slot, slot_count: u16) -> Self {
        Self {
            opening_hour,
            slot_count,
        }
    }

    /// First hour past the grid (exclusive end bound)
    pub fn end_bound(&self) -> Slot {
        self.opening_hour + self.slot_count
    }

    /// Whether `slot` is a bookable start slot
    pub fn contains(&self, slot: Slot) -> bool {
        slot >= self.opening_hour && slot < self.end_bound()
    }

    /// Whether `[start, start + duration)` lies fully on the grid
    pub fn contains_range(&self, start: Slot, duration: u16) -> bool {
        duration >= 1
            && self.contains(start)
            && u32::from(start) + u32::from(duration) <= u32::from(self.end_bound())
    }

    /// All bookable slots, in order
    pub fn slots(&self) -> impl Iterator<Item = Slot> {
        self.opening_hour..self.end_bound()
    }
}

impl Default for DayGrid {
    fn default() -> Self {
        Self {
            opening_hour: Self::DEFAULT_OPENING_HOUR,
            slot_count: Self::DEFAULT_SLOT_COUNT,
        }
    }
}

/// Engine-wide configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub day: DayGrid,
}

/// Outcome of a coordinator operation that can be refused.
///
/// Refusals are expected in normal operation and are not errors: only
/// unknown identities surface as [`crate::ScheduleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingOutcome {
    /// All checks passed and every store write was applied
    Confirmed,
    /// The requested range runs off the grid or a covered slot is occupied
    TimeUnavailable,
    /// Capacity outside the permitted `max(2, occupancy) ..= room capacity`
    CapacityOutOfRange,
    /// The person already holds a booking at the event's start slot
    PersonUnavailable,
    /// The attendee roster is at capacity
    RosterFull,
    /// The event's kind does not admit the request
    WrongEventType,
}

/// Result of [`crate::ScheduleCoordinator::create_event`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCreation {
    Scheduled(EventId),
    Refused(BookingOutcome),
}

impl EventCreation {
    /// The new event id, `None` when the creation was refused
    pub fn event_id(&self) -> Option<EventId> {
        match self {
            EventCreation::Scheduled(id) => Some(*id),
            EventCreation::Refused(_) => None,
        }
    }
}
