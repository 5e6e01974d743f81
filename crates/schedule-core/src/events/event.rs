//! Event entity: placement, rosters and lifecycle

use serde::{Deserialize, Serialize};

use crate::api::types::{EventId, EventKind, RoomId, Slot};
use confero_directory_core::PersonId;

/// Lifecycle of an event record. Cancelled records stay in the catalog
/// forever so audit queries keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Active,
    Cancelled,
}

/// Room-time span an active event occupies, half-open `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub room: RoomId,
    pub start: Slot,
    pub end: Slot,
}

impl Placement {
    pub fn duration(&self) -> u16 {
        self.end - self.start
    }

    /// The slots this placement covers
    pub fn slots(&self) -> impl Iterator<Item = Slot> {
        self.start..self.end
    }
}

/// One event in the catalog.
///
/// `placement` is `Some` exactly while the record is active; cancelling
/// clears it and flips the status, leaving name and rosters intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub name: String,
    pub capacity: u32,
    pub kind: EventKind,
    pub status: EventStatus,
    pub placement: Option<Placement>,
    pub attendees: Vec<PersonId>,
    pub speakers: Vec<PersonId>,
}

impl EventRecord {
    pub(crate) fn new(id: EventId, name: &str, capacity: u32, placement: Placement) -> Self {
        Self {
            id,
            name: name.to_string(),
            capacity,
            kind: EventKind::SingleSpeaker,
            status: EventStatus::Active,
            placement: Some(placement),
            attendees: Vec::new(),
            speakers: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == EventStatus::Active
    }

    /// Whether the attendee roster has reached capacity
    pub fn is_full(&self) -> bool {
        self.attendees.len() as u32 >= self.capacity
    }

    pub fn has_attendee(&self, person: &PersonId) -> bool {
        self.attendees.contains(person)
    }

    pub fn has_speaker(&self, person: &PersonId) -> bool {
        self.speakers.contains(person)
    }

    /// Attendees plus speakers, the floor for capacity changes
    pub fn occupancy(&self) -> u32 {
        (self.attendees.len() + self.speakers.len()) as u32
    }

    pub(crate) fn cancel(&mut self) {
        self.status = EventStatus::Cancelled;
        self.placement = None;
    }
}
