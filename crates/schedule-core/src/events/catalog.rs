//! Event catalog: the source of truth for event records
//!
//! The catalog owns every event ever created, including soft-deleted
//! ones, and consults the room registry at creation and cancellation
//! time. After creation a room's occupied slots derive from the catalog;
//! they are never recomputed.
//!
//! Calendar cleanup is deliberately NOT done here: the coordinator reads
//! the rosters and unbooks every member before asking the catalog to
//! cancel, because cancellation destroys the placement the unbooking
//! needs.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::api::types::{EventId, EventKind, RoomId, Slot};
use crate::errors::{Result, ScheduleError};
use crate::events::event::{EventRecord, Placement};
use crate::rooms::RoomRegistry;
use confero_directory_core::PersonId;

pub struct EventCatalog {
    events: DashMap<EventId, EventRecord>,
    next_id: AtomicU32,
    rooms: Arc<RoomRegistry>,
}

impl EventCatalog {
    pub fn new(rooms: Arc<RoomRegistry>) -> Self {
        Self {
            events: DashMap::new(),
            next_id: AtomicU32::new(0),
            rooms,
        }
    }

    /// Create an event occupying `[start, end)` in `room`.
    ///
    /// Validation order is part of the contract, since callers branch on
    /// the distinct failures: unknown room first, then the start slot,
    /// then range availability. Event-capacity bounds are the
    /// coordinator's pre-check, not re-validated here.
    pub async fn create_event(
        &self,
        room: RoomId,
        start: Slot,
        end: Slot,
        name: &str,
        capacity: u32,
    ) -> Result<EventId> {
        if !self.rooms.contains(room) {
            return Err(ScheduleError::RoomNotFound(room));
        }
        let day = self.rooms.day();
        if !day.contains(start) {
            return Err(ScheduleError::invalid_time(format!(
                "start slot {start} is outside the day grid"
            )));
        }
        if end <= start {
            return Err(ScheduleError::invalid_time(format!(
                "event must span at least one slot, got {start}..{end}"
            )));
        }
        let duration = end - start;
        if !self.rooms.is_range_free(room, start, duration).await? {
            return Err(ScheduleError::invalid_time(format!(
                "slots {start}..{end} are not free in room {room}"
            )));
        }

        let id = EventId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.rooms.occupy(room, start, duration, id).await?;
        let placement = Placement { room, start, end };
        self.events
            .insert(id, EventRecord::new(id, name, capacity, placement));
        tracing::info!(
            "Created event {} ({:?}) in room {} at slots {}..{}",
            id,
            name,
            room,
            start,
            end
        );
        Ok(id)
    }

    /// Change the admission kind. Fails for unknown or cancelled events.
    pub async fn set_kind(&self, event: EventId, kind: EventKind) -> Result<()> {
        match self.events.get_mut(&event) {
            Some(mut record) if record.is_active() => {
                record.kind = kind;
                tracing::debug!("Event {} kind set to {:?}", event, kind);
                Ok(())
            }
            _ => Err(ScheduleError::EventNotFound(event)),
        }
    }

    /// Overwrite the capacity. Fails when the new value exceeds the
    /// owning room's capacity; the roster-occupancy floor is the
    /// coordinator's concern.
    pub async fn set_capacity(&self, event: EventId, capacity: u32) -> Result<()> {
        let room = self
            .placement_of(event)
            .ok_or(ScheduleError::EventNotFound(event))?
            .room;
        let room_capacity = self.rooms.capacity_of(room).await?;
        if capacity > room_capacity {
            return Err(ScheduleError::invalid_capacity(format!(
                "event capacity {capacity} exceeds room capacity {room_capacity}"
            )));
        }
        if let Some(mut record) = self.events.get_mut(&event) {
            record.capacity = capacity;
        }
        Ok(())
    }

    /// Soft-delete: release the room grid and clear the placement, keeping
    /// name and rosters for audit. Fails for unknown or already cancelled
    /// events. The id is never reused and never again occupies a cell.
    pub async fn cancel_event(&self, event: EventId) -> Result<()> {
        let placement = self
            .placement_of(event)
            .ok_or(ScheduleError::EventNotFound(event))?;
        self.rooms.release(placement.room, event).await?;
        if let Some(mut record) = self.events.get_mut(&event) {
            record.cancel();
        }
        tracing::info!("Cancelled event {}", event);
        Ok(())
    }

    /// Roster-only attendee admission. Returns false when the event is
    /// unknown or cancelled, the person is already on the roster, or the
    /// roster is at capacity. Never touches calendars.
    pub async fn add_attendee(&self, event: EventId, person: &PersonId) -> bool {
        match self.events.get_mut(&event) {
            Some(mut record) if record.is_active() => {
                if record.has_attendee(person) || record.is_full() {
                    return false;
                }
                record.attendees.push(person.clone());
                tracing::debug!("Event {} attendee roster gained {}", event, person);
                true
            }
            _ => false,
        }
    }

    /// Roster-only speaker admission. Returns false when the event is
    /// unknown or cancelled, the person already speaks, or a speaker is
    /// already booked and the event is not multi-speaker.
    pub async fn add_speaker(&self, event: EventId, person: &PersonId) -> bool {
        match self.events.get_mut(&event) {
            Some(mut record) if record.is_active() => {
                if record.has_speaker(person) {
                    return false;
                }
                if !record.speakers.is_empty() && record.kind != EventKind::MultiSpeaker {
                    return false;
                }
                record.speakers.push(person.clone());
                tracing::debug!("Event {} speaker roster gained {}", event, person);
                true
            }
            _ => false,
        }
    }

    /// Roster-only removal; no-op when the person is absent
    pub async fn remove_attendee(&self, event: EventId, person: &PersonId) {
        if let Some(mut record) = self.events.get_mut(&event) {
            record.attendees.retain(|p| p != person);
        }
    }

    /// Roster-only removal; no-op when the person is absent
    pub async fn remove_speaker(&self, event: EventId, person: &PersonId) {
        if let Some(mut record) = self.events.get_mut(&event) {
            record.speakers.retain(|p| p != person);
        }
    }

    // ---- Query accessors ----
    //
    // All accessors are total: unknown ids yield `None`, empty or false
    // rather than an error, because callers treat "not found" as an
    // ordinary branch. Placement-derived accessors yield `None` for
    // cancelled events; name and rosters remain readable forever.

    fn placement_of(&self, event: EventId) -> Option<Placement> {
        self.events
            .get(&event)
            .filter(|record| record.is_active())
            .and_then(|record| record.placement)
    }

    /// Whether the event exists and is active
    pub async fn contains(&self, event: EventId) -> bool {
        self.events
            .get(&event)
            .map(|record| record.is_active())
            .unwrap_or(false)
    }

    pub async fn name_of(&self, event: EventId) -> Option<String> {
        self.events.get(&event).map(|record| record.name.clone())
    }

    pub async fn room_of(&self, event: EventId) -> Option<RoomId> {
        self.placement_of(event).map(|p| p.room)
    }

    pub async fn start_of(&self, event: EventId) -> Option<Slot> {
        self.placement_of(event).map(|p| p.start)
    }

    pub async fn end_of(&self, event: EventId) -> Option<Slot> {
        self.placement_of(event).map(|p| p.end)
    }

    pub async fn kind_of(&self, event: EventId) -> Option<EventKind> {
        self.events.get(&event).map(|record| record.kind)
    }

    pub async fn capacity_of(&self, event: EventId) -> Option<u32> {
        self.events.get(&event).map(|record| record.capacity)
    }

    pub async fn attendees_of(&self, event: EventId) -> Vec<PersonId> {
        self.events
            .get(&event)
            .map(|record| record.attendees.clone())
            .unwrap_or_default()
    }

    pub async fn speakers_of(&self, event: EventId) -> Vec<PersonId> {
        self.events
            .get(&event)
            .map(|record| record.speakers.clone())
            .unwrap_or_default()
    }

    pub async fn has_attendee(&self, event: EventId, person: &PersonId) -> bool {
        self.events
            .get(&event)
            .map(|record| record.has_attendee(person))
            .unwrap_or(false)
    }

    pub async fn has_speaker(&self, event: EventId, person: &PersonId) -> bool {
        self.events
            .get(&event)
            .map(|record| record.has_speaker(person))
            .unwrap_or(false)
    }

    /// Whether the attendee roster is at capacity; false for unknown ids
    pub async fn is_full(&self, event: EventId) -> bool {
        self.events
            .get(&event)
            .map(|record| record.is_full())
            .unwrap_or(false)
    }

    /// Full record clone, including cancelled events
    pub async fn snapshot(&self, event: EventId) -> Option<EventRecord> {
        self.events.get(&event).map(|record| record.clone())
    }

    /// Every record ever created, in id order
    pub async fn records(&self) -> Vec<EventRecord> {
        let mut records: Vec<EventRecord> =
            self.events.iter().map(|entry| entry.value().clone()).collect();
        records.sort_by_key(|record| record.id);
        records
    }

    /// Ids of every record ever created, in id order
    pub async fn event_ids(&self) -> Vec<EventId> {
        let mut ids: Vec<EventId> = self.events.iter().map(|entry| *entry.key()).collect();
        ids.sort();
        ids
    }
}
