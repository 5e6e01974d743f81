//! Room registry: owns the set of rooms and answers availability queries

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;

use crate::api::types::{DayGrid, EventId, RoomId, Slot};
use crate::errors::{Result, ScheduleError};
use crate::rooms::room::Room;

/// Owns every room in the system. Rooms are created once and never
/// deleted; ids are assigned monotonically starting at 1.
pub struct RoomRegistry {
    rooms: DashMap<RoomId, Room>,
    next_id: AtomicU32,
    day: DayGrid,
}

impl RoomRegistry {
    pub fn new(day: DayGrid) -> Self {
        Self {
            rooms: DashMap::new(),
            next_id: AtomicU32::new(0),
            day,
        }
    }

    /// The grid shared by all rooms in this registry
    pub fn day(&self) -> DayGrid {
        self.day
    }

    /// Allocate a new room. Capacity must be at least 2.
    pub async fn create_room(&self, capacity: u32) -> Result<RoomId> {
        if capacity < 2 {
            return Err(ScheduleError::invalid_capacity(format!(
                "room capacity must be at least 2, got {capacity}"
            )));
        }
        let id = RoomId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.rooms.insert(id, Room::new(id, capacity, self.day));
        tracing::info!("Created room {} with capacity {}", id, capacity);
        Ok(id)
    }

    pub fn contains(&self, room: RoomId) -> bool {
        self.rooms.contains_key(&room)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Whether `[start, start + duration)` is on the grid and every
    /// covered slot free in `room`
    pub async fn is_range_free(&self, room: RoomId, start: Slot, duration: u16) -> Result<bool> {
        let entry = self
            .rooms
            .get(&room)
            .ok_or(ScheduleError::RoomNotFound(room))?;
        Ok(entry.is_range_free(start, duration))
    }

    /// Write `event` into every covered slot of `room`.
    ///
    /// The caller must have just observed `is_range_free == true` for the
    /// same arguments; cells are overwritten without re-checking, so a
    /// violated precondition surfaces in the audit rather than being
    /// masked here.
    pub async fn occupy(
        &self,
        room: RoomId,
        start: Slot,
        duration: u16,
        event: EventId,
    ) -> Result<()> {
        let mut entry = self
            .rooms
            .get_mut(&room)
            .ok_or(ScheduleError::RoomNotFound(room))?;
        entry.occupy(start, duration, event);
        tracing::debug!(
            "Room {} occupied by event {} at slots {}..{}",
            room,
            event,
            start,
            start + duration
        );
        Ok(())
    }

    /// Clear every slot of `room` held by `event`. Idempotent.
    pub async fn release(&self, room: RoomId, event: EventId) -> Result<()> {
        let mut entry = self
            .rooms
            .get_mut(&room)
            .ok_or(ScheduleError::RoomNotFound(room))?;
        if entry.release(event) {
            tracing::debug!("Room {} released by event {}", room, event);
        }
        Ok(())
    }

    pub async fn capacity_of(&self, room: RoomId) -> Result<u32> {
        let entry = self
            .rooms
            .get(&room)
            .ok_or(ScheduleError::RoomNotFound(room))?;
        Ok(entry.capacity())
    }

    /// Whole-grid view of one room, for display and audit
    pub async fn grid_of(&self, room: RoomId) -> Result<BTreeMap<Slot, Option<EventId>>> {
        let entry = self
            .rooms
            .get(&room)
            .ok_or(ScheduleError::RoomNotFound(room))?;
        Ok(entry.grid_snapshot())
    }

    /// Ids of all rooms, in allocation order
    pub fn room_ids(&self) -> Vec<RoomId> {
        let mut ids: Vec<RoomId> = self.rooms.iter().map(|entry| *entry.key()).collect();
        ids.sort();
        ids
    }
}
