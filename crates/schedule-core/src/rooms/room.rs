//! Room entity with its bookable day grid

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::types::{DayGrid, EventId, RoomId, Slot};

/// A physical room: fixed capacity plus one grid cell per bookable slot.
///
/// Each cell holds at most one event id. Occupied cells are exactly the
/// slots covered by a non-cancelled event placed in this room; the
/// registry enforces that callers check availability before occupying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    capacity: u32,
    day: DayGrid,
    cells: Vec<Option<EventId>>,
}

impl Room {
    pub(crate) fn new(id: RoomId, capacity: u32, day: DayGrid) -> Self {
        Self {
            id,
            capacity,
            day,
            cells: vec![None; day.slot_count as usize],
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn day(&self) -> DayGrid {
        self.day
    }

    fn index_of(&self, slot: Slot) -> Option<usize> {
        self.day
            .contains(slot)
            .then(|| usize::from(slot - self.day.opening_hour))
    }

    /// The event holding `slot`, `None` when free or off the grid
    pub fn occupant(&self, slot: Slot) -> Option<EventId> {
        self.index_of(slot).and_then(|i| self.cells[i])
    }

    /// Whether `[start, start + duration)` is on the grid with every
    /// covered cell free
    pub fn is_range_free(&self, start: Slot, duration: u16) -> bool {
        if !self.day.contains_range(start, duration) {
            return false;
        }
        (start..start + duration).all(|slot| self.occupant(slot).is_none())
    }

    /// Writes `event` into every covered cell. The caller must have just
    /// observed `is_range_free == true` for the same arguments.
    pub(crate) fn occupy(&mut self, start: Slot, duration: u16, event: EventId) {
        for slot in start..start + duration {
            if let Some(i) = self.index_of(slot) {
                self.cells[i] = Some(event);
            }
        }
    }

    /// Clears every cell held by `event`; returns whether any cell matched
    pub(crate) fn release(&mut self, event: EventId) -> bool {
        let mut cleared = false;
        for cell in self.cells.iter_mut() {
            if *cell == Some(event) {
                *cell = None;
                cleared = true;
            }
        }
        cleared
    }

    /// Whole-grid view keyed by slot, for display and audit
    pub fn grid_snapshot(&self) -> BTreeMap<Slot, Option<EventId>> {
        self.day
            .slots()
            .map(|slot| (slot, self.occupant(slot)))
            .collect()
    }
}
