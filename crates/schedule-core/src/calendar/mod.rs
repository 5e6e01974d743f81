//! Per-person slot calendars
//!
//! A calendar maps each person to the events that claim their time,
//! keyed by start slot only. An entry blocks the whole start slot
//! regardless of event duration; two events whose spans overlap but
//! whose start slots differ do not collide here. The coordinator keeps
//! two of these, one for attending and one for hosting, and a person is
//! checked against only the relevant one.

use std::collections::BTreeMap;

use dashmap::DashMap;

use crate::api::types::{EventId, Slot};
use confero_directory_core::PersonId;

pub struct PersonCalendar {
    /// Appears in trace output to tell the two coordinator calendars apart
    label: &'static str,
    entries: DashMap<PersonId, BTreeMap<Slot, EventId>>,
}

impl PersonCalendar {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            entries: DashMap::new(),
        }
    }

    /// Whether the person has no entry at `slot`. People with no
    /// calendar at all are free everywhere.
    pub async fn is_free(&self, person: &PersonId, slot: Slot) -> bool {
        self.entries
            .get(person)
            .map(|schedule| !schedule.contains_key(&slot))
            .unwrap_or(true)
    }

    /// Record an entry, overwriting any previous one at the same slot.
    /// Callers check `is_free` first; overwriting is not an error here.
    pub async fn book(&self, person: &PersonId, slot: Slot, event: EventId) {
        self.entries
            .entry(person.clone())
            .or_default()
            .insert(slot, event);
        tracing::debug!(
            "{} calendar: booked {} at slot {} for event {}",
            self.label,
            person,
            slot,
            event
        );
    }

    /// Remove the entry at `slot`; no-op when absent. Empty calendars are
    /// dropped so `people()` lists only people with entries.
    pub async fn unbook(&self, person: &PersonId, slot: Slot) {
        let now_empty = match self.entries.get_mut(person) {
            Some(mut schedule) => {
                schedule.remove(&slot);
                schedule.is_empty()
            }
            None => return,
        };
        if now_empty {
            self.entries.remove(person);
        }
        tracing::debug!(
            "{} calendar: unbooked {} at slot {}",
            self.label,
            person,
            slot
        );
    }

    pub async fn entry_at(&self, person: &PersonId, slot: Slot) -> Option<EventId> {
        self.entries
            .get(person)
            .and_then(|schedule| schedule.get(&slot).copied())
    }

    /// The person's full schedule in slot order; empty for unknown people
    pub async fn schedule_of(&self, person: &PersonId) -> BTreeMap<Slot, EventId> {
        self.entries
            .get(person)
            .map(|schedule| schedule.clone())
            .unwrap_or_default()
    }

    /// Drop every entry for the person
    pub async fn clear(&self, person: &PersonId) {
        self.entries.remove(person);
    }

    /// Everyone with at least one entry
    pub async fn people(&self) -> Vec<PersonId> {
        let mut people: Vec<PersonId> =
            self.entries.iter().map(|entry| entry.key().clone()).collect();
        people.sort();
        people
    }
}
