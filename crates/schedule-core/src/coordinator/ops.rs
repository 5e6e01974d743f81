//! Compound write operations
//!
//! Unknown rooms, events and people surface as errors; conditions a
//! well-behaved caller can run into, like a taken slot or a full roster,
//! come back as a [`BookingOutcome`] so the caller can branch without
//! pattern-matching error text.

use crate::api::types::{BookingOutcome, EventCreation, EventId, EventKind, RoomId, Slot};
use crate::errors::{Result, ScheduleError};
use crate::ScheduleCoordinator;
use confero_directory_core::{PersonId, Standing};

impl ScheduleCoordinator {
    pub async fn create_room(&self, capacity: u32) -> Result<RoomId> {
        self.rooms.create_room(capacity).await
    }

    /// Create an event in `room` spanning `[start, end)`.
    ///
    /// Capacity must seat at least two people (a speaker and one
    /// attendee) and fit the room. A taken or out-of-grid time range is
    /// an ordinary refusal; only an unknown room is an error.
    pub async fn create_event(
        &self,
        room: RoomId,
        start: Slot,
        end: Slot,
        name: &str,
        capacity: u32,
    ) -> Result<EventCreation> {
        let room_capacity = self.rooms.capacity_of(room).await?;
        if capacity < 2 || capacity > room_capacity {
            return Ok(EventCreation::Refused(BookingOutcome::CapacityOutOfRange));
        }
        match self.catalog.create_event(room, start, end, name, capacity).await {
            Ok(id) => Ok(EventCreation::Scheduled(id)),
            Err(ScheduleError::InvalidTime(_)) => {
                Ok(EventCreation::Refused(BookingOutcome::TimeUnavailable))
            }
            Err(other) => Err(other),
        }
    }

    /// Put `person` on the speaker roster and block their hosting
    /// calendar at the event's start slot.
    ///
    /// Checks, in order: the person is known, the event is active, the
    /// person's hosting calendar is free at the start slot, and the
    /// event still has speaker room (one speaker unless multi-speaker).
    /// Nothing is written until all checks pass.
    pub async fn add_speaker(&self, event: EventId, person: &PersonId) -> Result<BookingOutcome> {
        if !self.directory.exists(person).await {
            return Err(ScheduleError::PersonNotFound(person.clone()));
        }
        let start = self
            .catalog
            .start_of(event)
            .await
            .ok_or(ScheduleError::EventNotFound(event))?;
        if !self.hosting.is_free(person, start).await {
            return Ok(BookingOutcome::PersonUnavailable);
        }
        let kind = self.catalog.kind_of(event).await;
        let speakers = self.catalog.speakers_of(event).await;
        if speakers.contains(person) {
            return Ok(BookingOutcome::PersonUnavailable);
        }
        if !speakers.is_empty() && kind != Some(EventKind::MultiSpeaker) {
            return Ok(BookingOutcome::WrongEventType);
        }

        if !self.catalog.add_speaker(event, person).await {
            return Err(ScheduleError::consistency(format!(
                "event {event} refused speaker {person} after checks passed"
            )));
        }
        self.hosting.book(person, start, event).await;
        tracing::info!("{} booked as speaker for event {} at slot {}", person, event, start);
        Ok(BookingOutcome::Confirmed)
    }

    /// Put `person` on the attendee roster and block their attending
    /// calendar at the event's start slot.
    ///
    /// Checks, in order: the person is known, the event is active, their
    /// attending calendar is free at the start slot, VIP-only events
    /// admit only VIP standing, and the roster has a seat left.
    pub async fn add_attendee(&self, event: EventId, person: &PersonId) -> Result<BookingOutcome> {
        if !self.directory.exists(person).await {
            return Err(ScheduleError::PersonNotFound(person.clone()));
        }
        let start = self
            .catalog
            .start_of(event)
            .await
            .ok_or(ScheduleError::EventNotFound(event))?;
        if !self.attending.is_free(person, start).await {
            return Ok(BookingOutcome::PersonUnavailable);
        }
        if self.catalog.has_attendee(event, person).await {
            return Ok(BookingOutcome::PersonUnavailable);
        }
        if self.catalog.kind_of(event).await == Some(EventKind::VipOnly)
            && self.directory.standing(person).await != Some(Standing::Vip)
        {
            return Ok(BookingOutcome::WrongEventType);
        }
        if self.catalog.is_full(event).await {
            return Ok(BookingOutcome::RosterFull);
        }

        if !self.catalog.add_attendee(event, person).await {
            return Err(ScheduleError::consistency(format!(
                "event {event} refused attendee {person} after checks passed"
            )));
        }
        self.attending.book(person, start, event).await;
        tracing::info!("{} booked as attendee for event {} at slot {}", person, event, start);
        Ok(BookingOutcome::Confirmed)
    }

    /// Cancel an event and free everything it holds.
    ///
    /// Calendars are unbooked before the catalog cancels, because
    /// cancellation clears the placement the unbooking is keyed by.
    pub async fn cancel_event(&self, event: EventId) -> Result<()> {
        let start = self
            .catalog
            .start_of(event)
            .await
            .ok_or(ScheduleError::EventNotFound(event))?;
        for speaker in self.catalog.speakers_of(event).await {
            self.hosting.unbook(&speaker, start).await;
        }
        for attendee in self.catalog.attendees_of(event).await {
            self.attending.unbook(&attendee, start).await;
        }
        self.catalog.cancel_event(event).await
    }

    /// Resize the attendee roster. Refused below the seated headcount
    /// plus a floor of two, or above the room's capacity.
    pub async fn set_capacity(&self, event: EventId, capacity: u32) -> Result<BookingOutcome> {
        let record = self
            .catalog
            .snapshot(event)
            .await
            .filter(|record| record.is_active())
            .ok_or(ScheduleError::EventNotFound(event))?;
        let floor = record.occupancy().max(2);
        if capacity < floor {
            return Ok(BookingOutcome::CapacityOutOfRange);
        }
        match self.catalog.set_capacity(event, capacity).await {
            Ok(()) => Ok(BookingOutcome::Confirmed),
            Err(ScheduleError::InvalidCapacity(_)) => Ok(BookingOutcome::CapacityOutOfRange),
            Err(other) => Err(other),
        }
    }

    /// Take `person` off the attendee roster and release their calendar
    /// entry. No-op on the roster side when they were never booked; the
    /// calendar is only released if it points at this event.
    pub async fn remove_attendee(&self, event: EventId, person: &PersonId) -> Result<()> {
        let start = self
            .catalog
            .start_of(event)
            .await
            .ok_or(ScheduleError::EventNotFound(event))?;
        if self.attending.entry_at(person, start).await == Some(event) {
            self.attending.unbook(person, start).await;
        }
        self.catalog.remove_attendee(event, person).await;
        Ok(())
    }

    /// Speaker-side counterpart of [`remove_attendee`](Self::remove_attendee)
    pub async fn remove_speaker(&self, event: EventId, person: &PersonId) -> Result<()> {
        let start = self
            .catalog
            .start_of(event)
            .await
            .ok_or(ScheduleError::EventNotFound(event))?;
        if self.hosting.entry_at(person, start).await == Some(event) {
            self.hosting.unbook(person, start).await;
        }
        self.catalog.remove_speaker(event, person).await;
        Ok(())
    }

    /// Change the event kind. Demoting a multi-speaker event is refused
    /// while more than one speaker is booked.
    pub async fn set_event_kind(&self, event: EventId, kind: EventKind) -> Result<BookingOutcome> {
        let record = self
            .catalog
            .snapshot(event)
            .await
            .filter(|record| record.is_active())
            .ok_or(ScheduleError::EventNotFound(event))?;
        if kind != EventKind::MultiSpeaker && record.speakers.len() > 1 {
            return Ok(BookingOutcome::WrongEventType);
        }
        self.catalog.set_kind(event, kind).await?;
        Ok(BookingOutcome::Confirmed)
    }
}
