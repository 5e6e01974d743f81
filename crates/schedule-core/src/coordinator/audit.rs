//! Cross-component consistency audit
//!
//! Walks every store and verifies that the room grids, the catalog and
//! both calendars agree. Intended for tests and operational checks; the
//! first violation found is reported as a consistency error.

use crate::calendar::PersonCalendar;
use crate::errors::{Result, ScheduleError};
use crate::events::{EventRecord, EventStatus};
use crate::ScheduleCoordinator;

impl ScheduleCoordinator {
    /// Verify the cross-store invariants:
    ///
    /// 1. every active event's placement slots are marked with its id in
    ///    the room grid, and cancelled events hold no placement;
    /// 2. every occupied grid cell belongs to an active event placed in
    ///    that room over that slot;
    /// 3. every calendar entry points at an active event at its start
    ///    slot whose matching roster lists the person;
    /// 4. every roster member has the matching calendar entry.
    pub async fn audit(&self) -> Result<()> {
        let records = self.catalog.records().await;

        for record in &records {
            match (record.status, record.placement) {
                (EventStatus::Active, Some(placement)) => {
                    let grid = self.rooms.grid_of(placement.room).await?;
                    for slot in placement.slots() {
                        if grid.get(&slot).copied().flatten() != Some(record.id) {
                            return Err(ScheduleError::consistency(format!(
                                "event {} placed at room {} slot {} but the grid disagrees",
                                record.id, placement.room, slot
                            )));
                        }
                    }
                }
                (EventStatus::Active, None) => {
                    return Err(ScheduleError::consistency(format!(
                        "active event {} has no placement",
                        record.id
                    )));
                }
                (EventStatus::Cancelled, Some(_)) => {
                    return Err(ScheduleError::consistency(format!(
                        "cancelled event {} still holds a placement",
                        record.id
                    )));
                }
                (EventStatus::Cancelled, None) => {}
            }
        }

        for room in self.rooms.room_ids() {
            let grid = self.rooms.grid_of(room).await?;
            for (slot, occupant) in grid {
                let Some(event) = occupant else { continue };
                let covered = records.iter().any(|record| {
                    record.is_active()
                        && record.placement.is_some_and(|p| {
                            p.room == room && p.slots().any(|s| s == slot)
                        })
                        && record.id == event
                });
                if !covered {
                    return Err(ScheduleError::consistency(format!(
                        "room {room} slot {slot} is marked for event {event} with no matching placement"
                    )));
                }
            }
        }

        check_calendar(&self.attending, &records, CalendarSide::Attending).await?;
        check_calendar(&self.hosting, &records, CalendarSide::Hosting).await?;

        for record in &records {
            let Some(placement) = record.placement.filter(|_| record.is_active()) else {
                continue;
            };
            for speaker in &record.speakers {
                if self.hosting.entry_at(speaker, placement.start).await != Some(record.id) {
                    return Err(ScheduleError::consistency(format!(
                        "speaker {} of event {} has no hosting entry at slot {}",
                        speaker, record.id, placement.start
                    )));
                }
            }
            for attendee in &record.attendees {
                if self.attending.entry_at(attendee, placement.start).await != Some(record.id) {
                    return Err(ScheduleError::consistency(format!(
                        "attendee {} of event {} has no attending entry at slot {}",
                        attendee, record.id, placement.start
                    )));
                }
            }
        }

        Ok(())
    }
}

#[derive(Clone, Copy)]
enum CalendarSide {
    Attending,
    Hosting,
}

/// Check 3: every entry in `calendar` is backed by an active event whose
/// matching roster lists the person.
async fn check_calendar(
    calendar: &PersonCalendar,
    records: &[EventRecord],
    side: CalendarSide,
) -> Result<()> {
    for person in calendar.people().await {
        for (slot, event) in calendar.schedule_of(&person).await {
            let record = records.iter().find(|record| record.id == event);
            let valid = record.is_some_and(|record| {
                let roster = match side {
                    CalendarSide::Attending => &record.attendees,
                    CalendarSide::Hosting => &record.speakers,
                };
                record.is_active()
                    && record.placement.is_some_and(|p| p.start == slot)
                    && roster.contains(&person)
            });
            if !valid {
                return Err(ScheduleError::consistency(format!(
                    "calendar entry for {person} at slot {slot} names event {event} which does not back it"
                )));
            }
        }
    }
    Ok(())
}
