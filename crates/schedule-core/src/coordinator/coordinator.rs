//! Coordinator construction and read-side passthroughs

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::api::types::{EventId, RoomId, SchedulerConfig, Slot};
use crate::calendar::PersonCalendar;
use crate::errors::Result;
use crate::events::{EventCatalog, EventRecord};
use crate::rooms::RoomRegistry;
use confero_directory_core::{PersonDirectory, PersonId};

/// Owns the room registry, event catalog and both person calendars, and
/// consults the person directory for identity and standing. Cheap to
/// share: construction hands back an `Arc` and every method takes `&self`.
pub struct ScheduleCoordinator {
    pub(crate) rooms: Arc<RoomRegistry>,
    pub(crate) catalog: Arc<EventCatalog>,
    /// Slots a person spends in the audience
    pub(crate) attending: Arc<PersonCalendar>,
    /// Slots a person spends on stage
    pub(crate) hosting: Arc<PersonCalendar>,
    pub(crate) directory: Arc<dyn PersonDirectory>,
    config: SchedulerConfig,
}

impl ScheduleCoordinator {
    pub fn new(config: SchedulerConfig, directory: Arc<dyn PersonDirectory>) -> Arc<Self> {
        let rooms = Arc::new(RoomRegistry::new(config.day));
        let catalog = Arc::new(EventCatalog::new(rooms.clone()));
        tracing::info!(
            "Schedule coordinator starting with day grid {}..{}",
            config.day.opening_hour,
            config.day.end_bound()
        );
        Arc::new(Self {
            rooms,
            catalog,
            attending: Arc::new(PersonCalendar::new("attending")),
            hosting: Arc::new(PersonCalendar::new("hosting")),
            directory,
            config,
        })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    // Read passthroughs for callers that hold only the coordinator.

    pub async fn room_grid(&self, room: RoomId) -> Result<BTreeMap<Slot, Option<EventId>>> {
        self.rooms.grid_of(room).await
    }

    pub async fn event_snapshot(&self, event: EventId) -> Option<EventRecord> {
        self.catalog.snapshot(event).await
    }

    pub async fn attending_schedule_of(&self, person: &PersonId) -> BTreeMap<Slot, EventId> {
        self.attending.schedule_of(person).await
    }

    pub async fn hosting_schedule_of(&self, person: &PersonId) -> BTreeMap<Slot, EventId> {
        self.hosting.schedule_of(person).await
    }
}

impl fmt::Debug for ScheduleCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleCoordinator")
            .field("rooms", &self.rooms.room_count())
            .field("day", &self.config.day)
            .finish()
    }
}
