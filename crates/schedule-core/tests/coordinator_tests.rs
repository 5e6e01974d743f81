//! End-to-end coordinator tests
//!
//! Each test builds a coordinator over an in-memory person directory,
//! drives it through the public compound operations, and finishes with
//! an `audit()` where cross-store state was touched.

use std::sync::Arc;

use confero_directory_core::{InMemoryDirectory, PersonProfile, Role};
use confero_schedule_core::{
    BookingOutcome, DayGrid, EventCreation, EventId, EventKind, RoomId, ScheduleCoordinator,
    ScheduleError, SchedulerConfig,
};
use pretty_assertions::assert_eq;

async fn setup() -> Arc<ScheduleCoordinator> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    let directory = Arc::new(InMemoryDirectory::new());
    for (id, name, role) in [
        ("alice", "Alice", Role::Speaker),
        ("bob", "Bob", Role::Speaker),
        ("carol", "Carol", Role::Attendee),
        ("dave", "Dave", Role::Attendee),
        ("vera", "Vera", Role::Vip),
    ] {
        directory
            .register(PersonProfile::new(id, name, role))
            .await
            .unwrap();
    }
    ScheduleCoordinator::new(SchedulerConfig::default(), directory)
}

async fn scheduled(coordinator: &ScheduleCoordinator, creation: EventCreation) -> EventId {
    match creation {
        EventCreation::Scheduled(id) => {
            assert!(coordinator.catalog().contains(id).await);
            id
        }
        EventCreation::Refused(outcome) => panic!("expected a scheduled event, got {outcome:?}"),
    }
}

#[tokio::test]
async fn keynote_end_to_end() {
    let coordinator = setup().await;
    let room = coordinator.create_room(100).await.unwrap();

    let creation = coordinator
        .create_event(room, 9, 11, "Opening Keynote", 80)
        .await
        .unwrap();
    let keynote = scheduled(&coordinator, creation).await;

    assert_eq!(
        coordinator.add_speaker(keynote, &"alice".into()).await.unwrap(),
        BookingOutcome::Confirmed
    );
    assert_eq!(
        coordinator.add_attendee(keynote, &"carol".into()).await.unwrap(),
        BookingOutcome::Confirmed
    );

    // The keynote holds slots 9 and 10; 11 is free again.
    let grid = coordinator.room_grid(room).await.unwrap();
    assert_eq!(grid[&9], Some(keynote));
    assert_eq!(grid[&10], Some(keynote));
    assert_eq!(grid[&11], None);

    // A clashing event is refused, an adjacent one is not.
    assert_eq!(
        coordinator.create_event(room, 10, 12, "Clash", 10).await.unwrap(),
        EventCreation::Refused(BookingOutcome::TimeUnavailable)
    );
    let creation = coordinator.create_event(room, 11, 12, "Panel", 10).await.unwrap();
    scheduled(&coordinator, creation).await;

    assert_eq!(
        coordinator.attending_schedule_of(&"carol".into()).await[&9],
        keynote
    );
    assert_eq!(
        coordinator.hosting_schedule_of(&"alice".into()).await[&9],
        keynote
    );
    coordinator.audit().await.unwrap();
}

#[tokio::test]
async fn unknown_identities_are_errors_not_refusals() {
    let coordinator = setup().await;
    let room = coordinator.create_room(10).await.unwrap();
    let creation = coordinator.create_event(room, 9, 10, "Talk", 5).await.unwrap();
    let event = scheduled(&coordinator, creation).await;

    assert_eq!(
        coordinator.create_event(RoomId(99), 9, 10, "X", 5).await,
        Err(ScheduleError::RoomNotFound(RoomId(99)))
    );
    assert_eq!(
        coordinator.add_attendee(EventId(99), &"carol".into()).await,
        Err(ScheduleError::EventNotFound(EventId(99)))
    );
    assert_eq!(
        coordinator.add_attendee(event, &"nobody".into()).await,
        Err(ScheduleError::PersonNotFound("nobody".into()))
    );
    assert_eq!(
        coordinator.add_speaker(event, &"nobody".into()).await,
        Err(ScheduleError::PersonNotFound("nobody".into()))
    );
}

#[tokio::test]
async fn event_capacity_must_fit_the_room_and_seat_two() {
    let coordinator = setup().await;
    let room = coordinator.create_room(10).await.unwrap();

    assert_eq!(
        coordinator.create_event(room, 9, 10, "Tiny", 1).await.unwrap(),
        EventCreation::Refused(BookingOutcome::CapacityOutOfRange)
    );
    assert_eq!(
        coordinator.create_event(room, 9, 10, "Huge", 11).await.unwrap(),
        EventCreation::Refused(BookingOutcome::CapacityOutOfRange)
    );
    // Rooms below two seats cannot be created at all.
    assert_eq!(
        coordinator.create_room(1).await,
        Err(ScheduleError::InvalidCapacity(
            "room capacity must be at least 2, got 1".into()
        ))
    );
}

#[tokio::test]
async fn out_of_grid_times_are_refused() {
    let coordinator = setup().await;
    let room = coordinator.create_room(10).await.unwrap();

    for (start, end) in [(8, 9), (17, 19), (18, 19), (10, 10), (16, 19)] {
        assert_eq!(
            coordinator.create_event(room, start, end, "Bad", 5).await.unwrap(),
            EventCreation::Refused(BookingOutcome::TimeUnavailable),
            "expected {start}..{end} to be refused"
        );
    }
    // The last slot of the day is usable.
    let creation = coordinator.create_event(room, 17, 18, "Closing", 5).await.unwrap();
    scheduled(&coordinator, creation).await;
}

#[tokio::test]
async fn speaker_rules_single_and_multi() {
    let coordinator = setup().await;
    let room = coordinator.create_room(50).await.unwrap();
    let creation = coordinator.create_event(room, 9, 10, "Talk", 30).await.unwrap();
    let event = scheduled(&coordinator, creation).await;

    let alice = "alice".into();
    let bob = "bob".into();
    assert_eq!(
        coordinator.add_speaker(event, &alice).await.unwrap(),
        BookingOutcome::Confirmed
    );
    // A second speaker needs a multi-speaker event.
    assert_eq!(
        coordinator.add_speaker(event, &bob).await.unwrap(),
        BookingOutcome::WrongEventType
    );
    assert_eq!(
        coordinator.set_event_kind(event, EventKind::MultiSpeaker).await.unwrap(),
        BookingOutcome::Confirmed
    );
    assert_eq!(
        coordinator.add_speaker(event, &bob).await.unwrap(),
        BookingOutcome::Confirmed
    );
    // Demoting is refused while two speakers are booked.
    assert_eq!(
        coordinator.set_event_kind(event, EventKind::SingleSpeaker).await.unwrap(),
        BookingOutcome::WrongEventType
    );
    coordinator.remove_speaker(event, &bob).await.unwrap();
    assert_eq!(
        coordinator.set_event_kind(event, EventKind::SingleSpeaker).await.unwrap(),
        BookingOutcome::Confirmed
    );
    coordinator.audit().await.unwrap();
}

#[tokio::test]
async fn calendars_are_independent_per_role() {
    let coordinator = setup().await;
    let room = coordinator.create_room(50).await.unwrap();
    let other_room = coordinator.create_room(50).await.unwrap();
    let creation = coordinator.create_event(room, 9, 10, "Talk A", 30).await.unwrap();
    let talk_a = scheduled(&coordinator, creation).await;
    let creation = coordinator
        .create_event(other_room, 9, 10, "Talk B", 30)
        .await
        .unwrap();
    let talk_b = scheduled(&coordinator, creation).await;

    let alice = "alice".into();
    // Speaking at A does not block attending B: different calendars.
    assert_eq!(
        coordinator.add_speaker(talk_a, &alice).await.unwrap(),
        BookingOutcome::Confirmed
    );
    assert_eq!(
        coordinator.add_attendee(talk_b, &alice).await.unwrap(),
        BookingOutcome::Confirmed
    );
    // But a second engagement on the same calendar at the same slot is.
    assert_eq!(
        coordinator.add_speaker(talk_b, &alice).await.unwrap(),
        BookingOutcome::PersonUnavailable
    );
    assert_eq!(
        coordinator.add_attendee(talk_a, &alice).await.unwrap(),
        BookingOutcome::PersonUnavailable
    );
    coordinator.audit().await.unwrap();
}

#[tokio::test]
async fn vip_only_events_gate_on_standing() {
    let coordinator = setup().await;
    let room = coordinator.create_room(20).await.unwrap();
    let creation = coordinator.create_event(room, 14, 16, "Gala", 10).await.unwrap();
    let gala = scheduled(&coordinator, creation).await;
    coordinator
        .set_event_kind(gala, EventKind::VipOnly)
        .await
        .unwrap();

    assert_eq!(
        coordinator.add_attendee(gala, &"carol".into()).await.unwrap(),
        BookingOutcome::WrongEventType
    );
    assert_eq!(
        coordinator.add_attendee(gala, &"vera".into()).await.unwrap(),
        BookingOutcome::Confirmed
    );
    // Regular standing can still speak at a VIP-only event.
    assert_eq!(
        coordinator.add_speaker(gala, &"alice".into()).await.unwrap(),
        BookingOutcome::Confirmed
    );
    coordinator.audit().await.unwrap();
}

#[tokio::test]
async fn roster_full_and_capacity_floor() {
    let coordinator = setup().await;
    let room = coordinator.create_room(50).await.unwrap();
    let creation = coordinator.create_event(room, 9, 10, "Workshop", 2).await.unwrap();
    let event = scheduled(&coordinator, creation).await;

    coordinator.add_attendee(event, &"carol".into()).await.unwrap();
    coordinator.add_attendee(event, &"dave".into()).await.unwrap();
    assert_eq!(
        coordinator.add_attendee(event, &"vera".into()).await.unwrap(),
        BookingOutcome::RosterFull
    );

    // Two attendees plus a speaker put the floor at three.
    coordinator.add_speaker(event, &"alice".into()).await.unwrap();
    assert_eq!(
        coordinator.set_capacity(event, 2).await.unwrap(),
        BookingOutcome::CapacityOutOfRange
    );
    assert_eq!(
        coordinator.set_capacity(event, 3).await.unwrap(),
        BookingOutcome::Confirmed
    );
    assert_eq!(
        coordinator.add_attendee(event, &"vera".into()).await.unwrap(),
        BookingOutcome::RosterFull
    );
    // The room is the ceiling.
    assert_eq!(
        coordinator.set_capacity(event, 51).await.unwrap(),
        BookingOutcome::CapacityOutOfRange
    );
    coordinator.audit().await.unwrap();
}

#[tokio::test]
async fn cancellation_frees_grid_and_calendars() {
    let coordinator = setup().await;
    let room = coordinator.create_room(50).await.unwrap();
    let creation = coordinator.create_event(room, 9, 11, "Keynote", 30).await.unwrap();
    let keynote = scheduled(&coordinator, creation).await;

    let alice = "alice".into();
    let carol = "carol".into();
    coordinator.add_speaker(keynote, &alice).await.unwrap();
    coordinator.add_attendee(keynote, &carol).await.unwrap();

    coordinator.cancel_event(keynote).await.unwrap();
    coordinator.audit().await.unwrap();

    // Grid, calendars and active-event set all released.
    let grid = coordinator.room_grid(room).await.unwrap();
    assert!(grid.values().all(|cell| cell.is_none()));
    assert!(coordinator.attending_schedule_of(&carol).await.is_empty());
    assert!(coordinator.hosting_schedule_of(&alice).await.is_empty());
    assert!(!coordinator.catalog().contains(keynote).await);

    // Cancelled events cannot be cancelled again or booked into.
    assert_eq!(
        coordinator.cancel_event(keynote).await,
        Err(ScheduleError::EventNotFound(keynote))
    );
    assert_eq!(
        coordinator.add_attendee(keynote, &carol).await,
        Err(ScheduleError::EventNotFound(keynote))
    );

    // The slots are reusable and the old id is never handed out again.
    let creation = coordinator.create_event(room, 9, 11, "Encore", 30).await.unwrap();
    let encore = scheduled(&coordinator, creation).await;
    assert_ne!(encore, keynote);
}

#[tokio::test]
async fn removal_releases_only_the_matching_entry() {
    let coordinator = setup().await;
    let room = coordinator.create_room(50).await.unwrap();
    let creation = coordinator.create_event(room, 9, 10, "Talk", 30).await.unwrap();
    let event = scheduled(&coordinator, creation).await;

    let carol = "carol".into();
    coordinator.add_attendee(event, &carol).await.unwrap();
    coordinator.remove_attendee(event, &carol).await.unwrap();
    assert!(coordinator.attending_schedule_of(&carol).await.is_empty());
    assert!(!coordinator.catalog().has_attendee(event, &carol).await);

    // Removing someone who was never booked is a quiet no-op.
    coordinator.remove_attendee(event, &"dave".into()).await.unwrap();
    // Freed seat and calendar slot are usable again.
    assert_eq!(
        coordinator.add_attendee(event, &carol).await.unwrap(),
        BookingOutcome::Confirmed
    );
    coordinator.audit().await.unwrap();
}

#[tokio::test]
async fn audit_reports_roster_without_calendar_entry() {
    let coordinator = setup().await;
    let room = coordinator.create_room(20).await.unwrap();
    let creation = coordinator.create_event(room, 9, 10, "Talk", 10).await.unwrap();
    let event = scheduled(&coordinator, creation).await;

    // Writing the roster directly skips the calendar booking the
    // coordinator would have paired with it.
    assert!(coordinator.catalog().add_attendee(event, &"carol".into()).await);
    assert!(matches!(
        coordinator.audit().await,
        Err(ScheduleError::ConsistencyViolation(_))
    ));

    // Removing the stray roster entry restores consistency.
    coordinator.remove_attendee(event, &"carol".into()).await.unwrap();
    coordinator.audit().await.unwrap();
}

#[tokio::test]
async fn audit_reports_speaker_without_hosting_entry() {
    let coordinator = setup().await;
    let room = coordinator.create_room(20).await.unwrap();
    let creation = coordinator.create_event(room, 9, 10, "Talk", 10).await.unwrap();
    let event = scheduled(&coordinator, creation).await;

    assert!(coordinator.catalog().add_speaker(event, &"alice".into()).await);
    assert!(matches!(
        coordinator.audit().await,
        Err(ScheduleError::ConsistencyViolation(_))
    ));
}

#[tokio::test]
async fn audit_reports_grid_cell_with_no_placement() {
    let coordinator = setup().await;
    let room = coordinator.create_room(20).await.unwrap();

    // Marking the grid for an event the catalog never created leaves a
    // cell no record can explain.
    coordinator.rooms().occupy(room, 12, 1, EventId(99)).await.unwrap();
    assert!(matches!(
        coordinator.audit().await,
        Err(ScheduleError::ConsistencyViolation(_))
    ));

    coordinator.rooms().release(room, EventId(99)).await.unwrap();
    coordinator.audit().await.unwrap();
}

#[tokio::test]
async fn audit_reports_placement_missing_from_grid() {
    let coordinator = setup().await;
    let room = coordinator.create_room(20).await.unwrap();
    let creation = coordinator.create_event(room, 9, 11, "Talk", 10).await.unwrap();
    let event = scheduled(&coordinator, creation).await;

    // Releasing the grid behind the catalog's back orphans the placement.
    coordinator.rooms().release(room, event).await.unwrap();
    assert!(matches!(
        coordinator.audit().await,
        Err(ScheduleError::ConsistencyViolation(_))
    ));
}

#[tokio::test]
async fn custom_day_grid_is_honored() {
    let directory = Arc::new(InMemoryDirectory::new());
    directory
        .register(PersonProfile::new("alice", "Alice", Role::Speaker))
        .await
        .unwrap();
    let config = SchedulerConfig {
        day: DayGrid::new(10, 3),
    };
    let coordinator = ScheduleCoordinator::new(config, directory);
    let room = coordinator.create_room(10).await.unwrap();

    assert_eq!(
        coordinator.create_event(room, 9, 10, "Early", 5).await.unwrap(),
        EventCreation::Refused(BookingOutcome::TimeUnavailable)
    );
    let creation = coordinator.create_event(room, 10, 13, "All Day", 5).await.unwrap();
    scheduled(&coordinator, creation).await;
    assert_eq!(
        coordinator.create_event(room, 12, 14, "Late", 5).await.unwrap(),
        EventCreation::Refused(BookingOutcome::TimeUnavailable)
    );
    coordinator.audit().await.unwrap();
}
