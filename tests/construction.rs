mod common;

use common::{CANNON, T0, TOWN_HALL, WALL, build_test_village};
use village_logic::{BuildingEvent, InvalidOperation, LogicError, UnixTime};

#[test]
fn village_lifecycle_from_first_placement() {
    let (mut village, clock) = build_test_village();

    // Town hall placement is instant and needs no town hall.
    let th = village.place_building(TOWN_HALL, 20, 20).unwrap();
    village.begin_construction(th).unwrap();
    assert!(village.building(th).unwrap().is_constructed());
    assert_eq!(village.town_hall_level(), Some(0));

    // First cannon construction is the placement itself.
    let cannon = village.place_building(CANNON, 4, 4).unwrap();
    village.begin_construction(cannon).unwrap();
    clock.advance(60);
    assert_eq!(village.run_due_timers(), 1);
    let b = village.building(cannon).unwrap();
    assert!(b.is_constructed());
    assert_eq!(b.level(), Some(0));

    // Then a real level-up.
    village.begin_construction(cannon).unwrap();
    clock.advance(900);
    assert_eq!(village.run_due_timers(), 1);
    assert_eq!(village.building(cannon).unwrap().level(), Some(1));

    let finished: Vec<_> = village
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, BuildingEvent::ConstructionFinished { .. }))
        .collect();
    assert_eq!(finished.len(), 3);
    assert!(finished.iter().all(|e| !e.was_cancelled()));
}

#[test]
fn speed_up_ten_seconds_in() {
    let (mut village, clock) = build_test_village();
    village.place_constructed(TOWN_HALL, 3, 0, 0).unwrap();
    let cannon = village.place_constructed(CANNON, 2, 5, 5).unwrap();

    village.begin_construction(cannon).unwrap();
    assert_eq!(
        village.building(cannon).unwrap().construction_end_time(),
        Some(UnixTime::from_secs(T0 + 7200))
    );

    clock.advance(10);
    village.speed_up_construction(cannon).unwrap();

    let b = village.building(cannon).unwrap();
    assert_eq!(b.level(), Some(3));
    assert!(!b.is_constructing());
    assert_eq!(
        village.drain_events(),
        vec![BuildingEvent::ConstructionFinished {
            building_id: cannon,
            data_id: CANNON,
            level: 3,
            end_time: UnixTime::from_secs(T0 + 10),
            was_cancelled: false,
        }]
    );

    // The disarmed timer never fires.
    clock.advance(10_000);
    assert_eq!(village.run_due_timers(), 0);
    assert_eq!(village.building(cannon).unwrap().level(), Some(3));
}

#[test]
fn cancel_does_not_advance_level() {
    let (mut village, clock) = build_test_village();
    village.place_constructed(TOWN_HALL, 3, 0, 0).unwrap();
    let cannon = village.place_constructed(CANNON, 1, 5, 5).unwrap();

    village.begin_construction(cannon).unwrap();
    village.cancel_construction(cannon).unwrap();
    village.begin_construction(cannon).unwrap();
    assert_eq!(village.building(cannon).unwrap().level(), Some(1));

    let events = village.drain_events();
    assert_eq!(events.len(), 1);
    assert!(events[0].was_cancelled());

    clock.advance(3600);
    assert_eq!(village.run_due_timers(), 1);
    assert_eq!(village.building(cannon).unwrap().level(), Some(2));
}

#[test]
fn town_hall_gate_leaves_state_unchanged() {
    let (mut village, _clock) = build_test_village();
    village.place_constructed(TOWN_HALL, 3, 0, 0).unwrap();
    // Level 4 cannon requires town hall 5.
    let cannon = village.place_constructed(CANNON, 3, 5, 5).unwrap();

    let err = village.begin_construction(cannon).unwrap_err();
    assert!(matches!(err, InvalidOperation::CannotUpgrade { level: 3, .. }));
    let b = village.building(cannon).unwrap();
    assert_eq!(b.level(), Some(3));
    assert!(!b.is_constructing());
    assert!(village.timers().is_empty());
    assert!(village.events().is_empty());
}

#[test]
fn invalid_transitions_are_reported() {
    let (mut village, _clock) = build_test_village();
    village.place_constructed(TOWN_HALL, 3, 0, 0).unwrap();
    let cannon = village.place_constructed(CANNON, 1, 5, 5).unwrap();

    assert_eq!(
        village.cancel_construction(cannon),
        Err(InvalidOperation::NotConstructing(cannon))
    );
    assert_eq!(
        village.speed_up_construction(cannon),
        Err(InvalidOperation::NotConstructing(cannon))
    );
    village.begin_construction(cannon).unwrap();
    assert_eq!(
        village.begin_construction(cannon),
        Err(InvalidOperation::AlreadyConstructing(cannon))
    );
}

#[test]
fn walls_upgrade_instantly() {
    let (mut village, _clock) = build_test_village();
    village.place_constructed(TOWN_HALL, 2, 0, 0).unwrap();
    let wall = village.place_constructed(WALL, 0, 1, 1).unwrap();

    village.begin_construction(wall).unwrap();
    village.begin_construction(wall).unwrap();
    let b = village.building(wall).unwrap();
    assert_eq!(b.level(), Some(2));
    assert!(!b.is_constructing());
    assert!(village.timers().is_empty());
    assert_eq!(village.can_upgrade(wall), Ok(false));
}

#[test]
fn only_one_town_hall_per_village() {
    let (mut village, _clock) = build_test_village();
    let first = village.place_constructed(TOWN_HALL, 1, 0, 0).unwrap();
    let err = village.place_constructed(TOWN_HALL, 2, 9, 9).unwrap_err();
    assert!(matches!(
        err,
        LogicError::InvalidOperation(InvalidOperation::DuplicateTownHall { existing })
            if existing == first
    ));
    assert_eq!(village.town_hall().map(|b| b.id()), Some(first));
    assert_eq!(village.len(), 1);
}
