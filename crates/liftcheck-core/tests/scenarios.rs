//! End-to-end replay scenarios.
//!
//! Each test feeds a request log and a hand-written event log through the
//! validator and checks the verdict plus the violations it names.

use liftcheck_core::{
    ElevatorMode, Report, ShaftRole, Validator, ValidatorConfig, ViolationKind, validate,
};
use liftcheck_proto::{ElevatorId, Event, Floor, TimedEvent};

const SINGLE_TRIP: &str = "[1.0]1-PRI-50-FROM-F1-TO-F3";

/// Passenger 9, served by car 6 well after everything else.
const BYSTANDER_TRIP: &str = "[1.0]9-PRI-10-FROM-F1-TO-F2";
const BYSTANDER_RIDE: &str = "\
[20.0]RECEIVE-9-6
[20.0]OPEN-F1-6
[20.0]IN-9-F1-6
[20.4]CLOSE-F1-6
[20.8]ARRIVE-F2-6
[20.8]OPEN-F2-6
[20.8]OUT-S-9-F2-6
[21.2]CLOSE-F2-6
";

/// Apply events in the given order, bypassing the sort done by ingest.
fn apply_in_order(requests: &str, events: &[(f64, &str)]) -> Vec<String> {
    let mut validator = Validator::new(ValidatorConfig::default(), requests);
    for (at, payload) in events {
        let event: Event = payload.parse().expect("valid event");
        validator.apply(&TimedEvent::new(*at, event));
    }
    validator.finish().messages()
}

/// Validate with an unrelated, correctly served trip appended so the ledger
/// is never passenger-free.
fn validate_alongside(requests: &str, events: &str) -> Report {
    validate(&format!("{requests}\n{BYSTANDER_TRIP}"), &format!("{events}\n{BYSTANDER_RIDE}"))
}

fn floor(index: i8) -> Floor {
    Floor::new(index).expect("valid floor")
}

fn has_message(messages: &[String], needle: &str) -> bool {
    messages.iter().any(|m| m.contains(needle))
}

#[test]
fn single_trip_passes() {
    let events = "\
[1.0]RECEIVE-1-1
[1.0]OPEN-F1-1
[1.0]IN-1-F1-1
[1.4]CLOSE-F1-1
[1.8]ARRIVE-F2-1
[2.2]ARRIVE-F3-1
[2.2]OPEN-F3-1
[2.2]OUT-S-1-F3-1
[2.6]CLOSE-F3-1
";
    let report = validate(SINGLE_TRIP, events);
    assert!(report.passed(), "{:#?}", report.messages());

    let metrics = report.metrics(3.0).expect("passing run has metrics");
    assert_eq!(metrics.arrives, 2);
    assert_eq!(metrics.opens, 2);
    assert_eq!(metrics.closes, 2);
    assert_eq!(metrics.makespan, 3.0);
    assert!((metrics.weighted_completion_time - 1.2).abs() < 1e-9);
}

#[test]
fn alight_with_closed_doors_fails() {
    let events = "\
[1.0]RECEIVE-1-1
[1.0]OPEN-F1-1
[1.0]IN-1-F1-1
[1.4]CLOSE-F1-1
[1.8]ARRIVE-F2-1
[2.2]ARRIVE-F3-1
[2.2]OUT-S-1-F3-1
[2.2]OPEN-F3-1
[2.6]CLOSE-F3-1
";
    let report = validate(SINGLE_TRIP, events);
    assert!(!report.passed());
    assert_eq!(report.violations()[0].kind, ViolationKind::State);
    insta::assert_snapshot!(
        report.messages().join("\n"),
        @"state: P1 OUT E1 @F3 but door not OPEN (at time ~2.2000)"
    );
    assert!(report.metrics(3.0).is_err());
}

#[test]
fn seventh_passenger_exceeds_capacity() {
    let requests: String =
        (1..=7).map(|pid| format!("[1.0]{pid}-PRI-10-FROM-F1-TO-F2\n")).collect();
    let mut events = String::new();
    for pid in 1..=7 {
        events.push_str(&format!("[1.0]RECEIVE-{pid}-1\n"));
    }
    events.push_str("[1.0]OPEN-F1-1\n");
    for pid in 1..=7 {
        events.push_str(&format!("[1.0]IN-{pid}-F1-1\n"));
    }

    let report = validate(&requests, &events);
    let messages = report.messages();
    let capacity: Vec<_> = messages.iter().filter(|m| m.contains("over capacity")).collect();
    assert_eq!(capacity.len(), 1, "{messages:#?}");
    assert!(capacity[0].contains("boarding P7"));
}

#[test]
fn schedule_end_without_begin_fails() {
    let events = "\
[1.5]SCHE-ACCEPT-1-0.2-F3
[2.0]SCHE-END-1
";
    let report = validate_alongside("[1.0]SCHE-1-0.2-F3", events);
    let messages = report.messages();
    assert!(!report.passed());
    assert!(has_message(&messages, "SCHE-END-1: car not ACTIVE (SCHEDULE_PENDING)"), "{messages:#?}");
    assert!(has_message(&messages, "E1 finished in SCHEDULE_PENDING instead of IDLE"));
}

#[test]
fn schedule_begin_twice_is_not_pending() {
    let events = "\
[1.5]SCHE-ACCEPT-1-0.2-F3
[1.5]SCHE-BEGIN-1
[1.6]SCHE-BEGIN-1
";
    let report = validate_alongside("[1.0]SCHE-1-0.2-F3", events);
    assert!(has_message(&report.messages(), "SCHE-BEGIN-1: car not PENDING (SCHEDULE_ACTIVE)"));
}

#[test]
fn full_reschedule_passes() {
    let events = "\
[1.5]SCHE-ACCEPT-1-0.2-F3
[1.5]SCHE-BEGIN-1
[2.1]ARRIVE-F2-1
[2.3]ARRIVE-F3-1
[2.3]OPEN-F3-1
[3.3]CLOSE-F3-1
[3.3]SCHE-END-1
";
    let report = validate_alongside("[1.0]SCHE-1-0.2-F3", events);
    assert!(report.passed(), "{:#?}", report.messages());
}

#[test]
fn short_hold_at_reschedule_target_fails() {
    let events = "\
[1.5]SCHE-ACCEPT-1-0.2-F3
[1.5]SCHE-BEGIN-1
[2.1]ARRIVE-F2-1
[2.3]ARRIVE-F3-1
[2.3]OPEN-F3-1
[2.8]CLOSE-F3-1
[2.8]SCHE-END-1
";
    let report = validate_alongside("[1.0]SCHE-1-0.2-F3", events);
    let messages = report.messages();
    assert_eq!(messages.len(), 2, "{messages:#?}");
    assert!(has_message(&messages, "E1 door @F3 held 0.5000s < 1.0s"));
    assert!(has_message(&messages, "SCHE-END-1: door hold @F3 0.5000s < 1.0s"));
}

#[test]
fn reschedule_cancels_pickup_promises() {
    let requests = "[1.0]SCHE-1-0.2-F3\n[1.0]1-PRI-10-FROM-F1-TO-F2";
    let events = "\
[1.0]RECEIVE-1-1
[1.5]SCHE-ACCEPT-1-0.2-F3
[1.5]SCHE-BEGIN-1
[1.6]RECEIVE-1-2
";
    let mut validator = Validator::new(ValidatorConfig::default(), requests);
    for event in validator.ingest(events) {
        validator.apply(&event);
    }
    assert!(validator.violations().is_empty(), "{:#?}", validator.violations());
    let car = validator.elevator(ElevatorId(1)).expect("car 1");
    assert!(car.received().is_empty());
    assert!(matches!(car.mode(), ElevatorMode::ScheduleActive(_)));
}

#[test]
fn short_merge_hold_fails() {
    let events = "\
[1.2]UPDATE-ACCEPT-1-2-F2
[1.3]UPDATE-BEGIN-1-2
[1.8]UPDATE-END-1-2
";
    let report = validate_alongside("[1.0]UPDATE-1-2-F2", events);
    assert_eq!(report.violations().len(), 1, "{:#?}", report.messages());
    assert_eq!(report.violations()[0].kind, ViolationKind::Timing);
    assert!(report.messages()[0].contains("UPDATE-END-1-2: hold 0.5000s < 1.0s"));
}

#[test]
fn slow_merge_response_fails() {
    let events = "\
[1.0]UPDATE-ACCEPT-1-2-F2
[1.1]UPDATE-BEGIN-1-2
[7.5]UPDATE-END-1-2
";
    let report = validate_alongside("[1.0]UPDATE-1-2-F2", events);
    assert!(has_message(&report.messages(), "UPDATE-END-1-2: response 6.5000s > 6.0s"));
}

#[test]
fn completed_merge_splits_the_shaft() {
    let events = "\
[1.2]UPDATE-ACCEPT-1-2-F2
[1.3]UPDATE-BEGIN-1-2
[2.4]UPDATE-END-1-2
";
    let mut validator = Validator::new(ValidatorConfig::default(), "[1.0]UPDATE-1-2-F2");
    for event in validator.ingest(events) {
        validator.apply(&event);
    }
    assert!(validator.violations().is_empty(), "{:#?}", validator.violations());

    let upper = validator.elevator(ElevatorId(1)).expect("car 1");
    let lower = validator.elevator(ElevatorId(2)).expect("car 2");
    assert_eq!(upper.range(), (floor(2), Floor::MAX));
    assert_eq!(lower.range(), (Floor::MIN, floor(2)));
    assert_eq!(upper.floor(), floor(3));
    assert_eq!(lower.floor(), floor(1));
    assert_eq!(upper.double_car().map(|dc| dc.role), Some(ShaftRole::Upper));
    assert_eq!(upper.shaft(), ElevatorId(2));
    assert!(!validator.active_shafts().contains(&ElevatorId(1)));
    assert_eq!(validator.shafts().count(), 1);

    assert!(validator.finish().passed());
}

#[test]
fn merge_begin_without_accept_is_not_pending() {
    let report = validate_alongside("[1.0]UPDATE-1-2-F2", "[1.3]UPDATE-BEGIN-1-2");
    assert!(has_message(&report.messages(), "UPDATE-BEGIN-1-2: cars not PENDING"));
}

#[test]
fn merged_cars_cannot_merge_again() {
    let events = "\
[1.2]UPDATE-ACCEPT-1-2-F2
[1.3]UPDATE-BEGIN-1-2
[2.4]UPDATE-END-1-2
[2.5]UPDATE-ACCEPT-2-3-F1
";
    let report = validate_alongside("[1.0]UPDATE-1-2-F2\n[2.5]UPDATE-2-3-F1", events);
    assert!(has_message(&report.messages(), "E2 is already a double-car"));
}

#[test]
fn double_car_serves_its_half() {
    let requests = "[1.0]UPDATE-1-2-F2\n[3.0]1-PRI-10-FROM-F3-TO-F4";
    let events = "\
[1.2]UPDATE-ACCEPT-1-2-F2
[1.3]UPDATE-BEGIN-1-2
[2.4]UPDATE-END-1-2
[3.0]RECEIVE-1-1
[3.0]OPEN-F3-1
[3.0]IN-1-F3-1
[3.4]CLOSE-F3-1
[3.6]ARRIVE-F4-1
[3.6]OPEN-F4-1
[3.6]OUT-S-1-F4-1
[4.0]CLOSE-F4-1
";
    let report = validate(requests, events);
    assert!(report.passed(), "{:#?}", report.messages());
}

#[test]
fn transfer_floor_collision_is_detected() {
    let requests = "\
[1.0]UPDATE-1-2-F2
[3.0]1-PRI-10-FROM-F1-TO-F2
[3.0]2-PRI-10-FROM-F2-TO-F4
";
    let events = "\
[1.2]UPDATE-ACCEPT-1-2-F2
[1.3]UPDATE-BEGIN-1-2
[2.4]UPDATE-END-1-2
[3.0]RECEIVE-2-1
[3.0]RECEIVE-1-2
[3.2]ARRIVE-F2-1
[3.2]ARRIVE-F2-2
";
    let report = validate(requests, events);
    assert!(
        has_message(&report.messages(), "collision: E2 entered transfer floor F2 held by E1"),
        "{:#?}",
        report.messages()
    );
    assert!(has_message(&report.messages(), "E1 still occupies transfer floor F2 of shaft 2"));
}

#[test]
fn transfer_passenger_may_be_received_again_by_same_car() {
    let events = "\
[1.0]RECEIVE-1-1
[1.0]OPEN-F1-1
[1.0]IN-1-F1-1
[1.4]CLOSE-F1-1
[1.8]ARRIVE-F2-1
[1.8]OPEN-F2-1
[1.8]OUT-F-1-F2-1
[1.9]RECEIVE-1-1
[1.9]IN-1-F2-1
[2.2]CLOSE-F2-1
[2.6]ARRIVE-F3-1
[2.6]OPEN-F3-1
[2.6]OUT-S-1-F3-1
[3.0]CLOSE-F3-1
";
    let report = validate(SINGLE_TRIP, events);
    assert!(report.passed(), "{:#?}", report.messages());
}

#[test]
fn undelivered_passenger_and_open_door_are_terminal() {
    let events = "\
[1.0]RECEIVE-1-1
[1.0]OPEN-F1-1
";
    let report = validate(SINGLE_TRIP, events);
    let terminal: Vec<_> = report
        .violations()
        .iter()
        .filter(|v| v.kind == ViolationKind::Terminal)
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        terminal,
        [
            "terminal: P1 not delivered (WAITING at F1)",
            "terminal: E1 finished with door OPEN",
            "terminal: E1 finished with outstanding promises: [1]",
        ]
    );
}

#[test]
fn schedule_only_request_log_rejects_output() {
    let events = "\
[1.5]SCHE-ACCEPT-1-0.2-F3
[1.5]SCHE-BEGIN-1
[2.1]ARRIVE-F2-1
[2.3]ARRIVE-F3-1
[2.3]OPEN-F3-1
[3.3]CLOSE-F3-1
[3.3]SCHE-END-1
";
    let report = validate("[1.0]SCHE-1-0.2-F3", events);
    assert!(!report.passed());
    assert_eq!(report.violations()[0].kind, ViolationKind::MalformedInput);
    assert!(has_message(&report.messages(), "output produced for an empty request log"));
}

#[test]
fn reschedule_hold_survives_many_later_cycles_elsewhere() {
    let requests = "[0.0]1-PRI-10-FROM-F4-TO-F3\n[1.0]SCHE-1-0.2-F4";
    let mut events = String::from(
        "\
[0.0]RECEIVE-1-1
[0.4]ARRIVE-F2-1
[0.8]ARRIVE-F3-1
[1.2]ARRIVE-F4-1
[1.6]OPEN-F4-1
[1.6]IN-1-F4-1
[2.6]CLOSE-F4-1
[3.0]ARRIVE-F3-1
[3.0]OPEN-F3-1
[3.0]OUT-S-1-F3-1
[3.4]CLOSE-F3-1
",
    );
    for cycle in 1..=8 {
        let opened = 3.0 + 0.4 * f64::from(cycle);
        events.push_str(&format!("[{opened:.1}]OPEN-F3-1\n[{:.1}]CLOSE-F3-1\n", opened + 0.4));
    }
    events.push_str(
        "\
[6.6]SCHE-ACCEPT-1-0.2-F4
[6.6]SCHE-BEGIN-1
[6.8]ARRIVE-F4-1
[6.8]SCHE-END-1
",
    );

    let report = validate(requests, &events);
    assert!(report.passed(), "{:#?}", report.messages());
    assert_eq!(report.counters().opens, 10);
}

#[test]
fn arrive_outside_double_car_range_fails() {
    let events = "\
[1.2]UPDATE-ACCEPT-1-2-F2
[1.3]UPDATE-BEGIN-1-2
[2.4]UPDATE-END-1-2
[2.6]ARRIVE-F2-2
[2.8]ARRIVE-F3-2
";
    let report = validate_alongside("[1.0]UPDATE-1-2-F2", events);
    assert!(has_message(&report.messages(), "E2 ARRIVE @F3 outside range [B4-F2]"), "{:#?}", report.messages());
}

#[test]
fn partners_crossing_off_the_transfer_floor_collide() {
    let events = "\
[1.2]UPDATE-ACCEPT-1-2-F2
[1.3]UPDATE-BEGIN-1-2
[2.4]UPDATE-END-1-2
[2.6]ARRIVE-F2-1
[2.8]ARRIVE-F1-1
";
    let report = validate_alongside("[1.0]UPDATE-1-2-F2", events);
    let messages = report.messages();
    assert!(has_message(&messages, "position collision: E1 (upper) @F1 vs E2 @F1"), "{messages:#?}");
    assert!(has_message(&messages, "E1 ARRIVE @F1 outside range [F2-F7]"));
}

#[test]
fn too_many_arrives_before_schedule_begin_fail() {
    let events = "\
[1.5]SCHE-ACCEPT-1-0.2-F3
[1.9]ARRIVE-F2-1
[2.3]ARRIVE-F3-1
[2.7]ARRIVE-F4-1
[2.7]SCHE-BEGIN-1
";
    let report = validate_alongside("[1.0]SCHE-1-0.2-F3", events);
    assert!(
        has_message(&report.messages(), "SCHE-BEGIN-1: 3 ARRIVEs since accept (at most 2)"),
        "{:#?}",
        report.messages()
    );
}

#[test]
fn too_many_arrives_before_merge_begin_fail() {
    let events = "\
[1.2]UPDATE-ACCEPT-1-2-F2
[1.6]ARRIVE-F2-1
[2.0]ARRIVE-F3-1
[2.4]ARRIVE-F4-1
[2.4]UPDATE-BEGIN-1-2
";
    let report = validate_alongside("[1.0]UPDATE-1-2-F2", events);
    let messages = report.messages();
    assert!(has_message(&messages, "UPDATE-BEGIN-1-2: E1 3 ARRIVEs since accept (at most 2)"), "{messages:#?}");
    assert!(!has_message(&messages, "E2 3 ARRIVEs"));
}

#[test]
fn schedule_begin_before_last_move_is_not_stopped() {
    let messages = apply_in_order(
        "[1.0]SCHE-1-0.2-F3\n[1.0]1-PRI-10-FROM-F1-TO-F2",
        &[(1.5, "SCHE-ACCEPT-1-0.2-F3"), (1.9, "ARRIVE-F2-1"), (1.7, "SCHE-BEGIN-1")],
    );
    assert!(has_message(&messages, "SCHE-BEGIN-1: car not stopped"), "{messages:#?}");
}

#[test]
fn merge_begin_before_last_move_is_not_stopped() {
    let messages = apply_in_order(
        "[1.0]UPDATE-1-2-F2\n[1.0]1-PRI-10-FROM-F1-TO-F2",
        &[(1.2, "UPDATE-ACCEPT-1-2-F2"), (1.6, "ARRIVE-F2-2"), (1.4, "UPDATE-BEGIN-1-2")],
    );
    assert!(has_message(&messages, "UPDATE-BEGIN-1-2: E2 not stopped"), "{messages:#?}");
    assert!(!has_message(&messages, "E1 not stopped"));
}

#[test]
fn moving_opening_or_receiving_during_active_merge_fails() {
    let requests = "[1.0]UPDATE-1-2-F2\n[1.0]1-PRI-10-FROM-F1-TO-F3";
    let events = "\
[1.2]UPDATE-ACCEPT-1-2-F2
[1.3]UPDATE-BEGIN-1-2
[1.7]ARRIVE-F2-1
[1.7]OPEN-F2-1
[1.8]RECEIVE-1-2
";
    let report = validate(requests, events);
    let messages = report.messages();
    assert!(has_message(&messages, "E1 ARRIVE @F2 while merge ACTIVE"), "{messages:#?}");
    assert!(has_message(&messages, "E1 OPEN @F2 while merge ACTIVE"));
    assert!(has_message(&messages, "RECEIVE-1-2 while merge ACTIVE"));
}

#[test]
fn opening_away_from_reschedule_target_fails() {
    let events = "\
[1.5]SCHE-ACCEPT-1-0.2-F3
[1.5]SCHE-BEGIN-1
[1.7]ARRIVE-F2-1
[1.7]OPEN-F2-1
[2.1]CLOSE-F2-1
";
    let report = validate_alongside("[1.0]SCHE-1-0.2-F3", events);
    let messages = report.messages();
    assert!(has_message(&messages, "E1 OPEN @F2 while schedule ACTIVE (target F3)"), "{messages:#?}");
    assert!(has_message(&messages, "E1 CLOSE @F2 while schedule ACTIVE (target F3)"));
}

#[test]
fn unfinished_reschedule_leaves_wrong_speed() {
    let events = "\
[1.5]SCHE-ACCEPT-1-0.2-F3
[1.5]SCHE-BEGIN-1
";
    let report = validate_alongside("[1.0]SCHE-1-0.2-F3", events);
    let messages = report.messages();
    assert!(has_message(&messages, "terminal: E1 finished at speed 0.2, expected 0.4"), "{messages:#?}");
    assert!(has_message(&messages, "E1 finished in SCHEDULE_ACTIVE instead of IDLE"));
}
