//! Property-based tests for the replay engine.
//!
//! Arbitrary event soup must never panic the engine, and replaying the same
//! logs twice must give the same verdict.

use liftcheck_core::{ValidatorConfig, validate, validate_with};
use liftcheck_proto::Floor;
use proptest::prelude::*;

fn arbitrary_floor() -> impl Strategy<Value = Floor> {
    prop::sample::select(Floor::all().collect::<Vec<_>>())
}

/// Generate one plausible event line for cars 1-3 and passengers 1-4.
fn event_line() -> impl Strategy<Value = String> {
    let body = (arbitrary_floor(), 1u32..=3, 1u32..=4, 0usize..12).prop_map(|(floor, e, p, kind)| {
        match kind {
            0 => format!("ARRIVE-{floor}-{e}"),
            1 => format!("OPEN-{floor}-{e}"),
            2 => format!("CLOSE-{floor}-{e}"),
            3 => format!("RECEIVE-{p}-{e}"),
            4 => format!("IN-{p}-{floor}-{e}"),
            5 => format!("OUT-S-{p}-{floor}-{e}"),
            6 => format!("OUT-F-{p}-{floor}-{e}"),
            7 => format!("SCHE-ACCEPT-{e}-0.3-F3"),
            8 => format!("SCHE-BEGIN-{e}"),
            9 => format!("SCHE-END-{e}"),
            10 => format!("UPDATE-ACCEPT-{e}-{}-F2", e % 3 + 1),
            _ => format!("UPDATE-END-{e}-{}", e % 3 + 1),
        }
    });
    (0u32..100_000, body).prop_map(|(millis, body)| format!("[{}.{:03}]{body}", millis / 1000, millis % 1000))
}

const REQUESTS: &str = "\
[0.0]1-PRI-10-FROM-F1-TO-F3
[0.0]2-PRI-20-FROM-B2-TO-F1
[0.5]3-PRI-30-FROM-F5-TO-B1
[1.0]4-PRI-40-FROM-F2-TO-F7
[1.0]SCHE-1-0.3-F3
[2.0]UPDATE-1-2-F2
";

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: Validation is deterministic
    #[test]
    fn prop_validation_deterministic(lines in prop::collection::vec(event_line(), 0..60)) {
        let log = lines.join("\n");
        let first = validate(REQUESTS, &log);
        let second = validate(REQUESTS, &log);
        prop_assert_eq!(first.messages(), second.messages());
        prop_assert_eq!(first.passed(), second.passed());
    }

    /// Property: Strict request matching only ever adds violations
    #[test]
    fn prop_strict_mode_is_stricter(lines in prop::collection::vec(event_line(), 0..40)) {
        let log = lines.join("\n");
        let relaxed = validate(REQUESTS, &log);
        let strict = validate_with(
            ValidatorConfig { strict_requests: true, ..ValidatorConfig::default() },
            REQUESTS,
            &log,
        );
        if strict.passed() {
            prop_assert!(relaxed.passed());
        }
    }

    /// Property: A single arrival is a move violation exactly when the floors
    /// are not adjacent
    #[test]
    fn prop_arrive_requires_adjacency(target in arbitrary_floor()) {
        let events = format!("[0.0]RECEIVE-1-1\n[1.0]ARRIVE-{target}-1");
        let report = validate("[0.0]1-PRI-1-FROM-F1-TO-F2", &events);
        let flagged = report.messages().iter().any(|m| m.contains("invalid move"));
        prop_assert_eq!(flagged, !Floor::GROUND.is_adjacent(target));
    }

    /// Property: Every boarding past capacity is flagged
    #[test]
    fn prop_capacity_bound(count in 1u32..=10) {
        let mut requests = String::new();
        let mut events = String::new();
        for pid in 1..=count {
            requests.push_str(&format!("[0.0]{pid}-PRI-1-FROM-F1-TO-F2\n"));
            events.push_str(&format!("[0.0]RECEIVE-{pid}-1\n"));
        }
        events.push_str("[0.0]OPEN-F1-1\n");
        for pid in 1..=count {
            events.push_str(&format!("[0.0]IN-{pid}-F1-1\n"));
        }

        let report = validate(&requests, &events);
        let over: Vec<_> = report.messages().into_iter().filter(|m| m.contains("over capacity")).collect();
        let capacity = ValidatorConfig::default().capacity as u32;
        prop_assert_eq!(over.len() as u32, count.saturating_sub(capacity));
    }
}
