//! Fuzz target for the replay engine
//!
//! # Strategy
//!
//! - Structured ops: every event kind, with car, passenger and floor indices
//!   that are mostly in range and sometimes not
//! - Timestamps: small increments, occasionally going backwards
//! - Fixed request log with trips, one reschedule and one merge
//!
//! # Invariants
//!
//! - Replay never panics
//! - Replaying the same log twice yields identical messages

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use liftcheck_core::validate;

const REQUESTS: &str = "\
[0.0]1-PRI-10-FROM-F1-TO-F3
[0.0]2-PRI-20-FROM-B2-TO-F1
[0.5]3-PRI-30-FROM-F5-TO-B1
[1.0]SCHE-1-0.3-F3
[2.0]UPDATE-2-3-F2
";

#[derive(Debug, Clone, Arbitrary)]
enum Op {
    Arrive { floor: u8, car: u8 },
    Open { floor: u8, car: u8 },
    Close { floor: u8, car: u8 },
    Receive { passenger: u8, car: u8 },
    Board { passenger: u8, floor: u8, car: u8 },
    AlightSuccess { passenger: u8, floor: u8, car: u8 },
    AlightTransfer { passenger: u8, floor: u8, car: u8 },
    ScheduleAccept { car: u8, speed: u8, floor: u8 },
    ScheduleBegin { car: u8 },
    ScheduleEnd { car: u8 },
    MergeAccept { upper: u8, lower: u8, floor: u8 },
    MergeBegin { upper: u8, lower: u8 },
    MergeEnd { upper: u8, lower: u8 },
}

#[derive(Debug, Clone, Arbitrary)]
struct Step {
    delta_millis: u16,
    backwards: bool,
    op: Op,
}

fn floor(index: u8) -> String {
    let n = i16::from(index % 13) - 5;
    if n < 0 { format!("B{}", -n) } else { format!("F{n}") }
}

fn car(index: u8) -> u8 {
    index % 8
}

fn render(op: &Op) -> String {
    match *op {
        Op::Arrive { floor: f, car: c } => format!("ARRIVE-{}-{}", floor(f), car(c)),
        Op::Open { floor: f, car: c } => format!("OPEN-{}-{}", floor(f), car(c)),
        Op::Close { floor: f, car: c } => format!("CLOSE-{}-{}", floor(f), car(c)),
        Op::Receive { passenger, car: c } => format!("RECEIVE-{}-{}", passenger % 5, car(c)),
        Op::Board { passenger, floor: f, car: c } => {
            format!("IN-{}-{}-{}", passenger % 5, floor(f), car(c))
        },
        Op::AlightSuccess { passenger, floor: f, car: c } => {
            format!("OUT-S-{}-{}-{}", passenger % 5, floor(f), car(c))
        },
        Op::AlightTransfer { passenger, floor: f, car: c } => {
            format!("OUT-F-{}-{}-{}", passenger % 5, floor(f), car(c))
        },
        Op::ScheduleAccept { car: c, speed, floor: f } => {
            format!("SCHE-ACCEPT-{}-0.{}-{}", car(c), speed % 7, floor(f))
        },
        Op::ScheduleBegin { car: c } => format!("SCHE-BEGIN-{}", car(c)),
        Op::ScheduleEnd { car: c } => format!("SCHE-END-{}", car(c)),
        Op::MergeAccept { upper, lower, floor: f } => {
            format!("UPDATE-ACCEPT-{}-{}-{}", car(upper), car(lower), floor(f))
        },
        Op::MergeBegin { upper, lower } => format!("UPDATE-BEGIN-{}-{}", car(upper), car(lower)),
        Op::MergeEnd { upper, lower } => format!("UPDATE-END-{}-{}", car(upper), car(lower)),
    }
}

fuzz_target!(|steps: Vec<Step>| {
    let mut clock = 0.0_f64;
    let mut log = String::new();
    for step in &steps {
        let delta = f64::from(step.delta_millis % 2000) / 1000.0;
        clock = if step.backwards { (clock - delta).max(0.0) } else { clock + delta };
        log.push_str(&format!("[{clock:.4}]{}\n", render(&step.op)));
    }

    let first = validate(REQUESTS, &log);
    let second = validate(REQUESTS, &log);
    assert_eq!(first.messages(), second.messages());
});
