//! Fuzz target for event line parsing
//!
//! Arbitrary text must either parse into a `TimedEvent` or return a
//! `ParseError`. Anything that parses renders to a canonical line, and that
//! line must parse and render to itself.

#![no_main]

use libfuzzer_sys::fuzz_target;
use liftcheck_proto::TimedEvent;

fuzz_target!(|data: &str| {
    let Ok(parsed) = data.parse::<TimedEvent>() else { return };
    if !parsed.at.is_finite() {
        return;
    }

    let rendered = parsed.to_string();
    let reparsed: TimedEvent = rendered.parse().expect("rendered event must parse");
    assert_eq!(reparsed.to_string(), rendered);
});
