//! Fuzz target for request line parsing
//!
//! Arbitrary text must never panic the request grammar, and a whole request
//! log must load into a ledger without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use liftcheck_core::{RequestLedger, ValidatorConfig, ViolationLog};
use liftcheck_proto::TimedRequest;

fuzz_target!(|data: &str| {
    for line in data.lines() {
        let _ = line.parse::<TimedRequest>();
    }

    let mut log = ViolationLog::new();
    let _ = RequestLedger::parse(data, &ValidatorConfig::default(), &mut log);
});
