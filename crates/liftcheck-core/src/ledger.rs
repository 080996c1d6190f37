//! Request ledger.
//!
//! Parses the request log once, before replay. Lines that fail the grammar
//! or the building's domain rules are recorded as malformed input and left
//! out; everything else is kept for lookup by the engine.

use std::collections::BTreeMap;

use liftcheck_proto::{
    MergeRequest, ParseError, PassengerId, Request, ScheduleRequest, TripRequest,
    timestamp::split_timestamp,
};

use crate::{ValidatorConfig, error::ViolationLog};

/// One accepted request-log line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerEntry<T> {
    /// Request time
    pub at: f64,
    /// 1-based line number in the request log
    pub line: usize,
    /// Parsed payload
    pub request: T,
}

/// All well-formed requests of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestLedger {
    trips: BTreeMap<PassengerId, LedgerEntry<TripRequest>>,
    schedules: Vec<LedgerEntry<ScheduleRequest>>,
    merges: Vec<LedgerEntry<MergeRequest>>,
}

impl RequestLedger {
    /// Parse a request log. Blank lines are ignored.
    pub fn parse(log: &str, config: &ValidatorConfig, violations: &mut ViolationLog) -> Self {
        let mut ledger = Self::default();

        for (index, raw) in log.lines().enumerate() {
            let line = index + 1;
            let text = raw.trim();
            if text.is_empty() {
                continue;
            }

            let (at, payload) = match split_timestamp(text) {
                Ok(split) => split,
                Err(err) => {
                    violations.malformed(None, format!("request line {line}: {err}"));
                    continue;
                },
            };

            match payload.parse::<Request>() {
                Ok(request) => ledger.admit(at, line, request, config, violations),
                Err(err) => violations.malformed(Some(at), describe(line, &err)),
            }
        }

        ledger.schedules.sort_by(|a, b| a.at.total_cmp(&b.at));
        ledger.merges.sort_by(|a, b| a.at.total_cmp(&b.at));

        tracing::info!(
            passengers = ledger.trips.len(),
            schedules = ledger.schedules.len(),
            merges = ledger.merges.len(),
            "request ledger loaded"
        );
        ledger
    }

    fn admit(
        &mut self,
        at: f64,
        line: usize,
        request: Request,
        config: &ValidatorConfig,
        violations: &mut ViolationLog,
    ) {
        match request {
            Request::Trip(trip) => {
                if self.trips.contains_key(&trip.passenger) {
                    violations.malformed(
                        Some(at),
                        format!("request line {line}: duplicate passenger id {}", trip.passenger),
                    );
                    return;
                }
                self.trips.insert(trip.passenger, LedgerEntry { at, line, request: trip });
            },
            Request::Schedule(schedule) => {
                if !config.has_elevator(schedule.elevator.0) {
                    violations.malformed(
                        Some(at),
                        format!("request line {line}: unknown elevator {}", schedule.elevator),
                    );
                    return;
                }
                self.schedules.push(LedgerEntry { at, line, request: schedule });
            },
            Request::Merge(merge) => {
                for id in [merge.upper, merge.lower] {
                    if !config.has_elevator(id.0) {
                        violations.malformed(
                            Some(at),
                            format!("request line {line}: unknown elevator {id}"),
                        );
                        return;
                    }
                }
                self.merges.push(LedgerEntry { at, line, request: merge });
            },
        }
    }

    /// Trip request of `passenger`.
    pub fn trip(&self, passenger: PassengerId) -> Option<&LedgerEntry<TripRequest>> {
        self.trips.get(&passenger)
    }

    /// Trip requests by passenger id.
    pub fn trips(&self) -> impl Iterator<Item = &LedgerEntry<TripRequest>> {
        self.trips.values()
    }

    /// Schedule requests in time order.
    pub fn schedules(&self) -> &[LedgerEntry<ScheduleRequest>] {
        &self.schedules
    }

    /// Merge requests in time order.
    pub fn merges(&self) -> &[LedgerEntry<MergeRequest>] {
        &self.merges
    }

    /// Number of passengers.
    pub fn passenger_count(&self) -> usize {
        self.trips.len()
    }
}

fn describe(line: usize, err: &ParseError) -> String {
    format!("request line {line}: {err}")
}
