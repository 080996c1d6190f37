//! Replay engine.
//!
//! The [`Validator`] owns every automaton of one run: an arena of cars indexed
//! by id, the passengers of the request ledger, and the shaft arbiters created
//! by merges. Events are parsed, ordered by timestamp, and folded over that
//! state one at a time. Nothing aborts the replay; every broken rule lands on
//! the violation log and the event is applied anyway, unless it is malformed
//! or addressed to a car in the wrong protocol mode.

use std::collections::{BTreeMap, BTreeSet};

use liftcheck_proto::{
    AlightOutcome, ElevatorId, Event, Floor, PassengerId, Request, TimedEvent,
    timestamp::split_timestamp,
};

use crate::{
    ValidatorConfig,
    elevator::{DoubleCar, ElevatorState, MergeOrder, ShaftRole},
    error::{Violation, ViolationLog},
    ledger::RequestLedger,
    metrics::{ActionCounters, Completion},
    passenger::{PassengerState, PassengerStatus},
    report::Report,
    shaft::ShaftArbiter,
};

/// Replay state of one validation run.
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidatorConfig,
    ledger: RequestLedger,
    elevators: Vec<ElevatorState>,
    passengers: BTreeMap<PassengerId, PassengerState>,
    shafts: BTreeMap<ElevatorId, ShaftArbiter>,
    active_shafts: BTreeSet<ElevatorId>,
    clock: f64,
    counters: ActionCounters,
    violations: ViolationLog,
    schedules_accepted: Vec<bool>,
    merges_accepted: Vec<bool>,
}

/// Arena slot of a car. Callers check the id against the config first.
fn slot(id: ElevatorId) -> usize {
    id.0 as usize - 1
}

impl Validator {
    /// Load the request log and set every automaton to its initial state.
    pub fn new(config: ValidatorConfig, request_log: &str) -> Self {
        let mut violations = ViolationLog::new();
        let ledger = RequestLedger::parse(request_log, &config, &mut violations);

        let elevators: Vec<_> =
            (1..=config.elevator_count).map(|id| ElevatorState::new(ElevatorId(id), &config)).collect();
        let active_shafts = elevators.iter().map(ElevatorState::id).collect();
        let passengers =
            ledger.trips().map(|entry| (entry.request.passenger, PassengerState::from_trip(entry))).collect();
        let schedules_accepted = vec![false; ledger.schedules().len()];
        let merges_accepted = vec![false; ledger.merges().len()];

        Self {
            config,
            ledger,
            elevators,
            passengers,
            shafts: BTreeMap::new(),
            active_shafts,
            clock: 0.0,
            counters: ActionCounters::default(),
            violations,
            schedules_accepted,
            merges_accepted,
        }
    }

    /// Replay a complete event log and produce the verdict.
    ///
    /// A ledger without passengers is valid only together with an empty
    /// event log; in that case the events are not replayed.
    pub fn run(mut self, event_log: &str) -> Report {
        if self.ledger.passenger_count() == 0 {
            if event_log.lines().any(|line| !line.trim().is_empty()) {
                self.violations.malformed(None, "output produced for an empty request log");
            }
            return self.finish();
        }

        for event in self.ingest(event_log) {
            self.apply(&event);
        }
        self.finish()
    }

    /// Parse an event log into time-ordered events.
    ///
    /// Unparseable lines are recorded as malformed input and dropped. A
    /// timestamp more than epsilon below the largest seen so far, in line
    /// order, is a timing violation; the event is still kept and sorted into
    /// place. Ties keep their line order.
    pub fn ingest(&mut self, event_log: &str) -> Vec<TimedEvent> {
        let mut events = Vec::new();

        for raw in event_log.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let (at, payload) = match split_timestamp(line) {
                Ok(split) => split,
                Err(err) => {
                    self.violations.malformed(None, format!("output {err}"));
                    continue;
                },
            };

            if at < self.clock - self.config.epsilon {
                self.violations.timing(at, format!("timestamp decreased: {at:.4} < {:.4}", self.clock));
            }
            self.clock = self.clock.max(at);

            match payload.parse::<Event>() {
                Ok(event) => events.push(TimedEvent::new(at, event)),
                Err(err) => self.violations.malformed(Some(at), format!("{err} (line: '{line}')")),
            }
        }

        events.sort_by(|a, b| a.at.total_cmp(&b.at));
        events
    }

    /// Validate one event against the current state and apply it.
    pub fn apply(&mut self, timed: &TimedEvent) {
        let at = timed.at;
        let event = timed.event;
        self.clock = self.clock.max(at);
        tracing::trace!(t = at, %event, "replay");

        if let Some(reason) = self.unknown_reference(&event) {
            self.violations.malformed(Some(at), format!("{reason} in '{event}'"));
            return;
        }

        match event {
            Event::MergeAccept { upper, lower, transfer } => {
                if self.admit_pair(&event, upper, lower, at) {
                    self.merge_accept(upper, lower, transfer, at);
                }
            },
            Event::MergeBegin { upper, lower } => {
                if self.admit_pair(&event, upper, lower, at) {
                    self.merge_begin(upper, lower, at);
                }
            },
            Event::MergeEnd { upper, lower } => {
                if self.admit_pair(&event, upper, lower, at) {
                    self.merge_end(upper, lower, at);
                }
            },
            single => {
                let Some(&car) = single.elevators().first() else { return };
                let shaft = self.elevators[slot(car)].shaft();
                if !self.active_shafts.contains(&shaft) {
                    self.violations.state(at, format!("{} for E{car} in retired shaft {shaft}", single.tag()));
                    return;
                }
                self.dispatch(single, at);
            },
        }
    }

    fn dispatch(&mut self, event: Event, at: f64) {
        match event {
            Event::Arrive { floor, elevator } => self.arrive(elevator, floor, at),
            Event::Open { floor, elevator } => {
                self.counters.opens += 1;
                self.elevators[slot(elevator)].open(floor, at, &self.config, &mut self.violations);
            },
            Event::Close { floor, elevator } => {
                self.counters.closes += 1;
                self.elevators[slot(elevator)].close(floor, at, &self.config, &mut self.violations);
            },
            Event::Receive { passenger, elevator } => self.receive(passenger, elevator, at),
            Event::Board { passenger, floor, elevator } => self.board(passenger, floor, elevator, at),
            Event::Alight { outcome, passenger, floor, elevator } => {
                self.alight(outcome, passenger, floor, elevator, at);
            },
            Event::ScheduleAccept { elevator, speed, target } => {
                if self.config.strict_requests {
                    self.match_schedule_request(elevator, speed, target, at);
                }
                self.elevators[slot(elevator)].schedule_accept(speed, target, at, &mut self.violations);
            },
            Event::ScheduleBegin { elevator } => {
                let car = &mut self.elevators[slot(elevator)];
                if let Some(cancelled) = car.schedule_begin(at, &self.config, &mut self.violations) {
                    self.cancel_promises(&cancelled, &[elevator]);
                }
            },
            Event::ScheduleEnd { elevator } => {
                self.elevators[slot(elevator)].schedule_end(at, &self.config, &mut self.violations);
            },
            Event::MergeAccept { .. } | Event::MergeBegin { .. } | Event::MergeEnd { .. } => {},
        }
    }

    fn unknown_reference(&self, event: &Event) -> Option<String> {
        if let Some(passenger) = event.passenger()
            && !self.passengers.contains_key(&passenger)
        {
            return Some(format!("unknown passenger {passenger}"));
        }
        event
            .elevators()
            .into_iter()
            .find(|id| !self.config.has_elevator(id.0) || slot(*id) >= self.elevators.len())
            .map(|id| format!("unknown elevator {id}"))
    }

    fn admit_pair(&mut self, event: &Event, upper: ElevatorId, lower: ElevatorId, at: f64) -> bool {
        for id in [upper, lower] {
            let car = &self.elevators[slot(id)];
            if !self.active_shafts.contains(&car.shaft()) {
                self.violations.state(at, format!("{event}: E{id} in retired shaft {}", car.shaft()));
                return false;
            }
            if car.double_car().is_some() {
                self.violations.state(at, format!("{event}: E{id} is already a double-car"));
                return false;
            }
        }
        true
    }

    fn arrive(&mut self, elevator: ElevatorId, floor: Floor, at: f64) {
        self.counters.arrives += 1;
        let car = &mut self.elevators[slot(elevator)];
        let from = car.arrive(floor, at, &self.config, &mut self.violations);

        if let Some(double_car) = car.double_car().copied() {
            self.check_shaft(elevator, double_car, from, floor, at);
        }
    }

    /// Transfer floor exclusion and partner ordering for a double-car move.
    fn check_shaft(&mut self, car: ElevatorId, double_car: DoubleCar, from: Floor, to: Floor, at: f64) {
        let transfer = double_car.transfer;
        if let Some(arbiter) = self.shafts.get_mut(&double_car.shaft) {
            if to == transfer
                && let Err(holder) = arbiter.try_occupy(car)
            {
                self.violations.state(
                    at,
                    format!("collision: E{car} entered transfer floor {to} held by E{holder}"),
                );
            }
            if from == transfer && to != transfer {
                arbiter.release(car);
            }
        }

        let partner = double_car.partner;
        let partner_floor = self.elevators[slot(partner)].floor();
        if to == transfer || partner_floor == transfer {
            return;
        }
        let crossed = match double_car.role {
            ShaftRole::Upper => to <= partner_floor,
            ShaftRole::Lower => to >= partner_floor,
        };
        if crossed {
            let role = match double_car.role {
                ShaftRole::Upper => "upper",
                ShaftRole::Lower => "lower",
            };
            self.violations.state(
                at,
                format!("position collision: E{car} ({role}) @{to} vs E{partner} @{partner_floor}"),
            );
        }
    }

    fn receive(&mut self, passenger: PassengerId, elevator: ElevatorId, at: f64) {
        self.elevators[slot(elevator)].check_receive(passenger, at, &mut self.violations);

        let Some(state) = self.passengers.get_mut(&passenger) else { return };
        if self.config.strict_requests && at < state.requested_at() - self.config.epsilon {
            self.violations.timing(
                at,
                format!(
                    "RECEIVE-{passenger}-{elevator} before request at {:.4}",
                    state.requested_at()
                ),
            );
        }
        state.check_receive(elevator, at, &mut self.violations);

        if let Some(previous) = state.promised_by()
            && previous != elevator
        {
            self.elevators[slot(previous)].drop_promise(passenger);
        }
        state.promise(elevator);
        self.elevators[slot(elevator)].add_promise(passenger);
    }

    fn board(&mut self, passenger: PassengerId, floor: Floor, elevator: ElevatorId, at: f64) {
        let Some(state) = self.passengers.get_mut(&passenger) else { return };
        let car = &self.elevators[slot(elevator)];
        car.check_board(passenger, floor, state.destination(), at, &self.config, &mut self.violations);
        state.check_board(elevator, floor, at, &mut self.violations);

        if let PassengerStatus::Inside { elevator: other } = state.status()
            && other != elevator
        {
            self.elevators[slot(other)].evict(passenger);
        }
        if let Some(holder) = state.promised_by()
            && holder != elevator
        {
            self.elevators[slot(holder)].drop_promise(passenger);
        }
        state.board(elevator);
        self.elevators[slot(elevator)].board(passenger, at, &mut self.violations);
    }

    fn alight(
        &mut self,
        outcome: AlightOutcome,
        passenger: PassengerId,
        floor: Floor,
        elevator: ElevatorId,
        at: f64,
    ) {
        let Some(state) = self.passengers.get_mut(&passenger) else { return };
        self.elevators[slot(elevator)].check_alight(passenger, floor, at, &mut self.violations);
        state.check_alight(outcome, elevator, floor, at, &mut self.violations);

        if let PassengerStatus::Inside { elevator: other } = state.status()
            && other != elevator
        {
            self.elevators[slot(other)].evict(passenger);
        }
        if let Some(holder) = state.promised_by() {
            self.elevators[slot(holder)].drop_promise(passenger);
        }
        state.alight(outcome, floor, at);
        self.elevators[slot(elevator)].alight(passenger);
    }

    /// Clear passenger-side promises after a car dropped them.
    fn cancel_promises(&mut self, cancelled: &[PassengerId], cars: &[ElevatorId]) {
        for passenger in cancelled {
            if let Some(state) = self.passengers.get_mut(passenger)
                && state.promised_by().is_some_and(|holder| cars.contains(&holder))
            {
                state.clear_promise();
            }
        }
    }

    fn merge_accept(&mut self, upper: ElevatorId, lower: ElevatorId, transfer: Floor, at: f64) {
        if self.config.strict_requests {
            self.match_merge_request(upper, lower, transfer, at);
        }
        let label = format!("UPDATE-ACCEPT-{upper}-{lower}-{transfer}");
        for (id, partner, role) in [(upper, lower, ShaftRole::Upper), (lower, upper, ShaftRole::Lower)] {
            let order = MergeOrder { accepted_at: at, partner, transfer, role, arrives: 0, began_at: None };
            self.elevators[slot(id)].merge_accept(order, &label, at, &mut self.violations);
        }
    }

    fn merge_begin(&mut self, upper: ElevatorId, lower: ElevatorId, at: f64) {
        let label = format!("UPDATE-BEGIN-{upper}-{lower}");
        let orders = (self.elevators[slot(upper)].pending_merge(), self.elevators[slot(lower)].pending_merge());
        let (Some(upper_order), Some(lower_order)) = orders else {
            self.report_pair_mode(&label, "PENDING", upper, lower, at);
            return;
        };
        if !Self::orders_pair(&upper_order, &lower_order, upper, lower) {
            self.report_pair_mode(&label, "PENDING", upper, lower, at);
            return;
        }

        for (id, order) in [(upper, &upper_order), (lower, &lower_order)] {
            self.elevators[slot(id)].check_merge_begin(order, &label, at, &self.config, &mut self.violations);
        }

        let mut cancelled = self.elevators[slot(upper)].merge_begin(upper_order, at);
        cancelled.extend(self.elevators[slot(lower)].merge_begin(lower_order, at));
        self.cancel_promises(&cancelled, &[upper, lower]);
        tracing::debug!(upper = %upper, lower = %lower, t = at, "merge active");
    }

    fn merge_end(&mut self, upper: ElevatorId, lower: ElevatorId, at: f64) {
        let label = format!("UPDATE-END-{upper}-{lower}");
        let orders = (self.elevators[slot(upper)].active_merge(), self.elevators[slot(lower)].active_merge());
        let (Some(upper_order), Some(lower_order)) = orders else {
            self.report_pair_mode(&label, "ACTIVE", upper, lower, at);
            return;
        };
        if !Self::orders_pair(&upper_order, &lower_order, upper, lower) {
            self.report_pair_mode(&label, "ACTIVE", upper, lower, at);
            return;
        }

        let began_at = upper_order.began_at.unwrap_or(upper_order.accepted_at);
        let hold = at - began_at;
        if hold < self.config.merge_hold - self.config.door_slack() {
            self.violations.timing(
                at,
                format!("{label}: hold {hold:.4}s < {:.1}s", self.config.merge_hold),
            );
        }
        let response = at - upper_order.accepted_at;
        if response > self.config.merge_response + self.config.door_slack() {
            self.violations.timing(
                at,
                format!("{label}: response {response:.4}s > {:.1}s", self.config.merge_response),
            );
        }

        let transfer = upper_order.transfer;
        let shaft = lower;
        self.elevators[slot(upper)].become_double_car(
            DoubleCar { partner: lower, shaft, role: ShaftRole::Upper, transfer },
            at,
            &self.config,
        );
        self.elevators[slot(lower)].become_double_car(
            DoubleCar { partner: upper, shaft, role: ShaftRole::Lower, transfer },
            at,
            &self.config,
        );
        self.active_shafts.remove(&upper);
        self.shafts.insert(shaft, ShaftArbiter::new(shaft, transfer));
        tracing::debug!(upper = %upper, lower = %lower, transfer = %transfer, t = at, "shaft merged");
    }

    fn orders_pair(upper: &MergeOrder, lower: &MergeOrder, upper_id: ElevatorId, lower_id: ElevatorId) -> bool {
        upper.partner == lower_id
            && lower.partner == upper_id
            && upper.role == ShaftRole::Upper
            && lower.role == ShaftRole::Lower
    }

    fn report_pair_mode(&mut self, label: &str, wanted: &str, upper: ElevatorId, lower: ElevatorId, at: f64) {
        let upper_mode = self.elevators[slot(upper)].mode();
        let lower_mode = self.elevators[slot(lower)].mode();
        self.violations.state(
            at,
            format!("{label}: cars not {wanted} for this merge (E{upper} {upper_mode}, E{lower} {lower_mode})"),
        );
    }

    fn match_schedule_request(&mut self, elevator: ElevatorId, speed: f64, target: Floor, at: f64) {
        let horizon = at + self.config.epsilon;
        let found = self.ledger.schedules().iter().zip(&self.schedules_accepted).position(|(entry, used)| {
            let request = entry.request;
            !*used
                && entry.at <= horizon
                && request.elevator == elevator
                && (request.speed - speed).abs() < 1e-9
                && request.target == target
        });
        match found {
            Some(index) => self.schedules_accepted[index] = true,
            None => self.violations.state(
                at,
                format!("SCHE-ACCEPT-{elevator}-{speed:.1}-{target}: no matching request"),
            ),
        }
    }

    fn match_merge_request(&mut self, upper: ElevatorId, lower: ElevatorId, transfer: Floor, at: f64) {
        let horizon = at + self.config.epsilon;
        let found = self.ledger.merges().iter().zip(&self.merges_accepted).position(|(entry, used)| {
            let request = entry.request;
            !*used
                && entry.at <= horizon
                && request.upper == upper
                && request.lower == lower
                && request.transfer == transfer
        });
        match found {
            Some(index) => self.merges_accepted[index] = true,
            None => self.violations.state(
                at,
                format!("UPDATE-ACCEPT-{upper}-{lower}-{transfer}: no matching request"),
            ),
        }
    }

    /// Run the end-of-log checks and produce the verdict.
    pub fn finish(mut self) -> Report {
        if self.config.strict_requests {
            for (entry, used) in self.ledger.schedules().iter().zip(&self.schedules_accepted) {
                if !*used {
                    let request = Request::Schedule(entry.request);
                    self.violations.terminal(format!("request line {} '{request}' never accepted", entry.line));
                }
            }
            for (entry, used) in self.ledger.merges().iter().zip(&self.merges_accepted) {
                if !*used {
                    let request = Request::Merge(entry.request);
                    self.violations.terminal(format!("request line {} '{request}' never accepted", entry.line));
                }
            }
        }

        for passenger in self.passengers.values() {
            if passenger.is_delivered() {
                continue;
            }
            let id = passenger.id();
            let detail = match passenger.status() {
                PassengerStatus::Waiting { floor } => format!("WAITING at {floor}"),
                PassengerStatus::Inside { elevator } => format!("INSIDE E{elevator}"),
                PassengerStatus::Arrived { floor, .. } => {
                    format!("ARRIVED at {floor}, destination {}", passenger.destination())
                },
            };
            self.violations.terminal(format!("P{id} not delivered ({detail})"));
        }

        for car in &self.elevators {
            if self.active_shafts.contains(&car.shaft()) || car.double_car().is_some() {
                car.check_terminal(&self.config, &mut self.violations);
            }
        }

        for arbiter in self.shafts.values() {
            if let Some(holder) = arbiter.occupant() {
                self.violations.terminal(format!(
                    "E{holder} still occupies transfer floor {} of shaft {}",
                    arbiter.transfer(),
                    arbiter.shaft()
                ));
            }
        }

        let completions = self
            .passengers
            .values()
            .map(|p| Completion {
                priority: p.priority(),
                requested_at: p.requested_at(),
                finished_at: p.finished_at(),
            })
            .collect();

        tracing::info!(
            passed = self.violations.is_empty(),
            violations = self.violations.len(),
            last_event = self.clock,
            "validation finished"
        );
        Report::new(self.violations.into_entries(), self.counters, self.clock, completions)
    }

    /// Configuration in force.
    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Parsed request ledger.
    #[must_use]
    pub fn ledger(&self) -> &RequestLedger {
        &self.ledger
    }

    /// Every car, ordered by id.
    #[must_use]
    pub fn elevators(&self) -> &[ElevatorState] {
        &self.elevators
    }

    /// One car by id.
    pub fn elevator(&self, id: ElevatorId) -> Option<&ElevatorState> {
        self.elevators.iter().find(|car| car.id() == id)
    }

    /// Every passenger, ordered by id.
    pub fn passengers(&self) -> impl Iterator<Item = &PassengerState> {
        self.passengers.values()
    }

    /// One passenger by id.
    pub fn passenger(&self, id: PassengerId) -> Option<&PassengerState> {
        self.passengers.get(&id)
    }

    /// Arbiters of merged shafts.
    pub fn shafts(&self) -> impl Iterator<Item = &ShaftArbiter> {
        self.shafts.values()
    }

    /// Shafts still in service.
    #[must_use]
    pub fn active_shafts(&self) -> &BTreeSet<ElevatorId> {
        &self.active_shafts
    }

    /// Violations recorded so far.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        self.violations.entries()
    }

    /// Largest timestamp seen.
    #[must_use]
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Processed movement and door events.
    #[must_use]
    pub fn counters(&self) -> ActionCounters {
        self.counters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(requests: &str, events: &str) -> Report {
        Validator::new(ValidatorConfig::default(), requests).run(events)
    }

    #[test]
    fn empty_logs_pass() {
        assert!(replay("", "").passed());
    }

    #[test]
    fn output_without_requests_fails() {
        let report = replay("", "[1.0]ARRIVE-F2-1");
        assert_eq!(report.violations().len(), 1);
        assert!(report.messages()[0].contains("empty request log"));
    }

    #[test]
    fn output_for_schedule_only_ledger_fails() {
        let events = "\
[1.5]SCHE-ACCEPT-1-0.2-F3
[1.5]SCHE-BEGIN-1
[2.1]ARRIVE-F2-1
[2.3]ARRIVE-F3-1
[2.3]OPEN-F3-1
[3.3]CLOSE-F3-1
[3.3]SCHE-END-1
";
        let report = replay("[1.0]SCHE-1-0.2-F3", events);
        assert_eq!(report.messages(), ["malformed input: output produced for an empty request log"]);
        assert!(replay("[1.0]SCHE-1-0.2-F3\n[1.0]UPDATE-2-3-F1", "").passed());
    }

    #[test]
    fn unknown_references_are_dropped() {
        let report = replay(
            "[1.0]1-PRI-5-FROM-F1-TO-F2",
            "[1.0]RECEIVE-9-1\n[1.0]RECEIVE-1-7\n[1.1]FLY-1",
        );
        let messages = report.messages();
        assert!(messages.iter().any(|m| m.contains("unknown passenger 9")));
        assert!(messages.iter().any(|m| m.contains("unknown elevator 7")));
        assert!(messages.iter().any(|m| m.contains("unrecognized format")));
        assert!(messages.iter().any(|m| m.contains("P1 not delivered (WAITING at F1)")));
    }

    #[test]
    fn decreasing_timestamp_is_flagged_and_sorted() {
        let mut validator = Validator::new(ValidatorConfig::default(), "[1.0]1-PRI-5-FROM-F1-TO-F2");
        let events = validator.ingest("[2.0]OPEN-F1-1\n[1.0]RECEIVE-1-1");
        assert_eq!(events[0].at, 1.0);
        assert_eq!(events[1].at, 2.0);
        assert!(validator.violations()[0].message.contains("timestamp decreased"));
    }

    #[test]
    fn receive_moves_promise_between_cars() {
        let mut validator = Validator::new(ValidatorConfig::default(), "[1.0]1-PRI-5-FROM-F1-TO-F2");
        for event in validator.ingest("[1.0]RECEIVE-1-1\n[1.1]RECEIVE-1-2") {
            validator.apply(&event);
        }
        assert_eq!(validator.passenger(PassengerId(1)).and_then(PassengerState::promised_by), Some(ElevatorId(2)));
        let first = validator.elevator(ElevatorId(1)).map(|car| car.received().len());
        assert_eq!(first, Some(0));
        assert_eq!(validator.violations().len(), 1);
    }

    #[test]
    fn strict_mode_requires_every_request_accepted() {
        let config = ValidatorConfig { strict_requests: true, ..ValidatorConfig::default() };
        let requests = "[1.0]SCHE-1-0.2-F3\n[1.0]SCHE-2-0.2-F3\n[1.0]1-PRI-5-FROM-F1-TO-F2";
        let events = "\
[1.0]RECEIVE-1-3
[1.0]OPEN-F1-3
[1.0]IN-1-F1-3
[1.4]CLOSE-F1-3
[1.5]SCHE-ACCEPT-1-0.2-F3
[1.5]SCHE-BEGIN-1
[1.8]ARRIVE-F2-3
[1.8]OPEN-F2-3
[1.8]OUT-S-1-F2-3
[2.1]ARRIVE-F2-1
[2.2]CLOSE-F2-3
[2.3]ARRIVE-F3-1
[2.3]OPEN-F3-1
[3.3]CLOSE-F3-1
[3.3]SCHE-END-1
";
        let report = Validator::new(config, requests).run(events);
        assert_eq!(report.messages(), ["terminal: request line 2 'SCHE-2-0.2-F3' never accepted"]);
    }
}
