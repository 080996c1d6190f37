//! Elevator automaton.
//!
//! Each car tracks its physical state (floor, doors, load), its pickup
//! promises, and a protocol mode:
//!
//! ```text
//!            SCHE-ACCEPT              SCHE-BEGIN              SCHE-END
//!  ┌──────┐ ────────────> ┌─────────┐ ──────────> ┌────────┐ ─────────> ┌──────┐
//!  │ Idle │               │ SchPend │             │ SchAct │            │ Idle │
//!  └──────┘ ────────────> ┌─────────┐ ──────────> ┌────────┐ ─────────> └──────┘
//!           UPDATE-ACCEPT │ MrgPend │ UPDATE-BEGIN│ MrgAct │ UPDATE-END  (double-car)
//!                         └─────────┘             └────────┘
//! ```
//!
//! Methods validate one event against the car's own state, record anything
//! wrong on the [`ViolationLog`], and then apply the event anyway. Checks that
//! need another car (shaft arbitration, partner ordering, promise transfer)
//! live in the engine.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use liftcheck_proto::{ElevatorId, Floor, PassengerId};

use crate::{ValidatorConfig, error::ViolationLog};

/// Door position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorState {
    /// Doors closed; the car may move
    Closed,
    /// Doors open; passengers may board or alight
    Open,
}

/// Which half of a double-car shaft a car serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaftRole {
    /// Transfer floor and everything above
    Upper,
    /// Transfer floor and everything below
    Lower,
}

/// Parameters of an accepted reschedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleOrder {
    /// Time of `SCHE-ACCEPT`
    pub accepted_at: f64,
    /// Commanded move time per floor
    pub speed: f64,
    /// Floor to reach and pause at
    pub target: Floor,
    /// Arrivals completed since the accept
    pub arrives: u32,
    /// Time of `SCHE-BEGIN`, once active
    pub began_at: Option<f64>,
}

/// Parameters of an accepted merge, as seen by one of the two cars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeOrder {
    /// Time of `UPDATE-ACCEPT`
    pub accepted_at: f64,
    /// The other car
    pub partner: ElevatorId,
    /// Floor where the two ranges will meet
    pub transfer: Floor,
    /// Half this car will serve
    pub role: ShaftRole,
    /// Arrivals completed since the accept
    pub arrives: u32,
    /// Time of `UPDATE-BEGIN`, once active
    pub began_at: Option<f64>,
}

/// Protocol mode of one car.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElevatorMode {
    /// Ordinary service
    Idle,
    /// Reschedule accepted, not yet begun
    SchedulePending(ScheduleOrder),
    /// Reschedule in progress
    ScheduleActive(ScheduleOrder),
    /// Merge accepted, not yet begun
    MergePending(MergeOrder),
    /// Merge in progress
    MergeActive(MergeOrder),
}

impl ElevatorMode {
    /// Uppercase label used in violation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::SchedulePending(_) => "SCHEDULE_PENDING",
            Self::ScheduleActive(_) => "SCHEDULE_ACTIVE",
            Self::MergePending(_) => "MERGE_PENDING",
            Self::MergeActive(_) => "MERGE_ACTIVE",
        }
    }

    fn is_merging(&self) -> bool {
        matches!(self, Self::MergePending(_) | Self::MergeActive(_))
    }
}

impl fmt::Display for ElevatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Post-merge configuration of one car.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleCar {
    /// The other car in the shaft
    pub partner: ElevatorId,
    /// Surviving shaft id, shared with the partner
    pub shaft: ElevatorId,
    /// Half this car serves
    pub role: ShaftRole,
    /// Floor where the two ranges meet
    pub transfer: Floor,
}

/// One completed OPEN/CLOSE pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorCycle {
    /// Floor of the cycle
    pub floor: Floor,
    /// Time of `OPEN`
    pub opened_at: f64,
    /// Time of `CLOSE`
    pub closed_at: f64,
}

impl DoorCycle {
    /// How long the doors stayed open.
    pub fn hold(&self) -> f64 {
        self.closed_at - self.opened_at
    }
}

/// Replay state of one car.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevatorState {
    id: ElevatorId,
    floor: Floor,
    door: DoorState,
    passengers: BTreeSet<PassengerId>,
    received: BTreeSet<PassengerId>,
    mode: ElevatorMode,
    last_action_at: f64,
    speed: f64,
    min_floor: Floor,
    max_floor: Floor,
    shaft: ElevatorId,
    double_car: Option<DoubleCar>,
    last_open: Option<(Floor, f64)>,
    last_cycles: BTreeMap<Floor, DoorCycle>,
}

impl ElevatorState {
    /// Car at the ground floor, doors closed, empty, full range, idle.
    pub fn new(id: ElevatorId, config: &ValidatorConfig) -> Self {
        Self {
            id,
            floor: Floor::GROUND,
            door: DoorState::Closed,
            passengers: BTreeSet::new(),
            received: BTreeSet::new(),
            mode: ElevatorMode::Idle,
            last_action_at: 0.0,
            speed: config.move_time,
            min_floor: Floor::MIN,
            max_floor: Floor::MAX,
            shaft: id,
            double_car: None,
            last_open: None,
            last_cycles: BTreeMap::new(),
        }
    }

    /// Car id.
    #[must_use]
    pub fn id(&self) -> ElevatorId {
        self.id
    }

    /// Current floor.
    #[must_use]
    pub fn floor(&self) -> Floor {
        self.floor
    }

    /// Door position.
    #[must_use]
    pub fn door(&self) -> DoorState {
        self.door
    }

    /// Passengers aboard.
    #[must_use]
    pub fn passengers(&self) -> &BTreeSet<PassengerId> {
        &self.passengers
    }

    /// Passengers this car has promised to pick up.
    #[must_use]
    pub fn received(&self) -> &BTreeSet<PassengerId> {
        &self.received
    }

    /// Protocol mode.
    #[must_use]
    pub fn mode(&self) -> ElevatorMode {
        self.mode
    }

    /// Current move time per floor.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Completion time of the last action, the anchor for timing checks.
    #[must_use]
    pub fn last_action_at(&self) -> f64 {
        self.last_action_at
    }

    /// Serviceable range, inclusive.
    #[must_use]
    pub fn range(&self) -> (Floor, Floor) {
        (self.min_floor, self.max_floor)
    }

    /// Shaft the car runs in.
    #[must_use]
    pub fn shaft(&self) -> ElevatorId {
        self.shaft
    }

    /// Double-car configuration, once merged.
    #[must_use]
    pub fn double_car(&self) -> Option<&DoubleCar> {
        self.double_car.as_ref()
    }

    /// Last completed door cycle at `floor`.
    pub fn last_cycle(&self, floor: Floor) -> Option<&DoorCycle> {
        self.last_cycles.get(&floor)
    }

    /// Move time the car should run at outside a reschedule.
    pub fn base_speed(&self, config: &ValidatorConfig) -> f64 {
        if self.double_car.is_some() { config.double_car_move_time } else { config.move_time }
    }

    /// Whether `floor` lies within the serviceable range.
    pub fn serves(&self, floor: Floor) -> bool {
        (self.min_floor..=self.max_floor).contains(&floor)
    }

    /// Whether a passenger bound for `destination` can make progress aboard:
    /// the destination is in range, or for a double-car the transfer floor is.
    pub fn can_deliver(&self, destination: Floor) -> bool {
        self.serves(destination) || self.double_car.is_some_and(|dc| self.serves(dc.transfer))
    }

    fn schedule_target(&self) -> Option<Floor> {
        match self.mode {
            ElevatorMode::ScheduleActive(order) => Some(order.target),
            _ => None,
        }
    }

    fn forbid_while_active(&self, what: &str, at: f64, log: &mut ViolationLog) {
        match self.mode {
            ElevatorMode::MergeActive(_) => log.state(at, format!("{what} while merge ACTIVE")),
            ElevatorMode::ScheduleActive(_) => {
                log.state(at, format!("{what} while schedule ACTIVE"));
            },
            _ => {},
        }
    }

    fn check_door_event(&self, tag: &str, floor: Floor, at: f64, log: &mut ViolationLog) {
        let id = self.id;
        if matches!(self.mode, ElevatorMode::MergeActive(_)) {
            log.state(at, format!("E{id} {tag} @{floor} while merge ACTIVE"));
        }
        if let Some(target) = self.schedule_target()
            && target != floor
        {
            log.state(at, format!("E{id} {tag} @{floor} while schedule ACTIVE (target {target})"));
        }
        if floor != self.floor {
            log.state(at, format!("E{id} {tag} @{floor} at wrong floor (car at {})", self.floor));
        }
    }

    /// Validate and apply `ARRIVE`. Returns the floor the car departed from.
    pub(crate) fn arrive(
        &mut self,
        floor: Floor,
        at: f64,
        config: &ValidatorConfig,
        log: &mut ViolationLog,
    ) -> Floor {
        let id = self.id;
        let from = self.floor;

        match &mut self.mode {
            ElevatorMode::MergeActive(_) => {
                log.state(at, format!("E{id} ARRIVE @{floor} while merge ACTIVE"));
            },
            ElevatorMode::SchedulePending(order) => order.arrives += 1,
            ElevatorMode::MergePending(order) => order.arrives += 1,
            _ => {},
        }

        if self.door == DoorState::Open {
            log.state(at, format!("E{id} ARRIVE @{floor} with door OPEN"));
        }
        if !from.is_adjacent(floor) {
            log.state(at, format!("E{id} invalid move {from}->{floor}"));
        }
        if !self.serves(floor) {
            log.state(
                at,
                format!("E{id} ARRIVE @{floor} outside range [{}-{}]", self.min_floor, self.max_floor),
            );
        }

        let expected = self.last_action_at + self.speed;
        if at < expected - config.move_slack() {
            log.timing(
                at,
                format!(
                    "E{id} ARRIVE @{floor} too early: {at:.4} < {expected:.4} (speed {:.1})",
                    self.speed
                ),
            );
        }

        let leaving_transfer =
            self.double_car.is_some_and(|dc| from == dc.transfer && floor != dc.transfer);
        let on_duty = matches!(
            self.mode,
            ElevatorMode::ScheduleActive(_) | ElevatorMode::MergeActive(_)
        );
        if self.passengers.is_empty() && self.received.is_empty() && !on_duty && !leaving_transfer
        {
            log.state(at, format!("E{id} moved empty with no pickup (ARRIVE @{floor})"));
        }

        self.floor = floor;
        self.last_action_at = at;
        from
    }

    /// Validate and apply `OPEN`.
    pub(crate) fn open(
        &mut self,
        floor: Floor,
        at: f64,
        config: &ValidatorConfig,
        log: &mut ViolationLog,
    ) {
        let id = self.id;
        self.check_door_event("OPEN", floor, at, log);
        if self.door != DoorState::Closed {
            log.state(at, format!("E{id} OPEN @{floor} but door not CLOSED"));
        }
        if at < self.last_action_at - config.door_slack() {
            log.timing(
                at,
                format!("E{id} OPEN @{floor} too early: {at:.4} < {:.4}", self.last_action_at),
            );
        }

        self.door = DoorState::Open;
        self.last_open = Some((floor, at));
        self.last_action_at = at;
    }

    /// Validate and apply `CLOSE`.
    pub(crate) fn close(
        &mut self,
        floor: Floor,
        at: f64,
        config: &ValidatorConfig,
        log: &mut ViolationLog,
    ) {
        let id = self.id;
        self.check_door_event("CLOSE", floor, at, log);
        if self.door != DoorState::Open {
            log.state(at, format!("E{id} CLOSE @{floor} but door not OPEN"));
        }

        let at_target = self.schedule_target() == Some(floor);
        let minimum = if at_target { config.schedule_hold } else { config.door_time };
        match self.last_open {
            Some((opened_floor, opened_at)) if opened_floor == floor => {
                let hold = at - opened_at;
                if hold < minimum - config.door_slack() {
                    log.timing(
                        at,
                        format!("E{id} door @{floor} held {hold:.4}s < {minimum:.1}s"),
                    );
                }
                self.last_cycles.insert(floor, DoorCycle { floor, opened_at, closed_at: at });
            },
            _ if self.door == DoorState::Open => {
                log.state(at, format!("E{id} CLOSE @{floor}: no matching OPEN"));
            },
            _ => {},
        }

        self.door = DoorState::Closed;
        self.last_open = None;
        self.last_action_at = at;
    }

    /// Car-side checks for `RECEIVE`.
    pub(crate) fn check_receive(&self, passenger: PassengerId, at: f64, log: &mut ViolationLog) {
        self.forbid_while_active(&format!("RECEIVE-{passenger}-{}", self.id), at, log);
    }

    pub(crate) fn add_promise(&mut self, passenger: PassengerId) {
        self.received.insert(passenger);
    }

    pub(crate) fn drop_promise(&mut self, passenger: PassengerId) {
        self.received.remove(&passenger);
    }

    /// Car-side checks for `IN`.
    pub(crate) fn check_board(
        &self,
        passenger: PassengerId,
        floor: Floor,
        destination: Floor,
        at: f64,
        config: &ValidatorConfig,
        log: &mut ViolationLog,
    ) {
        let id = self.id;
        self.forbid_while_active(&format!("P{passenger} IN E{id} @{floor}"), at, log);
        if self.door != DoorState::Open {
            log.state(at, format!("P{passenger} IN E{id} @{floor} but door not OPEN"));
        }
        if self.passengers.len() >= config.capacity {
            log.state(
                at,
                format!("E{id} over capacity ({}) boarding P{passenger} @{floor}", config.capacity),
            );
        }
        if floor != self.floor {
            log.state(at, format!("P{passenger} IN E{id} @{floor} at wrong floor (car at {})", self.floor));
        }
        if !self.can_deliver(destination) {
            log.state(
                at,
                format!(
                    "P{passenger} IN E{id} @{floor}: car cannot reach {destination} or a transfer floor (range [{}-{}])",
                    self.min_floor, self.max_floor
                ),
            );
        }
    }

    /// Apply `IN`. Records a violation if the passenger is already aboard.
    pub(crate) fn board(&mut self, passenger: PassengerId, at: f64, log: &mut ViolationLog) {
        self.received.remove(&passenger);
        if !self.passengers.insert(passenger) {
            log.state(at, format!("P{passenger} IN E{} but already aboard", self.id));
        }
    }

    /// Car-side checks for `OUT`.
    pub(crate) fn check_alight(
        &self,
        passenger: PassengerId,
        floor: Floor,
        at: f64,
        log: &mut ViolationLog,
    ) {
        let id = self.id;
        if self.door != DoorState::Open {
            log.state(at, format!("P{passenger} OUT E{id} @{floor} but door not OPEN"));
        }
        if floor != self.floor {
            log.state(at, format!("P{passenger} OUT E{id} @{floor} at wrong floor (car at {})", self.floor));
        }
    }

    pub(crate) fn alight(&mut self, passenger: PassengerId) {
        self.passengers.remove(&passenger);
        self.received.remove(&passenger);
    }

    /// Remove a passenger who turned up in another car.
    pub(crate) fn evict(&mut self, passenger: PassengerId) {
        self.passengers.remove(&passenger);
    }

    /// Validate and apply `SCHE-ACCEPT`.
    pub(crate) fn schedule_accept(
        &mut self,
        speed: f64,
        target: Floor,
        at: f64,
        log: &mut ViolationLog,
    ) {
        let id = self.id;
        if self.mode != ElevatorMode::Idle {
            log.state(at, format!("SCHE-ACCEPT-{id}: car {} not IDLE", self.mode));
        }
        if self.double_car.is_some() {
            log.state(at, format!("SCHE-ACCEPT-{id}: car is a double-car"));
        }
        self.mode = ElevatorMode::SchedulePending(ScheduleOrder {
            accepted_at: at,
            speed,
            target,
            arrives: 0,
            began_at: None,
        });
    }

    /// Validate and apply `SCHE-BEGIN`.
    ///
    /// Returns the passengers whose pickup promises were cancelled, or `None`
    /// if the car was not pending a reschedule and the event was dropped.
    pub(crate) fn schedule_begin(
        &mut self,
        at: f64,
        config: &ValidatorConfig,
        log: &mut ViolationLog,
    ) -> Option<Vec<PassengerId>> {
        let id = self.id;
        if self.mode.is_merging() {
            log.state(at, format!("SCHE-BEGIN-{id}: car is {}", self.mode));
            return None;
        }
        if self.double_car.is_some() {
            log.state(at, format!("SCHE-BEGIN-{id}: car is a double-car"));
        }
        let ElevatorMode::SchedulePending(order) = self.mode else {
            log.state(at, format!("SCHE-BEGIN-{id}: car not PENDING ({})", self.mode));
            return None;
        };

        if order.arrives > config.arrive_budget {
            log.state(
                at,
                format!(
                    "SCHE-BEGIN-{id}: {} ARRIVEs since accept (at most {})",
                    order.arrives, config.arrive_budget
                ),
            );
        }
        if self.door != DoorState::Closed {
            log.state(at, format!("SCHE-BEGIN-{id}: door not CLOSED"));
        }
        if at < self.last_action_at - config.epsilon {
            log.state(at, format!("SCHE-BEGIN-{id}: car not stopped"));
        }

        self.mode = ElevatorMode::ScheduleActive(ScheduleOrder { began_at: Some(at), ..order });
        self.speed = order.speed;
        tracing::debug!(elevator = %id, t = at, speed = order.speed, target = %order.target, "schedule active");
        Some(std::mem::take(&mut self.received).into_iter().collect())
    }

    /// Validate and apply `SCHE-END`. Returns `false` if the car was not in
    /// an active reschedule and the event was dropped.
    pub(crate) fn schedule_end(
        &mut self,
        at: f64,
        config: &ValidatorConfig,
        log: &mut ViolationLog,
    ) -> bool {
        let id = self.id;
        if self.mode.is_merging() {
            log.state(at, format!("SCHE-END-{id}: car is {}", self.mode));
            return false;
        }
        let ElevatorMode::ScheduleActive(order) = self.mode else {
            log.state(at, format!("SCHE-END-{id}: car not ACTIVE ({})", self.mode));
            return false;
        };

        let target = order.target;
        if self.floor != target {
            log.state(at, format!("SCHE-END-{id}: car at {}, target {target}", self.floor));
        }
        if !self.passengers.is_empty() {
            log.state(at, format!("SCHE-END-{id}: {} passengers aboard", self.passengers.len()));
        }
        if self.door != DoorState::Closed {
            log.state(at, format!("SCHE-END-{id}: door not CLOSED"));
        }

        let response = at - order.accepted_at;
        if response > config.schedule_response + config.door_slack() {
            log.timing(
                at,
                format!(
                    "SCHE-END-{id}: response {response:.4}s > {:.1}s",
                    config.schedule_response
                ),
            );
        }

        match self.last_cycles.get(&target) {
            Some(cycle) if cycle.hold() < config.schedule_hold - config.door_slack() => {
                log.timing(
                    at,
                    format!(
                        "SCHE-END-{id}: door hold @{target} {:.4}s < {:.1}s",
                        cycle.hold(),
                        config.schedule_hold
                    ),
                );
            },
            Some(_) => {},
            None => log.state(at, format!("SCHE-END-{id}: no OPEN/CLOSE at target {target}")),
        }

        self.mode = ElevatorMode::Idle;
        self.speed = self.base_speed(config);
        self.last_action_at = at;
        tracing::debug!(elevator = %id, t = at, "schedule complete");
        true
    }

    /// Pending merge order, if any.
    pub(crate) fn pending_merge(&self) -> Option<MergeOrder> {
        match self.mode {
            ElevatorMode::MergePending(order) => Some(order),
            _ => None,
        }
    }

    /// Active merge order, if any.
    pub(crate) fn active_merge(&self) -> Option<MergeOrder> {
        match self.mode {
            ElevatorMode::MergeActive(order) => Some(order),
            _ => None,
        }
    }

    /// Apply `UPDATE-ACCEPT` for this car.
    pub(crate) fn merge_accept(&mut self, order: MergeOrder, label: &str, at: f64, log: &mut ViolationLog) {
        if self.mode != ElevatorMode::Idle {
            log.state(at, format!("{label}: E{} {} not IDLE", self.id, self.mode));
        }
        self.mode = ElevatorMode::MergePending(order);
    }

    /// Car-side checks for `UPDATE-BEGIN`.
    pub(crate) fn check_merge_begin(
        &self,
        order: &MergeOrder,
        label: &str,
        at: f64,
        config: &ValidatorConfig,
        log: &mut ViolationLog,
    ) {
        let id = self.id;
        if order.arrives > config.arrive_budget {
            log.state(
                at,
                format!(
                    "{label}: E{id} {} ARRIVEs since accept (at most {})",
                    order.arrives, config.arrive_budget
                ),
            );
        }
        if self.door != DoorState::Closed {
            log.state(at, format!("{label}: E{id} door not CLOSED"));
        }
        if !self.passengers.is_empty() {
            log.state(at, format!("{label}: E{id} has {} passengers aboard", self.passengers.len()));
        }
        if at < self.last_action_at - config.epsilon {
            log.state(at, format!("{label}: E{id} not stopped"));
        }
    }

    /// Apply `UPDATE-BEGIN` for this car. Returns the cancelled promises.
    pub(crate) fn merge_begin(&mut self, order: MergeOrder, at: f64) -> Vec<PassengerId> {
        self.mode = ElevatorMode::MergeActive(MergeOrder { began_at: Some(at), ..order });
        std::mem::take(&mut self.received).into_iter().collect()
    }

    /// Apply `UPDATE-END` for this car: narrow the range to its half of the
    /// shaft and park one floor off the transfer floor.
    pub(crate) fn become_double_car(&mut self, double_car: DoubleCar, at: f64, config: &ValidatorConfig) {
        let transfer = double_car.transfer;
        match double_car.role {
            ShaftRole::Upper => {
                self.min_floor = transfer;
                self.max_floor = Floor::MAX;
                self.floor = transfer.above().unwrap_or(Floor::MAX);
            },
            ShaftRole::Lower => {
                self.min_floor = Floor::MIN;
                self.max_floor = transfer;
                self.floor = transfer.below().unwrap_or(Floor::MIN);
            },
        }
        self.shaft = double_car.shaft;
        self.double_car = Some(double_car);
        self.speed = config.double_car_move_time;
        self.mode = ElevatorMode::Idle;
        self.last_action_at = at;
    }

    /// End-of-log checks for a car still in service.
    pub(crate) fn check_terminal(&self, config: &ValidatorConfig, log: &mut ViolationLog) {
        let id = self.id;
        if !self.passengers.is_empty() {
            log.terminal(format!("E{id} finished with passengers aboard: {}", id_list(&self.passengers)));
        }
        if self.door != DoorState::Closed {
            log.terminal(format!("E{id} finished with door OPEN"));
        }
        if self.mode != ElevatorMode::Idle {
            log.terminal(format!("E{id} finished in {} instead of IDLE", self.mode));
        }
        if !self.received.is_empty() {
            log.terminal(format!("E{id} finished with outstanding promises: {}", id_list(&self.received)));
        }
        let expected = self.base_speed(config);
        if (self.speed - expected).abs() > config.epsilon {
            log.terminal(format!("E{id} finished at speed {:.1}, expected {expected:.1}", self.speed));
        }
    }
}

fn id_list(ids: &BTreeSet<PassengerId>) -> String {
    let ids: Vec<_> = ids.iter().map(ToString::to_string).collect();
    format!("[{}]", ids.join(", "))
}
