//! Validator configuration.
//!
//! Timing bounds and capacities the replay is judged against. The defaults
//! describe the six-car building the controller is written for; tests and
//! the CLI override individual fields.

/// Number of cars in the building.
pub const DEFAULT_ELEVATOR_COUNT: u32 = 6;

/// Maximum passengers aboard one car.
pub const DEFAULT_CAPACITY: usize = 6;

/// Seconds per floor in ordinary service.
pub const DEFAULT_MOVE_TIME: f64 = 0.4;

/// Seconds per floor once a car is half of a double-car shaft.
pub const DEFAULT_DOUBLE_CAR_MOVE_TIME: f64 = 0.2;

/// Minimum time doors stay open.
pub const DEFAULT_DOOR_TIME: f64 = 0.4;

/// Minimum door hold at the target floor of a reschedule.
pub const DEFAULT_SCHEDULE_HOLD: f64 = 1.0;

/// Maximum time from `SCHE-ACCEPT` to `SCHE-END`.
pub const DEFAULT_SCHEDULE_RESPONSE: f64 = 6.0;

/// Minimum time from `UPDATE-BEGIN` to `UPDATE-END`.
pub const DEFAULT_MERGE_HOLD: f64 = 1.0;

/// Maximum time from `UPDATE-ACCEPT` to `UPDATE-END`.
pub const DEFAULT_MERGE_RESPONSE: f64 = 6.0;

/// Tolerance for floating-point time comparisons.
pub const DEFAULT_EPSILON: f64 = 0.001;

/// Arrivals a car may complete between an accept and the matching begin.
pub const DEFAULT_ARRIVE_BUDGET: u32 = 2;

/// Validator configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorConfig {
    /// Cars are numbered `1..=elevator_count`
    pub elevator_count: u32,
    /// Passengers a car may carry at once
    pub capacity: usize,
    /// Seconds per floor in ordinary service
    pub move_time: f64,
    /// Seconds per floor for a double-car
    pub double_car_move_time: f64,
    /// Minimum ordinary door hold
    pub door_time: f64,
    /// Minimum door hold at a reschedule target
    pub schedule_hold: f64,
    /// Upper bound on accept-to-end for a reschedule
    pub schedule_response: f64,
    /// Minimum begin-to-end for a merge
    pub merge_hold: f64,
    /// Upper bound on accept-to-end for a merge
    pub merge_response: f64,
    /// Base tolerance for time comparisons
    pub epsilon: f64,
    /// Arrivals allowed between accept and begin
    pub arrive_budget: u32,
    /// Require every accept to consume a matching request and every request
    /// to be accepted
    pub strict_requests: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            elevator_count: DEFAULT_ELEVATOR_COUNT,
            capacity: DEFAULT_CAPACITY,
            move_time: DEFAULT_MOVE_TIME,
            double_car_move_time: DEFAULT_DOUBLE_CAR_MOVE_TIME,
            door_time: DEFAULT_DOOR_TIME,
            schedule_hold: DEFAULT_SCHEDULE_HOLD,
            schedule_response: DEFAULT_SCHEDULE_RESPONSE,
            merge_hold: DEFAULT_MERGE_HOLD,
            merge_response: DEFAULT_MERGE_RESPONSE,
            epsilon: DEFAULT_EPSILON,
            arrive_budget: DEFAULT_ARRIVE_BUDGET,
            strict_requests: false,
        }
    }
}

impl ValidatorConfig {
    /// Slack for arrival timing against the previous action's completion.
    pub fn move_slack(&self) -> f64 {
        self.epsilon * 20.0
    }

    /// Slack for door holds, door timing and protocol deadlines.
    pub fn door_slack(&self) -> f64 {
        self.epsilon * 10.0
    }

    /// Whether `id` names a car in the building.
    pub fn has_elevator(&self, id: u32) -> bool {
        (1..=self.elevator_count).contains(&id)
    }
}
