//! Reference controller logs.
//!
//! [`ServiceScript`] plays a deliberately naive controller: one car serves
//! each trip in order, travelling at the default speed and holding its doors
//! for exactly the minimum time. Whatever it prints is correct by
//! construction, which makes it the positive half of property tests.

use liftcheck_core::ValidatorConfig;
use liftcheck_proto::{
    AlightOutcome, ElevatorId, Event, Floor, PassengerId, Request, TimedEvent, TimedRequest,
    TripRequest,
};

/// Single-car service plan that renders into a passing pair of logs.
#[derive(Debug, Clone)]
pub struct ServiceScript {
    elevator: ElevatorId,
    move_time: f64,
    door_time: f64,
    start: f64,
    trips: Vec<TripRequest>,
}

impl ServiceScript {
    /// Plan for `elevator` with the default building timings.
    pub fn new(elevator: ElevatorId) -> Self {
        Self::with_config(elevator, &ValidatorConfig::default())
    }

    /// Plan using the timings of `config`.
    pub fn with_config(elevator: ElevatorId, config: &ValidatorConfig) -> Self {
        Self {
            elevator,
            move_time: config.move_time,
            door_time: config.door_time,
            start: 1.0,
            trips: Vec::new(),
        }
    }

    /// Time at which every request arrives and service begins.
    #[must_use]
    pub fn starting_at(mut self, at: f64) -> Self {
        self.start = at;
        self
    }

    /// Append a trip. Trips are served in insertion order.
    #[must_use]
    pub fn trip(mut self, passenger: u32, priority: u32, from: Floor, to: Floor) -> Self {
        self.trips.push(TripRequest { passenger: PassengerId(passenger), priority, from, to });
        self
    }

    /// Planned trips.
    pub fn trips(&self) -> &[TripRequest] {
        &self.trips
    }

    /// Requests of the plan, all arriving at the start time.
    pub fn requests(&self) -> Vec<TimedRequest> {
        self.trips.iter().map(|trip| TimedRequest { at: self.start, request: Request::Trip(*trip) }).collect()
    }

    /// Events the naive controller prints.
    pub fn events(&self) -> Vec<TimedEvent> {
        let mut car = ScriptedCar {
            elevator: self.elevator,
            floor: Floor::GROUND,
            at: self.start,
            move_time: self.move_time,
            door_time: self.door_time,
            out: Vec::new(),
        };

        for trip in &self.trips {
            car.emit(Event::Receive { passenger: trip.passenger, elevator: self.elevator });
            car.travel(trip.from);
            car.door_cycle(Event::Board { passenger: trip.passenger, floor: trip.from, elevator: self.elevator });
            car.travel(trip.to);
            car.door_cycle(Event::Alight {
                outcome: AlightOutcome::Success,
                passenger: trip.passenger,
                floor: trip.to,
                elevator: self.elevator,
            });
        }
        car.out
    }

    /// Request log text.
    pub fn request_log(&self) -> String {
        render(self.requests())
    }

    /// Event log text.
    pub fn event_log(&self) -> String {
        render(self.events())
    }
}

fn render<T: std::fmt::Display>(lines: Vec<T>) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

struct ScriptedCar {
    elevator: ElevatorId,
    floor: Floor,
    at: f64,
    move_time: f64,
    door_time: f64,
    out: Vec<TimedEvent>,
}

impl ScriptedCar {
    fn emit(&mut self, event: Event) {
        self.out.push(TimedEvent::new(self.at, event));
    }

    fn travel(&mut self, target: Floor) {
        while let Some(next) = self.floor.step_toward(target) {
            self.at += self.move_time;
            self.floor = next;
            self.emit(Event::Arrive { floor: next, elevator: self.elevator });
        }
    }

    fn door_cycle(&mut self, exchange: Event) {
        self.emit(Event::Open { floor: self.floor, elevator: self.elevator });
        self.emit(exchange);
        self.at += self.door_time;
        self.emit(Event::Close { floor: self.floor, elevator: self.elevator });
    }
}
