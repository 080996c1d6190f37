//! Performance aggregation for passing runs.

use serde::Serialize;

/// Cost weight of one `ARRIVE`.
pub const ARRIVE_COST: f64 = 0.4;
/// Cost weight of one `OPEN`.
pub const OPEN_COST: f64 = 0.1;
/// Cost weight of one `CLOSE`.
pub const CLOSE_COST: f64 = 0.1;

/// Counts of processed movement and door events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActionCounters {
    /// `ARRIVE` events
    pub arrives: u64,
    /// `OPEN` events
    pub opens: u64,
    /// `CLOSE` events
    pub closes: u64,
}

impl ActionCounters {
    /// Weighted action count.
    pub fn weighted(&self) -> f64 {
        self.arrives as f64 * ARRIVE_COST + self.opens as f64 * OPEN_COST + self.closes as f64 * CLOSE_COST
    }
}

/// Outcome of one passenger, as needed for the completion-time average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Completion {
    /// Priority weight
    pub priority: u32,
    /// Request time
    pub requested_at: f64,
    /// Delivery time, if delivered
    pub finished_at: Option<f64>,
}

/// Summary statistics of a passing run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    /// Larger of the measured wall-clock time and the last event time
    pub makespan: f64,
    /// Priority-weighted mean of delivery minus request time
    pub weighted_completion_time: f64,
    /// `0.4·arrives + 0.1·opens + 0.1·closes`
    pub weighted_action_count: f64,
    /// `ARRIVE` events
    pub arrives: u64,
    /// `OPEN` events
    pub opens: u64,
    /// `CLOSE` events
    pub closes: u64,
}

impl Metrics {
    /// Aggregate counters and completions.
    ///
    /// Passengers that were never delivered, or whose delivery precedes their
    /// request, do not contribute. If passengers exist but none contributes,
    /// the weighted completion time is infinite; with no passengers it is 0.
    pub fn aggregate(
        elapsed: f64,
        last_event_at: f64,
        counters: ActionCounters,
        completions: &[Completion],
    ) -> Self {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0u64;
        for completion in completions {
            let Some(finished_at) = completion.finished_at else { continue };
            let duration = finished_at - completion.requested_at;
            if duration >= 0.0 {
                weighted_sum += duration * f64::from(completion.priority);
                total_weight += u64::from(completion.priority);
            }
        }

        let weighted_completion_time = if total_weight > 0 {
            weighted_sum / total_weight as f64
        } else if completions.is_empty() {
            0.0
        } else {
            f64::INFINITY
        };

        Self {
            makespan: elapsed.max(last_event_at),
            weighted_completion_time,
            weighted_action_count: counters.weighted(),
            arrives: counters.arrives,
            opens: counters.opens,
            closes: counters.closes,
        }
    }
}
