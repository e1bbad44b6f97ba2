//! Decaying poll delay for run observation.
//!
//! Unlike retry backoff this schedule shrinks: the first wait
//! is the longest and every later wait is shorter, down to a floor. Runs that
//! have been in flight for a while tend to finish soon, so later polls are
//! tighter.

use std::time::Duration;

/// Linear-decay polling schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    /// Delay before the second poll.
    pub initial_delay: Duration,
    /// Amount subtracted after every poll.
    pub decrement: Duration,
    /// Lower bound for every delay.
    pub min_delay: Duration,
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(250),
            decrement: Duration::from_millis(75),
            min_delay: Duration::from_millis(100),
        }
    }
}

impl PollSchedule {
    /// Infinite sequence of delays: `d0 = initial`, `d(k+1) = max(min, d(k) - decrement)`.
    pub fn delays(&self) -> PollDelays {
        PollDelays {
            next: self.initial_delay.max(self.min_delay),
            schedule: *self,
        }
    }
}

/// Iterator over the delays of a [`PollSchedule`]. Never ends.
#[derive(Debug, Clone)]
pub struct PollDelays {
    next: Duration,
    schedule: PollSchedule,
}

impl Iterator for PollDelays {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let current = self.next;
        self.next = current
            .saturating_sub(self.schedule.decrement)
            .max(self.schedule.min_delay);
        Some(current)
    }
}
