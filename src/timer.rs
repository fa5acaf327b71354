use std::time::{Duration, Instant};

/// Monotonic time since the app started. Every timestamp the game sees is
/// expressed as an offset from this origin.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::start()
    }
}

/// Fixed-period schedule polled by the owner. Dropping it cancels it.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next_due: Duration,
}

impl Interval {
    /// First tick fires one `period` after `start`.
    pub fn starting_at(start: Duration, period: Duration) -> Self {
        Self {
            period,
            next_due: start + period,
        }
    }

    /// Returns the due time of the next pending tick at or before `now` and
    /// schedules the one after it. Call in a loop to catch up on missed ticks.
    pub fn poll(&mut self, now: Duration) -> Option<Duration> {
        if now < self.next_due {
            return None;
        }

        let due = self.next_due;
        self.next_due += self.period;
        Some(due)
    }

    pub fn next_due(&self) -> Duration {
        self.next_due
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}
