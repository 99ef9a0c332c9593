use std::time::{Duration, Instant};

/// Default event poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Stopwatch resolution
pub const STOPWATCH_PERIOD: Duration = Duration::from_secs(1);

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Handle for a repeating task polled by the event loop.
///
/// Dropping the handle cancels it; nothing fires once it is gone.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Instant,
}

impl Ticker {
    /// Schedule a repeating tick, first firing one `period` after `now`
    pub fn every(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Number of ticks that became due up to `now`; each is reported once
    pub fn due(&mut self, now: Instant) -> u32 {
        let mut fired = 0;
        while now >= self.next_due {
            fired += 1;
            self.next_due += self.period;
        }
        fired
    }

    /// Time left until the next tick
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}
