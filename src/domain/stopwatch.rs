use super::history::Action;
use super::todo::TodoStore;
use crate::ticker::{Ticker, STOPWATCH_PERIOD};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Elapsed stopwatch time. Minutes and seconds stay within 0..60, hours are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Elapsed {
    pub hours: u64,
    pub minutes: u8,
    pub seconds: u8,
}

impl Elapsed {
    /// Build from possibly out-of-range parts, carrying overflow upwards
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        let total = hours
            .saturating_mul(3600)
            .saturating_add(minutes.saturating_mul(60))
            .saturating_add(seconds);
        Self::from_total_seconds(total)
    }

    pub fn from_total_seconds(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: ((total / 60) % 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours
            .saturating_mul(3600)
            .saturating_add(u64::from(self.minutes) * 60 + u64::from(self.seconds))
    }

    /// Advance by one second
    pub fn tick(&mut self) {
        self.seconds += 1;
        if self.seconds >= 60 {
            self.seconds = 0;
            self.minutes += 1;
            if self.minutes >= 60 {
                self.minutes = 0;
                self.hours = self.hours.saturating_add(1);
            }
        }
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

/// Formats as HH:MM:SS; hours widen past two digits instead of wrapping
impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Persisted form of the stopwatch (stored under the `stopwatch` key)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopwatchSnapshot {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub bound_task_id: Option<i64>,
}

/// Session stopwatch, optionally timing one todo.
///
/// Stopped with a non-zero elapsed value is the paused state. The periodic
/// tick lives in `ticker`; the stopwatch is running exactly while it is set.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    elapsed: Elapsed,
    bound_task_id: Option<i64>,
    ticker: Option<Ticker>,
}

impl Stopwatch {
    /// Restore from disk. A stopwatch saved while running comes back paused.
    pub fn restore(snapshot: &StopwatchSnapshot) -> Self {
        Self {
            elapsed: Elapsed::new(snapshot.hours, snapshot.minutes, snapshot.seconds),
            bound_task_id: snapshot.bound_task_id,
            ticker: None,
        }
    }

    pub fn snapshot(&self) -> StopwatchSnapshot {
        StopwatchSnapshot {
            hours: self.elapsed.hours,
            minutes: u64::from(self.elapsed.minutes),
            seconds: u64::from(self.elapsed.seconds),
            running: self.is_running(),
            bound_task_id: self.bound_task_id,
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn elapsed(&self) -> Elapsed {
        self.elapsed
    }

    pub fn bound_task_id(&self) -> Option<i64> {
        self.bound_task_id
    }

    /// Start ticking. Binds the first incomplete todo if nothing is bound yet.
    ///
    /// Starting while running does nothing, so there is never more than one
    /// active tick source.
    pub fn start(&mut self, now: Instant, todos: &TodoStore) -> Option<Action> {
        if self.is_running() {
            return None;
        }
        self.ticker = Some(Ticker::every(STOPWATCH_PERIOD, now));

        if self.bound_task_id.is_some() {
            return None;
        }
        let todo = todos.first_incomplete()?;
        self.bound_task_id = Some(todo.id);
        Some(Action::StartedTiming(todo.text.clone()))
    }

    /// Apply every tick due by `now`; returns how many fired
    pub fn advance(&mut self, now: Instant) -> u32 {
        let Some(ticker) = self.ticker.as_mut() else {
            return 0;
        };
        let fired = ticker.due(now);
        for _ in 0..fired {
            self.tick();
        }
        fired
    }

    /// Single one-second increment
    pub fn tick(&mut self) {
        self.elapsed.tick();
    }

    /// Time until the next tick, if running
    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.as_ref().map(|t| t.until_next(now))
    }

    /// Stop ticking and keep the elapsed time
    pub fn pause(&mut self, todos: &TodoStore) -> Option<Action> {
        if self.ticker.take().is_none() {
            return None;
        }

        let todo = todos.get(self.bound_task_id?)?;
        Some(Action::PausedTiming {
            text: todo.text.clone(),
            elapsed: self.elapsed,
        })
    }

    /// Stop, zero the clock and drop the binding
    pub fn reset(&mut self, todos: &TodoStore) -> Option<Action> {
        self.ticker = None;
        self.elapsed = Elapsed::default();

        let todo = todos.get(self.bound_task_id.take()?)?;
        Some(Action::ResetTiming(todo.text.clone()))
    }

    /// Forget the binding if it points at `id`
    pub fn unbind(&mut self, id: i64) -> bool {
        if self.bound_task_id == Some(id) {
            self.bound_task_id = None;
            true
        } else {
            false
        }
    }
}
