use std::time::{Duration, Instant};

/// Default event-poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Length of one countdown tick
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Get event-poll duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// The one-second tick source driving the focus timer.
///
/// There is only ever one of these per app. While armed it reports how many
/// whole seconds have passed since it was last drained; disarming drops any
/// partial second so a later resume starts a fresh interval.
#[derive(Debug, Default)]
pub struct Ticker {
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Start a fresh interval, replacing any pending one
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + TICK_INTERVAL);
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    /// Number of ticks that have come due by `now`
    pub fn drain(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };

        let mut ticks = 0;
        while due <= now {
            ticks += 1;
            due += TICK_INTERVAL;
        }
        self.next_due = Some(due);
        ticks
    }
}
