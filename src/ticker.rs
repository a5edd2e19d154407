use std::time::Duration;

/// A cancellable repeating deadline on the rotation's virtual clock.
///
/// The first tick comes one full period after `start`, every following tick
/// one period after the previous deadline. Deadlines are computed from the
/// schedule rather than from the moment a tick was observed, so frame jitter
/// does not accumulate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ticker {
    period: Duration,
    due: Option<Duration>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, now: Duration, period: Duration) {
        self.period = period;
        self.due = Some(now + period);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.due
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Consume one tick if its deadline has passed at `now`.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.due {
            Some(due) if due <= now => {
                self.due = Some(due + self.period);
                true
            }
            _ => false,
        }
    }
}
