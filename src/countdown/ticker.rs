use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

/// What a tick callback wants the ticker to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Stop,
}

/// Shared stop flag for a [`Ticker`]. Clone it to cancel from elsewhere.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A repeating task on a fixed period.
///
/// The first tick is due at the start instant. If the caller falls behind,
/// missed ticks are coalesced into one rather than replayed.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    next_due: Instant,
    cancel: CancelHandle,
}

impl Ticker {
    pub fn new(period: Duration, start: Instant) -> Self {
        Self {
            // A zero period would spin; one millisecond is the floor.
            period: period.max(Duration::from_millis(1)),
            next_due: start,
            cancel: CancelHandle::default(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// How long until the next tick, or `None` once cancelled.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        if self.cancel.is_cancelled() {
            return None;
        }
        Some(self.next_due.saturating_duration_since(now))
    }

    /// Consume a due tick. Returns false if nothing is due or the ticker was
    /// cancelled.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.cancel.is_cancelled() || now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        if self.next_due <= now {
            let behind = now.duration_since(self.next_due);
            let skipped = (behind.as_nanos() / self.period.as_nanos() + 1) as u64;
            debug!(skipped, "coalescing missed ticks");
            self.next_due = now + self.period;
        }
        true
    }

    /// Block the current thread, calling `f` on every tick until it returns
    /// `Stop` or the ticker is cancelled.
    pub fn run<F>(mut self, mut f: F)
    where
        F: FnMut() -> TickOutcome,
    {
        while let Some(wait) = self.time_until_due(Instant::now()) {
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
            if self.poll(Instant::now()) && f() == TickOutcome::Stop {
                self.cancel.cancel();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn first_tick_due_immediately() {
        let start = Instant::now();
        let mut t = Ticker::new(SECOND, start);
        assert_eq!(t.time_until_due(start), Some(Duration::ZERO));
        assert!(t.poll(start));
        assert!(!t.poll(start));
        assert_eq!(t.time_until_due(start), Some(SECOND));
    }

    #[test]
    fn deferred_start_skips_the_first_period() {
        // A caller that has already ticked by hand starts the ticker one
        // period out so the same second isn't rendered twice.
        let now = Instant::now();
        let mut t = Ticker::new(SECOND, now + SECOND);
        assert!(!t.poll(now));
        assert!(!t.poll(now + Duration::from_millis(999)));
        assert_eq!(t.time_until_due(now), Some(SECOND));
        assert!(t.poll(now + SECOND));
        assert!(!t.poll(now + SECOND));
    }

    #[test]
    fn ticks_on_period() {
        let start = Instant::now();
        let mut t = Ticker::new(SECOND, start);
        assert!(t.poll(start));
        assert!(!t.poll(start + Duration::from_millis(999)));
        assert!(t.poll(start + SECOND));
        assert!(t.poll(start + 2 * SECOND + Duration::from_millis(10)));
    }

    #[test]
    fn missed_ticks_coalesce() {
        let start = Instant::now();
        let mut t = Ticker::new(SECOND, start);
        assert!(t.poll(start));
        let late = start + 5 * SECOND + Duration::from_millis(500);
        assert!(t.poll(late));
        assert!(!t.poll(late));
        assert_eq!(t.time_until_due(late), Some(SECOND));
    }

    #[test]
    fn cancel_stops_polling() {
        let start = Instant::now();
        let mut t = Ticker::new(SECOND, start);
        let handle = t.handle();
        handle.cancel();
        assert!(!t.poll(start));
        assert_eq!(t.time_until_due(start), None);
    }

    #[test]
    fn run_stops_when_callback_says_so() {
        let t = Ticker::new(Duration::from_millis(1), Instant::now());
        let handle = t.handle();
        let mut calls = 0;
        t.run(|| {
            calls += 1;
            if calls == 3 {
                TickOutcome::Stop
            } else {
                TickOutcome::Continue
            }
        });
        assert_eq!(calls, 3);
        assert!(handle.is_cancelled());
    }

    #[test]
    fn run_does_nothing_when_cancelled_up_front() {
        let t = Ticker::new(SECOND, Instant::now());
        t.handle().cancel();
        let mut calls = 0;
        t.run(|| {
            calls += 1;
            TickOutcome::Continue
        });
        assert_eq!(calls, 0);
    }

    #[test]
    fn zero_period_is_floored() {
        let t = Ticker::new(Duration::ZERO, Instant::now());
        assert_eq!(t.period(), Duration::from_millis(1));
    }
}
