//! Per-question countdown.
//!
//! [`Countdown`] is the pure state: remaining seconds, running flag and a
//! generation counter bumped on every arm/cancel. [`QuestionTimer`] drives it
//! from a spawned metronome task that sends one tick per elapsed second, tagged
//! with the generation that armed it. Ticks from an older generation are
//! dropped, so a question that has already been resolved never sees a late
//! expiry.

use std::future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// Remaining time at or below which the countdown counts as running low.
pub const LOW_TIME_THRESHOLD_SECS: u32 = 10;

/// Signal produced by an applied tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    Tick { remaining: u32 },
    /// Emitted exactly once per arm, when `remaining` reaches zero.
    Expired,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    running: bool,
    generation: u64,
}

impl Countdown {
    /// Reset to `budget_secs` and start running. Returns the new generation.
    pub fn arm(&mut self, budget_secs: u32) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.remaining = budget_secs;
        self.running = true;
        self.generation
    }

    /// Stop without emitting anything. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        self.running = false;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Apply one elapsed second from the metronome armed at `generation`.
    ///
    /// Returns `None` for stale ticks and for ticks after the countdown stopped.
    pub fn tick(&mut self, generation: u64) -> Option<TimerSignal> {
        if !self.running || generation != self.generation {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            return Some(TimerSignal::Expired);
        }
        Some(TimerSignal::Tick {
            remaining: self.remaining,
        })
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn is_low(&self) -> bool {
        self.running && self.remaining <= LOW_TIME_THRESHOLD_SECS
    }
}

/// Real-time countdown owned by the active question.
pub struct QuestionTimer {
    countdown: Countdown,
    period: Duration,
    ticks_tx: mpsc::UnboundedSender<u64>,
    ticks_rx: mpsc::UnboundedReceiver<u64>,
    metronome: Option<JoinHandle<()>>,
}

impl QuestionTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_period(Duration::from_secs(1))
    }

    #[must_use]
    pub fn with_period(period: Duration) -> Self {
        let (ticks_tx, ticks_rx) = mpsc::unbounded_channel();
        Self {
            countdown: Countdown::default(),
            period,
            ticks_tx,
            ticks_rx,
            metronome: None,
        }
    }

    /// Cancel any running countdown and start a new one of `budget_secs`.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn arm(&mut self, budget_secs: u32) {
        self.stop_metronome();
        let generation = self.countdown.arm(budget_secs);
        let ticks_tx = self.ticks_tx.clone();
        let period = self.period;
        let ticks = budget_secs.max(1);

        self.metronome = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            for _ in 0..ticks {
                interval.tick().await;
                if ticks_tx.send(generation).is_err() {
                    break;
                }
            }
        }));
    }

    /// Stop ticking. No signal is delivered afterwards until the next `arm`.
    pub fn cancel(&mut self) {
        self.stop_metronome();
        self.countdown.cancel();
    }

    /// Wait for the next tick of the current countdown.
    ///
    /// Pends forever while the countdown is not running. Cancel safe.
    pub async fn next_signal(&mut self) -> TimerSignal {
        loop {
            if !self.countdown.is_running() {
                return future::pending().await;
            }
            let Some(generation) = self.ticks_rx.recv().await else {
                return future::pending().await;
            };
            if let Some(signal) = self.countdown.tick(generation) {
                return signal;
            }
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.countdown.is_running()
    }

    #[must_use]
    pub fn is_low(&self) -> bool {
        self.countdown.is_low()
    }

    fn stop_metronome(&mut self) {
        if let Some(handle) = self.metronome.take() {
            handle.abort();
        }
    }
}

impl Default for QuestionTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for QuestionTimer {
    fn drop(&mut self) {
        self.stop_metronome();
    }
}

impl std::fmt::Debug for QuestionTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionTimer")
            .field("countdown", &self.countdown)
            .field("period", &self.period)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_expires_exactly_once() {
        let mut countdown = Countdown::default();
        let generation = countdown.arm(3);

        assert_eq!(
            countdown.tick(generation),
            Some(TimerSignal::Tick { remaining: 2 })
        );
        assert_eq!(
            countdown.tick(generation),
            Some(TimerSignal::Tick { remaining: 1 })
        );
        assert_eq!(countdown.tick(generation), Some(TimerSignal::Expired));
        assert_eq!(countdown.tick(generation), None);
        assert!(!countdown.is_running());
    }

    #[test]
    fn countdown_ignores_stale_generation() {
        let mut countdown = Countdown::default();
        let first = countdown.arm(30);
        let second = countdown.arm(30);

        assert_eq!(countdown.tick(first), None);
        assert_eq!(countdown.remaining(), 30);
        assert_eq!(
            countdown.tick(second),
            Some(TimerSignal::Tick { remaining: 29 })
        );
    }

    #[test]
    fn cancel_is_idempotent_and_silences_ticks() {
        let mut countdown = Countdown::default();
        let generation = countdown.arm(5);
        countdown.cancel();
        countdown.cancel();

        assert!(!countdown.is_running());
        assert_eq!(countdown.tick(generation), None);
        assert_eq!(countdown.remaining(), 5);
    }

    #[test]
    fn zero_budget_expires_on_first_tick() {
        let mut countdown = Countdown::default();
        let generation = countdown.arm(0);
        assert_eq!(countdown.tick(generation), Some(TimerSignal::Expired));
    }

    #[test]
    fn low_time_threshold() {
        let mut countdown = Countdown::default();
        let generation = countdown.arm(11);
        assert!(!countdown.is_low());
        countdown.tick(generation);
        assert!(countdown.is_low());
        countdown.cancel();
        assert!(!countdown.is_low());
    }

    #[tokio::test(start_paused = true)]
    async fn timer_ticks_once_per_second_then_expires() {
        let mut timer = QuestionTimer::new();
        let started = Instant::now();
        timer.arm(3);

        assert_eq!(timer.next_signal().await, TimerSignal::Tick { remaining: 2 });
        assert_eq!(started.elapsed(), Duration::from_secs(1));
        assert_eq!(timer.next_signal().await, TimerSignal::Tick { remaining: 1 });
        assert_eq!(timer.next_signal().await, TimerSignal::Expired);
        assert_eq!(started.elapsed(), Duration::from_secs(3));
        assert!(!timer.is_running());

        let after_expiry = time::timeout(Duration::from_secs(10), timer.next_signal()).await;
        assert!(after_expiry.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_stays_silent() {
        let mut timer = QuestionTimer::new();
        timer.arm(2);
        assert_eq!(timer.next_signal().await, TimerSignal::Tick { remaining: 1 });

        timer.cancel();
        timer.cancel();

        let late = time::timeout(Duration::from_secs(5), timer.next_signal()).await;
        assert!(late.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_discards_queued_ticks() {
        let mut timer = QuestionTimer::new();
        timer.arm(30);
        // Let a few ticks pile up in the channel without consuming them.
        time::sleep(Duration::from_millis(3_500)).await;

        timer.arm(30);
        assert_eq!(timer.remaining(), 30);
        assert_eq!(timer.next_signal().await, TimerSignal::Tick { remaining: 29 });
    }
}
