//! One-second driver for the match clock.

use crate::logic::{format_clock, ClockState, MatchClock};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

const TICK: Duration = Duration::from_secs(1);

/// What the scoreboard shows for the clock.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub seconds: u32,
    /// `MM:SS`.
    pub display: String,
    pub state: ClockState,
    /// The regulation alarm has already gone off.
    pub alarmed: bool,
    /// Elapsed time is at or past regulation time.
    pub time_up: bool,
}

impl ClockSnapshot {
    fn of(clock: &MatchClock, limit_seconds: u32) -> Self {
        Self {
            seconds: clock.seconds,
            display: format_clock(clock.seconds),
            state: clock.state,
            alarmed: clock.alarmed,
            time_up: clock.seconds >= limit_seconds,
        }
    }
}

/// Owns the tick task of one console's clock. Dropping it stops the task.
#[derive(Debug)]
pub struct ClockTicker {
    clock: Arc<Mutex<MatchClock>>,
    limit_seconds: Arc<AtomicU32>,
    updates: Arc<watch::Sender<ClockSnapshot>>,
    task: Option<JoinHandle<()>>,
}

fn lock(clock: &Mutex<MatchClock>) -> MutexGuard<'_, MatchClock> {
    clock.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ClockTicker {
    pub fn new(limit_seconds: u32) -> Self {
        let clock = MatchClock::new();
        let (updates, _) = watch::channel(ClockSnapshot::of(&clock, limit_seconds));
        Self {
            clock: Arc::new(Mutex::new(clock)),
            limit_seconds: Arc::new(AtomicU32::new(limit_seconds)),
            updates: Arc::new(updates),
            task: None,
        }
    }

    pub fn limit_seconds(&self) -> u32 {
        self.limit_seconds.load(Ordering::Relaxed)
    }

    /// Change regulation time; a running clock picks it up on its next tick.
    pub fn set_limit(&self, limit_seconds: u32) {
        self.limit_seconds.store(limit_seconds, Ordering::Relaxed);
        self.publish();
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot::of(&lock(&self.clock), self.limit_seconds())
    }

    pub fn subscribe(&self) -> watch::Receiver<ClockSnapshot> {
        self.updates.subscribe()
    }

    /// Start or resume. Must be called from within a tokio runtime.
    pub fn start(&mut self) -> bool {
        if !lock(&self.clock).start() {
            return false;
        }
        self.stop_task();
        let clock = Arc::clone(&self.clock);
        let limit = Arc::clone(&self.limit_seconds);
        let updates = Arc::clone(&self.updates);
        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + TICK, TICK);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let limit_seconds = limit.load(Ordering::Relaxed);
                let snapshot = {
                    let mut clock = lock(&clock);
                    let outcome = clock.tick(limit_seconds);
                    if !outcome.advanced {
                        break;
                    }
                    if outcome.alarm_fired {
                        log::warn!("Regulation time reached at {}", clock.display());
                    }
                    ClockSnapshot::of(&clock, limit_seconds)
                };
                updates.send_replace(snapshot);
            }
        }));
        self.publish();
        true
    }

    pub fn pause(&mut self) -> bool {
        self.stop_task();
        let paused = lock(&self.clock).pause();
        self.publish();
        paused
    }

    /// Back to 00:00, stopped, alarm re-armed. Ignored once the clock has ended.
    pub fn reset(&mut self) -> bool {
        let reset = lock(&self.clock).reset();
        if reset {
            self.stop_task();
            self.publish();
        }
        reset
    }

    /// Freeze the clock for good, e.g. when the match ends.
    pub fn end(&mut self) {
        self.stop_task();
        lock(&self.clock).end();
        self.publish();
    }

    fn stop_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn publish(&self) {
        self.updates.send_replace(self.snapshot());
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.stop_task();
    }
}
