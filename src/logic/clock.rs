//! Match clock: start/pause/reset with a one-shot regulation-time alarm.

use serde::{Deserialize, Serialize};

/// Phase of the match clock.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockState {
    /// Match created, clock never started (or reset).
    #[default]
    NotStarted,
    Running,
    Paused,
    /// Match over; the clock no longer moves.
    Ended,
}

/// What a single tick produced.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TickOutcome {
    /// False when the clock was not running and the tick was ignored.
    pub advanced: bool,
    /// True exactly once per reset cycle: the tick that reached regulation time.
    pub alarm_fired: bool,
}

/// Elapsed time of the match in progress. Never persisted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchClock {
    pub seconds: u32,
    pub state: ClockState,
    pub alarmed: bool,
}

impl MatchClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn is_ended(&self) -> bool {
        self.state == ClockState::Ended
    }

    /// Returns false (and does nothing) if already running or ended.
    pub fn start(&mut self) -> bool {
        match self.state {
            ClockState::Running | ClockState::Ended => false,
            ClockState::NotStarted | ClockState::Paused => {
                self.state = ClockState::Running;
                true
            }
        }
    }

    /// Returns false (and does nothing) unless running. Keeps the elapsed seconds.
    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = ClockState::Paused;
        true
    }

    /// Stop if running, zero the time and re-arm the alarm. Ignored once ended.
    pub fn reset(&mut self) -> bool {
        if self.is_ended() {
            return false;
        }
        self.pause();
        self.seconds = 0;
        self.alarmed = false;
        self.state = ClockState::NotStarted;
        true
    }

    /// Advance one second while running.
    ///
    /// The first tick at or past `limit_seconds` fires the alarm; the clock keeps running.
    pub fn tick(&mut self, limit_seconds: u32) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::default();
        }
        self.seconds = self.seconds.saturating_add(1);
        let alarm_fired = !self.alarmed && self.seconds >= limit_seconds;
        if alarm_fired {
            self.alarmed = true;
        }
        TickOutcome {
            advanced: true,
            alarm_fired,
        }
    }

    /// Freeze the clock for good.
    pub fn end(&mut self) {
        self.state = ClockState::Ended;
    }

    /// `MM:SS`, zero padded.
    pub fn display(&self) -> String {
        format_clock(self.seconds)
    }
}

/// Format seconds as `MM:SS` (minutes keep counting past 99).
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
