//! Session, Settings and event log entries.

use crate::error::ConsoleError;
use crate::models::game::MatchId;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Backend-issued session id.
pub type SessionId = i64;

/// Regulation time when nothing is configured.
pub const DEFAULT_MATCH_DURATION_MINUTES: u32 = 10;
/// Longest regulation time the console accepts.
pub const MAX_MATCH_DURATION_MINUTES: u32 = 60;

/// One calendar-day gathering.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub match_count: u32,
}

/// Console-wide settings.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Regulation time per match, in minutes.
    #[serde(default = "default_match_duration")]
    pub match_duration: u32,
}

fn default_match_duration() -> u32 {
    DEFAULT_MATCH_DURATION_MINUTES
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            match_duration: DEFAULT_MATCH_DURATION_MINUTES,
        }
    }
}

impl Settings {
    pub fn new(match_duration: u32) -> Result<Self, ConsoleError> {
        if !(1..=MAX_MATCH_DURATION_MINUTES).contains(&match_duration) {
            return Err(ConsoleError::InvalidDuration);
        }
        Ok(Self { match_duration })
    }

    /// Settings as stored by the backend, with an unset or out-of-range duration
    /// replaced by the default.
    pub fn normalized(self) -> Self {
        Self::new(self.match_duration).unwrap_or_default()
    }

    /// Seconds after which the regulation alarm fires.
    pub fn limit_seconds(&self) -> u32 {
        self.match_duration.saturating_mul(60)
    }
}

/// One row of the backend's event log.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id: i64,
    pub event_type: String,
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default)]
    pub match_id: Option<MatchId>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}
