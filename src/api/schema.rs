//! Wire shapes of the backend: request bodies and the acknowledgement envelope.
//!
//! Lists come back as bare arrays and optional lookups as an object or `null`. Every mutation
//! answers `{ "success": bool, "message"?: string, ...payload }`, decoded here as [`Ack`] and
//! turned into a `Result` before anything else sees it.

use crate::error::ConsoleError;
use crate::logic::TeamSheet;
use crate::models::{
    Goal, LineupEntry, Match, MatchId, Player, PlayerId, RosterEntry, Session, TeamColor,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Mutation acknowledgement with its endpoint-specific payload flattened in.
#[derive(Debug, Deserialize)]
pub struct Ack<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Ack<T> {
    pub fn into_result(self) -> Result<T, ConsoleError> {
        if self.success {
            Ok(self.payload)
        } else {
            Err(ConsoleError::Backend {
                message: self
                    .message
                    .unwrap_or_else(|| "request was refused".to_string()),
            })
        }
    }
}

/// Payload of acknowledgements that carry nothing but the message.
#[derive(Debug, Default, Deserialize)]
pub struct NoPayload {}

#[derive(Debug, Default, Deserialize)]
pub struct PlayerPayload {
    #[serde(default)]
    pub player: Option<Player>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionPayload {
    #[serde(default)]
    pub session: Option<Session>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MatchPayload {
    #[serde(default)]
    pub match_id: Option<MatchId>,
    #[serde(default, rename = "match")]
    pub game: Option<Match>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GoalPayload {
    #[serde(default)]
    pub goal: Option<Goal>,
    #[serde(default, rename = "match")]
    pub game: Option<Match>,
}

/// A field of a successful acknowledgement that must be present.
pub fn required<T>(value: Option<T>, field: &str) -> Result<T, ConsoleError> {
    value.ok_or_else(|| ConsoleError::Transport {
        message: format!("response is missing `{}`", field),
    })
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CreateSessionBody {
    pub date: NaiveDate,
}

/// One player of a lineup as sent to the backend.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LineupSlot {
    pub player_id: PlayerId,
    pub is_goalkeeper: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals_conceded: Option<u32>,
}

impl From<&RosterEntry> for LineupSlot {
    fn from(entry: &RosterEntry) -> Self {
        Self {
            player_id: entry.id(),
            is_goalkeeper: entry.played_as_goalkeeper,
            goals_conceded: None,
        }
    }
}

impl From<&LineupEntry> for LineupSlot {
    fn from(entry: &LineupEntry) -> Self {
        Self {
            player_id: entry.player_id,
            is_goalkeeper: entry.is_goalkeeper,
            goals_conceded: entry.is_goalkeeper.then_some(entry.goals_conceded),
        }
    }
}

/// Both lineups, used to start a match and to swap players mid-match.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct LineupsBody {
    pub orange_team: Vec<LineupSlot>,
    pub black_team: Vec<LineupSlot>,
}

impl LineupsBody {
    pub fn from_sheet(sheet: &TeamSheet) -> Self {
        Self {
            orange_team: sheet.orange.iter().map(LineupSlot::from).collect(),
            black_team: sheet.black.iter().map(LineupSlot::from).collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EndMatchBody {
    pub winner_team: Option<TeamColor>,
}
