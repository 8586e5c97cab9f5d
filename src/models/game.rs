//! Match, Goal, TeamColor and lineups as the backend reports them.

use crate::models::player::PlayerId;
use crate::models::session::SessionId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend-issued match id.
pub type MatchId = i64;

/// Backend-issued goal id.
pub type GoalId = i64;

/// The two bibs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamColor {
    Orange,
    Black,
}

impl TeamColor {
    pub const BOTH: [TeamColor; 2] = [TeamColor::Orange, TeamColor::Black];

    pub fn opponent(self) -> Self {
        match self {
            TeamColor::Orange => TeamColor::Black,
            TeamColor::Black => TeamColor::Orange,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TeamColor::Orange => "orange",
            TeamColor::Black => "black",
        }
    }
}

impl fmt::Display for TeamColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One match of a session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default = "first_match_number")]
    pub match_number: u32,
    #[serde(default)]
    pub orange_score: u32,
    #[serde(default)]
    pub black_score: u32,
    /// Terminal once false.
    #[serde(default)]
    pub is_active: bool,
    /// None while active, or for a match closed without a result.
    #[serde(default)]
    pub winner_team: Option<TeamColor>,
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
}

fn first_match_number() -> u32 {
    1
}

impl Match {
    /// A fresh active match with no goals.
    pub fn new(id: MatchId, session_id: SessionId, match_number: u32) -> Self {
        Self {
            id,
            session_id: Some(session_id),
            match_number,
            orange_score: 0,
            black_score: 0,
            is_active: true,
            winner_team: None,
            start_time: None,
            end_time: None,
        }
    }

    pub fn score(&self, team: TeamColor) -> u32 {
        match team {
            TeamColor::Orange => self.orange_score,
            TeamColor::Black => self.black_score,
        }
    }

    pub fn score_mut(&mut self, team: TeamColor) -> &mut u32 {
        match team {
            TeamColor::Orange => &mut self.orange_score,
            TeamColor::Black => &mut self.black_score,
        }
    }
}

/// A goal in the ledger.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    #[serde(default)]
    pub match_id: Option<MatchId>,
    pub team: TeamColor,
    pub scorer_id: PlayerId,
    #[serde(default)]
    pub scorer_name: Option<String>,
    #[serde(default)]
    pub assistant_id: Option<PlayerId>,
    #[serde(default)]
    pub assistant_name: Option<String>,
    #[serde(default)]
    pub time: Option<NaiveDateTime>,
}

/// One roster row of a persisted match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LineupEntry {
    pub player_id: PlayerId,
    #[serde(default)]
    pub name: String,
    /// Whether this player kept goal in this match.
    #[serde(default)]
    pub is_goalkeeper: bool,
    #[serde(default)]
    pub goals_conceded: u32,
}

/// Full match view: the match, both lineups and its goals.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchDetail {
    #[serde(rename = "match")]
    pub game: Match,
    #[serde(default)]
    pub orange_team: Vec<LineupEntry>,
    #[serde(default)]
    pub black_team: Vec<LineupEntry>,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl MatchDetail {
    pub fn lineup(&self, team: TeamColor) -> &[LineupEntry] {
        match team {
            TeamColor::Orange => &self.orange_team,
            TeamColor::Black => &self.black_team,
        }
    }

    /// Which team a player is lined up for, if any.
    pub fn team_of(&self, player_id: PlayerId) -> Option<TeamColor> {
        TeamColor::BOTH
            .into_iter()
            .find(|&t| self.lineup(t).iter().any(|e| e.player_id == player_id))
    }
}
