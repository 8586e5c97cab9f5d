//! Aggregate statistics payloads served by the backend.

use crate::models::player::{Player, PlayerId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Row of the top-scorers table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScorerRow {
    pub player_id: PlayerId,
    pub name: String,
    pub goals: u32,
}

/// Row of the top-assistants table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AssistantRow {
    pub player_id: PlayerId,
    pub name: String,
    pub assists: u32,
}

/// Goalkeeper ranking row; lower `average` (goals conceded per match) is better.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalkeeperRow {
    pub player_id: PlayerId,
    pub name: String,
    pub matches: u32,
    #[serde(default)]
    pub goals_conceded: u32,
    #[serde(default)]
    pub average: f64,
}

/// Career numbers for one player.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CareerStats {
    pub matches: u32,
    pub goals: u32,
    pub assists: u32,
    pub goalkeeper_matches: u32,
    pub goals_conceded: u32,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub goalkeeper_average: f64,
}

/// `GET /api/stats/player/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player: Player,
    pub stats: CareerStats,
}

/// Dashboard headline numbers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub top_scorer: Option<ScorerRow>,
    #[serde(default)]
    pub top_assistant: Option<AssistantRow>,
    #[serde(default)]
    pub top_goalkeeper: Option<GoalkeeperRow>,
    pub total_players: u32,
    pub total_sessions: u32,
    pub total_matches: u32,
    pub total_goals: u32,
    #[serde(default)]
    pub avg_goals_per_match: f64,
}

/// Player registry row with career totals.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerListRow {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub is_goalkeeper: bool,
    #[serde(default)]
    pub matches: u32,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub goals_conceded: u32,
    /// Sessions (Sundays) the player took part in.
    #[serde(default)]
    pub sessions: u32,
}

/// All-time team totals.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    #[serde(default)]
    pub orange_wins: u32,
    #[serde(default)]
    pub black_wins: u32,
    #[serde(default)]
    pub orange_goals: u32,
    #[serde(default)]
    pub black_goals: u32,
    #[serde(default)]
    pub total_sessions: u32,
    #[serde(default)]
    pub total_matches: u32,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}
