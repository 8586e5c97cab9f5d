//! The backend seam: every REST call the console makes.

use crate::api::schema::LineupsBody;
use crate::error::ConsoleError;
use crate::logic::GoalDraft;
use crate::models::{
    AssistantRow, DashboardStats, EventLogEntry, GlobalStats, Goal, GoalId, GoalkeeperRow, Match,
    MatchDetail, MatchId, Player, PlayerDraft, PlayerId, PlayerListRow, PlayerStats, ScorerRow,
    Session, SessionId, Settings, TeamColor,
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Persistence and statistics live behind this trait; the console only holds page state.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_players(&self) -> Result<Vec<Player>, ConsoleError>;
    async fn create_player(&self, draft: &PlayerDraft) -> Result<Player, ConsoleError>;
    async fn update_player(&self, id: PlayerId, draft: &PlayerDraft) -> Result<Player, ConsoleError>;
    /// Refused by the backend for players with match or goal history.
    async fn delete_player(&self, id: PlayerId) -> Result<(), ConsoleError>;

    async fn list_sessions(&self) -> Result<Vec<Session>, ConsoleError>;
    async fn session_by_date(&self, date: NaiveDate) -> Result<Option<Session>, ConsoleError>;
    async fn create_session(&self, date: NaiveDate) -> Result<Session, ConsoleError>;
    async fn end_session(&self, id: SessionId) -> Result<(), ConsoleError>;
    async fn session_matches(&self, id: SessionId) -> Result<Vec<Match>, ConsoleError>;

    async fn create_match(&self, session: SessionId, lineups: &LineupsBody) -> Result<Match, ConsoleError>;
    async fn get_match(&self, id: MatchId) -> Result<MatchDetail, ConsoleError>;
    async fn add_goal(&self, id: MatchId, draft: &GoalDraft) -> Result<Goal, ConsoleError>;
    async fn delete_goal(&self, id: MatchId, goal: GoalId) -> Result<(), ConsoleError>;
    async fn end_match(&self, id: MatchId, winner: Option<TeamColor>) -> Result<Match, ConsoleError>;
    async fn update_match_players(&self, id: MatchId, lineups: &LineupsBody) -> Result<(), ConsoleError>;

    async fn settings(&self) -> Result<Option<Settings>, ConsoleError>;
    async fn save_settings(&self, settings: &Settings) -> Result<(), ConsoleError>;
    async fn logs(&self) -> Result<Vec<EventLogEntry>, ConsoleError>;

    async fn dashboard(&self) -> Result<DashboardStats, ConsoleError>;
    async fn player_list(&self) -> Result<Vec<PlayerListRow>, ConsoleError>;
    async fn player_stats(&self, id: PlayerId) -> Result<PlayerStats, ConsoleError>;
    async fn top_scorers(&self) -> Result<Vec<ScorerRow>, ConsoleError>;
    async fn top_assistants(&self) -> Result<Vec<AssistantRow>, ConsoleError>;
    async fn top_goalkeepers(&self) -> Result<Vec<GoalkeeperRow>, ConsoleError>;
    async fn global_stats(&self) -> Result<GlobalStats, ConsoleError>;
}
