//! Data structures for the futsal console: players, matches, goals, sessions, statistics.

mod game;
mod player;
mod session;
mod stats;

pub use game::{Goal, GoalId, LineupEntry, Match, MatchDetail, MatchId, TeamColor};
pub use player::{Player, PlayerDraft, PlayerId, RosterEntry};
pub use session::{
    EventLogEntry, Session, SessionId, Settings, DEFAULT_MATCH_DURATION_MINUTES,
    MAX_MATCH_DURATION_MINUTES,
};
pub use stats::{
    AssistantRow, CareerStats, DashboardStats, GlobalStats, GoalkeeperRow, PlayerListRow,
    PlayerStats, ScorerRow,
};
