//! Futsal session console: library with models, business logic, console state and backend client.

pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod logic;
pub mod models;

pub use api::{Backend, HttpBackend};
pub use config::ConsoleConfig;
pub use console::{Action, ClockSnapshot, ClockTicker, ConsoleState};
pub use error::ConsoleError;
pub use logic::{
    draw_teams, edit_teams, redraw_teams, win_streak, EndMatchResolution, GoalDraft, MatchClock,
    Scoreboard, SessionSummary, TeamSelection, TeamSheet, Zone,
};
pub use models::{
    Goal, GoalId, LineupEntry, Match, MatchDetail, MatchId, Player, PlayerDraft, PlayerId,
    RosterEntry, Session, SessionId, Settings, TeamColor,
};
