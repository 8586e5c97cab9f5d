//! Errors raised by console operations.

use crate::models::{GoalId, MatchId, PlayerId, TeamColor};
use thiserror::Error;

/// Everything that can stop a console action.
///
/// Validation and state errors are raised before any backend call; `Backend` and `Transport`
/// come from the round trip itself. None of them leave the console in a broken state.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConsoleError {
    /// Fewer arrivals than a draw needs (10).
    #[error("Need at least {required} players to draw teams (have {available})")]
    NotEnoughPlayers { required: usize, available: usize },
    #[error("Select a goalkeeper for the {0} team")]
    MissingGoalkeeper(TeamColor),
    #[error("The same player cannot keep goal for both teams")]
    SameGoalkeeper,
    #[error("The {team} team must have exactly 4 field players (selected {selected})")]
    WrongFieldCount { team: TeamColor, selected: usize },
    /// A player was picked more than once across both rosters.
    #[error("Player {0} cannot be on both teams")]
    DuplicatePlayer(PlayerId),
    #[error("Player {0} already arrived")]
    DuplicateArrival(PlayerId),
    #[error("Player {0} not found")]
    PlayerNotFound(PlayerId),
    /// A field player was dropped into a goalkeeper zone without the operator confirming.
    #[error("Player {0} is not a goalkeeper; confirm to put them in goal")]
    GoalkeeperConfirmationRequired(PlayerId),
    #[error("Each team needs 5 players (1 goalkeeper and 4 field players)")]
    TeamsNotReady,
    #[error("Select the player who scored")]
    MissingScorer,
    #[error("A player cannot assist their own goal")]
    SelfAssist,
    #[error("Record the odds-or-evens winner before ending a drawn match")]
    TieBreakRequired,
    #[error("Odds-or-evens only decides a drawn match")]
    NoTieToBreak,
    #[error("This action needs confirmation")]
    ConfirmationRequired,
    #[error("Player name cannot be empty")]
    InvalidName,
    #[error("Match duration must be between 1 and 60 minutes")]
    InvalidDuration,

    #[error("No active session")]
    NoActiveSession,
    #[error("This session has already ended")]
    SessionEnded,
    #[error("No match in progress")]
    NoActiveMatch,
    #[error("This match has already ended")]
    MatchEnded,
    #[error("Match {0} not found")]
    MatchNotFound(MatchId),
    #[error("Match {0} belongs to another session")]
    MatchOutsideSession(MatchId),
    #[error("Goal {0} not found")]
    GoalNotFound(GoalId),

    /// The backend answered but refused the request.
    #[error("Backend error: {message}")]
    Backend { message: String },
    /// The backend could not be reached or its answer could not be decoded.
    #[error("Could not reach the server: {message}")]
    Transport { message: String },
    #[error("Export failed: {message}")]
    Export { message: String },
}

impl ConsoleError {
    /// True for errors produced by the backend round trip rather than local checks.
    pub fn is_remote(&self) -> bool {
        matches!(self, ConsoleError::Backend { .. } | ConsoleError::Transport { .. })
    }

    /// True for lookups that found nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConsoleError::PlayerNotFound(_)
                | ConsoleError::MatchNotFound(_)
                | ConsoleError::GoalNotFound(_)
        )
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        ConsoleError::Transport {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::Transport {
            message: err.to_string(),
        }
    }
}
