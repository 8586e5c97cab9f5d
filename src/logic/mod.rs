//! Console business logic: team drawing, match clock, scoreboard, streaks, session tally.

mod clock;
mod roster;
mod scoreboard;
mod streak;
mod summary;

pub use clock::{format_clock, ClockState, MatchClock, TickOutcome};
pub use roster::{
    draw_teams, draw_teams_with, edit_teams, redraw_teams, TeamSelection, TeamSheet, Zone,
    FIELD_PLAYERS_PER_TEAM, MIN_ARRIVALS, TEAM_SIZE,
};
pub use scoreboard::{EndMatchResolution, GoalDraft, Scoreboard};
pub use streak::{win_streak, WinStreak};
pub use summary::{PlayerLine, SessionSummary};
