//! Consecutive-win indicator for the session board.

use crate::models::{Match, TeamColor};
use serde::{Deserialize, Serialize};

/// Current run of wins; at most one side is non-zero.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct WinStreak {
    pub orange: u32,
    pub black: u32,
}

impl WinStreak {
    pub fn get(&self, team: TeamColor) -> u32 {
        match team {
            TeamColor::Orange => self.orange,
            TeamColor::Black => self.black,
        }
    }

    /// The team on a run, if any.
    pub fn leader(&self) -> Option<TeamColor> {
        TeamColor::BOTH.into_iter().find(|&t| self.get(t) > 0)
    }
}

/// Count how many matches in a row the latest winner has won.
///
/// Matches still in progress are skipped. Walking back from the highest match number,
/// a draw or a different winner ends the run; a latest draw gives no streak at all.
pub fn win_streak(matches: &[Match]) -> WinStreak {
    let mut finished: Vec<&Match> = matches.iter().filter(|m| !m.is_active).collect();
    finished.sort_by_key(|m| std::cmp::Reverse(m.match_number));

    let mut streak = WinStreak::default();
    let Some(leader) = finished.first().and_then(|m| m.winner_team) else {
        return streak;
    };
    let run = finished
        .iter()
        .take_while(|m| m.winner_team == Some(leader))
        .count() as u32;
    match leader {
        TeamColor::Orange => streak.orange = run,
        TeamColor::Black => streak.black = run,
    }
    streak
}
