//! Live scoreboard: goal ledger, score keeping and end-of-match winner resolution.

use crate::error::ConsoleError;
use crate::models::{Goal, GoalId, LineupEntry, Match, MatchDetail, PlayerId, TeamColor};
use serde::{Deserialize, Serialize};

/// A goal about to be submitted.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GoalDraft {
    pub team: TeamColor,
    pub scorer_id: PlayerId,
    #[serde(default)]
    pub assistant_id: Option<PlayerId>,
}

impl GoalDraft {
    /// Scorer is required and cannot also be the assistant.
    pub fn new(
        team: TeamColor,
        scorer_id: Option<PlayerId>,
        assistant_id: Option<PlayerId>,
    ) -> Result<Self, ConsoleError> {
        let scorer_id = scorer_id.ok_or(ConsoleError::MissingScorer)?;
        if assistant_id == Some(scorer_id) {
            return Err(ConsoleError::SelfAssist);
        }
        Ok(Self {
            team,
            scorer_id,
            assistant_id,
        })
    }
}

/// The match in progress with both lineups and its goals.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub game: Match,
    pub orange_team: Vec<LineupEntry>,
    pub black_team: Vec<LineupEntry>,
    pub goals: Vec<Goal>,
}

impl From<MatchDetail> for Scoreboard {
    fn from(detail: MatchDetail) -> Self {
        Self {
            game: detail.game,
            orange_team: detail.orange_team,
            black_team: detail.black_team,
            goals: detail.goals,
        }
    }
}

impl Scoreboard {
    pub fn lineup(&self, team: TeamColor) -> &[LineupEntry] {
        match team {
            TeamColor::Orange => &self.orange_team,
            TeamColor::Black => &self.black_team,
        }
    }

    fn lineup_mut(&mut self, team: TeamColor) -> &mut Vec<LineupEntry> {
        match team {
            TeamColor::Orange => &mut self.orange_team,
            TeamColor::Black => &mut self.black_team,
        }
    }

    pub fn is_active(&self) -> bool {
        self.game.is_active
    }

    fn ensure_active(&self) -> Result<(), ConsoleError> {
        if self.game.is_active {
            Ok(())
        } else {
            Err(ConsoleError::MatchEnded)
        }
    }

    /// Check a draft against this match before it goes to the backend.
    ///
    /// When the team's lineup is known, scorer and assistant must both be on it.
    pub fn validate_goal(&self, draft: &GoalDraft) -> Result<(), ConsoleError> {
        self.ensure_active()?;
        let lineup = self.lineup(draft.team);
        if lineup.is_empty() {
            return Ok(());
        }
        for id in std::iter::once(draft.scorer_id).chain(draft.assistant_id) {
            if !lineup.iter().any(|e| e.player_id == id) {
                return Err(ConsoleError::PlayerNotFound(id));
            }
        }
        Ok(())
    }

    /// Add a confirmed goal and bump the scoring team.
    pub fn record_goal(&mut self, goal: Goal) -> Result<(), ConsoleError> {
        self.ensure_active()?;
        let team = goal.team;
        *self.game.score_mut(team) += 1;
        if let Some(keeper) = self
            .lineup_mut(team.opponent())
            .iter_mut()
            .find(|e| e.is_goalkeeper)
        {
            keeper.goals_conceded += 1;
        }
        self.goals.push(goal);
        Ok(())
    }

    /// Remove a goal and take it back off the score.
    pub fn remove_goal(&mut self, goal_id: GoalId) -> Result<Goal, ConsoleError> {
        self.ensure_active()?;
        let idx = self
            .goals
            .iter()
            .position(|g| g.id == goal_id)
            .ok_or(ConsoleError::GoalNotFound(goal_id))?;
        let goal = self.goals.remove(idx);
        let score = self.game.score_mut(goal.team);
        *score = score.saturating_sub(1);
        if let Some(keeper) = self
            .lineup_mut(goal.team.opponent())
            .iter_mut()
            .find(|e| e.is_goalkeeper)
        {
            keeper.goals_conceded = keeper.goals_conceded.saturating_sub(1);
        }
        Ok(goal)
    }

    pub fn goal(&self, goal_id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == goal_id)
    }

    /// Goals oldest first; goals without a timestamp go last in ledger order.
    pub fn goals_chronological(&self) -> Vec<&Goal> {
        let mut goals: Vec<&Goal> = self.goals.iter().collect();
        goals.sort_by_key(|g| (g.time.is_none(), g.time));
        goals
    }

    /// Close the match with `winner`. Goals already in the ledger are left as they are.
    pub fn end(&mut self, winner: Option<TeamColor>) -> Result<(), ConsoleError> {
        self.ensure_active()?;
        self.game.winner_team = winner;
        self.game.is_active = false;
        Ok(())
    }
}

/// The end-of-match dialog: final scores and, on a draw, the odds-or-evens winner.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EndMatchResolution {
    pub orange_score: u32,
    pub black_score: u32,
    /// Only meaningful while the scores are level.
    pub tie_break: Option<TeamColor>,
}

impl EndMatchResolution {
    pub fn open(game: &Match) -> Self {
        Self {
            orange_score: game.orange_score,
            black_score: game.black_score,
            tie_break: None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.orange_score == self.black_score
    }

    /// Higher score wins; a draw is decided by the recorded tie-break, if any.
    pub fn winner(&self) -> Option<TeamColor> {
        use std::cmp::Ordering::*;
        match self.orange_score.cmp(&self.black_score) {
            Greater => Some(TeamColor::Orange),
            Less => Some(TeamColor::Black),
            Equal => self.tie_break,
        }
    }

    /// Nudge a displayed score by one. Any earlier tie-break choice is dropped.
    pub fn adjust(&mut self, team: TeamColor, increase: bool) {
        let score = match team {
            TeamColor::Orange => &mut self.orange_score,
            TeamColor::Black => &mut self.black_score,
        };
        *score = if increase {
            score.saturating_add(1)
        } else {
            score.saturating_sub(1)
        };
        self.tie_break = None;
    }

    /// Record who won odds-or-evens. Only a level score can be tie-broken.
    pub fn choose_tie_break(&mut self, team: TeamColor) -> Result<(), ConsoleError> {
        if !self.is_draw() {
            return Err(ConsoleError::NoTieToBreak);
        }
        self.tie_break = Some(team);
        Ok(())
    }

    /// The winner to submit; a draw without a tie-break cannot be confirmed.
    pub fn confirm(&self) -> Result<TeamColor, ConsoleError> {
        self.winner().ok_or(ConsoleError::TieBreakRequired)
    }
}
