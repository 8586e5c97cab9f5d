//! Session tally: results, team goals and per-player goals/assists, with CSV export.

use crate::error::ConsoleError;
use crate::models::{MatchDetail, PlayerId, TeamColor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Goals and assists of one player over a session.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerLine {
    pub player_id: PlayerId,
    pub name: String,
    pub matches: u32,
    pub goals: u32,
    pub assists: u32,
}

/// Totals over every match of a session.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Finished matches; a match in progress only contributes goals and appearances.
    pub matches_played: u32,
    pub orange_wins: u32,
    pub black_wins: u32,
    /// Finished matches with no recorded winner.
    pub draws: u32,
    pub orange_goals: u32,
    pub black_goals: u32,
    /// Most goals first, then most assists, then by name.
    pub players: Vec<PlayerLine>,
}

impl SessionSummary {
    pub fn tally(details: &[MatchDetail]) -> Self {
        let mut summary = SessionSummary::default();
        let mut lines: HashMap<PlayerId, PlayerLine> = HashMap::new();

        for detail in details {
            if !detail.game.is_active {
                summary.matches_played += 1;
                match detail.game.winner_team {
                    Some(TeamColor::Orange) => summary.orange_wins += 1,
                    Some(TeamColor::Black) => summary.black_wins += 1,
                    None => summary.draws += 1,
                }
            }

            for row in detail.orange_team.iter().chain(detail.black_team.iter()) {
                let line = lines.entry(row.player_id).or_insert_with(|| PlayerLine {
                    player_id: row.player_id,
                    name: row.name.clone(),
                    ..PlayerLine::default()
                });
                line.matches += 1;
            }

            for goal in &detail.goals {
                match goal.team {
                    TeamColor::Orange => summary.orange_goals += 1,
                    TeamColor::Black => summary.black_goals += 1,
                }
                let scorer = lines.entry(goal.scorer_id).or_insert_with(|| PlayerLine {
                    player_id: goal.scorer_id,
                    name: goal.scorer_name.clone().unwrap_or_default(),
                    ..PlayerLine::default()
                });
                scorer.goals += 1;
                if let Some(assistant_id) = goal.assistant_id {
                    let assistant = lines.entry(assistant_id).or_insert_with(|| PlayerLine {
                        player_id: assistant_id,
                        name: goal.assistant_name.clone().unwrap_or_default(),
                        ..PlayerLine::default()
                    });
                    assistant.assists += 1;
                }
            }
        }

        let mut players: Vec<PlayerLine> = lines.into_values().collect();
        players.sort_by(|a, b| {
            b.goals
                .cmp(&a.goals)
                .then(b.assists.cmp(&a.assists))
                .then_with(|| a.name.cmp(&b.name))
        });
        summary.players = players;
        summary
    }

    /// Per-player table as CSV (header row included).
    pub fn to_csv(&self) -> Result<String, ConsoleError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for line in &self.players {
            writer.serialize(line).map_err(export_error)?;
        }
        let bytes = writer.into_inner().map_err(|e| ConsoleError::Export {
            message: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|e| ConsoleError::Export {
            message: e.to_string(),
        })
    }
}

fn export_error(err: csv::Error) -> ConsoleError {
    ConsoleError::Export {
        message: err.to_string(),
    }
}
