//! Team drawing and roster editing: random draw, manual override, drag-and-drop moves.

use crate::error::ConsoleError;
use crate::models::{MatchDetail, Player, PlayerId, RosterEntry, TeamColor};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Arrivals needed before teams can be drawn.
pub const MIN_ARRIVALS: usize = 10;
/// Field players per team (plus one goalkeeper).
pub const FIELD_PLAYERS_PER_TEAM: usize = 4;
/// Players per team on court.
pub const TEAM_SIZE: usize = FIELD_PLAYERS_PER_TEAM + 1;

/// Orange and black rosters plus everyone waiting for the next match.
///
/// No player id is ever in two of the three lists.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamSheet {
    pub orange: Vec<RosterEntry>,
    pub black: Vec<RosterEntry>,
    pub waiting: Vec<Player>,
}

/// Where a dragged player can be dropped.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "zone", rename_all = "snake_case")]
pub enum Zone {
    Goalkeeper { team: TeamColor },
    Field { team: TeamColor },
    Waiting,
}

impl Zone {
    pub fn is_goalkeeper(self) -> bool {
        matches!(self, Zone::Goalkeeper { .. })
    }
}

/// Manual roster choice: one goalkeeper and four field players per team.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamSelection {
    #[serde(default)]
    pub orange_goalkeeper: Option<PlayerId>,
    #[serde(default)]
    pub black_goalkeeper: Option<PlayerId>,
    #[serde(default)]
    pub orange_field: Vec<PlayerId>,
    #[serde(default)]
    pub black_field: Vec<PlayerId>,
}

impl TeamSheet {
    pub fn team(&self, team: TeamColor) -> &[RosterEntry] {
        match team {
            TeamColor::Orange => &self.orange,
            TeamColor::Black => &self.black,
        }
    }

    fn team_mut(&mut self, team: TeamColor) -> &mut Vec<RosterEntry> {
        match team {
            TeamColor::Orange => &mut self.orange,
            TeamColor::Black => &mut self.black,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.orange.is_empty() && self.black.is_empty() && self.waiting.is_empty()
    }

    /// Everyone on the sheet (orange, black, then waiting), first occurrence of each id.
    pub fn pool(&self) -> Vec<Player> {
        let mut seen = HashSet::new();
        self.orange
            .iter()
            .chain(self.black.iter())
            .map(|e| &e.player)
            .chain(self.waiting.iter())
            .filter(|p| seen.insert(p.id))
            .cloned()
            .collect()
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.find(player_id).is_some()
    }

    fn find(&self, player_id: PlayerId) -> Option<&Player> {
        self.orange
            .iter()
            .chain(self.black.iter())
            .map(|e| &e.player)
            .chain(self.waiting.iter())
            .find(|p| p.id == player_id)
    }

    /// The (first) entry flagged as this match's goalkeeper.
    pub fn goalkeeper(&self, team: TeamColor) -> Option<&RosterEntry> {
        self.team(team).iter().find(|e| e.played_as_goalkeeper)
    }

    /// Both teams have five players with exactly one keeping goal.
    pub fn can_start_match(&self) -> bool {
        TeamColor::BOTH.into_iter().all(|t| {
            let roster = self.team(t);
            roster.len() == TEAM_SIZE
                && roster.iter().filter(|e| e.played_as_goalkeeper).count() == 1
        })
    }

    pub fn ensure_ready(&self) -> Result<(), ConsoleError> {
        if self.can_start_match() {
            Ok(())
        } else {
            Err(ConsoleError::TeamsNotReady)
        }
    }

    /// Drag-and-drop: move a player to `target`.
    ///
    /// The per-match goalkeeper flag follows the target zone. Dropping a registered field
    /// player into a goalkeeper zone needs `confirmed`; without it nothing changes.
    pub fn move_player(
        &mut self,
        player_id: PlayerId,
        target: Zone,
        confirmed: bool,
    ) -> Result<(), ConsoleError> {
        let player = self
            .find(player_id)
            .cloned()
            .ok_or(ConsoleError::PlayerNotFound(player_id))?;
        if target.is_goalkeeper() && !player.is_goalkeeper && !confirmed {
            return Err(ConsoleError::GoalkeeperConfirmationRequired(player_id));
        }

        self.orange.retain(|e| e.id() != player_id);
        self.black.retain(|e| e.id() != player_id);
        self.waiting.retain(|p| p.id != player_id);

        match target {
            Zone::Goalkeeper { team } => self.team_mut(team).push(RosterEntry::goalkeeper(player)),
            Zone::Field { team } => self.team_mut(team).push(RosterEntry::field(player)),
            Zone::Waiting => self.waiting.push(player),
        }
        log::debug!("Moved player {} to {:?}", player_id, target);
        Ok(())
    }

    /// Rebuild a sheet from a persisted match's lineups; other `players` wait.
    ///
    /// Lineup rows whose player is not in `players` are skipped.
    pub fn from_lineups(detail: &MatchDetail, players: &[Player]) -> Self {
        let lookup = |id: PlayerId| players.iter().find(|p| p.id == id).cloned();
        let roster = |team: TeamColor| -> Vec<RosterEntry> {
            detail
                .lineup(team)
                .iter()
                .filter_map(|row| lookup(row.player_id).map(|p| RosterEntry::new(p, row.is_goalkeeper)))
                .collect()
        };
        let orange = roster(TeamColor::Orange);
        let black = roster(TeamColor::Black);
        let waiting = players
            .iter()
            .filter(|p| !orange.iter().chain(black.iter()).any(|e| e.id() == p.id))
            .cloned()
            .collect();
        Self {
            orange,
            black,
            waiting,
        }
    }
}

/// Draw teams from the arrival pool using the thread-local RNG.
pub fn draw_teams(pool: &[Player]) -> Result<TeamSheet, ConsoleError> {
    draw_teams_with(pool, &mut rand::thread_rng())
}

/// Draw teams from the arrival pool.
///
/// 1. Split into goalkeepers and field players; shuffle both.
/// 2. Two or more goalkeepers: the first two keep goal, the rest join the back of the field pool.
///    One goalkeeper: that keeper plays for orange and the first field player keeps goal for black.
///    None: the first two field players keep goal.
/// 3. Up to 8 field players alternate orange/black; everyone left over waits.
pub fn draw_teams_with<R: Rng + ?Sized>(
    pool: &[Player],
    rng: &mut R,
) -> Result<TeamSheet, ConsoleError> {
    let mut seen = HashSet::new();
    let pool: Vec<&Player> = pool.iter().filter(|p| seen.insert(p.id)).collect();
    if pool.len() < MIN_ARRIVALS {
        return Err(ConsoleError::NotEnoughPlayers {
            required: MIN_ARRIVALS,
            available: pool.len(),
        });
    }

    let (mut keepers, mut field): (Vec<Player>, Vec<Player>) =
        pool.into_iter().cloned().partition(|p| p.is_goalkeeper);
    keepers.shuffle(rng);
    field.shuffle(rng);

    let mut orange = Vec::with_capacity(TEAM_SIZE);
    let mut black = Vec::with_capacity(TEAM_SIZE);

    let keeper_count = keepers.len();
    let mut keepers = keepers.into_iter();
    match (keepers.next(), keepers.next()) {
        (Some(first), Some(second)) => {
            orange.push(RosterEntry::goalkeeper(first));
            black.push(RosterEntry::goalkeeper(second));
            field.extend(keepers);
        }
        (Some(only), None) => {
            orange.push(RosterEntry::goalkeeper(only));
            if !field.is_empty() {
                black.push(RosterEntry::goalkeeper(field.remove(0)));
            }
        }
        (None, _) => {
            if field.len() >= 2 {
                orange.push(RosterEntry::goalkeeper(field.remove(0)));
                black.push(RosterEntry::goalkeeper(field.remove(0)));
            }
        }
    }

    let placed = field.len().min(2 * FIELD_PLAYERS_PER_TEAM);
    for (i, player) in field.drain(..placed).enumerate() {
        if i % 2 == 0 {
            orange.push(RosterEntry::field(player));
        } else {
            black.push(RosterEntry::field(player));
        }
    }

    log::debug!(
        "Drew teams: {} goalkeeper(s), {} orange, {} black, {} waiting",
        keeper_count,
        orange.len(),
        black.len(),
        field.len()
    );

    Ok(TeamSheet {
        orange,
        black,
        waiting: field,
    })
}

/// Draw again from everyone currently on the sheet, keeping manual edits in the pool.
pub fn redraw_teams<R: Rng + ?Sized>(sheet: &TeamSheet, rng: &mut R) -> Result<TeamSheet, ConsoleError> {
    draw_teams_with(&sheet.pool(), rng)
}

/// Replace both rosters with a manual selection taken from `pool`.
///
/// Rejects a missing goalkeeper, the same goalkeeper on both teams, a field list that is not
/// exactly 4 long, any player picked twice, and ids outside the pool. Everyone not picked waits.
pub fn edit_teams(pool: &[Player], selection: &TeamSelection) -> Result<TeamSheet, ConsoleError> {
    let orange_keeper = selection
        .orange_goalkeeper
        .ok_or(ConsoleError::MissingGoalkeeper(TeamColor::Orange))?;
    let black_keeper = selection
        .black_goalkeeper
        .ok_or(ConsoleError::MissingGoalkeeper(TeamColor::Black))?;
    if orange_keeper == black_keeper {
        return Err(ConsoleError::SameGoalkeeper);
    }
    for (team, picked) in [
        (TeamColor::Orange, &selection.orange_field),
        (TeamColor::Black, &selection.black_field),
    ] {
        if picked.len() != FIELD_PLAYERS_PER_TEAM {
            return Err(ConsoleError::WrongFieldCount {
                team,
                selected: picked.len(),
            });
        }
    }

    let all_picked: Vec<PlayerId> = [orange_keeper, black_keeper]
        .into_iter()
        .chain(selection.orange_field.iter().copied())
        .chain(selection.black_field.iter().copied())
        .collect();
    let mut unique = HashSet::new();
    if let Some(&dup) = all_picked.iter().find(|&&id| !unique.insert(id)) {
        return Err(ConsoleError::DuplicatePlayer(dup));
    }

    let lookup = |id: PlayerId| {
        pool.iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ConsoleError::PlayerNotFound(id))
    };
    let build = |keeper: PlayerId, field: &[PlayerId]| -> Result<Vec<RosterEntry>, ConsoleError> {
        let mut roster = vec![RosterEntry::goalkeeper(lookup(keeper)?)];
        for &id in field {
            roster.push(RosterEntry::field(lookup(id)?));
        }
        Ok(roster)
    };
    let orange = build(orange_keeper, &selection.orange_field)?;
    let black = build(black_keeper, &selection.black_field)?;

    let mut seen = HashSet::new();
    let waiting = pool
        .iter()
        .filter(|p| !unique.contains(&p.id) && seen.insert(p.id))
        .cloned()
        .collect();

    Ok(TeamSheet {
        orange,
        black,
        waiting,
    })
}
