//! Console page state and the single place it changes: [`ConsoleState::dispatch`].

use crate::error::ConsoleError;
use crate::logic::{
    edit_teams, win_streak, EndMatchResolution, Scoreboard, TeamSelection, TeamSheet, WinStreak,
    Zone,
};
use crate::models::{
    Goal, GoalId, LineupEntry, Match, MatchDetail, Player, PlayerId, Session, Settings, TeamColor,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Everything one open console knows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleState {
    /// Player registry.
    pub players: Vec<Player>,
    pub session: Option<Session>,
    /// Matches of the current session, in match-number order.
    pub matches: Vec<Match>,
    /// Players who checked in, in arrival order.
    pub arrivals: Vec<Player>,
    /// Current draw; once drawn it always holds exactly the arrivals.
    pub sheet: TeamSheet,
    /// Match on the scoreboard, if one is open.
    pub live: Option<Scoreboard>,
    pub settings: Settings,
    /// Open end-of-match dialog.
    pub end_dialog: Option<EndMatchResolution>,
}

/// A state change. Actions carry results that are already final (backend records, drawn sheets).
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    PlayersLoaded(Vec<Player>),
    PlayerSaved(Player),
    PlayerRemoved(PlayerId),
    SessionLoaded {
        session: Option<Session>,
        matches: Vec<Match>,
    },
    SessionEnded,
    SettingsLoaded(Settings),
    ArrivalAdded(PlayerId),
    ArrivalRemoved(PlayerId),
    TeamsDrawn(TeamSheet),
    /// A reshuffle of the current sheet; must hold the same players.
    TeamsRedrawn(TeamSheet),
    TeamsEdited(TeamSelection),
    PlayerMoved {
        player_id: PlayerId,
        target: Zone,
        confirmed: bool,
    },
    TeamsFromLastMatch(MatchDetail),
    MatchStarted(Match),
    MatchLoaded(MatchDetail),
    GoalRecorded(Goal),
    GoalRemoved(GoalId),
    LineupsUpdated {
        orange: Vec<LineupEntry>,
        black: Vec<LineupEntry>,
    },
    EndMatchOpened,
    EndMatchScoreAdjusted {
        team: TeamColor,
        increase: bool,
    },
    TieBreakChosen(TeamColor),
    MatchEnded(Match),
}

impl ConsoleState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn active_session(&self) -> Result<&Session, ConsoleError> {
        let session = self.session.as_ref().ok_or(ConsoleError::NoActiveSession)?;
        if !session.is_active {
            return Err(ConsoleError::SessionEnded);
        }
        Ok(session)
    }

    pub fn live_match(&self) -> Result<&Scoreboard, ConsoleError> {
        self.live.as_ref().ok_or(ConsoleError::NoActiveMatch)
    }

    fn live_match_mut(&mut self) -> Result<&mut Scoreboard, ConsoleError> {
        self.live.as_mut().ok_or(ConsoleError::NoActiveMatch)
    }

    pub fn win_streak(&self) -> WinStreak {
        win_streak(&self.matches)
    }

    /// Apply one action. On error nothing has changed.
    pub fn dispatch(&mut self, action: Action) -> Result<(), ConsoleError> {
        match action {
            Action::PlayersLoaded(players) => {
                self.players = players;
                let known: Vec<Player> = self.players.clone();
                for player in known {
                    self.refresh_player(&player);
                }
            }
            Action::PlayerSaved(player) => {
                match self.players.iter_mut().find(|p| p.id == player.id) {
                    Some(existing) => *existing = player.clone(),
                    None => self.players.push(player.clone()),
                }
                self.refresh_player(&player);
            }
            Action::PlayerRemoved(id) => {
                self.players.retain(|p| p.id != id);
                self.drop_arrival(id);
            }
            Action::SessionLoaded { session, matches } => {
                let mut matches = matches;
                matches.sort_by_key(|m| m.match_number);
                self.session = session;
                self.matches = matches;
                self.live = None;
                self.end_dialog = None;
            }
            Action::SessionEnded => {
                let session = self.session.as_mut().ok_or(ConsoleError::NoActiveSession)?;
                if !session.is_active {
                    return Err(ConsoleError::SessionEnded);
                }
                session.is_active = false;
                for game in self.matches.iter_mut().filter(|m| m.is_active) {
                    game.is_active = false;
                }
                if let Some(live) = self.live.as_mut().filter(|l| l.is_active()) {
                    live.end(None)?;
                }
                self.end_dialog = None;
            }
            Action::SettingsLoaded(settings) => self.settings = settings,
            Action::ArrivalAdded(id) => {
                if self.arrivals.iter().any(|p| p.id == id) {
                    return Err(ConsoleError::DuplicateArrival(id));
                }
                let player = self.player(id).cloned().ok_or(ConsoleError::PlayerNotFound(id))?;
                if !self.sheet.is_empty() {
                    self.sheet.waiting.push(player.clone());
                }
                self.arrivals.push(player);
            }
            Action::ArrivalRemoved(id) => {
                if !self.arrivals.iter().any(|p| p.id == id) {
                    return Err(ConsoleError::PlayerNotFound(id));
                }
                self.drop_arrival(id);
            }
            Action::TeamsDrawn(sheet) => {
                let arrived: HashSet<PlayerId> = self.arrivals.iter().map(|p| p.id).collect();
                if let Some(stranger) = sheet.pool().iter().find(|p| !arrived.contains(&p.id)) {
                    return Err(ConsoleError::PlayerNotFound(stranger.id));
                }
                self.sheet = sheet;
            }
            Action::TeamsRedrawn(sheet) => {
                let before: HashSet<PlayerId> = self.sheet.pool().iter().map(|p| p.id).collect();
                let after: HashSet<PlayerId> = sheet.pool().iter().map(|p| p.id).collect();
                if self.sheet.is_empty() {
                    return Err(ConsoleError::TeamsNotReady);
                }
                if let Some(&stranger) = after.difference(&before).next() {
                    return Err(ConsoleError::PlayerNotFound(stranger));
                }
                if let Some(&missing) = before.difference(&after).next() {
                    return Err(ConsoleError::PlayerNotFound(missing));
                }
                self.sheet = sheet;
            }
            Action::TeamsEdited(selection) => {
                self.sheet = edit_teams(&self.arrivals, &selection)?;
            }
            Action::PlayerMoved {
                player_id,
                target,
                confirmed,
            } => self.sheet.move_player(player_id, target, confirmed)?,
            Action::TeamsFromLastMatch(detail) => {
                let missing: Vec<Player> = detail
                    .orange_team
                    .iter()
                    .chain(detail.black_team.iter())
                    .filter(|row| !self.arrivals.iter().any(|p| p.id == row.player_id))
                    .filter_map(|row| self.player(row.player_id).cloned())
                    .collect();
                self.arrivals.extend(missing);
                self.sheet = TeamSheet::from_lineups(&detail, &self.arrivals);
            }
            Action::MatchStarted(game) => {
                self.active_session()?;
                self.sheet.ensure_ready()?;
                for other in self.matches.iter_mut().filter(|m| m.is_active) {
                    other.is_active = false;
                }
                let lineup = |team: TeamColor| -> Vec<LineupEntry> {
                    self.sheet
                        .team(team)
                        .iter()
                        .map(|e| LineupEntry {
                            player_id: e.id(),
                            name: e.player.name.clone(),
                            is_goalkeeper: e.played_as_goalkeeper,
                            goals_conceded: 0,
                        })
                        .collect()
                };
                let scoreboard = Scoreboard {
                    game: game.clone(),
                    orange_team: lineup(TeamColor::Orange),
                    black_team: lineup(TeamColor::Black),
                    goals: Vec::new(),
                };
                if let Some(session) = self.session.as_mut() {
                    session.match_count += 1;
                }
                self.upsert_match(game);
                self.live = Some(scoreboard);
                self.end_dialog = None;
            }
            Action::MatchLoaded(detail) => {
                let session = self.session.as_ref().ok_or(ConsoleError::NoActiveSession)?;
                if detail.game.session_id.is_some_and(|id| id != session.id) {
                    return Err(ConsoleError::MatchOutsideSession(detail.game.id));
                }
                self.upsert_match(detail.game.clone());
                self.live = Some(Scoreboard::from(detail));
                self.end_dialog = None;
            }
            Action::GoalRecorded(goal) => {
                let live = self.live_match_mut()?;
                live.record_goal(goal)?;
                let game = live.game.clone();
                self.upsert_match(game);
            }
            Action::GoalRemoved(goal_id) => {
                let live = self.live_match_mut()?;
                live.remove_goal(goal_id)?;
                let game = live.game.clone();
                self.upsert_match(game);
            }
            Action::LineupsUpdated { orange, black } => {
                let live = self.live_match_mut()?;
                if !live.is_active() {
                    return Err(ConsoleError::MatchEnded);
                }
                live.orange_team = orange;
                live.black_team = black;
            }
            Action::EndMatchOpened => {
                let live = self.live_match()?;
                if !live.is_active() {
                    return Err(ConsoleError::MatchEnded);
                }
                let dialog = EndMatchResolution::open(&live.game);
                self.end_dialog = Some(dialog);
            }
            Action::EndMatchScoreAdjusted { team, increase } => {
                self.end_dialog
                    .as_mut()
                    .ok_or(ConsoleError::NoActiveMatch)?
                    .adjust(team, increase);
            }
            Action::TieBreakChosen(team) => {
                self.end_dialog
                    .as_mut()
                    .ok_or(ConsoleError::NoActiveMatch)?
                    .choose_tie_break(team)?;
            }
            Action::MatchEnded(record) => {
                let live = self.live_match_mut()?;
                if live.game.id != record.id {
                    return Err(ConsoleError::MatchNotFound(record.id));
                }
                live.end(record.winner_team)?;
                live.game.end_time = record.end_time;
                let game = live.game.clone();
                self.upsert_match(game);
                self.end_dialog = None;
            }
        }
        Ok(())
    }

    fn upsert_match(&mut self, game: Match) {
        match self.matches.iter_mut().find(|m| m.id == game.id) {
            Some(existing) => *existing = game,
            None => {
                self.matches.push(game);
                self.matches.sort_by_key(|m| m.match_number);
            }
        }
    }

    /// Copy a player's latest name/role into the arrival list and the sheet.
    fn refresh_player(&mut self, player: &Player) {
        for arrived in self.arrivals.iter_mut().filter(|p| p.id == player.id) {
            *arrived = player.clone();
        }
        for entry in self
            .sheet
            .orange
            .iter_mut()
            .chain(self.sheet.black.iter_mut())
            .filter(|e| e.id() == player.id)
        {
            entry.player = player.clone();
        }
        for waiting in self.sheet.waiting.iter_mut().filter(|p| p.id == player.id) {
            *waiting = player.clone();
        }
    }

    fn drop_arrival(&mut self, id: PlayerId) {
        self.arrivals.retain(|p| p.id != id);
        self.sheet.orange.retain(|e| e.id() != id);
        self.sheet.black.retain(|e| e.id() != id);
        self.sheet.waiting.retain(|p| p.id != id);
    }
}
