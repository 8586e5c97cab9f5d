//! Console operations that go through the backend.
//!
//! Every flow validates against the current [`ConsoleState`] first, then makes its backend
//! call, then dispatches the result. A refused or failed call is logged and returned, and the
//! state is left exactly as it was.

use crate::api::{Backend, LineupsBody};
use crate::console::state::{Action, ConsoleState};
use crate::error::ConsoleError;
use crate::logic::{self, GoalDraft, SessionSummary, TeamSelection};
use crate::models::{
    AssistantRow, DashboardStats, EventLogEntry, GlobalStats, Goal, GoalId, GoalkeeperRow,
    LineupEntry, Match, MatchDetail, MatchId, Player, PlayerDraft, PlayerId, PlayerListRow,
    PlayerStats, ScorerRow, Session, Settings, TeamColor,
};
use chrono::NaiveDate;
use rand::Rng;

fn logged(operation: &'static str) -> impl Fn(ConsoleError) -> ConsoleError {
    move |err| {
        log::error!("Failed to {}: {}", operation, err);
        err
    }
}

pub async fn load_players<B: Backend + ?Sized>(
    backend: &B,
    state: &mut ConsoleState,
) -> Result<(), ConsoleError> {
    let players = backend
        .list_players()
        .await
        .map_err(logged("load players"))?;
    state.dispatch(Action::PlayersLoaded(players))
}

pub async fn create_player<B: Backend + ?Sized>(
    backend: &B,
    state: &mut ConsoleState,
    draft: PlayerDraft,
) -> Result<Player, ConsoleError> {
    let draft = draft.validated()?;
    let player = backend
        .create_player(&draft)
        .await
        .map_err(logged("create player"))?;
    log::info!("Registered player {} ({})", player.name, player.id);
    state.dispatch(Action::PlayerSaved(player.clone()))?;
    Ok(player)
}

pub async fn update_player<B: Backend + ?Sized>(
    backend: &B,
    state: &mut ConsoleState,
    id: PlayerId,
    draft: PlayerDraft,
) -> Result<Player, ConsoleError> {
    let draft = draft.validated()?;
    let player = backend
        .update_player(id, &draft)
        .await
        .map_err(logged("update player"))?;
    state.dispatch(Action::PlayerSaved(player.clone()))?;
    Ok(player)
}

/// The backend refuses players with history; its message comes back as `Backend`.
pub async fn delete_player<B: Backend + ?Sized>(
    backend: &B,
    state: &mut ConsoleState,
    id: PlayerId,
) -> Result<(), ConsoleError> {
    backend
        .delete_player(id)
        .await
        .map_err(logged("delete player"))?;
    log::info!("Deleted player {}", id);
    state.dispatch(Action::PlayerRemoved(id))
}

/// Load the session of `date` and its matches. No session that day is not an error.
pub async fn load_session<B: Backend + ?Sized>(
    backend: &B,
    state: &mut ConsoleState,
    date: NaiveDate,
) -> Result<Option<Session>, ConsoleError> {
    let session = backend
        .session_by_date(date)
        .await
        .map_err(logged("load session"))?;
    let matches = match &session {
        Some(s) => backend
            .session_matches(s.id)
            .await
            .map_err(logged("load session matches"))?,
        None => Vec::new(),
    };
    state.dispatch(Action::SessionLoaded {
        session: session.clone(),
        matches,
    })?;
    Ok(session)
}

pub async fn create_session<B: Backend + ?Sized>(
    backend: &B,
    state: &mut ConsoleState,
    date: NaiveDate,
) -> Result<Session, ConsoleError> {
    let session = backend
        .create_session(date)
        .await
        .map_err(logged("create session"))?;
    log::info!("Started session {} for {}", session.id, session.date);
    state.dispatch(Action::SessionLoaded {
        session: Some(session.clone()),
        matches: Vec::new(),
    })?;
    Ok(session)
}

/// End the current session; the backend closes any match still running.
pub async fn end_session<B: Backend + ?Sized>(
    backend: &B,
    state: &mut ConsoleState,
) -> Result<(), ConsoleError> {
    let id = state.active_session()?.id;
    backend
        .end_session(id)
        .await
        .map_err(logged("end session"))?;
    log::info!("Ended session {}", id);
    state.dispatch(Action::SessionEnded)
}

/// Load the regulation time. Falls back to the default when the backend has none or fails.
pub async fn load_settings<B: Backend + ?Sized>(
    backend: &B,
    state: &mut ConsoleState,
) -> Result<Settings, ConsoleError> {
    let settings = match backend.settings().await {
        Ok(Some(stored)) => {
            let settings = stored.normalized();
            if settings != stored {
                log::warn!(
                    "Ignoring stored match duration of {} minutes, using {}",
                    stored.match_duration,
                    settings.match_duration
                );
            }
            settings
        }
        Ok(None) => Settings::default(),
        Err(err) => {
            log::warn!("Could not load settings, using defaults: {}", err);
            Settings::default()
        }
    };
    state.dispatch(Action::SettingsLoaded(settings))?;
    Ok(settings)
}

pub async fn save_settings<B: Backend + ?Sized>(
    backend: &B,
    state: &mut ConsoleState,
    match_duration: u32,
) -> Result<Settings, ConsoleError> {
    let settings = Settings::new(match_duration)?;
    backend
        .save_settings(&settings)
        .await
        .map_err(logged("save settings"))?;
    state.dispatch(Action::SettingsLoaded(settings))?;
    Ok(settings)
}

/// Draw fresh teams from the arrivals.
pub fn draw_teams<R: Rng + ?Sized>(
    state: &mut ConsoleState,
    rng: &mut R,
) -> Result<(), ConsoleError> {
    let sheet = logic::draw_teams_with(&state.arrivals, rng)?;
    state.dispatch(Action::TeamsDrawn(sheet))
}

/// Reshuffle the players already on the sheet.
pub fn redraw_teams<R: Rng + ?Sized>(
    state: &mut ConsoleState,
    rng: &mut R,
) -> Result<(), ConsoleError> {
    if state.sheet.is_empty() {
        return Err(ConsoleError::TeamsNotReady);
    }
    let sheet = logic::redraw_teams(&state.sheet, rng)?;
    state.dispatch(Action::TeamsRedrawn(sheet))
}

/// Put the lineups of the session's latest match back on the sheet.
pub async fn teams_from_last_match<B: Backend + ?Sized>(
    backend: &B,
    state: &mut ConsoleState,
) -> Result<(), ConsoleError> {
    let last = state
        .matches
        .iter()
        .max_by_key(|m| m.match_number)
        .map(|m| m.id)
        .ok_or(ConsoleError::NoActiveMatch)?;
    let detail = backend
        .get_match(last)
        .await
        .map_err(logged("load last match"))?;
    state.dispatch(Action::TeamsFromLastMatch(detail))
}

pub async fn start_match<B: Backend + ?Sized>(
    backend: &B,
    state: &mut ConsoleState,
) -> Result<Match, ConsoleError> {
    let session_id = state.active_session()?.id;
    state.sheet.ensure_ready()?;
    let lineups = LineupsBody::from_sheet(&state.sheet);
    let game = backend
        .create_match(session_id, &lineups)
        .await
        .map_err(logged("start match"))?;
    log::info!("Match {} (#{}) started", game.id, game.match_number);
    state.dispatch(Action::MatchStarted(game.clone()))?;
    Ok(game)
}

/// Put a match of the loaded session on the scoreboard.
pub async fn load_match<B: Backend + ?Sized>(
    backend: &B,
    state: &mut ConsoleState,
    id: MatchId,
) -> Result<(), ConsoleError> {
    if state.session.is_none() {
        return Err(ConsoleError::NoActiveSession);
    }
    let detail = backend
        .get_match(id)
        .await
        .map_err(logged("load match"))?;
    state.dispatch(Action::MatchLoaded(detail))
}

pub async fn register_goal<B: Backend + ?Sized>(
    backend: &B,
    state: &mut ConsoleState,
    team: TeamColor,
    scorer_id: Option<PlayerId>,
    assistant_id: Option<PlayerId>,
) -> Result<Goal, ConsoleError> {
    let draft = GoalDraft::new(team, scorer_id, assistant_id)?;
    let live = state.live_match()?;
    live.validate_goal(&draft)?;
    let match_id = live.game.id;
    let goal = backend
        .add_goal(match_id, &draft)
        .await
        .map_err(logged("register goal"))?;
    log::info!("Goal for {} by player {}", goal.team, goal.scorer_id);
    state.dispatch(Action::GoalRecorded(goal.clone()))?;
    Ok(goal)
}

/// Remove a goal from the live match. Nothing is sent until the operator confirmed.
pub async fn delete_goal<B: Backend + ?Sized>(
    backend: &B,
    state: &mut ConsoleState,
    goal_id: GoalId,
    confirmed: bool,
) -> Result<(), ConsoleError> {
    let live = state.live_match()?;
    if !live.is_active() {
        return Err(ConsoleError::MatchEnded);
    }
    if live.goal(goal_id).is_none() {
        return Err(ConsoleError::GoalNotFound(goal_id));
    }
    if !confirmed {
        return Err(ConsoleError::ConfirmationRequired);
    }
    let match_id = live.game.id;
    backend
        .delete_goal(match_id, goal_id)
        .await
        .map_err(logged("delete goal"))?;
    state.dispatch(Action::GoalRemoved(goal_id))
}

/// Submit the open end-of-match dialog.
pub async fn end_match<B: Backend + ?Sized>(
    backend: &B,
    state: &mut ConsoleState,
) -> Result<Match, ConsoleError> {
    let live = state.live_match()?;
    if !live.is_active() {
        return Err(ConsoleError::MatchEnded);
    }
    let dialog = state.end_dialog.ok_or(ConsoleError::NoActiveMatch)?;
    let winner = dialog.confirm()?;
    let match_id = live.game.id;
    let mut record = backend
        .end_match(match_id, Some(winner))
        .await
        .map_err(logged("end match"))?;
    if record.winner_team.is_none() {
        record.winner_team = Some(winner);
    }
    log::info!("Match {} ended, {} won", match_id, winner);
    state.dispatch(Action::MatchEnded(record.clone()))?;
    Ok(record)
}

/// Substitutions during the live match. Both teams must stay complete.
///
/// Keepers who stay in goal keep their conceded count.
pub async fn update_match_players<B: Backend + ?Sized>(
    backend: &B,
    state: &mut ConsoleState,
    selection: &TeamSelection,
) -> Result<(), ConsoleError> {
    let live = state.live_match()?;
    if !live.is_active() {
        return Err(ConsoleError::MatchEnded);
    }
    let sheet = logic::edit_teams(&state.players, selection)?;
    sheet.ensure_ready()?;
    let lineup = |team: TeamColor| -> Vec<LineupEntry> {
        sheet
            .team(team)
            .iter()
            .map(|entry| {
                let conceded = live
                    .lineup(team)
                    .iter()
                    .find(|e| e.player_id == entry.id() && e.is_goalkeeper)
                    .filter(|_| entry.played_as_goalkeeper)
                    .map_or(0, |e| e.goals_conceded);
                LineupEntry {
                    player_id: entry.id(),
                    name: entry.player.name.clone(),
                    is_goalkeeper: entry.played_as_goalkeeper,
                    goals_conceded: conceded,
                }
            })
            .collect()
    };
    let orange = lineup(TeamColor::Orange);
    let black = lineup(TeamColor::Black);
    let match_id = live.game.id;
    let body = LineupsBody {
        orange_team: orange.iter().map(Into::into).collect(),
        black_team: black.iter().map(Into::into).collect(),
    };
    backend
        .update_match_players(match_id, &body)
        .await
        .map_err(logged("update match players"))?;
    state.dispatch(Action::LineupsUpdated { orange, black })
}

/// Fetch every match of the current session and tally it.
pub async fn session_summary<B: Backend + ?Sized>(
    backend: &B,
    state: &ConsoleState,
) -> Result<SessionSummary, ConsoleError> {
    if state.session.is_none() {
        return Err(ConsoleError::NoActiveSession);
    }
    let mut details: Vec<MatchDetail> = Vec::with_capacity(state.matches.len());
    for game in &state.matches {
        let detail = backend
            .get_match(game.id)
            .await
            .map_err(logged("load match for summary"))?;
        details.push(detail);
    }
    Ok(SessionSummary::tally(&details))
}

pub async fn recent_logs<B: Backend + ?Sized>(backend: &B) -> Result<Vec<EventLogEntry>, ConsoleError> {
    backend.logs().await.map_err(logged("load logs"))
}

pub async fn dashboard<B: Backend + ?Sized>(backend: &B) -> Result<DashboardStats, ConsoleError> {
    backend.dashboard().await.map_err(logged("load dashboard"))
}

pub async fn player_list<B: Backend + ?Sized>(backend: &B) -> Result<Vec<PlayerListRow>, ConsoleError> {
    backend.player_list().await.map_err(logged("load player list"))
}

pub async fn player_stats<B: Backend + ?Sized>(
    backend: &B,
    id: PlayerId,
) -> Result<PlayerStats, ConsoleError> {
    backend
        .player_stats(id)
        .await
        .map_err(logged("load player stats"))
}

pub async fn top_scorers<B: Backend + ?Sized>(backend: &B) -> Result<Vec<ScorerRow>, ConsoleError> {
    backend.top_scorers().await.map_err(logged("load top scorers"))
}

pub async fn top_assistants<B: Backend + ?Sized>(backend: &B) -> Result<Vec<AssistantRow>, ConsoleError> {
    backend
        .top_assistants()
        .await
        .map_err(logged("load top assistants"))
}

pub async fn top_goalkeepers<B: Backend + ?Sized>(
    backend: &B,
) -> Result<Vec<GoalkeeperRow>, ConsoleError> {
    backend
        .top_goalkeepers()
        .await
        .map_err(logged("load top goalkeepers"))
}

pub async fn global_stats<B: Backend + ?Sized>(backend: &B) -> Result<GlobalStats, ConsoleError> {
    backend.global_stats().await.map_err(logged("load global stats"))
}
