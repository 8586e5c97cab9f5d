//! Console server: one in-memory console per id, JSON API under /api/console, backend via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the console is reachable from phones on the LAN.
//! Override with env: HOST, PORT, BACKEND_URL, BACKEND_TIMEOUT_MS, STATIC_DIR, MATCH_DURATION_MINUTES.

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query, ServiceConfig},
    App, HttpResponse, HttpServer,
};
use chrono::{Local, NaiveDate};
use futsal_console::console::flows;
use futsal_console::logic::WinStreak;
use futsal_console::{
    Action, ClockSnapshot, ClockTicker, ConsoleConfig, ConsoleError, ConsoleState, HttpBackend,
    PlayerDraft, PlayerId, Settings, TeamColor, TeamSelection, Zone,
};
use futsal_console::{GoalId, MatchId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

type ConsoleId = Uuid;

/// Per-console entry: page state, its clock and last activity time (for auto-cleanup).
struct ConsoleEntry {
    state: ConsoleState,
    ticker: ClockTicker,
    last_activity: Instant,
}

impl ConsoleEntry {
    fn new(state: ConsoleState) -> Self {
        let ticker = ClockTicker::new(state.settings.limit_seconds());
        Self {
            state,
            ticker,
            last_activity: Instant::now(),
        }
    }

    fn touch(&mut self) -> &mut Self {
        self.last_activity = Instant::now();
        self
    }

    /// Fresh clock for the match now on the scoreboard.
    fn reset_clock(&mut self) {
        self.ticker = ClockTicker::new(self.state.settings.limit_seconds());
        if self.state.live.as_ref().is_some_and(|l| !l.is_active()) {
            self.ticker.end();
        }
    }
}

/// Consoles by id. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<ConsoleId, Arc<Mutex<ConsoleEntry>>>>>;
type BackendData = Data<HttpBackend>;

/// Inactivity threshold: consoles not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// What every console endpoint answers with.
#[derive(Serialize)]
struct ConsoleView<'a> {
    id: ConsoleId,
    #[serde(flatten)]
    state: &'a ConsoleState,
    clock: ClockSnapshot,
    can_start_match: bool,
    win_streak: WinStreak,
}

#[derive(Deserialize)]
struct ConsolePath {
    id: ConsoleId,
}

#[derive(Deserialize)]
struct ConsolePlayerPath {
    id: ConsoleId,
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct ConsoleMatchPath {
    id: ConsoleId,
    match_id: MatchId,
}

#[derive(Deserialize)]
struct ConsoleGoalPath {
    id: ConsoleId,
    goal_id: GoalId,
}

#[derive(Deserialize)]
struct StatsPlayerPath {
    player_id: PlayerId,
}

#[derive(Deserialize, Default)]
struct SessionBody {
    /// Defaults to today.
    #[serde(default)]
    date: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct ArrivalBody {
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct MoveBody {
    player_id: PlayerId,
    target: Zone,
    #[serde(default)]
    confirmed: bool,
}

#[derive(Deserialize)]
struct GoalBody {
    team: TeamColor,
    #[serde(default)]
    scorer_id: Option<PlayerId>,
    #[serde(default)]
    assistant_id: Option<PlayerId>,
}

#[derive(Deserialize)]
struct ConfirmQuery {
    #[serde(default)]
    confirmed: bool,
}

#[derive(Deserialize)]
struct AdjustBody {
    team: TeamColor,
    increase: bool,
}

#[derive(Deserialize)]
struct TieBreakBody {
    team: TeamColor,
}

#[derive(Deserialize)]
struct SettingsBody {
    match_duration: u32,
}

fn view(id: ConsoleId, entry: &ConsoleEntry) -> HttpResponse {
    HttpResponse::Ok().json(ConsoleView {
        id,
        state: &entry.state,
        clock: entry.ticker.snapshot(),
        can_start_match: entry.state.sheet.can_start_match(),
        win_streak: entry.state.win_streak(),
    })
}

/// 400 for validation and state errors, 404 for missing things, 502 when the backend failed.
fn error_response(err: &ConsoleError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    if err.is_remote() {
        HttpResponse::BadGateway().json(body)
    } else if err.is_not_found() {
        HttpResponse::NotFound().json(body)
    } else {
        HttpResponse::BadRequest().json(body)
    }
}

fn no_console() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No console" }))
}

async fn find_console(consoles: &AppState, id: ConsoleId) -> Option<Arc<Mutex<ConsoleEntry>>> {
    consoles.read().await.get(&id).cloned()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[get("/api/health")]
async fn api_health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "futsal-console",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Open a console: loads settings, players and today's session (client stores the id).
#[post("/api/console")]
async fn api_create_console(
    consoles: AppState,
    backend: BackendData,
    config: Data<ConsoleConfig>,
) -> HttpResponse {
    let fallback = Settings::new(config.match_duration_minutes).unwrap_or_default();
    let mut state = ConsoleState::new(fallback);
    if let Err(e) = flows::load_settings(backend.get_ref(), &mut state).await {
        log::warn!("Console opened without settings: {}", e);
    }
    if let Err(e) = flows::load_players(backend.get_ref(), &mut state).await {
        log::warn!("Console opened without players: {}", e);
    }
    if let Err(e) = flows::load_session(backend.get_ref(), &mut state, today()).await {
        log::warn!("Console opened without a session: {}", e);
    }
    let id = Uuid::new_v4();
    let entry = ConsoleEntry::new(state);
    let response = view(id, &entry);
    consoles
        .write()
        .await
        .insert(id, Arc::new(Mutex::new(entry)));
    log::info!("Opened console {}", id);
    response
}

/// Get a console by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/console/{id}")]
async fn api_get_console(consoles: AppState, path: Path<ConsolePath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    view(path.id, guard.touch())
}

#[delete("/api/console/{id}")]
async fn api_close_console(consoles: AppState, path: Path<ConsolePath>) -> HttpResponse {
    match consoles.write().await.remove(&path.id) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => no_console(),
    }
}

#[post("/api/console/{id}/players/reload")]
async fn api_reload_players(consoles: AppState, backend: BackendData, path: Path<ConsolePath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match flows::load_players(backend.get_ref(), &mut entry.state).await {
        Ok(()) => view(path.id, entry),
        Err(e) => error_response(&e),
    }
}

#[post("/api/console/{id}/players")]
async fn api_create_player(
    consoles: AppState,
    backend: BackendData,
    path: Path<ConsolePath>,
    body: Json<PlayerDraft>,
) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match flows::create_player(backend.get_ref(), &mut entry.state, body.into_inner()).await {
        Ok(_) => view(path.id, entry),
        Err(e) => error_response(&e),
    }
}

#[put("/api/console/{id}/players/{player_id}")]
async fn api_update_player(
    consoles: AppState,
    backend: BackendData,
    path: Path<ConsolePlayerPath>,
    body: Json<PlayerDraft>,
) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match flows::update_player(backend.get_ref(), &mut entry.state, path.player_id, body.into_inner()).await {
        Ok(_) => view(path.id, entry),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/console/{id}/players/{player_id}")]
async fn api_delete_player(consoles: AppState, backend: BackendData, path: Path<ConsolePlayerPath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match flows::delete_player(backend.get_ref(), &mut entry.state, path.player_id).await {
        Ok(()) => view(path.id, entry),
        Err(e) => error_response(&e),
    }
}

/// Load the session of a day (today when no date is given).
#[post("/api/console/{id}/session/load")]
async fn api_load_session(
    consoles: AppState,
    backend: BackendData,
    path: Path<ConsolePath>,
    body: Option<Json<SessionBody>>,
) -> HttpResponse {
    let date = body.and_then(|b| b.date).unwrap_or_else(today);
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match flows::load_session(backend.get_ref(), &mut entry.state, date).await {
        Ok(_) => {
            entry.reset_clock();
            view(path.id, entry)
        }
        Err(e) => error_response(&e),
    }
}

#[post("/api/console/{id}/session")]
async fn api_create_session(
    consoles: AppState,
    backend: BackendData,
    path: Path<ConsolePath>,
    body: Option<Json<SessionBody>>,
) -> HttpResponse {
    let date = body.and_then(|b| b.date).unwrap_or_else(today);
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match flows::create_session(backend.get_ref(), &mut entry.state, date).await {
        Ok(_) => {
            entry.reset_clock();
            view(path.id, entry)
        }
        Err(e) => error_response(&e),
    }
}

#[post("/api/console/{id}/session/end")]
async fn api_end_session(consoles: AppState, backend: BackendData, path: Path<ConsolePath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match flows::end_session(backend.get_ref(), &mut entry.state).await {
        Ok(()) => {
            entry.ticker.end();
            view(path.id, entry)
        }
        Err(e) => error_response(&e),
    }
}

#[post("/api/console/{id}/arrivals")]
async fn api_add_arrival(consoles: AppState, path: Path<ConsolePath>, body: Json<ArrivalBody>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match entry.state.dispatch(Action::ArrivalAdded(body.player_id)) {
        Ok(()) => view(path.id, entry),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/console/{id}/arrivals/{player_id}")]
async fn api_remove_arrival(consoles: AppState, path: Path<ConsolePlayerPath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match entry.state.dispatch(Action::ArrivalRemoved(path.player_id)) {
        Ok(()) => view(path.id, entry),
        Err(e) => error_response(&e),
    }
}

#[post("/api/console/{id}/teams/draw")]
async fn api_draw_teams(consoles: AppState, path: Path<ConsolePath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match flows::draw_teams(&mut entry.state, &mut rand::thread_rng()) {
        Ok(()) => view(path.id, entry),
        Err(e) => error_response(&e),
    }
}

#[post("/api/console/{id}/teams/redraw")]
async fn api_redraw_teams(consoles: AppState, path: Path<ConsolePath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match flows::redraw_teams(&mut entry.state, &mut rand::thread_rng()) {
        Ok(()) => view(path.id, entry),
        Err(e) => error_response(&e),
    }
}

/// Manual team selection.
#[put("/api/console/{id}/teams")]
async fn api_edit_teams(consoles: AppState, path: Path<ConsolePath>, body: Json<TeamSelection>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match entry.state.dispatch(Action::TeamsEdited(body.into_inner())) {
        Ok(()) => view(path.id, entry),
        Err(e) => error_response(&e),
    }
}

/// Drag-and-drop move between goalkeeper, field and waiting zones.
#[post("/api/console/{id}/teams/move")]
async fn api_move_player(consoles: AppState, path: Path<ConsolePath>, body: Json<MoveBody>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    let action = Action::PlayerMoved {
        player_id: body.player_id,
        target: body.target,
        confirmed: body.confirmed,
    };
    match entry.state.dispatch(action) {
        Ok(()) => view(path.id, entry),
        Err(e) => error_response(&e),
    }
}

#[post("/api/console/{id}/teams/last-match")]
async fn api_teams_from_last_match(consoles: AppState, backend: BackendData, path: Path<ConsolePath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match flows::teams_from_last_match(backend.get_ref(), &mut entry.state).await {
        Ok(()) => view(path.id, entry),
        Err(e) => error_response(&e),
    }
}

#[post("/api/console/{id}/match")]
async fn api_start_match(consoles: AppState, backend: BackendData, path: Path<ConsolePath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match flows::start_match(backend.get_ref(), &mut entry.state).await {
        Ok(_) => {
            entry.reset_clock();
            view(path.id, entry)
        }
        Err(e) => error_response(&e),
    }
}

/// Put a persisted match on the scoreboard.
#[post("/api/console/{id}/matches/{match_id}/load")]
async fn api_load_match(consoles: AppState, backend: BackendData, path: Path<ConsoleMatchPath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match flows::load_match(backend.get_ref(), &mut entry.state, path.match_id).await {
        Ok(()) => {
            entry.reset_clock();
            view(path.id, entry)
        }
        Err(e) => error_response(&e),
    }
}

#[get("/api/console/{id}/clock")]
async fn api_clock(consoles: AppState, path: Path<ConsolePath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    HttpResponse::Ok().json(guard.touch().ticker.snapshot())
}

#[post("/api/console/{id}/clock/start")]
async fn api_clock_start(consoles: AppState, path: Path<ConsolePath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match entry.state.live_match() {
        Ok(live) if live.is_active() => {
            entry.ticker.start();
            HttpResponse::Ok().json(entry.ticker.snapshot())
        }
        Ok(_) => error_response(&ConsoleError::MatchEnded),
        Err(e) => error_response(&e),
    }
}

#[post("/api/console/{id}/clock/pause")]
async fn api_clock_pause(consoles: AppState, path: Path<ConsolePath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    entry.ticker.pause();
    HttpResponse::Ok().json(entry.ticker.snapshot())
}

#[post("/api/console/{id}/clock/reset")]
async fn api_clock_reset(consoles: AppState, path: Path<ConsolePath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    entry.ticker.reset();
    HttpResponse::Ok().json(entry.ticker.snapshot())
}

#[post("/api/console/{id}/goals")]
async fn api_register_goal(
    consoles: AppState,
    backend: BackendData,
    path: Path<ConsolePath>,
    body: Json<GoalBody>,
) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match flows::register_goal(backend.get_ref(), &mut entry.state, body.team, body.scorer_id, body.assistant_id).await {
        Ok(_) => view(path.id, entry),
        Err(e) => error_response(&e),
    }
}

/// Delete a goal; needs `?confirmed=true`.
#[delete("/api/console/{id}/goals/{goal_id}")]
async fn api_delete_goal(
    consoles: AppState,
    backend: BackendData,
    path: Path<ConsoleGoalPath>,
    query: Query<ConfirmQuery>,
) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match flows::delete_goal(backend.get_ref(), &mut entry.state, path.goal_id, query.confirmed).await {
        Ok(()) => view(path.id, entry),
        Err(e) => error_response(&e),
    }
}

#[post("/api/console/{id}/end-match/open")]
async fn api_end_match_open(consoles: AppState, path: Path<ConsolePath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match entry.state.dispatch(Action::EndMatchOpened) {
        Ok(()) => view(path.id, entry),
        Err(e) => error_response(&e),
    }
}

#[post("/api/console/{id}/end-match/adjust")]
async fn api_end_match_adjust(consoles: AppState, path: Path<ConsolePath>, body: Json<AdjustBody>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    let action = Action::EndMatchScoreAdjusted {
        team: body.team,
        increase: body.increase,
    };
    match entry.state.dispatch(action) {
        Ok(()) => view(path.id, entry),
        Err(e) => error_response(&e),
    }
}

#[post("/api/console/{id}/end-match/tie-break")]
async fn api_end_match_tie_break(consoles: AppState, path: Path<ConsolePath>, body: Json<TieBreakBody>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match entry.state.dispatch(Action::TieBreakChosen(body.team)) {
        Ok(()) => view(path.id, entry),
        Err(e) => error_response(&e),
    }
}

#[post("/api/console/{id}/end-match/confirm")]
async fn api_end_match_confirm(consoles: AppState, backend: BackendData, path: Path<ConsolePath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match flows::end_match(backend.get_ref(), &mut entry.state).await {
        Ok(_) => {
            entry.ticker.end();
            view(path.id, entry)
        }
        Err(e) => error_response(&e),
    }
}

/// Substitutions in the live match.
#[put("/api/console/{id}/match/players")]
async fn api_update_match_players(
    consoles: AppState,
    backend: BackendData,
    path: Path<ConsolePath>,
    body: Json<TeamSelection>,
) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match flows::update_match_players(backend.get_ref(), &mut entry.state, &body).await {
        Ok(()) => view(path.id, entry),
        Err(e) => error_response(&e),
    }
}

#[get("/api/console/{id}/streak")]
async fn api_win_streak(consoles: AppState, path: Path<ConsolePath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    HttpResponse::Ok().json(guard.touch().state.win_streak())
}

#[get("/api/console/{id}/summary")]
async fn api_session_summary(consoles: AppState, backend: BackendData, path: Path<ConsolePath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match flows::session_summary(backend.get_ref(), &entry.state).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => error_response(&e),
    }
}

#[get("/api/console/{id}/summary.csv")]
async fn api_session_summary_csv(consoles: AppState, backend: BackendData, path: Path<ConsolePath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    let csv = match flows::session_summary(backend.get_ref(), &entry.state).await {
        Ok(summary) => summary.to_csv(),
        Err(e) => Err(e),
    };
    match csv {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(body),
        Err(e) => error_response(&e),
    }
}

#[get("/api/console/{id}/settings")]
async fn api_get_settings(consoles: AppState, path: Path<ConsolePath>) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    HttpResponse::Ok().json(guard.touch().state.settings)
}

#[put("/api/console/{id}/settings")]
async fn api_save_settings(
    consoles: AppState,
    backend: BackendData,
    path: Path<ConsolePath>,
    body: Json<SettingsBody>,
) -> HttpResponse {
    let Some(entry) = find_console(&consoles, path.id).await else {
        return no_console();
    };
    let mut guard = entry.lock().await;
    let entry = guard.touch();
    match flows::save_settings(backend.get_ref(), &mut entry.state, body.match_duration).await {
        Ok(settings) => {
            entry.ticker.set_limit(settings.limit_seconds());
            view(path.id, entry)
        }
        Err(e) => error_response(&e),
    }
}

#[get("/api/console/logs")]
async fn api_logs(backend: BackendData) -> HttpResponse {
    match flows::recent_logs(backend.get_ref()).await {
        Ok(logs) => HttpResponse::Ok().json(logs),
        Err(e) => error_response(&e),
    }
}

#[get("/api/console/stats/dashboard")]
async fn api_dashboard(backend: BackendData) -> HttpResponse {
    match flows::dashboard(backend.get_ref()).await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response(&e),
    }
}

#[get("/api/console/stats/player_list")]
async fn api_player_list(backend: BackendData) -> HttpResponse {
    match flows::player_list(backend.get_ref()).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(&e),
    }
}

#[get("/api/console/stats/player/{player_id}")]
async fn api_player_stats(backend: BackendData, path: Path<StatsPlayerPath>) -> HttpResponse {
    match flows::player_stats(backend.get_ref(), path.player_id).await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response(&e),
    }
}

#[get("/api/console/stats/top-scorers")]
async fn api_top_scorers(backend: BackendData) -> HttpResponse {
    match flows::top_scorers(backend.get_ref()).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(&e),
    }
}

#[get("/api/console/stats/top-assistants")]
async fn api_top_assistants(backend: BackendData) -> HttpResponse {
    match flows::top_assistants(backend.get_ref()).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(&e),
    }
}

#[get("/api/console/stats/top-goalkeepers")]
async fn api_top_goalkeepers(backend: BackendData) -> HttpResponse {
    match flows::top_goalkeepers(backend.get_ref()).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(&e),
    }
}

#[get("/api/console/stats/global")]
async fn api_global_stats(backend: BackendData) -> HttpResponse {
    match flows::global_stats(backend.get_ref()).await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response(&e),
    }
}

/// Register every route. Literal paths go before `/api/console/{id}` patterns.
fn routes(cfg: &mut ServiceConfig) {
    cfg.service(api_health)
        .service(favicon)
        .service(api_logs)
        .service(api_dashboard)
        .service(api_player_list)
        .service(api_player_stats)
        .service(api_top_scorers)
        .service(api_top_assistants)
        .service(api_top_goalkeepers)
        .service(api_global_stats)
        .service(api_create_console)
        .service(api_get_console)
        .service(api_close_console)
        .service(api_reload_players)
        .service(api_create_player)
        .service(api_update_player)
        .service(api_delete_player)
        .service(api_load_session)
        .service(api_create_session)
        .service(api_end_session)
        .service(api_add_arrival)
        .service(api_remove_arrival)
        .service(api_draw_teams)
        .service(api_redraw_teams)
        .service(api_edit_teams)
        .service(api_move_player)
        .service(api_teams_from_last_match)
        .service(api_start_match)
        .service(api_load_match)
        .service(api_clock)
        .service(api_clock_start)
        .service(api_clock_pause)
        .service(api_clock_reset)
        .service(api_register_goal)
        .service(api_delete_goal)
        .service(api_end_match_open)
        .service(api_end_match_adjust)
        .service(api_end_match_tie_break)
        .service(api_end_match_confirm)
        .service(api_update_match_players)
        .service(api_win_streak)
        .service(api_session_summary)
        .service(api_session_summary_csv)
        .service(api_get_settings)
        .service(api_save_settings);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ConsoleConfig::from_env();
    let backend = HttpBackend::new(config.backend_url.clone(), config.backend_timeout)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let bind = (config.host.clone(), config.port);
    log::info!("Starting console at http://{}:{}", bind.0, bind.1);
    log::info!("Using backend at {}", backend.base_url());

    let consoles: AppState = Data::new(RwLock::new(HashMap::new()));
    let backend = Data::new(backend);
    let static_dir = config.static_dir.clone();
    let config = Data::new(config);

    // Background task: every 30 minutes, remove consoles inactive for 12+ hours
    let consoles_cleanup = consoles.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = consoles_cleanup.write().await;
            let before = g.len();
            // A console busy with a request is in use, so it stays.
            g.retain(|_, entry| {
                entry
                    .try_lock()
                    .map(|e| e.last_activity.elapsed() < INACTIVITY_TIMEOUT)
                    .unwrap_or(true)
            });
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive console(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        let app = App::new()
            .app_data(consoles.clone())
            .app_data(backend.clone())
            .app_data(config.clone())
            .configure(routes);
        match &static_dir {
            Some(dir) => app.service(Files::new("/", dir.clone()).index_file("index.html")),
            None => app,
        }
    })
    .bind(bind)?
    .run()
    .await
}
