//! reqwest implementation of [`Backend`].

use crate::api::backend::Backend;
use crate::api::schema::{
    required, Ack, CreateSessionBody, EndMatchBody, GoalPayload, LineupsBody, MatchPayload,
    NoPayload, PlayerPayload, SessionPayload,
};
use crate::error::ConsoleError;
use crate::logic::GoalDraft;
use crate::models::{
    AssistantRow, DashboardStats, EventLogEntry, GlobalStats, Goal, GoalId, GoalkeeperRow, Match,
    MatchDetail, MatchId, Player, PlayerDraft, PlayerId, PlayerListRow, PlayerStats, ScorerRow,
    Session, SessionId, Settings, TeamColor,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Talks JSON to the futsal backend at `base_url`.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ConsoleError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a bare JSON value (array, object or `null`).
    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConsoleError> {
        let (status, body) = self.send(self.client.get(self.url(path))).await?;
        if !status.is_success() {
            return Err(refusal(status, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a mutation and unwrap its acknowledgement.
    async fn acknowledge<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ConsoleError> {
        let (status, body) = self.send(request).await?;
        match serde_json::from_str::<Ack<T>>(&body) {
            Ok(ack) => ack.into_result(),
            Err(_) if !status.is_success() => Err(refusal(status, &body)),
            Err(e) => Err(e.into()),
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, String), ConsoleError> {
        let response = request.send().await.map_err(|e| {
            log::error!("Backend request failed: {}", e);
            ConsoleError::from(e)
        })?;
        let status = response.status();
        let body = response.text().await?;
        log::debug!("Backend answered {} ({} bytes)", status, body.len());
        Ok((status, body))
    }
}

/// Error for a non-2xx answer, using the acknowledgement message when there is one.
fn refusal(status: StatusCode, body: &str) -> ConsoleError {
    let message = serde_json::from_str::<Ack<NoPayload>>(body)
        .ok()
        .and_then(|ack| ack.message)
        .unwrap_or_else(|| format!("HTTP {}", status));
    ConsoleError::Backend { message }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_players(&self) -> Result<Vec<Player>, ConsoleError> {
        self.fetch("/api/players").await
    }

    async fn create_player(&self, draft: &PlayerDraft) -> Result<Player, ConsoleError> {
        let reply: PlayerPayload = self
            .acknowledge(self.client.post(self.url("/api/players")).json(draft))
            .await?;
        required(reply.player, "player")
    }

    async fn update_player(&self, id: PlayerId, draft: &PlayerDraft) -> Result<Player, ConsoleError> {
        let path = format!("/api/players/{}", id);
        let reply: PlayerPayload = self
            .acknowledge(self.client.put(self.url(&path)).json(draft))
            .await?;
        required(reply.player, "player")
    }

    async fn delete_player(&self, id: PlayerId) -> Result<(), ConsoleError> {
        let path = format!("/api/players/{}", id);
        let _: NoPayload = self.acknowledge(self.client.delete(self.url(&path))).await?;
        Ok(())
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, ConsoleError> {
        self.fetch("/api/sessions").await
    }

    async fn session_by_date(&self, date: NaiveDate) -> Result<Option<Session>, ConsoleError> {
        self.fetch(&format!("/api/sessions/{}", date.format("%Y-%m-%d")))
            .await
    }

    async fn create_session(&self, date: NaiveDate) -> Result<Session, ConsoleError> {
        let body = CreateSessionBody { date };
        let reply: SessionPayload = self
            .acknowledge(self.client.post(self.url("/api/sessions")).json(&body))
            .await?;
        required(reply.session, "session")
    }

    async fn end_session(&self, id: SessionId) -> Result<(), ConsoleError> {
        let path = format!("/api/sessions/{}/end", id);
        let _: NoPayload = self.acknowledge(self.client.post(self.url(&path))).await?;
        Ok(())
    }

    async fn session_matches(&self, id: SessionId) -> Result<Vec<Match>, ConsoleError> {
        self.fetch(&format!("/api/sessions/{}/matches", id)).await
    }

    async fn create_match(&self, session: SessionId, lineups: &LineupsBody) -> Result<Match, ConsoleError> {
        let path = format!("/api/sessions/{}/matches", session);
        let reply: MatchPayload = self
            .acknowledge(self.client.post(self.url(&path)).json(lineups))
            .await?;
        match (reply.game, reply.match_id) {
            (Some(game), _) => Ok(game),
            (None, Some(id)) => self.get_match(id).await.map(|detail| detail.game),
            (None, None) => required(None, "match"),
        }
    }

    async fn get_match(&self, id: MatchId) -> Result<MatchDetail, ConsoleError> {
        self.fetch(&format!("/api/matches/{}", id)).await
    }

    async fn add_goal(&self, id: MatchId, draft: &GoalDraft) -> Result<Goal, ConsoleError> {
        let path = format!("/api/matches/{}/goals", id);
        let reply: GoalPayload = self
            .acknowledge(self.client.post(self.url(&path)).json(draft))
            .await?;
        required(reply.goal, "goal")
    }

    async fn delete_goal(&self, id: MatchId, goal: GoalId) -> Result<(), ConsoleError> {
        let path = format!("/api/matches/{}/goals/{}", id, goal);
        let _: MatchPayload = self.acknowledge(self.client.delete(self.url(&path))).await?;
        Ok(())
    }

    async fn end_match(&self, id: MatchId, winner: Option<TeamColor>) -> Result<Match, ConsoleError> {
        let path = format!("/api/matches/{}/end", id);
        let body = EndMatchBody { winner_team: winner };
        let reply: MatchPayload = self
            .acknowledge(self.client.post(self.url(&path)).json(&body))
            .await?;
        required(reply.game, "match")
    }

    async fn update_match_players(&self, id: MatchId, lineups: &LineupsBody) -> Result<(), ConsoleError> {
        let path = format!("/api/matches/{}/players", id);
        let _: NoPayload = self
            .acknowledge(self.client.put(self.url(&path)).json(lineups))
            .await?;
        Ok(())
    }

    async fn settings(&self) -> Result<Option<Settings>, ConsoleError> {
        self.fetch("/api/settings").await
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), ConsoleError> {
        let _: NoPayload = self
            .acknowledge(self.client.put(self.url("/api/settings")).json(settings))
            .await?;
        Ok(())
    }

    async fn logs(&self) -> Result<Vec<EventLogEntry>, ConsoleError> {
        self.fetch("/api/logs").await
    }

    async fn dashboard(&self) -> Result<DashboardStats, ConsoleError> {
        self.fetch("/api/stats/dashboard").await
    }

    async fn player_list(&self) -> Result<Vec<PlayerListRow>, ConsoleError> {
        self.fetch("/api/stats/player_list").await
    }

    async fn player_stats(&self, id: PlayerId) -> Result<PlayerStats, ConsoleError> {
        self.fetch(&format!("/api/stats/player/{}", id)).await
    }

    async fn top_scorers(&self) -> Result<Vec<ScorerRow>, ConsoleError> {
        self.fetch("/api/stats/top-scorers").await
    }

    async fn top_assistants(&self) -> Result<Vec<AssistantRow>, ConsoleError> {
        self.fetch("/api/stats/top-assistants").await
    }

    async fn top_goalkeepers(&self) -> Result<Vec<GoalkeeperRow>, ConsoleError> {
        self.fetch("/api/stats/top-goalkeepers").await
    }

    async fn global_stats(&self) -> Result<GlobalStats, ConsoleError> {
        self.fetch("/api/stats/global").await
    }
}
