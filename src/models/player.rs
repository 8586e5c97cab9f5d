//! Player and RosterEntry data structures.

use crate::error::ConsoleError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Backend-issued player id.
pub type PlayerId = i64;

/// A registered player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Registered role; a field player may still fill in as goalkeeper for one match.
    #[serde(default)]
    pub is_goalkeeper: bool,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, is_goalkeeper: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_goalkeeper,
            photo_url: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Body for creating or updating a player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerDraft {
    pub name: String,
    #[serde(default)]
    pub is_goalkeeper: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl PlayerDraft {
    /// Trim the name and reject an empty one.
    pub fn validated(mut self) -> Result<Self, ConsoleError> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            return Err(ConsoleError::InvalidName);
        }
        self.name = trimmed.to_string();
        self.photo_url = self.photo_url.filter(|u| !u.trim().is_empty());
        Ok(self)
    }
}

/// A player placed on a roster for one match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(flatten)]
    pub player: Player,
    /// Per-match flag: who keeps goal in this match, regardless of registered role.
    pub played_as_goalkeeper: bool,
}

impl RosterEntry {
    pub fn new(player: Player, played_as_goalkeeper: bool) -> Self {
        Self {
            player,
            played_as_goalkeeper,
        }
    }

    pub fn goalkeeper(player: Player) -> Self {
        Self::new(player, true)
    }

    pub fn field(player: Player) -> Self {
        Self::new(player, false)
    }

    pub fn id(&self) -> PlayerId {
        self.player.id
    }
}
