//! Team (a pair of players) and Group (a round-robin pool of teams).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// Unique identifier for a group.
pub type GroupId = Uuid;

/// Reference to a player as supplied by the roster source (name or external id).
pub type PlayerRef = String;

/// A doubles team. Complete only when both players are set.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub player1: Option<PlayerRef>,
    pub player2: Option<PlayerRef>,
}

impl Team {
    /// Create a complete team from two player references.
    pub fn new(player1: impl Into<PlayerRef>, player2: impl Into<PlayerRef>) -> Self {
        Self::from_players(Some(player1.into()), Some(player2.into()))
    }

    /// Create a team that may still be missing a player (e.g. from an open registration).
    pub fn from_players(player1: Option<PlayerRef>, player2: Option<PlayerRef>) -> Self {
        Self {
            id: Uuid::new_v4(),
            player1,
            player2,
        }
    }

    /// Both player slots are filled.
    pub fn is_complete(&self) -> bool {
        self.player1.is_some() && self.player2.is_some()
    }

    /// Display name, e.g. "Ana / Ben". Missing players show as "?".
    pub fn name(&self) -> String {
        format!(
            "{} / {}",
            self.player1.as_deref().unwrap_or("?"),
            self.player2.as_deref().unwrap_or("?")
        )
    }
}

/// A group of teams that play a round-robin among themselves.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    /// "Group A", "Group B", ...
    pub name: String,
    pub teams: Vec<Team>,
}

impl Group {
    pub fn new(id: GroupId, name: impl Into<String>, teams: Vec<Team>) -> Self {
        Self {
            id,
            name: name.into(),
            teams,
        }
    }
}
