//! Player and PlayerLabel data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player.
pub type PlayerId = Uuid;

/// Position label inside a four-player (quadrette) team.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum PlayerLabel {
    A,
    B,
    C,
    D,
}

impl PlayerLabel {
    pub const ALL: [PlayerLabel; 4] = [PlayerLabel::A, PlayerLabel::B, PlayerLabel::C, PlayerLabel::D];

    pub fn as_char(self) -> char {
        match self {
            PlayerLabel::A => 'A',
            PlayerLabel::B => 'B',
            PlayerLabel::C => 'C',
            PlayerLabel::D => 'D',
        }
    }

    /// Label for the player registered at `index` (0-based), if there is one.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// A player registered in a team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Only used by the quadrette format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<PlayerLabel>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: PlayerLabel) -> Self {
        self.label = Some(label);
        self
    }
}
