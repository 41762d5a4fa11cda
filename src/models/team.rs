//! Team data structure. Aggregate fields are owned by the statistics pass.

use crate::models::player::{Player, PlayerLabel};
use crate::models::pool::PoolId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (also used for solo entries in melee).
pub type TeamId = Uuid;

/// A registered team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub players: Vec<Player>,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u32,
    pub points_against: u32,
    /// `points_for - points_against`.
    pub performance: i32,
    /// One signed point differential per completed match, in chronological order.
    pub tie_break_deltas: Vec<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_id: Option<PoolId>,
}

impl Team {
    pub fn new(name: impl Into<String>, players: Vec<Player>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            players,
            wins: 0,
            losses: 0,
            points_for: 0,
            points_against: 0,
            performance: 0,
            tie_break_deltas: Vec::new(),
            pool_id: None,
        }
    }

    /// Player holding `label` in a quadrette team.
    pub fn player_with_label(&self, label: PlayerLabel) -> Option<&Player> {
        self.players.iter().find(|p| p.label == Some(label))
    }

    /// Zero every aggregate field (identity, players and pool are kept).
    pub fn clear_stats(&mut self) {
        self.wins = 0;
        self.losses = 0;
        self.points_for = 0;
        self.points_against = 0;
        self.performance = 0;
        self.tie_break_deltas.clear();
    }
}
