//! Match, Side and Category, plus the round-number namespace.

use crate::models::pool::PoolId;
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Score credited to the team receiving a BYE (the other side gets 0).
pub const BYE_SCORE: u32 = 13;

/// First round number of the category A knockout bracket.
pub const FINALS_A_FIRST_ROUND: u32 = 100;

/// First round number of the category B knockout bracket.
pub const FINALS_B_FIRST_ROUND: u32 = 200;

/// Which side of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    One,
    Two,
}

/// Knockout bracket a finals match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Pool qualifiers.
    A,
    /// Pool non-qualifiers (consolation).
    B,
}

impl Category {
    pub fn first_round(self) -> u32 {
        match self {
            Category::A => FINALS_A_FIRST_ROUND,
            Category::B => FINALS_B_FIRST_ROUND,
        }
    }

    pub fn rounds(self) -> Range<u32> {
        let first = self.first_round();
        first..first + 100
    }
}

/// True for pool and standard rounds (1..=99).
pub fn is_group_round(round: u32) -> bool {
    round > 0 && round < FINALS_A_FIRST_ROUND
}

/// A single match between two sides.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub round: u32,
    /// 0 until a court is assigned (and for BYEs).
    pub court: u32,
    pub team1_id: Option<TeamId>,
    pub team2_id: Option<TeamId>,
    /// Every entry on side one for composite (melee) matches; `team1_id` is a representative.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub team1_ids: Vec<TeamId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub team2_ids: Vec<TeamId>,
    pub team1_score: Option<u32>,
    pub team2_score: Option<u32>,
    pub completed: bool,
    pub is_bye: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_id: Option<PoolId>,
    /// Slot index inside a bracket round (pool mini-bracket or finals).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    /// Quadrette sub-team labels playing this match, e.g. "AB".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineup: Option<String>,
}

impl Match {
    pub fn new(round: u32, court: u32, team1: TeamId, team2: TeamId) -> Self {
        Self {
            team1_id: Some(team1),
            team2_id: Some(team2),
            ..Self::empty(round, court)
        }
    }

    /// A match with both slots still open.
    pub fn empty(round: u32, court: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            court,
            team1_id: None,
            team2_id: None,
            team1_ids: Vec::new(),
            team2_ids: Vec::new(),
            team1_score: None,
            team2_score: None,
            completed: false,
            is_bye: false,
            pool_id: None,
            position: None,
            lineup: None,
        }
    }

    /// A completed automatic win for `team` (13-0, both slots hold the team).
    pub fn bye(round: u32, team: TeamId) -> Self {
        let mut m = Self::empty(round, 0);
        m.make_bye(team);
        m
    }

    /// A composite match: every entry of each side is listed, the first one represents the side.
    pub fn group(round: u32, court: u32, side_one: Vec<TeamId>, side_two: Vec<TeamId>) -> Self {
        Self {
            team1_id: side_one.first().copied(),
            team2_id: side_two.first().copied(),
            team1_ids: side_one,
            team2_ids: side_two,
            ..Self::empty(round, court)
        }
    }

    pub fn in_pool(mut self, pool_id: PoolId) -> Self {
        self.pool_id = Some(pool_id);
        self
    }

    pub fn at_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_lineup(mut self, lineup: impl Into<String>) -> Self {
        self.lineup = Some(lineup.into());
        self
    }

    /// Turn this match into a completed BYE for `team`.
    pub fn make_bye(&mut self, team: TeamId) {
        self.team1_id = Some(team);
        self.team2_id = Some(team);
        self.team1_score = Some(BYE_SCORE);
        self.team2_score = Some(0);
        self.completed = true;
        self.is_bye = true;
    }

    /// Forget scores, completion and BYE state.
    pub fn reset_result(&mut self) {
        self.team1_score = None;
        self.team2_score = None;
        self.completed = false;
        self.is_bye = false;
    }

    /// Set both slots; the previous result is dropped when either slot changes.
    /// Returns whether anything changed.
    pub fn assign_teams(&mut self, team1: Option<TeamId>, team2: Option<TeamId>) -> bool {
        if self.team1_id == team1 && self.team2_id == team2 && !self.is_bye {
            return false;
        }
        self.team1_id = team1;
        self.team2_id = team2;
        self.team1_ids.clear();
        self.team2_ids.clear();
        self.reset_result();
        true
    }

    pub fn slot(&self, side: Side) -> Option<TeamId> {
        match side {
            Side::One => self.team1_id,
            Side::Two => self.team2_id,
        }
    }

    pub fn set_slot(&mut self, side: Side, team: Option<TeamId>) {
        match side {
            Side::One => self.team1_id = team,
            Side::Two => self.team2_id = team,
        }
    }

    /// Both slots filled.
    pub fn is_ready(&self) -> bool {
        self.team1_id.is_some() && self.team2_id.is_some()
    }

    /// The only team present when exactly one slot is filled.
    pub fn lone_team(&self) -> Option<TeamId> {
        match (self.team1_id, self.team2_id) {
            (Some(t), None) | (None, Some(t)) => Some(t),
            _ => None,
        }
    }

    pub fn empty_slots(&self) -> usize {
        usize::from(self.team1_id.is_none()) + usize::from(self.team2_id.is_none())
    }

    /// Side with the strictly higher score. BYEs are always won by side one.
    pub fn winning_side(&self) -> Option<Side> {
        if self.is_bye {
            return Some(Side::One);
        }
        match (self.team1_score, self.team2_score) {
            (Some(a), Some(b)) if a > b => Some(Side::One),
            (Some(a), Some(b)) if b > a => Some(Side::Two),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<TeamId> {
        self.winning_side().and_then(|side| self.slot(side))
    }

    pub fn loser(&self) -> Option<TeamId> {
        if self.is_bye {
            return None;
        }
        match self.winning_side()? {
            Side::One => self.team2_id,
            Side::Two => self.team1_id,
        }
    }

    /// Side `team` plays on, looking at representatives and composite lists.
    pub fn side_of(&self, team: TeamId) -> Option<Side> {
        if self.team1_id == Some(team) || self.team1_ids.contains(&team) {
            Some(Side::One)
        } else if self.team2_id == Some(team) || self.team2_ids.contains(&team) {
            Some(Side::Two)
        } else {
            None
        }
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.side_of(team).is_some()
    }

    /// Every entry of a side (composite list, or the single slot).
    pub fn side_entries(&self, side: Side) -> Vec<TeamId> {
        let (ids, slot) = match side {
            Side::One => (&self.team1_ids, self.team1_id),
            Side::Two => (&self.team2_ids, self.team2_id),
        };
        if ids.is_empty() {
            slot.into_iter().collect()
        } else {
            ids.clone()
        }
    }

    pub fn score_of(&self, side: Side) -> Option<u32> {
        match side {
            Side::One => self.team1_score,
            Side::Two => self.team2_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bye_is_completed_win_for_its_team() {
        let team = Uuid::new_v4();
        let m = Match::bye(1, team);
        assert!(m.completed && m.is_bye);
        assert_eq!(m.team1_id, m.team2_id);
        assert_eq!(m.winner(), Some(team));
        assert_eq!(m.loser(), None);
        assert_eq!((m.team1_score, m.team2_score), (Some(13), Some(0)));
    }

    #[test]
    fn assign_teams_clears_stale_result() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let mut m = Match::new(2, 1, a, b);
        m.team1_score = Some(13);
        m.team2_score = Some(4);
        m.completed = true;
        assert!(!m.assign_teams(Some(a), Some(b)));
        assert!(m.completed);
        assert!(m.assign_teams(Some(a), Some(c)));
        assert!(!m.completed);
        assert_eq!(m.team1_score, None);
    }
}
