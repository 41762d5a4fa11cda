//! Qualification: which pool teams go to category A and which to category B.
//!
//! Everything is recomputed from the match list on every call.

use crate::models::{Match, Pool, Side, TeamId};
use std::collections::HashSet;

/// A team's record inside its pool.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PoolStanding {
    pub team_id: TeamId,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u32,
    pub points_against: u32,
}

impl PoolStanding {
    fn new(team_id: TeamId) -> Self {
        Self {
            team_id,
            wins: 0,
            losses: 0,
            points_for: 0,
            points_against: 0,
        }
    }

    pub fn differential(&self) -> i64 {
        i64::from(self.points_for) - i64::from(self.points_against)
    }
}

/// Pool table from completed pool matches, sorted by wins then differential (both
/// descending). BYEs count as ordinary 13-0 wins. Ties keep pool order.
pub fn pool_standings(matches: &[Match], pool: &Pool) -> Vec<PoolStanding> {
    let mut standings: Vec<PoolStanding> =
        pool.team_ids.iter().map(|&t| PoolStanding::new(t)).collect();

    for m in matches
        .iter()
        .filter(|m| m.pool_id == Some(pool.id) && m.completed)
    {
        if m.is_bye {
            if let Some(s) = standings.iter_mut().find(|s| Some(s.team_id) == m.team1_id) {
                s.wins += 1;
                s.points_for += m.team1_score.unwrap_or(0);
                s.points_against += m.team2_score.unwrap_or(0);
            }
            continue;
        }
        let winner = m.winning_side();
        for (side, other) in [(Side::One, Side::Two), (Side::Two, Side::One)] {
            let Some(s) = standings.iter_mut().find(|s| Some(s.team_id) == m.slot(side)) else {
                continue;
            };
            s.points_for += m.score_of(side).unwrap_or(0);
            s.points_against += m.score_of(other).unwrap_or(0);
            match winner {
                Some(w) if w == side => s.wins += 1,
                Some(_) => s.losses += 1,
                None => {}
            }
        }
    }

    standings.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.differential().cmp(&a.differential()))
    });
    standings
}

/// Qualified teams of one pool, in standing order.
///
/// Pools of 3 or 4: every team with at least two wins. Pools of 2: both teams once
/// their match is played.
pub fn pool_qualifiers(matches: &[Match], pool: &Pool) -> Vec<PoolStanding> {
    let standings = pool_standings(matches, pool);
    match pool.team_ids.len() {
        2 => {
            let played = matches
                .iter()
                .any(|m| m.pool_id == Some(pool.id) && m.completed && !m.is_bye);
            if played {
                standings
            } else {
                Vec::new()
            }
        }
        3 | 4 => standings.into_iter().filter(|s| s.wins >= 2).collect(),
        _ => Vec::new(),
    }
}

/// Pool teams that did not qualify, in standing order.
pub fn pool_non_qualifiers(matches: &[Match], pool: &Pool) -> Vec<PoolStanding> {
    let qualified: HashSet<TeamId> = pool_qualifiers(matches, pool)
        .iter()
        .map(|s| s.team_id)
        .collect();
    pool_standings(matches, pool)
        .into_iter()
        .filter(|s| !qualified.contains(&s.team_id))
        .collect()
}

/// Every qualified team, pool by pool.
pub fn get_current_qualified_teams(pools: &[Pool], matches: &[Match]) -> Vec<TeamId> {
    pools
        .iter()
        .flat_map(|pool| pool_qualifiers(matches, pool))
        .map(|s| s.team_id)
        .collect()
}

/// Every pool team not (yet) qualified, pool by pool.
pub fn get_current_bottom_teams(pools: &[Pool], matches: &[Match]) -> Vec<TeamId> {
    pools
        .iter()
        .flat_map(|pool| pool_non_qualifiers(matches, pool))
        .map(|s| s.team_id)
        .collect()
}
