//! Team statistics recomputed from the full match history, and standings order.

use crate::models::{Match, Side, Team};
use std::cmp::Ordering;

/// Points credited for a BYE, whatever score the BYE match stores.
pub const BYE_POINTS_FOR: u32 = 13;
pub const BYE_POINTS_AGAINST: u32 = 7;

/// Rebuild wins, losses, points and tie-break deltas of every team from `matches`.
///
/// A team's completed matches are walked by round, then by position in `matches`.
/// Identity, players and pool membership are kept.
pub fn compute_team_stats(teams: &[Team], matches: &[Match]) -> Vec<Team> {
    teams
        .iter()
        .map(|team| {
            let mut team = team.clone();
            team.clear_stats();

            let mut played: Vec<(usize, &Match)> = matches
                .iter()
                .enumerate()
                .filter(|(_, m)| m.completed && m.involves(team.id))
                .collect();
            played.sort_by_key(|(i, m)| (m.round, *i));

            for (_, m) in played {
                let (points_for, points_against) = if m.is_bye {
                    team.wins += 1;
                    (BYE_POINTS_FOR, BYE_POINTS_AGAINST)
                } else {
                    let Some(side) = m.side_of(team.id) else {
                        continue;
                    };
                    let other = if side == Side::One { Side::Two } else { Side::One };
                    let scored = m.score_of(side).unwrap_or(0);
                    let conceded = m.score_of(other).unwrap_or(0);
                    match scored.cmp(&conceded) {
                        Ordering::Greater => team.wins += 1,
                        Ordering::Less => team.losses += 1,
                        Ordering::Equal => {}
                    }
                    (scored, conceded)
                };
                team.points_for += points_for;
                team.points_against += points_against;
                team.tie_break_deltas
                    .push(points_for as i32 - points_against as i32);
            }
            team.performance = team.points_for as i32 - team.points_against as i32;
            team
        })
        .collect()
}

/// Standings order: wins, then performance, then tie-break deltas compared position
/// by position (all descending).
pub fn compare_standings(a: &Team, b: &Team) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| b.performance.cmp(&a.performance))
        .then_with(|| {
            for (da, db) in a.tie_break_deltas.iter().zip(&b.tie_break_deltas) {
                match db.cmp(da) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            Ordering::Equal
        })
}

/// Teams sorted for display.
pub fn rank_teams(teams: &[Team]) -> Vec<Team> {
    let mut ranked = teams.to_vec();
    ranked.sort_by(compare_standings);
    ranked
}
