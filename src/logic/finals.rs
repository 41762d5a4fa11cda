//! Knockout finals (single elimination): empty brackets, seeding, winner propagation,
//! BYEs and the reconciliation pass that keeps brackets in line with pool results.
//!
//! Bracket adjacency: matches of a round are ordered by `position` (then court); the
//! winner of match `idx` goes to match `idx / 2` of the next round, side one when `idx`
//! is even.

use crate::logic::final_selection::{
    get_current_bottom_teams, pool_non_qualifiers, pool_qualifiers,
};
use crate::logic::group_play::pending_pool_matches;
use crate::models::{is_group_round, Category, Match, Pool, PoolDistribution, Side, TeamId};
use std::collections::BTreeMap;

const SIDES: [Side; 2] = [Side::One, Side::Two];

/// Empty bracket for `entrants` teams: `next_power_of_two(entrants) / 2` first-round
/// matches, halving each round down to the final. Courts are numbered from
/// `start_court` across the whole bracket.
fn empty_bracket(entrants: usize, category: Category, start_court: u32) -> Vec<Match> {
    if entrants <= 1 {
        return Vec::new();
    }
    let mut matches = Vec::new();
    let mut per_round = entrants.next_power_of_two() / 2;
    let mut round = category.first_round();
    let mut court = start_court;
    loop {
        for position in 0..per_round {
            matches.push(Match::empty(round, court).at_position(position as u32));
            court += 1;
        }
        if per_round <= 1 {
            break;
        }
        per_round = per_round.div_ceil(2);
        round += 1;
    }
    matches
}

/// Empty category A bracket sized for two qualifiers per pool.
pub fn create_empty_final_phases(distribution: PoolDistribution, start_court: u32) -> Vec<Match> {
    empty_bracket(distribution.expected_qualified(), Category::A, start_court)
}

/// Empty category B bracket sized for every pool team that does not qualify.
pub fn create_empty_final_phases_b(
    total_teams: usize,
    distribution: PoolDistribution,
    start_court: u32,
) -> Vec<Match> {
    let bottom = total_teams.saturating_sub(distribution.expected_qualified());
    empty_bracket(bottom, Category::B, start_court)
}

/// Seeded bracket for `team_ids`, in order. Missing entrants become first-round BYEs
/// (even positions first, then odd positions from the end) whose winners are already
/// moved into round two.
pub fn create_knockout_bracket(team_ids: &[TeamId], category: Category, start_court: u32) -> Vec<Match> {
    let mut matches = empty_bracket(team_ids.len(), category, start_court);
    if matches.is_empty() {
        return matches;
    }
    let first_round = team_ids.len().next_power_of_two() / 2;
    let byes = 2 * first_round - team_ids.len();

    let mut bye_at = vec![false; first_round];
    let evens = (0..first_round).step_by(2);
    let odds = (1..first_round).step_by(2).rev();
    for idx in evens.chain(odds).take(byes) {
        bye_at[idx] = true;
    }

    let mut teams = team_ids.iter().copied();
    for (m, &bye) in matches.iter_mut().zip(bye_at.iter()) {
        if bye {
            if let Some(team) = teams.next() {
                m.make_bye(team);
            }
        } else {
            let (a, b) = (teams.next(), teams.next());
            m.assign_teams(a, b);
        }
    }
    propagate_winners_to_next_phases(&matches, category)
}

/// Match indices of `category`, grouped by round and ordered by bracket position.
fn bracket_rounds(matches: &[Match], category: Category) -> Vec<Vec<usize>> {
    let range = category.rounds();
    let mut rounds: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (i, m) in matches.iter().enumerate() {
        if range.contains(&m.round) {
            rounds.entry(m.round).or_default().push(i);
        }
    }
    rounds
        .into_values()
        .map(|mut round| {
            round.sort_by_key(|&i| (matches[i].position.unwrap_or(u32::MAX), matches[i].court));
            round
        })
        .collect()
}

/// (position in the previous round, match index) of the match feeding `side` of
/// match `idx` in round `r`.
fn feeder(rounds: &[Vec<usize>], r: usize, idx: usize, side: Side) -> Option<(usize, usize)> {
    let previous = rounds.get(r.checked_sub(1)?)?;
    let pos = 2 * idx + usize::from(side == Side::Two);
    previous.get(pos).map(|&mi| (pos, mi))
}

fn side_for(idx: usize) -> Side {
    if idx % 2 == 0 {
        Side::One
    } else {
        Side::Two
    }
}

fn has_bracket_shape(matches: &[Match], category: Category, entrants: usize) -> bool {
    let rounds = bracket_rounds(matches, category);
    let size = entrants.next_power_of_two();
    rounds.first().is_some_and(|r| r.len() == size / 2)
        && rounds.iter().map(Vec::len).sum::<usize>() == size - 1
}

/// Write every completed match's winner into its next-round slot, skipping slots that
/// already hold that winner. Only `category`'s matches are touched.
pub fn propagate_winners_to_next_phases(matches: &[Match], category: Category) -> Vec<Match> {
    let mut matches = matches.to_vec();
    let rounds = bracket_rounds(&matches, category);
    for pair in rounds.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        for (idx, &mi) in current.iter().enumerate() {
            if !matches[mi].completed {
                continue;
            }
            let Some(winner) = matches[mi].winner() else {
                continue;
            };
            let Some(&ti) = next.get(idx / 2) else {
                continue;
            };
            let side = side_for(idx);
            let target = &mut matches[ti];
            if target.is_bye || target.slot(side) == Some(winner) {
                continue;
            }
            target.set_slot(side, Some(winner));
            target.reset_result();
        }
    }
    matches
}

/// BYEs may only be handed out once pool play is over and the first-round slots
/// account for every expected entrant.
pub fn byes_permitted(
    matches: &[Match],
    category: Category,
    pending_pool_matches: usize,
    filled: usize,
    expected: usize,
) -> bool {
    if pending_pool_matches > 0 {
        return false;
    }
    let rounds = bracket_rounds(matches, category);
    let empty_slots: usize = rounds
        .first()
        .map_or(0, |r| r.iter().map(|&i| matches[i].empty_slots()).sum());
    filled + empty_slots >= expected
}

/// Turn every unfinished match holding a lone team into a 13-0 BYE, provided BYEs are
/// permitted. Past the first round the empty side must be fed by a match that can
/// never be filled, so a team is not advanced while its opponent is still playing.
pub fn apply_byes(
    matches: &[Match],
    category: Category,
    pending_pool_matches: usize,
    filled: usize,
    expected: usize,
) -> Vec<Match> {
    let mut matches = matches.to_vec();
    if !byes_permitted(&matches, category, pending_pool_matches, filled, expected) {
        return matches;
    }
    let rounds = bracket_rounds(&matches, category);
    let mut dead: Vec<Vec<bool>> = Vec::with_capacity(rounds.len());
    for (r, round) in rounds.iter().enumerate() {
        let mut dead_round = Vec::with_capacity(round.len());
        for (idx, &mi) in round.iter().enumerate() {
            let side_dead = SIDES.map(|side| {
                r == 0
                    || feeder(&rounds, r, idx, side).map_or(true, |(pos, _)| dead[r - 1][pos])
            });
            let m = &mut matches[mi];
            let is_empty = m.team1_id.is_none() && m.team2_id.is_none() && !m.completed;
            dead_round.push(is_empty && (r == 0 || (side_dead[0] && side_dead[1])));

            if m.completed {
                continue;
            }
            let Some(team) = m.lone_team() else {
                continue;
            };
            let empty_side = usize::from(m.team1_id.is_some());
            if side_dead[empty_side] {
                m.make_bye(team);
            }
        }
        dead.push(dead_round);
    }
    matches
}

/// Clear every slot no longer backed by its source: first-round slots follow `seeds`
/// (index `2 * position + side`), later slots must hold the winner of their feeder.
/// Cleared matches lose their result; BYEs whose premise is gone are undone.
pub fn release_stale_slots(
    matches: &[Match],
    category: Category,
    seeds: &[Option<TeamId>],
    byes_allowed: bool,
) -> Vec<Match> {
    let mut matches = matches.to_vec();
    let rounds = bracket_rounds(&matches, category);
    let mut dead: Vec<Vec<bool>> = Vec::with_capacity(rounds.len());
    for (r, round) in rounds.iter().enumerate() {
        let mut dead_round = Vec::with_capacity(round.len());
        for (idx, &mi) in round.iter().enumerate() {
            let mut expected = [None, None];
            let mut side_dead = [true, true];
            for (k, side) in SIDES.into_iter().enumerate() {
                if r == 0 {
                    expected[k] = seeds.get(2 * idx + k).copied().flatten();
                    side_dead[k] = expected[k].is_none();
                } else if let Some((pos, fi)) = feeder(&rounds, r, idx, side) {
                    let f = &matches[fi];
                    expected[k] = if f.completed { f.winner() } else { None };
                    side_dead[k] = dead[r - 1][pos];
                }
            }
            dead_round.push(side_dead[0] && side_dead[1]);

            let m = &mut matches[mi];
            if m.is_bye {
                let team = m.team1_id;
                let valid = byes_allowed
                    && ((expected[0] == team && expected[1].is_none() && side_dead[1])
                        || (expected[1] == team && expected[0].is_none() && side_dead[0]));
                if !valid {
                    m.team1_id = expected[0];
                    m.team2_id = expected[1];
                    m.reset_result();
                }
                continue;
            }
            for (k, side) in SIDES.into_iter().enumerate() {
                let current = m.slot(side);
                if r == 0 && current != expected[k] {
                    m.set_slot(side, expected[k]);
                    m.reset_result();
                } else if r > 0 && current.is_some() && current != expected[k] {
                    m.set_slot(side, None);
                    m.reset_result();
                }
            }
        }
        dead.push(dead_round);
    }
    matches
}

/// Spread seeding tiers over the first-round slots of a bracket.
///
/// Keys fill side one of matches `0, 1, ...`, then side two. Tiers after the first
/// are rotated by one so a pool's two qualifiers do not land on the same match. A
/// `None` key keeps its slot reserved.
pub fn seed_slots(tiers: &[Vec<Option<TeamId>>], first_round_matches: usize) -> Vec<Option<TeamId>> {
    let mut seeds = vec![None; 2 * first_round_matches];
    if first_round_matches == 0 {
        return seeds;
    }
    let keys = tiers.iter().enumerate().flat_map(|(i, tier)| {
        let mut tier = tier.clone();
        if i > 0 && !tier.is_empty() {
            tier.rotate_left(1);
        }
        tier
    });
    for (j, key) in keys.enumerate() {
        let (idx, side) = (j % first_round_matches, j / first_round_matches);
        if side > 1 {
            break;
        }
        seeds[2 * idx + side] = key;
    }
    seeds
}

/// Pool winners, then runners-up. The team with fewer losses takes the first seed so
/// the order does not flip when a barrage is decided.
fn qualifier_tiers(pools: &[Pool], matches: &[Match]) -> Vec<Vec<Option<TeamId>>> {
    let mut winners = Vec::with_capacity(pools.len());
    let mut runners_up = Vec::with_capacity(pools.len());
    for pool in pools {
        let mut qualifiers = pool_qualifiers(matches, pool);
        qualifiers.sort_by_key(|s| s.losses);
        winners.push(qualifiers.first().map(|s| s.team_id));
        runners_up.push(qualifiers.get(1).map(|s| s.team_id));
    }
    vec![winners, runners_up]
}

/// Third-placed teams of every 3- and 4-team pool, then fourth-placed teams.
fn bottom_tiers(pools: &[Pool], matches: &[Match]) -> Vec<Vec<Option<TeamId>>> {
    let mut thirds = Vec::new();
    let mut fourths = Vec::new();
    for pool in pools {
        let bottoms = pool_non_qualifiers(matches, pool);
        if pool.team_ids.len() >= 3 {
            thirds.push(bottoms.first().map(|s| s.team_id));
        }
        if pool.team_ids.len() == 4 {
            fourths.push(bottoms.get(1).map(|s| s.team_id));
        }
    }
    vec![thirds, fourths]
}

fn next_free_court(matches: &[Match]) -> u32 {
    matches.iter().map(|m| m.court).max().unwrap_or(0) + 1
}

/// Seed, release, propagate and hand out BYEs until the bracket is stable.
fn reconcile(
    mut matches: Vec<Match>,
    category: Category,
    seeds: &[Option<TeamId>],
    pending: usize,
    filled: usize,
    expected: usize,
) -> Vec<Match> {
    let depth = bracket_rounds(&matches, category).len();
    for _ in 0..=depth {
        let allowed = byes_permitted(&matches, category, pending, filled, expected);
        matches = release_stale_slots(&matches, category, seeds, allowed);
        matches = propagate_winners_to_next_phases(&matches, category);
        matches = apply_byes(&matches, category, pending, filled, expected);
    }
    matches
}

/// Main match list with its category A bracket brought in line with pool results.
/// Qualifiers are seeded as soon as their pool decides them.
pub fn update_final_phases(pools: &[Pool], matches: &[Match]) -> Vec<Match> {
    let distribution = PoolDistribution::from_pools(pools);
    let expected = distribution.expected_qualified();
    let in_a = |m: &Match| Category::A.rounds().contains(&m.round);
    let mut matches = matches.to_vec();
    if expected <= 1 {
        matches.retain(|m| !in_a(m));
        return matches;
    }
    if !has_bracket_shape(&matches, Category::A, expected) {
        matches.retain(|m| !in_a(m));
        let group: Vec<Match> = matches.iter().filter(|m| is_group_round(m.round)).cloned().collect();
        matches.extend(create_empty_final_phases(distribution, next_free_court(&group)));
    }
    let tiers = qualifier_tiers(pools, &matches);
    let filled = tiers.iter().flatten().filter(|t| t.is_some()).count();
    let seeds = seed_slots(&tiers, expected.next_power_of_two() / 2);
    let pending = pending_pool_matches(&matches);
    reconcile(matches, Category::A, &seeds, pending, filled, expected)
}

/// Category B bracket for the current pool results.
///
/// While the set of non-qualifiers is not final (`bottom teams != expected count`) the
/// bracket is rebuilt empty; once it is final the bracket is seeded and patched.
pub fn update_category_b_phases(pools: &[Pool], matches: &[Match], matches_b: &[Match]) -> Vec<Match> {
    let distribution = PoolDistribution::from_pools(pools);
    let total = distribution.team_count();
    let bottom_count = total.saturating_sub(distribution.expected_qualified());
    if bottom_count <= 1 {
        return Vec::new();
    }
    let shaped = has_bracket_shape(matches_b, Category::B, bottom_count);
    let fresh = || create_empty_final_phases_b(total, distribution, next_free_court(matches));

    let bottoms = get_current_bottom_teams(pools, matches);
    if bottoms.len() != bottom_count {
        let untouched = matches_b.iter().all(|m| m.team1_id.is_none() && m.team2_id.is_none());
        return if shaped && untouched {
            matches_b.to_vec()
        } else {
            fresh()
        };
    }

    let bracket = if shaped { matches_b.to_vec() } else { fresh() };
    let seeds = seed_slots(&bottom_tiers(pools, matches), bottom_count.next_power_of_two() / 2);
    let pending = pending_pool_matches(matches);
    reconcile(bracket, Category::B, &seeds, pending, bottoms.len(), bottom_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn seeds_cross_pool_qualifiers() {
        let w: Vec<TeamId> = (0..2).map(|_| Uuid::new_v4()).collect();
        let r: Vec<TeamId> = (0..2).map(|_| Uuid::new_v4()).collect();
        let tiers = vec![
            w.iter().copied().map(Some).collect(),
            r.iter().copied().map(Some).collect(),
        ];
        let seeds = seed_slots(&tiers, 2);
        // match 0: W0 v R1, match 1: W1 v R0
        assert_eq!(seeds, vec![Some(w[0]), Some(r[1]), Some(w[1]), Some(r[0])]);
    }

    #[test]
    fn empty_bracket_halves_each_round() {
        let matches = empty_bracket(6, Category::A, 3);
        let rounds: Vec<u32> = matches.iter().map(|m| m.round).collect();
        assert_eq!(rounds, vec![100, 100, 100, 100, 101, 101, 102]);
        assert_eq!(matches.last().map(|m| m.court), Some(9));
        assert!(empty_bracket(1, Category::B, 1).is_empty());
    }
}
