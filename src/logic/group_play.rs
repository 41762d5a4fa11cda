//! Pool stage: the mini-bracket played inside each pool.
//!
//! Rounds are materialised as results come in. Calling [`generate_next_pool_matches`]
//! again without new results leaves the matches untouched.

use crate::models::{Match, Pool, TeamId};
use std::collections::HashMap;

/// Create or correct the next matches of `pool` from its completed results.
///
/// Takes the full match list and returns it with only this pool's matches changed.
pub fn generate_next_pool_matches(matches: &[Match], pool: &Pool) -> Vec<Match> {
    let mut matches = matches.to_vec();
    match pool.team_ids.len() {
        4 => advance_four_team_pool(&mut matches, pool),
        3 => advance_three_team_pool(&mut matches, pool),
        2 => ensure_direct_match(&mut matches, pool),
        _ => {}
    }
    matches
}

/// Pool matches not yet played (BYEs never count).
pub fn pending_pool_matches(matches: &[Match]) -> usize {
    matches
        .iter()
        .filter(|m| m.pool_id.is_some() && !m.is_bye && !m.completed)
        .count()
}

/// Every match of `pool` in `round`: the positioned games, ordered by position.
fn games<'a>(matches: &'a [Match], pool: &Pool, round: u32) -> Vec<&'a Match> {
    let mut games: Vec<&Match> = matches
        .iter()
        .filter(|m| m.pool_id == Some(pool.id) && m.round == round && !m.is_bye)
        .collect();
    games.sort_by_key(|m| (m.position.unwrap_or(u32::MAX), m.court));
    games
}

/// Court of the pool's first round-one game; later rounds reuse it.
fn base_court(matches: &[Match], pool: &Pool) -> u32 {
    games(matches, pool, 1).first().map_or(0, |m| m.court)
}

fn all_completed(games: &[&Match], expected: usize) -> bool {
    games.len() == expected && games.iter().all(|m| m.completed && m.winner().is_some())
}

/// Write `team1 v team2` into the game at (`round`, `position`), creating it if needed.
fn upsert_game(
    matches: &mut Vec<Match>,
    pool: &Pool,
    round: u32,
    position: u32,
    court: u32,
    team1: TeamId,
    team2: TeamId,
) {
    let existing = matches.iter_mut().find(|m| {
        m.pool_id == Some(pool.id) && m.round == round && !m.is_bye && m.position == Some(position)
    });
    match existing {
        Some(m) => {
            m.assign_teams(Some(team1), Some(team2));
        }
        None => matches.push(
            Match::new(round, court, team1, team2)
                .in_pool(pool.id)
                .at_position(position),
        ),
    }
}

/// Make sure `team` holds the BYE of `round`.
fn upsert_bye(matches: &mut Vec<Match>, pool: &Pool, round: u32, team: TeamId) {
    let existing = matches
        .iter_mut()
        .find(|m| m.pool_id == Some(pool.id) && m.round == round && m.is_bye);
    match existing {
        Some(m) if m.team1_id == Some(team) => {}
        Some(m) => m.make_bye(team),
        None => matches.push(Match::bye(round, team).in_pool(pool.id)),
    }
}

fn remove_rounds_from(matches: &mut Vec<Match>, pool: &Pool, first_round: u32) {
    matches.retain(|m| m.pool_id != Some(pool.id) || m.round < first_round);
}

/// Wins per pool team over completed matches (BYEs included) of rounds 1 and 2.
fn wins_after_round_two(matches: &[Match], pool: &Pool) -> HashMap<TeamId, u32> {
    let mut wins: HashMap<TeamId, u32> = pool.team_ids.iter().map(|&t| (t, 0)).collect();
    for m in matches
        .iter()
        .filter(|m| m.pool_id == Some(pool.id) && m.completed && (m.round == 1 || m.round == 2))
    {
        if let Some(count) = m.winner().and_then(|w| wins.get_mut(&w)) {
            *count += 1;
        }
    }
    wins
}

/// Barrage when exactly two teams sit on one win, otherwise no round 3.
fn update_barrage(matches: &mut Vec<Match>, pool: &Pool, court: u32) {
    let wins = wins_after_round_two(matches, pool);
    let tied: Vec<TeamId> = pool
        .team_ids
        .iter()
        .copied()
        .filter(|t| wins.get(t) == Some(&1))
        .collect();
    if let [a, b] = tied[..] {
        upsert_game(matches, pool, 3, 0, court, a, b);
    } else {
        remove_rounds_from(matches, pool, 3);
    }
}

/// Round 2: winners v winners on the base court, losers v losers next to it.
/// Round 3: barrage between the two one-win teams.
fn advance_four_team_pool(matches: &mut Vec<Match>, pool: &Pool) {
    let base = base_court(matches, pool);
    let round_one = games(matches, pool, 1);
    if !all_completed(&round_one, 2) {
        remove_rounds_from(matches, pool, 2);
        return;
    }
    let (w1, l1) = (round_one[0].winner(), round_one[0].loser());
    let (w2, l2) = (round_one[1].winner(), round_one[1].loser());
    let (Some(w1), Some(l1), Some(w2), Some(l2)) = (w1, l1, w2, l2) else {
        return;
    };
    upsert_game(matches, pool, 2, 0, base, w1, w2);
    upsert_game(matches, pool, 2, 1, base + 1, l1, l2);

    if all_completed(&games(matches, pool, 2), 2) {
        update_barrage(matches, pool, base);
    } else {
        remove_rounds_from(matches, pool, 3);
    }
}

/// Round 1 BYE for `t2`; round 2 pits the round-1 winner against `t2` and gives the
/// loser a BYE; round 3 is the barrage.
fn advance_three_team_pool(matches: &mut Vec<Match>, pool: &Pool) {
    let third = pool.team_ids[2];
    upsert_bye(matches, pool, 1, third);

    let base = base_court(matches, pool);
    let round_one = games(matches, pool, 1);
    if !all_completed(&round_one, 1) {
        remove_rounds_from(matches, pool, 2);
        return;
    }
    let (Some(winner), Some(loser)) = (round_one[0].winner(), round_one[0].loser()) else {
        return;
    };
    upsert_game(matches, pool, 2, 0, base, winner, third);
    upsert_bye(matches, pool, 2, loser);

    if all_completed(&games(matches, pool, 2), 1) {
        update_barrage(matches, pool, base);
    } else {
        remove_rounds_from(matches, pool, 3);
    }
}

fn ensure_direct_match(matches: &mut Vec<Match>, pool: &Pool) {
    if games(matches, pool, 1).is_empty() {
        let (a, b) = (pool.team_ids[0], pool.team_ids[1]);
        matches.push(Match::new(1, 0, a, b).in_pool(pool.id).at_position(0));
    }
}
