//! Pool stage setup: partition teams into pools and build the first pool round.

use crate::logic::random::{shuffle, RandomSource};
use crate::models::{Match, Pool, PoolDistribution, PoolSize, Team, TeamId};

/// Split `total_teams` into pools of 4, 3 and 2.
///
/// With [`PoolSize::Four`] the largest possible number of 4-team pools is used and the
/// rest must divide into pools of 3; pools of 2 are never produced. With
/// [`PoolSize::Three`] the largest possible number of 3-team pools is used, the rest
/// going into pools of 4; a single pool of 2 absorbs the remainder only when nothing
/// else fits (2 or 5 teams). No valid split gives an empty distribution.
pub fn calculate_optimal_pools(total_teams: usize, preferred: PoolSize) -> PoolDistribution {
    match preferred {
        PoolSize::Four => {
            for pools_of_4 in (0..=total_teams / 4).rev() {
                let rest = total_teams - 4 * pools_of_4;
                if rest % 3 == 0 {
                    return PoolDistribution::new(pools_of_4, rest / 3, 0);
                }
            }
            PoolDistribution::default()
        }
        PoolSize::Three => {
            for pools_of_3 in (0..=total_teams / 3).rev() {
                let rest = total_teams - 3 * pools_of_3;
                if rest == 0 {
                    return PoolDistribution::new(0, pools_of_3, 0);
                }
                if rest >= 4 && rest % 4 == 0 {
                    return PoolDistribution::new(rest / 4, pools_of_3, 0);
                }
            }
            if total_teams >= 2 && total_teams % 3 == 2 {
                return PoolDistribution::new(0, total_teams / 3, 1);
            }
            PoolDistribution::default()
        }
    }
}

/// Shuffle the teams and slice them into pools: all pools of 4 first, then 3, then 2.
///
/// Returns no pools when `distribution` does not account for every team.
pub fn generate_pools(
    teams: &[Team],
    distribution: PoolDistribution,
    rng: &mut dyn RandomSource,
) -> Vec<Pool> {
    if distribution.is_empty() || distribution.team_count() != teams.len() {
        return Vec::new();
    }
    let mut ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    shuffle(&mut ids, rng);

    let sizes = std::iter::repeat(4)
        .take(distribution.pools_of_4)
        .chain(std::iter::repeat(3).take(distribution.pools_of_3))
        .chain(std::iter::repeat(2).take(distribution.pools_of_2));

    let mut pools = Vec::with_capacity(distribution.total_pools());
    let mut rest = ids.as_slice();
    for (i, size) in sizes.enumerate() {
        let (members, tail) = rest.split_at(size);
        pools.push(Pool::new(pool_name(i), members.to_vec()));
        rest = tail;
    }
    pools
}

/// "Pool A", "Pool B", ... then "Pool 27" onwards.
pub fn pool_name(index: usize) -> String {
    match u8::try_from(index).ok().filter(|&i| i < 26) {
        Some(i) => format!("Pool {}", char::from(b'A' + i)),
        None => format!("Pool {}", index + 1),
    }
}

/// Round 1 of every pool on consecutive courts from `start_court`.
///
/// 4 teams: `t0 v t3` and `t1 v t2` (two courts). 3 teams: `t0 v t1`, `t2` gets a BYE.
/// 2 teams: a single direct match. Returns the matches and the next free court.
pub fn initial_pool_matches(pools: &[Pool], start_court: u32) -> (Vec<Match>, u32) {
    let mut matches = Vec::new();
    let mut court = start_court;
    for pool in pools {
        let t = &pool.team_ids;
        match t.len() {
            4 => {
                matches.push(Match::new(1, court, t[0], t[3]).in_pool(pool.id).at_position(0));
                matches.push(Match::new(1, court + 1, t[1], t[2]).in_pool(pool.id).at_position(1));
                court += 2;
            }
            3 => {
                matches.push(Match::new(1, court, t[0], t[1]).in_pool(pool.id).at_position(0));
                matches.push(Match::bye(1, t[2]).in_pool(pool.id));
                court += 1;
            }
            2 => {
                matches.push(Match::new(1, court, t[0], t[1]).in_pool(pool.id).at_position(0));
                court += 1;
            }
            _ => {}
        }
    }
    (matches, court)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_names_are_letters_then_numbers() {
        assert_eq!(pool_name(0), "Pool A");
        assert_eq!(pool_name(25), "Pool Z");
        assert_eq!(pool_name(26), "Pool 27");
    }

    #[test]
    fn three_team_pool_starts_with_a_bye() {
        let pool = Pool::new("Pool A", (0..3).map(|_| uuid::Uuid::new_v4()).collect());
        let (matches, next) = initial_pool_matches(std::slice::from_ref(&pool), 5);
        assert_eq!(next, 6);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].court, 5);
        assert!(matches[1].is_bye);
        assert_eq!(matches[1].team1_id, Some(pool.team_ids[2]));
    }
}
