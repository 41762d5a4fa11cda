//! Court allocation for finals matches.

use crate::models::{is_group_round, Match};
use std::collections::BTreeSet;

/// Courts held by unfinished pool or standard games.
pub fn occupied_courts(matches: &[Match]) -> BTreeSet<u32> {
    matches
        .iter()
        .filter(|m| is_group_round(m.round) && !m.completed && !m.is_bye)
        .map(|m| m.court)
        .collect()
}

/// Give every playable finals match (both teams known, not finished, not a BYE) a
/// court that no unfinished pool game is using.
///
/// Category A is served first, then category B; a court is handed out at most once
/// per pass. A match keeps its current court when that court is free, otherwise it
/// takes the lowest free one, or court 0 (unassigned) when every court is taken.
/// Matches still missing a team keep their placeholder.
pub fn assign_available_final_courts(
    matches: &[Match],
    matches_b: &[Match],
    courts: u32,
) -> (Vec<Match>, Vec<Match>) {
    let occupied = occupied_courts(matches);
    let available: BTreeSet<u32> = (1..=courts).filter(|c| !occupied.contains(c)).collect();
    let mut claimed = BTreeSet::new();

    let mut matches = matches.to_vec();
    let mut matches_b = matches_b.to_vec();
    for list in [&mut matches, &mut matches_b] {
        let mut order: Vec<usize> = (0..list.len())
            .filter(|&i| !is_group_round(list[i].round))
            .collect();
        order.sort_by_key(|&i| (list[i].round, list[i].court));

        for i in order {
            let m = &mut list[i];
            if m.completed || m.is_bye || !m.is_ready() {
                continue;
            }
            if available.contains(&m.court) && claimed.insert(m.court) {
                continue;
            }
            m.court = match available.iter().find(|c| !claimed.contains(*c)) {
                Some(&court) => {
                    claimed.insert(court);
                    court
                }
                None => 0,
            };
        }
    }
    (matches, matches_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn finals_avoid_courts_of_running_pool_games() {
        let ids: Vec<Uuid> = (0..6).map(|_| Uuid::new_v4()).collect();
        let pool_game = Match::new(2, 1, ids[0], ids[1]).in_pool(Uuid::new_v4());
        let final_a = Match::new(100, 1, ids[2], ids[3]);
        let final_b = Match::new(200, 2, ids[4], ids[5]);

        let (main, b) = assign_available_final_courts(&[pool_game, final_a], &[final_b], 3);

        assert_eq!(main[0].court, 1);
        assert_eq!(main[1].court, 2);
        assert_eq!(b[0].court, 3);
    }

    #[test]
    fn surplus_finals_wait_without_a_court() {
        let ids: Vec<Uuid> = (0..6).map(|_| Uuid::new_v4()).collect();
        let final_a = Match::new(100, 1, ids[0], ids[1]);
        let second_a = Match::new(100, 1, ids[2], ids[3]);
        let final_b = Match::new(200, 1, ids[4], ids[5]);

        let (main, b) = assign_available_final_courts(&[final_a, second_a], &[final_b], 1);

        assert_eq!(main[0].court, 1);
        assert_eq!(main[1].court, 0);
        assert_eq!(b[0].court, 0);
    }
}
