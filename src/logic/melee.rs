//! Melee: solo registrations regrouped into doublettes and triplettes every round.

use crate::logic::random::{shuffle, RandomSource};
use crate::logic::standard::opponent_history;
use crate::models::{Match, Side, TeamId, Tournament};
use std::collections::HashSet;

/// Group sizes for `players` entrants on `courts` courts.
///
/// Doublettes are preferred; an odd count adds one triplette. Three doublettes are
/// traded for two triplettes while the group count is odd or exceeds two per court.
/// Triplettes come first so that a leftover group is a doublette where possible.
pub fn melee_group_sizes(players: usize, courts: u32) -> Vec<usize> {
    if players < 2 {
        return Vec::new();
    }
    let (mut doublettes, mut triplettes) = if players % 2 == 0 {
        (players / 2, 0)
    } else {
        ((players - 3) / 2, 1)
    };
    let max_groups = 2 * courts as usize;
    while doublettes >= 3 {
        let groups = doublettes + triplettes;
        if groups % 2 == 0 && groups <= max_groups {
            break;
        }
        doublettes -= 3;
        triplettes += 2;
    }
    let mut sizes = vec![3; triplettes];
    sizes.extend(std::iter::repeat(2).take(doublettes));
    sizes
}

/// Every pair of entries that already played on the same side.
fn teammate_history(matches: &[Match]) -> HashSet<(TeamId, TeamId)> {
    let mut history = HashSet::new();
    for m in matches {
        let sides: &[Side] = if m.is_bye { &[Side::One] } else { &[Side::One, Side::Two] };
        for &side in sides {
            let entries = m.side_entries(side);
            for &a in &entries {
                for &b in &entries {
                    if a != b {
                        history.insert((a, b));
                    }
                }
            }
        }
    }
    history
}

/// Build groups of the requested sizes, taking for each slot the first remaining
/// player who has never been a teammate of the group so far.
fn build_groups(
    mut remaining: Vec<TeamId>,
    sizes: &[usize],
    teammates: &HashSet<(TeamId, TeamId)>,
) -> Vec<Vec<TeamId>> {
    let mut groups = Vec::with_capacity(sizes.len());
    for &size in sizes {
        if remaining.is_empty() {
            break;
        }
        let mut group = vec![remaining.remove(0)];
        while group.len() < size && !remaining.is_empty() {
            let pick = remaining
                .iter()
                .position(|p| group.iter().all(|g| !teammates.contains(&(*g, *p))))
                .unwrap_or(0);
            group.push(remaining.remove(pick));
        }
        groups.push(group);
    }
    groups
}

/// Matches of the next melee round.
///
/// Groups are paired greedily, avoiding groups with a previous opponent. A leftover
/// doublette plays itself as a head-to-head; a leftover triplette gets a BYE.
pub fn generate_melee_round(tournament: &Tournament, rng: &mut dyn RandomSource) -> Vec<Match> {
    if tournament.teams.len() < 2 {
        return Vec::new();
    }
    let round = tournament.last_group_round() + 1;
    let mut players: Vec<TeamId> = tournament.teams.iter().map(|t| t.id).collect();
    shuffle(&mut players, rng);

    let sizes = melee_group_sizes(players.len(), tournament.courts);
    let mut groups = build_groups(players, &sizes, &teammate_history(&tournament.matches));
    let opponents = opponent_history(&tournament.matches);

    let mut matches = Vec::new();
    let mut court = 1;
    while groups.len() >= 2 {
        let first = groups.remove(0);
        let pick = groups
            .iter()
            .position(|g| {
                first
                    .iter()
                    .all(|a| g.iter().all(|b| !opponents.contains(&(*a, *b))))
            })
            .unwrap_or(0);
        let second = groups.remove(pick);
        matches.push(Match::group(round, court, first, second));
        court += 1;
    }
    if let Some(last) = groups.pop() {
        match last.len() {
            2 => matches.push(Match::group(round, court, vec![last[0]], vec![last[1]])),
            _ => {
                let mut bye = Match::group(round, 0, last.clone(), last);
                if let Some(team) = bye.team1_id {
                    bye.make_bye(team);
                }
                matches.push(bye);
            }
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_sizes_cover_every_player() {
        for players in 2..40 {
            let sizes = melee_group_sizes(players, 4);
            assert_eq!(sizes.iter().sum::<usize>(), players, "{players} players");
        }
        assert_eq!(melee_group_sizes(6, 10), vec![3, 3]);
        assert_eq!(melee_group_sizes(8, 10), vec![2, 2, 2, 2]);
        assert_eq!(melee_group_sizes(3, 10), vec![3]);
        assert!(melee_group_sizes(1, 10).is_empty());
    }
}
