//! Standard rounds (tete-a-tete, doublette, triplette): a random first round, then
//! teams ordered by performance and paired greedily, avoiding rematches when possible.

use crate::logic::random::{pick_index, shuffle, RandomSource};
use crate::models::{Match, Side, TeamId, Tournament};
use std::collections::{HashSet, VecDeque};

/// Every (a, b) pair of entries that already faced each other, in both orders.
pub(crate) fn opponent_history(matches: &[Match]) -> HashSet<(TeamId, TeamId)> {
    let mut history = HashSet::new();
    for m in matches.iter().filter(|m| !m.is_bye) {
        for a in m.side_entries(Side::One) {
            for b in m.side_entries(Side::Two) {
                history.insert((a, b));
                history.insert((b, a));
            }
        }
    }
    history
}

/// Take the front team and pair it with the first remaining team it has not met;
/// fall back to the first remaining team when every candidate is a rematch.
pub(crate) fn pair_avoiding_rematches(
    order: Vec<TeamId>,
    history: &HashSet<(TeamId, TeamId)>,
) -> Vec<(TeamId, TeamId)> {
    let mut remaining: VecDeque<TeamId> = order.into();
    let mut pairs = Vec::with_capacity(remaining.len() / 2);
    while let Some(team) = remaining.pop_front() {
        let pick = remaining
            .iter()
            .position(|&other| !history.contains(&(team, other)))
            .unwrap_or(0);
        let Some(opponent) = remaining.remove(pick) else {
            break;
        };
        pairs.push((team, opponent));
    }
    pairs
}

/// Pairings and BYE team of the next round.
///
/// First round: shuffled order, a random team sits out on an odd count, pairs are
/// taken in sequence. Later rounds: performance order, the lowest team sits out.
pub(crate) fn draw_pairings(
    tournament: &Tournament,
    rng: &mut dyn RandomSource,
) -> (Vec<(TeamId, TeamId)>, Option<TeamId>) {
    let mut bye = None;
    if tournament.last_group_round() == 0 {
        let mut ids: Vec<TeamId> = tournament.teams.iter().map(|t| t.id).collect();
        shuffle(&mut ids, rng);
        if ids.len() % 2 == 1 {
            bye = Some(ids.remove(pick_index(ids.len(), rng)));
        }
        let pairs = ids.chunks_exact(2).map(|c| (c[0], c[1])).collect();
        return (pairs, bye);
    }

    let mut teams: Vec<_> = tournament.teams.iter().collect();
    teams.sort_by(|a, b| b.performance.cmp(&a.performance));
    let mut ids: Vec<TeamId> = teams.into_iter().map(|t| t.id).collect();
    if ids.len() % 2 == 1 {
        bye = ids.pop();
    }
    let history = opponent_history(&tournament.matches);
    (pair_avoiding_rematches(ids, &history), bye)
}

/// Matches of the next standard round, courts numbered from 1. Empty with fewer
/// than two teams.
pub fn generate_standard_round(tournament: &Tournament, rng: &mut dyn RandomSource) -> Vec<Match> {
    if tournament.teams.len() < 2 {
        return Vec::new();
    }
    let round = tournament.last_group_round() + 1;
    let (pairs, bye) = draw_pairings(tournament, rng);
    let mut matches: Vec<Match> = pairs
        .into_iter()
        .zip(1..)
        .map(|((a, b), court)| Match::new(round, court, a, b))
        .collect();
    matches.extend(bye.map(|team| Match::bye(round, team)));
    matches
}
