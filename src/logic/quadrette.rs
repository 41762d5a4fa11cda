//! Quadrette: four-player teams on a fixed seven-round lineup rotation.
//!
//! Every round splits each team into two sub-teams by player label. Two teams drawn
//! against each other play one match per sub-team.

use crate::logic::random::RandomSource;
use crate::logic::standard::draw_pairings;
use crate::models::{Match, PlayerLabel, Tournament};

use PlayerLabel::{A, B, C, D};

/// Number of rounds in the rotation; later rounds produce no matches.
pub const QUADRETTE_ROUNDS: u32 = 7;

const SCHEDULE: [[&[PlayerLabel]; 2]; QUADRETTE_ROUNDS as usize] = [
    [&[A, B, C], &[D]],
    [&[A, B], &[C, D]],
    [&[A, B, D], &[C]],
    [&[A, C], &[B, D]],
    [&[A, C, D], &[B]],
    [&[A, D], &[B, C]],
    [&[B, C, D], &[A]],
];

/// The two sub-teams fielded in `round` (1-based).
pub fn quadrette_schedule(round: u32) -> Option<[&'static [PlayerLabel]; 2]> {
    let index = usize::try_from(round.checked_sub(1)?).ok()?;
    SCHEDULE.get(index).copied()
}

/// "ABC" for `[A, B, C]`.
pub fn lineup_name(labels: &[PlayerLabel]) -> String {
    labels.iter().map(|l| l.as_char()).collect()
}

/// Matches of the next quadrette round. Courts cycle through the available ones.
pub fn generate_quadrette_round(tournament: &Tournament, rng: &mut dyn RandomSource) -> Vec<Match> {
    if tournament.teams.len() < 2 {
        return Vec::new();
    }
    let round = tournament.last_group_round() + 1;
    let Some(lineups) = quadrette_schedule(round) else {
        return Vec::new();
    };
    let (pairs, bye) = draw_pairings(tournament, rng);

    let mut matches = Vec::with_capacity(pairs.len() * 2 + 1);
    for (a, b) in pairs {
        for labels in lineups {
            let court = match tournament.courts {
                0 => 0,
                courts => matches.len() as u32 % courts + 1,
            };
            matches.push(Match::new(round, court, a, b).with_lineup(lineup_name(labels)));
        }
    }
    matches.extend(bye.map(|team| Match::bye(round, team)));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_label_plays_alone_once() {
        let solos: Vec<PlayerLabel> = (1..=QUADRETTE_ROUNDS)
            .filter_map(quadrette_schedule)
            .filter_map(|[_, second]| (second.len() == 1).then(|| second[0]))
            .collect();
        assert_eq!(solos, vec![D, C, B, A]);
        assert!(quadrette_schedule(8).is_none());
        assert!(quadrette_schedule(0).is_none());
    }
}
