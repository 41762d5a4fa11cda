use petanque_tournament::{
    apply_byes, assign_available_final_courts, create_empty_final_phases,
    create_empty_final_phases_b, create_knockout_bracket, propagate_winners_to_next_phases,
    Category, Match, PoolDistribution, TeamId,
};
use uuid::Uuid;

fn ids(n: usize) -> Vec<TeamId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

fn round(matches: &[Match], round: u32) -> Vec<&Match> {
    let mut found: Vec<&Match> = matches.iter().filter(|m| m.round == round).collect();
    found.sort_by_key(|m| m.position);
    found
}

fn score(m: &mut Match, team1_score: u32, team2_score: u32) {
    m.team1_score = Some(team1_score);
    m.team2_score = Some(team2_score);
    m.completed = true;
}

#[test]
fn knockout_bracket_sizes() {
    let six = create_knockout_bracket(&ids(6), Category::A, 1);
    assert_eq!(six.len(), 7);
    assert_eq!(six.iter().filter(|m| m.is_bye).count(), 2);
    assert!(six.iter().filter(|m| m.is_bye).all(|m| m.round == 100));

    let eight = create_knockout_bracket(&ids(8), Category::A, 1);
    assert_eq!(eight.len(), 7);
    assert_eq!(eight.iter().filter(|m| m.is_bye).count(), 0);

    let twelve = create_knockout_bracket(&ids(12), Category::B, 1);
    assert_eq!(twelve.len(), 15);
    assert_eq!(round(&twelve, 200).len(), 8);
    assert_eq!(twelve.iter().filter(|m| m.is_bye).count(), 4);
    assert!(twelve.iter().all(|m| (200..204).contains(&m.round)));
}

#[test]
fn bye_winners_start_in_round_two() {
    let teams = ids(6);
    let bracket = create_knockout_bracket(&teams, Category::A, 1);
    let first = round(&bracket, 100);
    assert!(first[0].is_bye && first[2].is_bye);
    assert_eq!(first[0].team1_id, Some(teams[0]));
    assert_eq!((first[1].team1_id, first[1].team2_id), (Some(teams[1]), Some(teams[2])));

    let second = round(&bracket, 101);
    assert_eq!(second[0].team1_id, Some(teams[0]));
    assert_eq!(second[0].team2_id, None);
    assert_eq!(second[1].team1_id, Some(teams[3]));
}

#[test]
fn empty_phases_are_sized_from_the_distribution() {
    let distribution = PoolDistribution::new(2, 2, 0);
    let a = create_empty_final_phases(distribution, 8);
    assert_eq!(a.len(), 7);
    assert!(a.iter().all(|m| m.team1_id.is_none() && m.team2_id.is_none()));
    assert_eq!(a.iter().map(|m| m.court).collect::<Vec<_>>(), (8..15).collect::<Vec<_>>());

    // 14 teams, 8 qualify: 6 go to category B
    let b = create_empty_final_phases_b(14, distribution, 15);
    assert_eq!(b.len(), 7);
    assert_eq!(round(&b, 200).len(), 4);

    assert!(create_empty_final_phases_b(3, PoolDistribution::new(0, 1, 0), 1).is_empty());
}

#[test]
fn no_bye_while_pool_matches_are_pending() {
    let (x, y, z) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let mut bracket = create_empty_final_phases(PoolDistribution::new(1, 1, 0), 1);
    bracket[0].team1_id = Some(x);
    bracket[1].team1_id = Some(y);
    bracket[1].team2_id = Some(z);

    let waiting = apply_byes(&bracket, Category::A, 1, 3, 4);
    assert_eq!(waiting, bracket);

    let released = apply_byes(&bracket, Category::A, 0, 3, 4);
    let first = round(&released, 100);
    assert!(first[0].is_bye && first[0].completed);
    assert_eq!((first[0].team1_id, first[0].team2_id), (Some(x), Some(x)));
    assert_eq!((first[0].team1_score, first[0].team2_score), (Some(13), Some(0)));
    assert!(!first[1].is_bye);
    let last = round(&released, 101);
    assert_eq!(last[0].team1_id, None);
}

#[test]
fn no_bye_when_entrants_are_still_missing() {
    let x = Uuid::new_v4();
    let mut bracket = create_empty_final_phases(PoolDistribution::new(2, 0, 0), 1);
    bracket[0].team1_id = Some(x);
    // one team seeded, three slots open, but six entrants expected
    let unchanged = apply_byes(&bracket, Category::A, 0, 1, 6);
    assert_eq!(unchanged, bracket);
}

#[test]
fn winners_move_to_the_next_round() {
    let t = ids(4);
    let mut bracket = create_knockout_bracket(&t, Category::A, 1);
    score(&mut bracket[0], 13, 4);
    score(&mut bracket[1], 6, 13);

    let bracket = propagate_winners_to_next_phases(&bracket, Category::A);
    let last = round(&bracket, 101);
    assert_eq!((last[0].team1_id, last[0].team2_id), (Some(t[0]), Some(t[3])));

    let mut played = bracket.clone();
    let final_idx = played.iter().position(|m| m.round == 101).unwrap();
    score(&mut played[final_idx], 13, 11);
    assert_eq!(propagate_winners_to_next_phases(&played, Category::A), played);

    // corrected semi-final result replaces the finalist and clears the final
    let semi = played.iter().position(|m| m.round == 100 && m.position == Some(0)).unwrap();
    score(&mut played[semi], 4, 13);
    let corrected = propagate_winners_to_next_phases(&played, Category::A);
    let last = round(&corrected, 101);
    assert_eq!(last[0].team1_id, Some(t[1]));
    assert!(!last[0].completed);
    assert_eq!(last[0].team1_score, None);
}

#[test]
fn propagation_ignores_the_other_category() {
    let bracket = create_knockout_bracket(&ids(4), Category::B, 1);
    let mut played = bracket.clone();
    score(&mut played[0], 13, 0);
    assert_eq!(propagate_winners_to_next_phases(&played, Category::A), played);
}

#[test]
fn categories_never_share_a_court() {
    let t = ids(4);
    let a = Match::new(100, 1, t[0], t[1]);
    let b = Match::new(200, 1, t[2], t[3]);

    let (main, consolation) = assign_available_final_courts(&[a], &[b], 1);

    assert_eq!(main[0].court, 1);
    assert_ne!(consolation[0].court, main[0].court);
    assert_eq!(consolation[0].court, 0);
}
