use petanque_tournament::logic::melee_group_sizes;
use petanque_tournament::{
    generate_next_round, update_match_score, Match, Player, SequenceRandom, TeamId, ThreadRandom,
    Tournament, TournamentType,
};
use std::collections::HashSet;

fn tournament(kind: TournamentType, teams: usize, courts: u32) -> Tournament {
    let mut t = Tournament::new("Concours", kind, courts);
    for i in 0..teams {
        let players = (0..kind.players_per_team())
            .map(|p| Player::new(format!("Player {i}.{p}")))
            .collect();
        t.add_team(format!("Team {}", i + 1), players).unwrap();
    }
    t
}

fn ids(t: &Tournament) -> Vec<TeamId> {
    t.teams.iter().map(|team| team.id).collect()
}

fn in_round(t: &Tournament, round: u32) -> Vec<&Match> {
    t.matches.iter().filter(|m| m.round == round).collect()
}

fn pair(m: &Match) -> (TeamId, TeamId) {
    (m.team1_id.unwrap(), m.team2_id.unwrap())
}

#[test]
fn first_round_gives_a_bye_on_odd_count() {
    let t = tournament(TournamentType::Doublette, 5, 4);
    let ids = ids(&t);
    let t = generate_next_round(&t, &mut SequenceRandom::keep_order());

    assert_eq!(t.current_round, 1);
    let round = in_round(&t, 1);
    assert_eq!(round.len(), 3);
    assert_eq!(pair(round[0]), (ids[0], ids[1]));
    assert_eq!(round[0].court, 1);
    assert_eq!(pair(round[1]), (ids[2], ids[3]));
    assert_eq!(round[1].court, 2);

    let bye = round[2];
    assert!(bye.is_bye && bye.completed);
    assert_eq!(pair(bye), (ids[4], ids[4]));
    let team = t.team(ids[4]).unwrap();
    assert_eq!((team.wins, team.points_for, team.points_against), (1, 13, 7));
}

#[test]
fn later_rounds_avoid_rematches() {
    let t = tournament(TournamentType::TeteATete, 4, 4);
    let ids = ids(&t);
    let mut t = generate_next_round(&t, &mut SequenceRandom::keep_order());
    let round_one: Vec<_> = in_round(&t, 1).iter().map(|m| m.id).collect();
    t = update_match_score(&t, round_one[0], 13, 0);
    t = update_match_score(&t, round_one[1], 13, 1);

    let t = generate_next_round(&t, &mut ThreadRandom);
    assert_eq!(t.current_round, 2);
    let round_two: Vec<_> = in_round(&t, 2).into_iter().map(pair).collect();
    assert_eq!(round_two, vec![(ids[0], ids[2]), (ids[3], ids[1])]);
}

#[test]
fn rematch_when_no_other_opponent_is_left() {
    let t = tournament(TournamentType::Triplette, 2, 2);
    let t = generate_next_round(&t, &mut ThreadRandom);
    let t = generate_next_round(&t, &mut ThreadRandom);
    assert_eq!(in_round(&t, 2).len(), 1);
    let (a, b) = pair(in_round(&t, 2)[0]);
    assert_ne!(a, b);
}

#[test]
fn single_team_gets_no_round() {
    let t = tournament(TournamentType::Doublette, 1, 2);
    let next = generate_next_round(&t, &mut ThreadRandom);
    assert!(next.matches.is_empty());
    assert_eq!(next.current_round, 0);
}

#[test]
fn melee_two_players_play_head_to_head() {
    let t = tournament(TournamentType::Melee, 2, 2);
    let players: HashSet<TeamId> = ids(&t).into_iter().collect();
    let t = generate_next_round(&t, &mut SequenceRandom::keep_order());

    assert_eq!(t.matches.len(), 1);
    let m = &t.matches[0];
    assert!(!m.is_bye);
    assert_eq!(m.team1_ids.len(), 1);
    assert_eq!(m.team2_ids.len(), 1);
    let seen: HashSet<TeamId> = m.team1_ids.iter().chain(&m.team2_ids).copied().collect();
    assert_eq!(seen, players);
}

#[test]
fn melee_three_players_share_a_bye() {
    let t = tournament(TournamentType::Melee, 3, 2);
    let players: HashSet<TeamId> = ids(&t).into_iter().collect();
    let t = generate_next_round(&t, &mut ThreadRandom);

    assert_eq!(t.matches.len(), 1);
    let m = &t.matches[0];
    assert!(m.is_bye && m.completed);
    assert_eq!(m.team1_ids.iter().copied().collect::<HashSet<_>>(), players);
    assert_eq!(m.team2_ids.iter().copied().collect::<HashSet<_>>(), players);
    assert!(t.teams.iter().all(|team| team.wins == 1));
}

#[test]
fn melee_rotates_teammates() {
    let t = tournament(TournamentType::Melee, 4, 2);
    let p = ids(&t);
    let t = generate_next_round(&t, &mut SequenceRandom::keep_order());
    assert_eq!(t.matches[0].team1_ids, vec![p[0], p[1]]);
    assert_eq!(t.matches[0].team2_ids, vec![p[2], p[3]]);

    let t = generate_next_round(&t, &mut SequenceRandom::keep_order());
    let second = in_round(&t, 2);
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].team1_ids, vec![p[0], p[2]]);
    assert_eq!(second[0].team2_ids, vec![p[1], p[3]]);
}

#[test]
fn melee_groups_fit_the_courts() {
    assert_eq!(melee_group_sizes(12, 2), vec![3, 3, 3, 3]);
    assert_eq!(melee_group_sizes(7, 4), vec![3, 2, 2]);
    assert_eq!(melee_group_sizes(2, 1), vec![2]);
}

#[test]
fn quadrette_plays_two_lineups_per_pairing() {
    let t = tournament(TournamentType::Quadrette, 2, 4);
    let (a, b) = (t.teams[0].id, t.teams[1].id);
    let t = generate_next_round(&t, &mut SequenceRandom::keep_order());

    let round = in_round(&t, 1);
    assert_eq!(round.len(), 2);
    let lineups: Vec<_> = round.iter().map(|m| m.lineup.as_deref()).collect();
    assert_eq!(lineups, vec![Some("ABC"), Some("D")]);
    assert_eq!(round.iter().map(|m| m.court).collect::<Vec<_>>(), vec![1, 2]);
    assert!(round.iter().all(|m| pair(m) == (a, b)));
}

#[test]
fn quadrette_stops_after_seven_rounds() {
    let mut t = tournament(TournamentType::Quadrette, 2, 1);
    for _ in 0..7 {
        t = generate_next_round(&t, &mut ThreadRandom);
    }
    assert_eq!(t.current_round, 7);
    let last: Vec<_> = in_round(&t, 7).iter().map(|m| m.lineup.clone()).collect();
    assert_eq!(last, vec![Some("BCD".to_string()), Some("A".to_string())]);
    assert!(in_round(&t, 2).iter().all(|m| m.court == 1));

    let after = generate_next_round(&t, &mut ThreadRandom);
    assert_eq!(after.current_round, 7);
    assert_eq!(after.matches.len(), t.matches.len());
}
