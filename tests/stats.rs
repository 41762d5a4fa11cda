use petanque_tournament::{compute_team_stats, rank_teams, Match, Player, Team};

fn team(name: &str) -> Team {
    Team::new(name, vec![Player::new(format!("{name} player"))])
}

fn played(round: u32, a: &Team, b: &Team, team1_score: u32, team2_score: u32) -> Match {
    let mut m = Match::new(round, 1, a.id, b.id);
    m.team1_score = Some(team1_score);
    m.team2_score = Some(team2_score);
    m.completed = true;
    m
}

#[test]
fn bye_counts_as_thirteen_to_seven() {
    let a = team("A");
    let stats = compute_team_stats(&[a.clone()], &[Match::bye(1, a.id)]);
    let a = &stats[0];
    assert_eq!((a.wins, a.losses), (1, 0));
    assert_eq!((a.points_for, a.points_against), (13, 7));
    assert_eq!(a.performance, 6);
    assert_eq!(a.tie_break_deltas, vec![6]);
}

#[test]
fn unfinished_matches_are_ignored() {
    let (a, b) = (team("A"), team("B"));
    let mut open = Match::new(1, 1, a.id, b.id);
    open.team1_score = Some(13);
    let stats = compute_team_stats(&[a, b], &[open]);
    assert!(stats.iter().all(|t| t.wins == 0 && t.losses == 0 && t.tie_break_deltas.is_empty()));
}

#[test]
fn stats_are_rebuilt_from_scratch() {
    let (a, b) = (team("A"), team("B"));
    let matches = vec![played(1, &a, &b, 13, 8)];
    let once = compute_team_stats(&[a.clone(), b.clone()], &matches);
    let twice = compute_team_stats(&once, &matches);
    assert_eq!(once, twice);
    assert_eq!(twice[0].wins, 1);
    assert_eq!(twice[1].performance, -5);
}

#[test]
fn deltas_follow_round_order() {
    let (x, p, q) = (team("X"), team("P"), team("Q"));
    // inserted out of order
    let matches = vec![played(2, &x, &q, 5, 13), played(1, &p, &x, 4, 13)];
    let stats = compute_team_stats(&[x, p, q], &matches);
    assert_eq!(stats[0].tie_break_deltas, vec![9, -8]);
}

#[test]
fn ties_are_broken_by_earliest_delta() {
    let (x, y) = (team("X"), team("Y"));
    let (p, q, r, s) = (team("P"), team("Q"), team("R"), team("S"));
    let matches = vec![
        played(1, &x, &p, 13, 5),
        played(1, &y, &q, 9, 13),
        played(2, &x, &r, 9, 13),
        played(2, &y, &s, 13, 5),
    ];
    let stats = compute_team_stats(&[y.clone(), x.clone(), p, q, r, s], &matches);
    let (sx, sy) = (&stats[1], &stats[0]);
    assert_eq!((sx.wins, sx.performance), (sy.wins, sy.performance));

    let ranked = rank_teams(&stats);
    let pos = |id| ranked.iter().position(|t| t.id == id).unwrap();
    assert!(pos(x.id) < pos(y.id));
}

#[test]
fn ranking_prefers_wins_over_points() {
    let (a, b, c) = (team("A"), team("B"), team("C"));
    let matches = vec![
        played(1, &a, &c, 13, 12),
        played(2, &a, &c, 13, 12),
        played(1, &b, &c, 13, 0),
    ];
    let ranked = rank_teams(&compute_team_stats(&[b.clone(), a.clone(), c], &matches));
    assert_eq!(ranked[0].id, a.id);
    assert_eq!(ranked[1].id, b.id);
}
