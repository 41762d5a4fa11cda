//! Tournament transitions. Each one takes the current tournament and returns the next
//! state; invalid requests return an unchanged copy.

use crate::logic::courts::assign_available_final_courts;
use crate::logic::finals::{
    create_empty_final_phases, create_empty_final_phases_b, update_category_b_phases,
    update_final_phases,
};
use crate::logic::group_play::generate_next_pool_matches;
use crate::logic::melee::generate_melee_round;
use crate::logic::quadrette::generate_quadrette_round;
use crate::logic::random::RandomSource;
use crate::logic::setup::{calculate_optimal_pools, generate_pools, initial_pool_matches};
use crate::logic::standard::generate_standard_round;
use crate::logic::stats::compute_team_stats;
use crate::models::{is_group_round, Category, MatchId, Tournament, TournamentType};

/// Split the teams into pools, create round 1 of every pool and both empty finals
/// brackets. Only for pool formats, once.
pub fn generate_tournament_pools(tournament: &Tournament, rng: &mut dyn RandomSource) -> Tournament {
    let mut t = tournament.clone();
    if !t.kind.is_pool_format() || t.pools_generated {
        log::debug!("pool generation ignored for {:?} (generated: {})", t.kind, t.pools_generated);
        return t;
    }
    let preferred = t.preferred_pool_size.unwrap_or_default();
    let distribution = calculate_optimal_pools(t.teams.len(), preferred);
    let pools = generate_pools(&t.teams, distribution, rng);
    if pools.is_empty() {
        log::debug!("no valid pool split for {} teams", t.teams.len());
        return t;
    }

    for team in &mut t.teams {
        team.pool_id = pools.iter().find(|p| p.contains(team.id)).map(|p| p.id);
    }
    let (mut matches, next_court) = initial_pool_matches(&pools, 1);
    let finals = create_empty_final_phases(distribution, next_court);
    let next_court = next_court + finals.len() as u32;
    matches.extend(finals);

    t.matches_b = create_empty_final_phases_b(t.teams.len(), distribution, next_court);
    t.matches = matches;
    t.pools = pools;
    t.pools_generated = true;
    t.current_round = 1;
    t.teams = compute_team_stats(&t.teams, &t.all_matches());
    log::info!(
        "generated {} pools ({} of 4, {} of 3, {} of 2)",
        distribution.total_pools(),
        distribution.pools_of_4,
        distribution.pools_of_3,
        distribution.pools_of_2
    );
    t
}

/// Next round for standard, quadrette and melee formats. For pool formats the pool
/// brackets are re-derived instead.
pub fn generate_next_round(tournament: &Tournament, rng: &mut dyn RandomSource) -> Tournament {
    let mut t = tournament.clone();
    if t.kind.is_pool_format() {
        if t.pools_generated {
            refresh(&mut t);
        } else {
            log::debug!("next round ignored: pools not generated yet");
        }
        return t;
    }
    if t.teams.len() < 2 {
        log::debug!("not enough teams to generate a round ({})", t.teams.len());
        return t;
    }
    let round = match t.kind {
        TournamentType::Quadrette => generate_quadrette_round(&t, rng),
        TournamentType::Melee => generate_melee_round(&t, rng),
        _ => generate_standard_round(&t, rng),
    };
    if round.is_empty() {
        log::debug!("no matches for round {}", t.last_group_round() + 1);
        return t;
    }
    log::info!("round {} with {} matches", t.last_group_round() + 1, round.len());
    t.matches.extend(round);
    refresh(&mut t);
    t
}

/// Record a final score for a match of either list, then recompute everything that
/// depends on it. Draws, BYEs, half-empty matches and unknown ids are ignored.
pub fn update_match_score(
    tournament: &Tournament,
    match_id: MatchId,
    team1_score: u32,
    team2_score: u32,
) -> Tournament {
    let mut t = tournament.clone();
    if team1_score == team2_score {
        log::debug!("draw {team1_score}-{team2_score} rejected for match {match_id}");
        return t;
    }
    let Some(m) = t.find_match_mut(match_id) else {
        log::debug!("score for unknown match {match_id}");
        return t;
    };
    if m.is_bye || !m.is_ready() {
        log::debug!("score ignored for match {match_id} (bye: {}, ready: {})", m.is_bye, m.is_ready());
        return t;
    }
    m.team1_score = Some(team1_score);
    m.team2_score = Some(team2_score);
    m.completed = true;
    refresh(&mut t);
    t
}

/// Move a match to another court. Nothing else is recomputed.
pub fn update_match_court(tournament: &Tournament, match_id: MatchId, court: u32) -> Tournament {
    let mut t = tournament.clone();
    match t.find_match_mut(match_id) {
        Some(m) => m.court = court,
        None => log::debug!("court update for unknown match {match_id}"),
    }
    t
}

/// Delete the latest pool/standard round.
pub fn delete_current_round(tournament: &Tournament) -> Tournament {
    delete_round(tournament, tournament.last_group_round())
}

/// Delete the matches of `round` and recompute.
///
/// Round 1 of a pool tournament resets the whole pool stage. A finals round keeps its
/// matches and only loses their results.
pub fn delete_round(tournament: &Tournament, round: u32) -> Tournament {
    let mut t = tournament.clone();
    if round == 0 {
        log::debug!("no round to delete");
        return t;
    }
    if t.kind.is_pool_format() && round == 1 {
        reset_pool_stage(&mut t);
        return t;
    }
    if is_group_round(round) {
        t.matches.retain(|m| m.round != round);
    } else {
        for m in t.matches.iter_mut().chain(t.matches_b.iter_mut()) {
            if m.round == round {
                m.reset_result();
            }
        }
    }
    log::debug!("deleted round {round}");
    refresh(&mut t);
    t
}

/// Mark the tournament as finished.
pub fn finish_tournament(tournament: &Tournament) -> Tournament {
    Tournament {
        completed: true,
        ..tournament.clone()
    }
}

fn reset_pool_stage(t: &mut Tournament) {
    t.matches.clear();
    t.matches_b.clear();
    t.pools.clear();
    t.pools_generated = false;
    for team in &mut t.teams {
        team.pool_id = None;
    }
    refresh(t);
}

/// Pool progression, category A, category B (which depends on A's qualifiers), finals
/// courts, then statistics and the round pointer.
fn refresh(t: &mut Tournament) {
    if t.kind.is_pool_format() && t.pools_generated {
        let mut matches = std::mem::take(&mut t.matches);
        for pool in &t.pools {
            matches = generate_next_pool_matches(&matches, pool);
        }
        matches = update_final_phases(&t.pools, &matches);
        let matches_b = update_category_b_phases(&t.pools, &matches, &t.matches_b);
        let (matches, matches_b) = assign_available_final_courts(&matches, &matches_b, t.courts);
        t.matches = matches;
        t.matches_b = matches_b;
        let finals_ready = t
            .matches
            .iter()
            .filter(|m| Category::A.rounds().contains(&m.round))
            .filter(|m| m.is_ready())
            .count();
        log::debug!("{finals_ready} category A matches have both teams");
    }
    t.teams = compute_team_stats(&t.teams, &t.all_matches());
    t.current_round = t.last_group_round();
}
