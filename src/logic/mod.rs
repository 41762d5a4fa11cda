//! Tournament business logic: pools, pool brackets, finals, round generators, statistics.

mod courts;
mod final_selection;
mod finals;
mod group_play;
mod melee;
mod progression;
mod quadrette;
mod random;
mod setup;
mod standard;
mod stats;

pub use courts::{assign_available_final_courts, occupied_courts};
pub use final_selection::{
    get_current_bottom_teams, get_current_qualified_teams, pool_non_qualifiers, pool_qualifiers,
    pool_standings, PoolStanding,
};
pub use finals::{
    apply_byes, byes_permitted, create_empty_final_phases, create_empty_final_phases_b,
    create_knockout_bracket, propagate_winners_to_next_phases, release_stale_slots, seed_slots,
    update_category_b_phases, update_final_phases,
};
pub use group_play::{generate_next_pool_matches, pending_pool_matches};
pub use melee::{generate_melee_round, melee_group_sizes};
pub use progression::{
    delete_current_round, delete_round, finish_tournament, generate_next_round,
    generate_tournament_pools, update_match_court, update_match_score,
};
pub use quadrette::{generate_quadrette_round, lineup_name, quadrette_schedule, QUADRETTE_ROUNDS};
pub use random::{RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
pub use setup::{calculate_optimal_pools, generate_pools, initial_pool_matches, pool_name};
pub use standard::generate_standard_round;
pub use stats::{compare_standings, compute_team_stats, rank_teams, BYE_POINTS_AGAINST, BYE_POINTS_FOR};
