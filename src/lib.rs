//! Petanque tournament manager: library with models and the progression engine.

pub mod logic;
pub mod models;

pub use logic::{
    apply_byes, assign_available_final_courts, calculate_optimal_pools, compute_team_stats,
    create_empty_final_phases, create_empty_final_phases_b, create_knockout_bracket,
    delete_current_round, delete_round, finish_tournament, generate_melee_round,
    generate_next_pool_matches, generate_next_round, generate_pools, generate_quadrette_round,
    generate_standard_round, generate_tournament_pools, get_current_bottom_teams,
    get_current_qualified_teams, propagate_winners_to_next_phases, rank_teams, update_match_court,
    update_match_score, RandomSource, SeededRandom, SequenceRandom, ThreadRandom,
};
pub use models::{
    Category, Match, MatchId, Player, PlayerId, PlayerLabel, Pool, PoolDistribution, PoolId,
    PoolSize, Side, Team, TeamId, Tournament, TournamentError, TournamentId, TournamentType,
};
