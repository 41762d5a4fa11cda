//! Data structures for the petanque tournament: teams, pools, matches, tournament state.

mod game;
mod player;
mod pool;
mod team;
mod tournament;

pub use game::{
    is_group_round, Category, Match, MatchId, Side, BYE_SCORE, FINALS_A_FIRST_ROUND,
    FINALS_B_FIRST_ROUND,
};
pub use player::{Player, PlayerId, PlayerLabel};
pub use pool::{Pool, PoolDistribution, PoolId, PoolSize};
pub use team::{Team, TeamId};
pub use tournament::{default_team_name, Tournament, TournamentError, TournamentId, TournamentType};
