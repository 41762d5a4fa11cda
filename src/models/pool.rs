//! Pools and pool-size bookkeeping.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a pool.
pub type PoolId = Uuid;

/// Preferred pool size when partitioning teams.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolSize {
    Three,
    #[default]
    Four,
}

impl PoolSize {
    pub fn teams(self) -> usize {
        match self {
            PoolSize::Three => 3,
            PoolSize::Four => 4,
        }
    }
}

/// A group of 2, 3 or 4 teams playing a mini-bracket before qualification.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub id: PoolId,
    pub name: String,
    pub team_ids: Vec<TeamId>,
}

impl Pool {
    pub fn new(name: impl Into<String>, team_ids: Vec<TeamId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            team_ids,
        }
    }

    pub fn contains(&self, team_id: TeamId) -> bool {
        self.team_ids.contains(&team_id)
    }
}

/// How many pools of each size a team count splits into.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct PoolDistribution {
    pub pools_of_4: usize,
    pub pools_of_3: usize,
    pub pools_of_2: usize,
}

impl PoolDistribution {
    pub fn new(pools_of_4: usize, pools_of_3: usize, pools_of_2: usize) -> Self {
        Self {
            pools_of_4,
            pools_of_3,
            pools_of_2,
        }
    }

    /// Count the sizes of already generated pools.
    pub fn from_pools(pools: &[Pool]) -> Self {
        let mut distribution = Self::default();
        for pool in pools {
            match pool.team_ids.len() {
                4 => distribution.pools_of_4 += 1,
                3 => distribution.pools_of_3 += 1,
                2 => distribution.pools_of_2 += 1,
                _ => {}
            }
        }
        distribution
    }

    pub fn total_pools(&self) -> usize {
        self.pools_of_4 + self.pools_of_3 + self.pools_of_2
    }

    pub fn team_count(&self) -> usize {
        4 * self.pools_of_4 + 3 * self.pools_of_3 + 2 * self.pools_of_2
    }

    pub fn is_empty(&self) -> bool {
        self.total_pools() == 0
    }

    /// Two qualifiers per pool feed category A.
    pub fn expected_qualified(&self) -> usize {
        2 * self.total_pools()
    }
}
