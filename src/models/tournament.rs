//! Tournament, TournamentType and registration errors.

use crate::models::game::{is_group_round, Match, MatchId};
use crate::models::player::{Player, PlayerLabel};
use crate::models::pool::{Pool, PoolSize};
use crate::models::team::{Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by team registration. Engine transitions never fail.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TournamentError {
    #[error("Team name must not be empty")]
    EmptyName,
    #[error("A team with this name already exists")]
    DuplicateTeamName,
    #[error("Team not found")]
    TeamNotFound(TeamId),
    #[error("Team already played matches and cannot be removed")]
    TeamHasMatches(TeamId),
    #[error("Pools are already generated")]
    PoolsAlreadyGenerated,
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Game format of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentType {
    /// Head-to-head, one player per side.
    TeteATete,
    #[default]
    Doublette,
    Triplette,
    /// Four-player teams on a fixed seven-round lineup rotation.
    Quadrette,
    /// Solo registrations regrouped into new teams every round.
    Melee,
    DoubletteInPools,
    TripletteInPools,
}

impl TournamentType {
    pub fn is_pool_format(self) -> bool {
        matches!(self, TournamentType::DoubletteInPools | TournamentType::TripletteInPools)
    }

    pub fn players_per_team(self) -> usize {
        match self {
            TournamentType::TeteATete | TournamentType::Melee => 1,
            TournamentType::Doublette | TournamentType::DoubletteInPools => 2,
            TournamentType::Triplette | TournamentType::TripletteInPools => 3,
            TournamentType::Quadrette => 4,
        }
    }
}

/// Full tournament state. Transitions in `logic` return a new value.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub kind: TournamentType,
    /// Number of courts (terrains) available, numbered from 1.
    pub courts: u32,
    pub teams: Vec<Team>,
    pub pools: Vec<Pool>,
    /// Pool or standard rounds plus category A finals.
    pub matches: Vec<Match>,
    /// Category B finals.
    pub matches_b: Vec<Match>,
    pub current_round: u32,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub pools_generated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_pool_size: Option<PoolSize>,
}

impl Tournament {
    pub fn new(name: impl Into<String>, kind: TournamentType, courts: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            courts,
            teams: Vec::new(),
            pools: Vec::new(),
            matches: Vec::new(),
            matches_b: Vec::new(),
            current_round: 0,
            completed: false,
            created_at: Utc::now(),
            pools_generated: false,
            preferred_pool_size: None,
        }
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Look up a match in either match list.
    pub fn find_match(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().chain(self.matches_b.iter()).find(|m| m.id == id)
    }

    pub fn find_match_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches
            .iter_mut()
            .chain(self.matches_b.iter_mut())
            .find(|m| m.id == id)
    }

    /// Main and category B matches, in insertion order.
    pub fn all_matches(&self) -> Vec<Match> {
        self.matches.iter().chain(self.matches_b.iter()).cloned().collect()
    }

    /// Highest pool/standard round still present, or 0.
    pub fn last_group_round(&self) -> u32 {
        self.matches
            .iter()
            .map(|m| m.round)
            .filter(|&r| is_group_round(r))
            .max()
            .unwrap_or(0)
    }

    /// Register a team. Names are trimmed and unique (case-insensitive). Quadrette
    /// players are labelled A to D in registration order.
    pub fn add_team(
        &mut self,
        name: impl Into<String>,
        players: Vec<Player>,
    ) -> Result<TeamId, TournamentError> {
        if self.pools_generated {
            return Err(TournamentError::PoolsAlreadyGenerated);
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        let is_duplicate = self
            .teams
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicateTeamName);
        }
        let players = if self.kind == TournamentType::Quadrette {
            players
                .into_iter()
                .enumerate()
                .map(|(i, p)| match PlayerLabel::from_index(i) {
                    Some(label) => p.with_label(label),
                    None => p,
                })
                .collect()
        } else {
            players
        };
        let team = Team::new(name_trimmed, players);
        let id = team.id;
        self.teams.push(team);
        Ok(id)
    }

    /// Remove a team that has not played yet. Remaining default names ("Team N") are
    /// renumbered and every pool assignment is cleared.
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), TournamentError> {
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        let referenced = self
            .matches
            .iter()
            .chain(self.matches_b.iter())
            .any(|m| m.involves(team_id));
        if referenced {
            return Err(TournamentError::TeamHasMatches(team_id));
        }
        self.teams.remove(idx);
        for (i, team) in self.teams.iter_mut().enumerate() {
            if is_default_team_name(&team.name) {
                team.name = default_team_name(i + 1);
            }
            team.pool_id = None;
        }
        self.pools.clear();
        self.pools_generated = false;
        Ok(())
    }

    /// Only valid before pools are generated.
    pub fn set_preferred_pool_size(&mut self, size: PoolSize) -> Result<(), TournamentError> {
        if self.pools_generated {
            return Err(TournamentError::PoolsAlreadyGenerated);
        }
        self.preferred_pool_size = Some(size);
        Ok(())
    }
}

/// Name given to the `number`-th team when the organizer does not pick one.
pub fn default_team_name(number: usize) -> String {
    format!("Team {number}")
}

fn is_default_team_name(name: &str) -> bool {
    name.strip_prefix("Team ")
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_team_renumbers_default_names() {
        let mut t = Tournament::new("Open", TournamentType::Doublette, 4);
        let first = t.add_team(default_team_name(1), Vec::new()).unwrap();
        t.add_team(default_team_name(2), Vec::new()).unwrap();
        t.add_team("Les Boulistes", Vec::new()).unwrap();
        t.add_team(default_team_name(4), Vec::new()).unwrap();

        t.remove_team(first).unwrap();

        let names: Vec<_> = t.teams.iter().map(|team| team.name.as_str()).collect();
        assert_eq!(names, vec!["Team 1", "Les Boulistes", "Team 3"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut t = Tournament::new("Open", TournamentType::Doublette, 4);
        t.add_team("Alpha", Vec::new()).unwrap();
        assert_eq!(
            t.add_team(" alpha ", Vec::new()),
            Err(TournamentError::DuplicateTeamName)
        );
        assert_eq!(t.add_team("  ", Vec::new()), Err(TournamentError::EmptyName));
    }

    #[test]
    fn quadrette_players_get_labels() {
        let mut t = Tournament::new("Quad", TournamentType::Quadrette, 4);
        let players = (0..4).map(|i| Player::new(format!("P{i}"))).collect();
        let id = t.add_team("Quad 1", players).unwrap();
        let team = t.team(id).unwrap();
        assert_eq!(team.player_with_label(PlayerLabel::C).unwrap().name, "P2");
    }
}
