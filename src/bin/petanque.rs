//! Command-line front end: every command loads the tournament JSON file, applies one
//! transition and writes the result back.
//! Run with: cargo run --bin petanque -- <command>
//! The file defaults to ./tournament.json. Override with --file or PETANQUE_FILE.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use petanque_tournament::{
    delete_current_round, delete_round, finish_tournament, generate_next_round,
    generate_tournament_pools, rank_teams, update_match_court, update_match_score, MatchId,
    Player, PoolSize, RandomSource, SeededRandom, TeamId, ThreadRandom, Tournament,
    TournamentType,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "petanque")]
#[command(about = "Petanque tournament manager")]
struct Cli {
    /// Tournament file (JSON).
    #[arg(long, env = "PETANQUE_FILE", default_value = "tournament.json")]
    file: PathBuf,
    /// Seed for draws and pool assignment (random when absent).
    #[arg(long, env = "PETANQUE_SEED")]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    TeteATete,
    Doublette,
    Triplette,
    Quadrette,
    Melee,
    DoubletteInPools,
    TripletteInPools,
}

impl From<Format> for TournamentType {
    fn from(format: Format) -> Self {
        match format {
            Format::TeteATete => TournamentType::TeteATete,
            Format::Doublette => TournamentType::Doublette,
            Format::Triplette => TournamentType::Triplette,
            Format::Quadrette => TournamentType::Quadrette,
            Format::Melee => TournamentType::Melee,
            Format::DoubletteInPools => TournamentType::DoubletteInPools,
            Format::TripletteInPools => TournamentType::TripletteInPools,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new tournament file
    New {
        #[arg(long)]
        name: String,
        #[arg(long, value_enum, default_value = "doublette")]
        format: Format,
        #[arg(long, default_value = "8")]
        courts: u32,
        /// Preferred pool size (3 or 4) for pool formats
        #[arg(long)]
        pool_size: Option<u8>,
    },
    /// Register a team
    AddTeam {
        name: String,
        /// Player names, in order (quadrette labels A-D follow this order)
        #[arg(long = "player")]
        players: Vec<String>,
    },
    /// Register teams from a CSV file: team name, then player names (no header)
    ImportTeams { csv: PathBuf },
    /// Remove a team that has not played yet
    RemoveTeam { team_id: TeamId },
    /// Split teams into pools (pool formats)
    GeneratePools,
    /// Generate the next round
    NextRound,
    /// Record a score
    Score {
        match_id: MatchId,
        team1_score: u32,
        team2_score: u32,
    },
    /// Move a match to another court
    Court { match_id: MatchId, court: u32 },
    /// Delete a round (the current one when omitted)
    DeleteRound { round: Option<u32> },
    /// Print the standings
    Standings,
    /// Print the tournament as JSON
    Show,
    /// Mark the tournament as finished
    Finish,
}

fn load(path: &Path) -> Result<Tournament> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading tournament file {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}

fn save(path: &Path, tournament: &Tournament) -> Result<()> {
    let data = serde_json::to_string_pretty(tournament)?;
    fs::write(path, data).with_context(|| format!("writing {}", path.display()))
}

fn pool_size(size: Option<u8>) -> Result<Option<PoolSize>> {
    match size {
        None => Ok(None),
        Some(3) => Ok(Some(PoolSize::Three)),
        Some(4) => Ok(Some(PoolSize::Four)),
        Some(other) => bail!("pool size must be 3 or 4, got {other}"),
    }
}

fn import_teams(tournament: &mut Tournament, path: &Path) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut added = 0;
    for record in reader.records() {
        let record = record?;
        let Some(name) = record.get(0).filter(|n| !n.is_empty()) else {
            continue;
        };
        let players = record
            .iter()
            .skip(1)
            .filter(|p| !p.is_empty())
            .map(Player::new)
            .collect();
        tournament
            .add_team(name, players)
            .with_context(|| format!("adding team {name}"))?;
        added += 1;
    }
    Ok(added)
}

fn print_standings(tournament: &Tournament) {
    println!("{:<4} {:<24} {:>4} {:>4} {:>5} {:>5} {:>6}", "#", "Team", "W", "L", "For", "Ag", "Diff");
    for (i, team) in rank_teams(&tournament.teams).iter().enumerate() {
        println!(
            "{:<4} {:<24} {:>4} {:>4} {:>5} {:>5} {:>6}",
            i + 1,
            team.name,
            team.wins,
            team.losses,
            team.points_for,
            team.points_against,
            team.performance
        );
    }
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();
    let mut rng: Box<dyn RandomSource> = match cli.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };

    let file = cli.file.as_path();
    let next = match cli.command {
        Commands::New {
            name,
            format,
            courts,
            pool_size: size,
        } => {
            let mut t = Tournament::new(name, TournamentType::from(format), courts);
            if let Some(size) = pool_size(size)? {
                t.set_preferred_pool_size(size)?;
            }
            log::info!("Created tournament {} in {}", t.id, file.display());
            t
        }
        Commands::AddTeam { name, players } => {
            let mut t = load(file)?;
            let id = t.add_team(name, players.into_iter().map(Player::new).collect())?;
            log::info!("Added team {id}");
            t
        }
        Commands::ImportTeams { csv } => {
            let mut t = load(file)?;
            let added = import_teams(&mut t, &csv)?;
            log::info!("Imported {added} team(s) from {}", csv.display());
            t
        }
        Commands::RemoveTeam { team_id } => {
            let mut t = load(file)?;
            t.remove_team(team_id)?;
            t
        }
        Commands::GeneratePools => generate_tournament_pools(&load(file)?, rng.as_mut()),
        Commands::NextRound => generate_next_round(&load(file)?, rng.as_mut()),
        Commands::Score {
            match_id,
            team1_score,
            team2_score,
        } => update_match_score(&load(file)?, match_id, team1_score, team2_score),
        Commands::Court { match_id, court } => update_match_court(&load(file)?, match_id, court),
        Commands::DeleteRound { round: Some(round) } => delete_round(&load(file)?, round),
        Commands::DeleteRound { round: None } => delete_current_round(&load(file)?),
        Commands::Standings => {
            print_standings(&load(file)?);
            return Ok(());
        }
        Commands::Show => {
            println!("{}", serde_json::to_string_pretty(&load(file)?)?);
            return Ok(());
        }
        Commands::Finish => finish_tournament(&load(file)?),
    };
    save(file, &next)?;
    log::info!("Round {} - {} matches", next.current_round, next.matches.len() + next.matches_b.len());
    Ok(())
}
