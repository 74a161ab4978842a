//! Tournament CLI
//!
//! Play a match between two engines and save the games.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tournament::{EngineSpec, MatchConfig, MatchRunner, TournamentFile, TournamentResults};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tournament", about = "Play games between search adapters")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a match; engines given here override the config file
    Match {
        /// random[:seed], alphabetical, first_move, external[:path]
        engine1: Option<EngineSpec>,
        engine2: Option<EngineSpec>,
        /// tournament.toml with engines and match settings
        #[arg(long, short)]
        config: Option<PathBuf>,
        #[arg(long, short)]
        games: Option<u32>,
        /// Flat time per move instead of a clock
        #[arg(long)]
        move_time_ms: Option<u64>,
        /// Maximum plies per game
        #[arg(long)]
        max_moves: Option<u32>,
        /// Where to write the JSON results
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the report of a saved match
    Report { path: PathBuf },
}

fn run_match(
    engine1: Option<EngineSpec>,
    engine2: Option<EngineSpec>,
    config: Option<PathBuf>,
    games: Option<u32>,
    move_time_ms: Option<u64>,
    max_moves: Option<u32>,
    output: Option<PathBuf>,
) -> Result<()> {
    let file = config
        .as_deref()
        .map(TournamentFile::load)
        .transpose()?;

    let (file_engines, mut settings, file_output) = match file {
        Some(f) => (Some((f.engine1, f.engine2)), f.settings, f.output),
        None => (None, MatchConfig::default(), None),
    };
    let (spec1, spec2) = match (engine1, engine2, file_engines) {
        (Some(a), Some(b), _) => (a, b),
        (a, b, Some((f1, f2))) => (a.unwrap_or(f1), b.unwrap_or(f2)),
        _ => bail!("two engines are needed, on the command line or in --config"),
    };
    if let Some(games) = games {
        settings.num_games = games;
    }
    if move_time_ms.is_some() {
        settings.move_time_ms = move_time_ms;
    }
    if let Some(max_moves) = max_moves {
        settings.max_moves = max_moves;
    }

    let mut engine1 = spec1.build().context("engine1")?;
    let mut engine2 = spec2.build().context("engine2")?;
    info!(
        engine1 = engine1.name(),
        engine2 = engine2.name(),
        games = settings.num_games,
        time_control = %settings.time_control,
        "starting match"
    );

    let runner = MatchRunner::new(settings)?;
    let results = runner.run_match(engine1.as_mut(), engine2.as_mut());
    results.print_report();

    if let Some(path) = output.or(file_output) {
        results.save(&path)?;
        info!(path = %path.display(), "results saved");
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Match {
            engine1,
            engine2,
            config,
            games,
            move_time_ms,
            max_moves,
            output,
        } => run_match(engine1, engine2, config, games, move_time_ms, max_moves, output),
        Command::Report { path } => {
            TournamentResults::load(&path)?.print_report();
            Ok(())
        }
    }
}
