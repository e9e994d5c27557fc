//! chess_tool
//!
//! Batch driver for the rules core: replay and validate PGN files, inspect
//! FEN positions, run seeded random playouts and perft counts.

mod commands;
mod config;

use std::fmt;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Overrides, ToolConfig};

#[derive(Debug, Parser)]
#[command(name = "chess_tool", version, about = "Replay, inspect and exercise chess positions")]
struct Cli {
    /// TOML config file (default: ./chess_tool.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true)]
    log_filter: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay every game in a PGN file and report how each ends
    Replay { path: PathBuf },
    /// Show status and legal moves of a FEN position
    Inspect { fen: String },
    /// Play random legal games from the start position
    Playout {
        #[arg(long, short = 'g', default_value_t = 1)]
        games: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        max_plies: Option<usize>,
    },
    /// Count leaf nodes of the legal move tree, split by root move
    Perft {
        depth: u8,
        #[arg(long)]
        fen: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (seed, max_plies) = match &cli.command {
        Command::Playout {
            seed, max_plies, ..
        } => (*seed, *max_plies),
        _ => (None, None),
    };
    let config = ToolConfig::load(cli.config.as_deref())?.with_overrides(Overrides {
        log_filter: cli.log_filter.clone(),
        json: cli.json,
        max_plies,
        seed,
    });
    init_logging(&config);

    match cli.command {
        Command::Replay { path } => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read PGN file {}", path.display()))?;
            let report = commands::replay(&text);
            info!(path = %path.display(), games = report.games.len(), "replayed PGN file");
            emit(&report, config.json)
        }
        Command::Inspect { fen } => {
            let report = commands::inspect(&fen).context("cannot inspect position")?;
            emit(&report, config.json)
        }
        Command::Playout { games, .. } => {
            let report = commands::playout(games, config.seed, config.max_plies);
            emit(&report, config.json)
        }
        Command::Perft { depth, fen } => {
            let report = commands::perft(fen.as_deref(), depth).context("cannot run perft")?;
            emit(&report, config.json)
        }
    }
}

fn init_logging(config: &ToolConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn emit<T: Serialize + fmt::Display>(report: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
