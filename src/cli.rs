//! Command-line interface for strictly_reversi.

use clap::{Parser, Subcommand};

/// Strictly Reversi - actor-per-match reversi engine
#[derive(Parser, Debug)]
#[command(name = "strictly_reversi")]
#[command(about = "Reversi match orchestration with one actor per match", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a hot-seat match on this terminal
    Play {
        /// Name for slot A (starts as black)
        #[arg(long, default_value = "Black")]
        first: String,

        /// Name for slot B (starts as white)
        #[arg(long, default_value = "White")]
        second: String,
    },

    /// Run many matches concurrently with a first-legal-move policy
    Simulate {
        /// Number of matches to run
        #[arg(short, long, default_value = "8")]
        matches: usize,

        /// Rematches to play in each match after the first game
        #[arg(long, default_value = "0")]
        rematches: usize,
    },
}
