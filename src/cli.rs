use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "ping-pong ladder rating backend")]
pub struct Cli {
    /// Rating scheme to apply (elo or glicko2)
    #[arg(short, long, global = true, default_value = "glicko2")]
    pub scheme: String,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Register a new player at the scheme's starting rating
    AddPlayer {
        /// Player name, unique across the ladder
        name: String,
    },
    /// Record a completed match and update both ratings
    Record {
        /// Name of the winning player
        winner: String,
        /// Name of the losing player
        loser: String,
        /// Points scored by the winner (display only)
        #[arg(long)]
        winner_score: Option<i32>,
        /// Points scored by the loser (display only)
        #[arg(long)]
        loser_score: Option<i32>,
    },
    /// Print the ranked leaderboard
    Standings,
    /// Show the most recent matches
    Recent {
        /// Number of matches to show
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
    /// Write a JSON snapshot of all players and the match log
    Export {
        /// Output file
        #[arg(short, long, default_value = "data.json")]
        path: PathBuf,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}
