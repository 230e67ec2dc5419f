use anyhow::Result;

use pingpong_ranking::cli::{Cli, Command};
use pingpong_ranking::{
    handle_add_player, handle_completions, handle_export, handle_recent, handle_record,
    handle_standings, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::AddPlayer { name } => handle_add_player(&cli.scheme, name),
        Command::Record {
            winner,
            loser,
            winner_score,
            loser_score,
        } => handle_record(&cli.scheme, winner, loser, *winner_score, *loser_score),
        Command::Standings => handle_standings(&cli.scheme),
        Command::Recent { count } => handle_recent(&cli.scheme, *count),
        Command::Export { path } => handle_export(&cli.scheme, path),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
