pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod rating;
pub mod services;

use std::path::Path;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use crate::cli::Cli;
use crate::config::settings::AppConfig;
use crate::rating::types::RatingScheme;
use crate::services::ladder::LadderService;
use crate::services::{export, report};

pub fn interpret() -> Cli {
    Cli::parse()
}

fn open_service(scheme: &str) -> Result<LadderService> {
    let scheme = RatingScheme::parse(scheme)
        .with_context(|| format!("Unknown rating scheme: {scheme} (expected elo or glicko2)"))?;

    let db_path = std::env::var("DATABASE_PATH")
        .unwrap_or_else(|_| "pingpong_ranking.db".to_string());
    let pool = database::create_pool(&db_path)?;

    LadderService::new(AppConfig::with_scheme(scheme), pool)
}

pub fn handle_add_player(scheme: &str, name: &str) -> Result<()> {
    let service = open_service(scheme)?;
    let player = service.register_player(name)?;
    println!("Added {} at rating {}", player.name, player.rating as i64);
    Ok(())
}

pub fn handle_record(
    scheme: &str,
    winner: &str,
    loser: &str,
    winner_score: Option<i32>,
    loser_score: Option<i32>,
) -> Result<()> {
    let service = open_service(scheme)?;
    let record = service.record_match(winner, loser, winner_score, loser_score)?;
    println!("{}", report::render_match(&record));
    Ok(())
}

pub fn handle_standings(scheme: &str) -> Result<()> {
    let service = open_service(scheme)?;
    print!("{}", report::render_standings(&service.standings()?));
    Ok(())
}

pub fn handle_recent(scheme: &str, count: usize) -> Result<()> {
    let service = open_service(scheme)?;
    println!("{}", report::render_recent(&service.recent_matches(count)?));
    Ok(())
}

pub fn handle_export(scheme: &str, path: &Path) -> Result<()> {
    let service = open_service(scheme)?;
    export::write_snapshot(&service.snapshot()?, path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

pub fn handle_completions(shell: clap_complete::Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
