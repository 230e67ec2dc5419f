use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::Player;
use crate::domain::models::PlayerState;

const PLAYER_COLUMNS: &str =
    "id, name, rating, deviation, volatility, games_played, wins, created_at";

pub fn insert_player(conn: &Connection, name: &str, state: &PlayerState) -> Result<Player> {
    let sql = format!(
        "INSERT INTO players (name, rating, deviation, volatility, games_played, wins) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING {PLAYER_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            name,
            state.rating,
            state.deviation,
            state.volatility,
            state.games_played,
            state.wins
        ],
        parse_player_row,
    )
    .with_context(|| format!("Failed to insert player {name}"))
}

pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE name = ?1");

    conn.query_row(&sql, params![name], parse_player_row)
        .optional()
        .context("Failed to query player by name")
}

pub fn find_by_id(conn: &Connection, id: i32) -> Result<Option<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

/// Persists a complete new state for one player.
pub fn update_state(conn: &Connection, id: i32, state: &PlayerState) -> Result<()> {
    let sql = "UPDATE players SET rating = ?1, deviation = ?2, volatility = ?3, \
               games_played = ?4, wins = ?5 WHERE id = ?6";

    let updated = conn
        .execute(
            sql,
            params![
                state.rating,
                state.deviation,
                state.volatility,
                state.games_played,
                state.wins,
                id
            ],
        )
        .context("Failed to update player state")?;

    if updated != 1 {
        anyhow::bail!("No player with id {id}");
    }
    Ok(())
}

/// Leaderboard order: best rating first, ties broken by name.
pub fn list_by_rating(conn: &Connection) -> Result<Vec<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY rating DESC, name ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_all(conn: &Connection) -> Result<Vec<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY name ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        rating: row.get(2)?,
        deviation: row.get(3)?,
        volatility: row.get(4)?,
        games_played: row.get(5)?,
        wins: row.get(6)?,
        created_at: row.get(7)?,
    })
}
