use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use super::models::{Match, MatchWithNames};

/// Appends one match to the log. Rows are never updated or re-ordered
/// afterwards.
#[allow(clippy::too_many_arguments)]
pub fn insert_match(
    conn: &Connection,
    winner_id: i32,
    loser_id: i32,
    winner_rating_change: i32,
    loser_rating_change: i32,
    winner_score: Option<i32>,
    loser_score: Option<i32>,
    played_at: NaiveDateTime,
) -> Result<Match> {
    let sql = "INSERT INTO matches (winner_id, loser_id, winner_rating_change, loser_rating_change, winner_score, loser_score, played_at) \
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) \
               RETURNING id, winner_id, loser_id, winner_rating_change, loser_rating_change, winner_score, loser_score, played_at, created_at";

    conn.query_row(
        sql,
        params![
            winner_id,
            loser_id,
            winner_rating_change,
            loser_rating_change,
            winner_score,
            loser_score,
            played_at
        ],
        parse_match_row,
    )
    .context("Failed to insert match")
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<Match> {
    Ok(Match {
        id: row.get(0)?,
        winner_id: row.get(1)?,
        loser_id: row.get(2)?,
        winner_rating_change: row.get(3)?,
        loser_rating_change: row.get(4)?,
        winner_score: row.get(5)?,
        loser_score: row.get(6)?,
        played_at: row.get(7)?,
        created_at: row.get(8)?,
    })
}

const MATCH_WITH_NAMES: &str = "
    SELECT w.name, l.name, m.winner_rating_change, m.loser_rating_change,
           m.winner_score, m.loser_score, m.played_at
    FROM matches m
    JOIN players w ON m.winner_id = w.id
    JOIN players l ON m.loser_id = l.id
";

/// Last `limit` matches, most recent first.
pub fn list_recent(conn: &Connection, limit: usize) -> Result<Vec<MatchWithNames>> {
    let sql = format!("{MATCH_WITH_NAMES} ORDER BY m.played_at DESC, m.id DESC LIMIT ?1");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![limit as i64], parse_match_with_names)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// The whole log in application order.
pub fn list_chronological(conn: &Connection) -> Result<Vec<MatchWithNames>> {
    let sql = format!("{MATCH_WITH_NAMES} ORDER BY m.played_at ASC, m.id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_match_with_names)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_match_with_names(row: &rusqlite::Row) -> rusqlite::Result<MatchWithNames> {
    Ok(MatchWithNames {
        winner: row.get(0)?,
        loser: row.get(1)?,
        winner_rating_change: row.get(2)?,
        loser_rating_change: row.get(3)?,
        winner_score: row.get(4)?,
        loser_score: row.get(5)?,
        played_at: row.get(6)?,
    })
}
