use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection};

use super::setup;

/// Schema version written by the current build.
pub const CURRENT_VERSION: i32 = 2;

/// Version 1 kept a single `elo` column per player and named the match
/// deltas after it. The upgrade backfills `rating` from `elo` and seeds the
/// uncertainty fields with the registration defaults that were in effect
/// when the Glicko-2 scheme landed.
const UPGRADE_V1_TO_V2: &str = "
    ALTER TABLE players ADD COLUMN rating REAL NOT NULL DEFAULT 0;
    ALTER TABLE players ADD COLUMN deviation REAL NOT NULL DEFAULT 350.0;
    ALTER TABLE players ADD COLUMN volatility REAL NOT NULL DEFAULT 0.06;
    UPDATE players SET rating = elo;
    ALTER TABLE players DROP COLUMN elo;
    ALTER TABLE matches RENAME COLUMN winner_elo_change TO winner_rating_change;
    ALTER TABLE matches RENAME COLUMN loser_elo_change TO loser_rating_change;
    CREATE INDEX IF NOT EXISTS idx_matches_played_at ON matches(played_at);
    CREATE INDEX IF NOT EXISTS idx_players_rating ON players(rating);
";

/// Brings the store up to the current schema version. Applied once at the
/// store boundary when it is opened; the engines never see legacy shapes.
pub fn migrate(conn: &Connection) -> Result<()> {
    let mut version = detect_version(conn)?;

    if version > CURRENT_VERSION {
        bail!(
            "store schema version {} is newer than this build supports ({})",
            version,
            CURRENT_VERSION
        );
    }

    while version < CURRENT_VERSION {
        version = match version {
            0 => {
                setup::install_schema(conn)?;
                CURRENT_VERSION
            }
            1 => {
                setup::run_statements(conn, UPGRADE_V1_TO_V2)
                    .context("Failed to upgrade store from version 1")?;
                log::info!("Upgraded legacy Elo store to schema version 2");
                2
            }
            v => bail!("no migration path from store schema version {v}"),
        };
        set_version(conn, version)?;
    }

    Ok(())
}

/// Pre-versioning stores never wrote `user_version`, so a zero reading is
/// disambiguated structurally: a `players.elo` column marks the legacy
/// layout.
fn detect_version(conn: &Connection) -> Result<i32> {
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .context("Failed to read store schema version")?;

    if version > 0 {
        return Ok(version);
    }
    if has_column(conn, "players", "elo")? {
        return Ok(1);
    }
    Ok(0)
}

fn set_version(conn: &Connection, version: i32) -> Result<()> {
    conn.pragma_update(None, "user_version", version)
        .context("Failed to set store schema version")
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let count: i32 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
            params![table, column],
            |row| row.get(0),
        )
        .context("Failed to inspect table columns")?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY_V1_SCHEMA: &str = "
        CREATE TABLE players (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            elo REAL NOT NULL,
            games_played INTEGER NOT NULL DEFAULT 0,
            wins INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );
        CREATE TABLE matches (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            winner_id INTEGER NOT NULL REFERENCES players(id),
            loser_id INTEGER NOT NULL REFERENCES players(id),
            winner_elo_change INTEGER NOT NULL,
            loser_elo_change INTEGER NOT NULL,
            winner_score INTEGER,
            loser_score INTEGER,
            played_at TIMESTAMP NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );
    ";

    fn open() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn fresh_store_installs_current_schema() {
        let conn = open();
        migrate(&conn).unwrap();

        let version: i32 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, CURRENT_VERSION);
        assert!(has_column(&conn, "players", "rating").unwrap());
        assert!(has_column(&conn, "players", "volatility").unwrap());
    }

    #[test]
    fn legacy_store_upgrades_exactly_once() {
        let conn = open();
        setup::run_statements(&conn, LEGACY_V1_SCHEMA).unwrap();
        conn.execute(
            "INSERT INTO players (name, elo, games_played, wins) VALUES ('alice', 1312, 10, 6)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO matches (winner_id, loser_id, winner_elo_change, loser_elo_change, played_at)
             VALUES (1, 1, 16, -16, '2024-06-01 12:00:00')",
            [],
        )
        .unwrap();

        migrate(&conn).unwrap();

        let (rating, deviation, volatility): (f64, f64, f64) = conn
            .query_row(
                "SELECT rating, deviation, volatility FROM players WHERE name = 'alice'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();
        assert_eq!(rating, 1312.0);
        assert_eq!(deviation, 350.0);
        assert_eq!(volatility, 0.06);
        assert!(!has_column(&conn, "players", "elo").unwrap());

        let delta: i32 = conn
            .query_row("SELECT winner_rating_change FROM matches", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(delta, 16);

        // Second run is a no-op.
        migrate(&conn).unwrap();
        let version: i32 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, CURRENT_VERSION);
    }

    #[test]
    fn refuses_stores_from_the_future() {
        let conn = open();
        conn.pragma_update(None, "user_version", CURRENT_VERSION + 1)
            .unwrap();
        assert!(migrate(&conn).is_err());
    }
}
