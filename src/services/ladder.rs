use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::info;

use crate::config::settings::AppConfig;
use crate::database::{self, DbPool, MatchWithNames};
use crate::domain::models::{MatchRecord, PlayerState, Snapshot, Standing};
use crate::rating::{self, RatingEngine};

/// Orchestrates the store and the configured rating engine.
///
/// One match at a time: each submission runs read, rate, write, append
/// inside a single transaction, which serializes read-modify-write per
/// player and fixes the order the log folds in.
pub struct LadderService {
    config: AppConfig,
    engine: Box<dyn RatingEngine>,
    pool: DbPool,
}

impl LadderService {
    /// Opens the store and brings its schema up to date.
    pub fn new(config: AppConfig, pool: DbPool) -> Result<Self> {
        let conn = database::get_connection(&pool)?;
        database::migrations::migrate(&conn)?;

        let engine = rating::engine_for(&config.rating);
        Ok(Self {
            config,
            engine,
            pool,
        })
    }

    pub fn register_player(&self, name: &str) -> Result<database::Player> {
        let name = name.trim();
        if name.is_empty() {
            bail!("Player name must not be empty");
        }

        let conn = database::get_connection(&self.pool)?;
        if database::players::find_by_name(&conn, name)?.is_some() {
            bail!("Player {name} already exists");
        }

        let player = database::players::insert_player(&conn, name, &self.engine.initial_state())?;
        info!("Registered {} at rating {}", player.name, player.rating);
        Ok(player)
    }

    /// Applies one completed match and appends it to the log.
    pub fn record_match(
        &self,
        winner: &str,
        loser: &str,
        winner_score: Option<i32>,
        loser_score: Option<i32>,
    ) -> Result<MatchRecord> {
        if winner == loser {
            bail!("Winner and loser must be different players");
        }

        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn.transaction()?;

        let winner_row = database::players::find_by_name(&tx, winner)?
            .with_context(|| format!("Unknown player {winner}; add them first"))?;
        let loser_row = database::players::find_by_name(&tx, loser)?
            .with_context(|| format!("Unknown player {loser}; add them first"))?;

        let (rated_winner, rated_loser) =
            self.engine.rate(&winner_row.state(), &loser_row.state())?;

        // Counter policy: both sides played one more game, only the
        // winner's win count moves.
        let new_winner = PlayerState {
            games_played: winner_row.games_played + 1,
            wins: winner_row.wins + 1,
            ..rated_winner
        };
        let new_loser = PlayerState {
            games_played: loser_row.games_played + 1,
            ..rated_loser
        };

        let winner_change = (new_winner.rating - winner_row.rating).round() as i32;
        let loser_change = (new_loser.rating - loser_row.rating).round() as i32;
        let played_at = Utc::now().naive_utc();

        database::players::update_state(&tx, winner_row.id, &new_winner)?;
        database::players::update_state(&tx, loser_row.id, &new_loser)?;
        database::matches::insert_match(
            &tx,
            winner_row.id,
            loser_row.id,
            winner_change,
            loser_change,
            winner_score,
            loser_score,
            played_at,
        )?;

        tx.commit().context("Failed to commit match")?;

        info!("{winner} defeated {loser} ({winner_change:+}/{loser_change:+})");

        Ok(MatchRecord {
            winner: winner_row.name,
            loser: loser_row.name,
            winner_rating_change: winner_change,
            loser_rating_change: loser_change,
            winner_score,
            loser_score,
            played_at: played_at.and_utc(),
        })
    }

    /// Ranked leaderboard, best rating first.
    pub fn standings(&self) -> Result<Vec<Standing>> {
        let conn = database::get_connection(&self.pool)?;
        let players = database::players::list_by_rating(&conn)?;

        Ok(players
            .into_iter()
            .enumerate()
            .map(|(idx, player)| Standing {
                rank: idx + 1,
                name: player.name.clone(),
                state: player.state(),
            })
            .collect())
    }

    /// Last `limit` matches, most recent first.
    pub fn recent_matches(&self, limit: usize) -> Result<Vec<MatchRecord>> {
        let conn = database::get_connection(&self.pool)?;
        let rows = database::matches::list_recent(&conn, limit)?;
        Ok(rows.into_iter().map(into_record).collect())
    }

    /// Full store contents for export.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let conn = database::get_connection(&self.pool)?;

        let players: BTreeMap<String, PlayerState> = database::players::list_all(&conn)?
            .into_iter()
            .map(|player| (player.name.clone(), player.state()))
            .collect();

        let matches = database::matches::list_chronological(&conn)?
            .into_iter()
            .map(into_record)
            .collect();

        Ok(Snapshot {
            scheme: self.config.rating.scheme,
            players,
            matches,
        })
    }
}

fn into_record(row: MatchWithNames) -> MatchRecord {
    MatchRecord {
        winner: row.winner,
        loser: row.loser,
        winner_rating_change: row.winner_rating_change,
        loser_rating_change: row.loser_rating_change,
        winner_score: row.winner_score,
        loser_score: row.loser_score,
        played_at: row.played_at.and_utc(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::types::RatingScheme;

    fn service(scheme: RatingScheme) -> LadderService {
        let pool = database::create_memory_pool().unwrap();
        LadderService::new(AppConfig::with_scheme(scheme), pool).unwrap()
    }

    #[test]
    fn elo_match_end_to_end() {
        let service = service(RatingScheme::Elo);
        service.register_player("Alice").unwrap();
        service.register_player("Bob").unwrap();

        let record = service.record_match("Alice", "Bob", None, None).unwrap();
        assert_eq!(record.winner_rating_change, 16);
        assert_eq!(record.loser_rating_change, -16);

        let standings = service.standings().unwrap();
        assert_eq!(standings.len(), 2);

        let alice = &standings[0];
        assert_eq!(alice.name, "Alice");
        assert_eq!(alice.rank, 1);
        assert_eq!(alice.state.rating, 1216.0);
        assert_eq!(alice.state.games_played, 1);
        assert_eq!(alice.state.wins, 1);

        let bob = &standings[1];
        assert_eq!(bob.state.rating, 1184.0);
        assert_eq!(bob.state.games_played, 1);
        assert_eq!(bob.state.wins, 0);
    }

    #[test]
    fn glicko2_match_end_to_end() {
        let service = service(RatingScheme::Glicko2);
        service.register_player("Alice").unwrap();
        service.register_player("Bob").unwrap();

        service.record_match("Alice", "Bob", Some(11), Some(7)).unwrap();

        let standings = service.standings().unwrap();
        assert_eq!(standings[0].state.rating, 1662.0);
        assert_eq!(standings[0].state.deviation, 290.0);
        assert_eq!(standings[1].state.rating, 1338.0);
        assert_eq!(standings[1].state.deviation, 290.0);
    }

    #[test]
    fn rejects_duplicate_registration() {
        let service = service(RatingScheme::Elo);
        service.register_player("Alice").unwrap();
        assert!(service.register_player("Alice").is_err());
    }

    #[test]
    fn rejects_blank_names() {
        let service = service(RatingScheme::Elo);
        assert!(service.register_player("   ").is_err());
    }

    #[test]
    fn rejects_unknown_players() {
        let service = service(RatingScheme::Elo);
        service.register_player("Alice").unwrap();
        assert!(service.record_match("Alice", "Nobody", None, None).is_err());
        assert!(service.record_match("Nobody", "Alice", None, None).is_err());
    }

    #[test]
    fn rejects_self_matches() {
        let service = service(RatingScheme::Elo);
        service.register_player("Alice").unwrap();
        assert!(service.record_match("Alice", "Alice", None, None).is_err());
    }

    #[test]
    fn recent_matches_are_newest_first() {
        let service = service(RatingScheme::Elo);
        service.register_player("Alice").unwrap();
        service.register_player("Bob").unwrap();

        service.record_match("Alice", "Bob", None, None).unwrap();
        service.record_match("Bob", "Alice", None, None).unwrap();

        let recent = service.recent_matches(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].winner, "Bob");
        assert_eq!(recent[1].winner, "Alice");

        let limited = service.recent_matches(1).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].winner, "Bob");
    }

    #[test]
    fn snapshot_holds_the_whole_store() {
        let service = service(RatingScheme::Glicko2);
        service.register_player("Alice").unwrap();
        service.register_player("Bob").unwrap();
        service.record_match("Alice", "Bob", Some(11), Some(9)).unwrap();

        let snapshot = service.snapshot().unwrap();
        assert_eq!(snapshot.scheme, RatingScheme::Glicko2);
        assert_eq!(snapshot.players.len(), 2);
        assert_eq!(snapshot.matches.len(), 1);
        assert_eq!(snapshot.matches[0].winner_score, Some(11));
        assert!(snapshot.players.contains_key("Alice"));
    }

    #[test]
    fn scores_are_display_data_only() {
        let with_scores = service(RatingScheme::Elo);
        with_scores.register_player("Alice").unwrap();
        with_scores.register_player("Bob").unwrap();
        let scored = with_scores.record_match("Alice", "Bob", Some(11), Some(2)).unwrap();

        let without_scores = service(RatingScheme::Elo);
        without_scores.register_player("Alice").unwrap();
        without_scores.register_player("Bob").unwrap();
        let unscored = without_scores.record_match("Alice", "Bob", None, None).unwrap();

        assert_eq!(scored.winner_rating_change, unscored.winner_rating_change);
        assert_eq!(scored.loser_rating_change, unscored.loser_rating_change);
    }
}
