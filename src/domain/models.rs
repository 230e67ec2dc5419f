use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rating::types::RatingScheme;

/// Current rating state of one player.
///
/// Both schemes persist the full record; under Elo the deviation and
/// volatility fields hold the registration defaults and are never read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
    pub games_played: i32,
    pub wins: i32,
}

impl PlayerState {
    /// Win percentage over played games, 0.0 for a fresh player.
    pub fn win_rate(&self) -> f64 {
        if self.games_played > 0 {
            self.wins as f64 / self.games_played as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// One recorded match. Immutable once written; the match log is
/// append-only and ordered by time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub winner: String,
    pub loser: String,
    pub winner_rating_change: i32,
    pub loser_rating_change: i32,
    pub winner_score: Option<i32>,
    pub loser_score: Option<i32>,
    pub played_at: DateTime<Utc>,
}

/// A leaderboard row.
#[derive(Debug, Clone, Serialize)]
pub struct Standing {
    pub rank: usize,
    pub name: String,
    pub state: PlayerState,
}

/// Full store contents, the shape written by `export`.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub scheme: RatingScheme,
    pub players: BTreeMap<String, PlayerState>,
    pub matches: Vec<MatchRecord>,
}
