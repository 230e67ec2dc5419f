use chrono::NaiveDateTime;

use crate::domain::models::PlayerState;

#[derive(Debug, Clone)]
pub struct Player {
    pub id: i32,
    pub name: String,
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
    pub games_played: i32,
    pub wins: i32,
    pub created_at: Option<NaiveDateTime>,
}

impl Player {
    pub fn state(&self) -> PlayerState {
        PlayerState {
            rating: self.rating,
            deviation: self.deviation,
            volatility: self.volatility,
            games_played: self.games_played,
            wins: self.wins,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Match {
    pub id: i32,
    pub winner_id: i32,
    pub loser_id: i32,
    pub winner_rating_change: i32,
    pub loser_rating_change: i32,
    pub winner_score: Option<i32>,
    pub loser_score: Option<i32>,
    pub played_at: NaiveDateTime,
    pub created_at: Option<NaiveDateTime>,
}

// DTO for joined queries
#[derive(Debug, Clone)]
pub struct MatchWithNames {
    pub winner: String,
    pub loser: String,
    pub winner_rating_change: i32,
    pub loser_rating_change: i32,
    pub winner_score: Option<i32>,
    pub loser_score: Option<i32>,
    pub played_at: NaiveDateTime,
}
