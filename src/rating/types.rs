use serde::{Deserialize, Serialize};

pub type RatingValue = f64;

/// Which update rule a deployment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatingScheme {
    Elo,
    Glicko2,
}

impl RatingScheme {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "elo" => Some(RatingScheme::Elo),
            "glicko2" => Some(RatingScheme::Glicko2),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RatingScheme::Elo => "elo",
            RatingScheme::Glicko2 => "glicko2",
        }
    }
}

/// Glicko-2 scalars on the public scale (center 1500).
///
/// `rating` and `deviation` are kept rounded to whole numbers between
/// updates; `volatility` keeps full precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glicko2State {
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
}

/// Match outcome from player 1's perspective.
///
/// A binary enum rather than a raw 0/1 score, so an out-of-range actual
/// score cannot reach the update rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Player1Win,
    Player2Win,
}

impl Outcome {
    /// Actual scores `(s1, s2)` for the two players.
    pub fn scores(&self) -> (f64, f64) {
        match self {
            Outcome::Player1Win => (1.0, 0.0),
            Outcome::Player2Win => (0.0, 1.0),
        }
    }
}
