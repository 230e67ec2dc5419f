use crate::config::settings::EloSettings;

/// Classic Elo pair update.
///
/// Expected score comes from the logistic curve
/// `E = 1 / (1 + 10^((other - self) / 400))`; the winner scores 1, the
/// loser 0, and both new ratings move by `K * (actual - expected)`.
pub struct EloEngine {
    settings: EloSettings,
}

impl EloEngine {
    pub fn new(settings: EloSettings) -> Self {
        Self { settings }
    }

    pub fn initial_rating(&self) -> f64 {
        self.settings.initial_rating
    }

    /// Updates a (winner, loser) rating pair.
    ///
    /// Total over all finite inputs, no failure modes. Both results are
    /// rounded to the nearest whole number independently; the occasional
    /// ±1 asymmetry between gain and loss is accepted.
    pub fn update(&self, winner_rating: f64, loser_rating: f64) -> (f64, f64) {
        let k = self.settings.k_factor;

        let expected_winner = expected_score(winner_rating, loser_rating);
        let expected_loser = expected_score(loser_rating, winner_rating);

        let new_winner = winner_rating + k * (1.0 - expected_winner);
        let new_loser = loser_rating + k * (0.0 - expected_loser);

        (new_winner.round(), new_loser.round())
    }
}

fn expected_score(own: f64, other: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((other - own) / 400.0))
}
