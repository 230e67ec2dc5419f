pub mod elo;
pub mod glicko2;
pub mod solver;
pub mod types;

pub use elo::EloEngine;
pub use glicko2::Glicko2Engine;
pub use types::{Glicko2State, Outcome, RatingScheme};

use crate::config::settings::RatingSettings;
use crate::domain::models::PlayerState;
use crate::errors::RatingError;

/// Common surface over the two update rules so a deployment can pick one.
pub trait RatingEngine {
    /// State assigned at player registration.
    fn initial_state(&self) -> PlayerState;

    /// Produces updated states for a (winner, loser) pair.
    ///
    /// Only rating fields change; match and win counters are copied
    /// through untouched and are the caller's bookkeeping.
    fn rate(
        &self,
        winner: &PlayerState,
        loser: &PlayerState,
    ) -> Result<(PlayerState, PlayerState), RatingError>;
}

/// Builds the engine selected by `settings.scheme`.
pub fn engine_for(settings: &RatingSettings) -> Box<dyn RatingEngine> {
    match settings.scheme {
        RatingScheme::Elo => Box::new(EloRater {
            engine: EloEngine::new(settings.elo.clone()),
            // The store keeps one uniform record shape, so Elo players are
            // registered with the canonical uncertainty defaults even
            // though the Elo rule never reads them.
            initial_deviation: settings.glicko2.initial_deviation,
            initial_volatility: settings.glicko2.initial_volatility,
        }),
        RatingScheme::Glicko2 => Box::new(Glicko2Rater {
            engine: Glicko2Engine::new(settings.glicko2.clone()),
        }),
    }
}

struct EloRater {
    engine: EloEngine,
    initial_deviation: f64,
    initial_volatility: f64,
}

impl RatingEngine for EloRater {
    fn initial_state(&self) -> PlayerState {
        PlayerState {
            rating: self.engine.initial_rating(),
            deviation: self.initial_deviation,
            volatility: self.initial_volatility,
            games_played: 0,
            wins: 0,
        }
    }

    fn rate(
        &self,
        winner: &PlayerState,
        loser: &PlayerState,
    ) -> Result<(PlayerState, PlayerState), RatingError> {
        let (new_winner, new_loser) = self.engine.update(winner.rating, loser.rating);
        Ok((
            PlayerState {
                rating: new_winner,
                ..*winner
            },
            PlayerState {
                rating: new_loser,
                ..*loser
            },
        ))
    }
}

struct Glicko2Rater {
    engine: Glicko2Engine,
}

impl RatingEngine for Glicko2Rater {
    fn initial_state(&self) -> PlayerState {
        let state = self.engine.initial_state();
        PlayerState {
            rating: state.rating,
            deviation: state.deviation,
            volatility: state.volatility,
            games_played: 0,
            wins: 0,
        }
    }

    fn rate(
        &self,
        winner: &PlayerState,
        loser: &PlayerState,
    ) -> Result<(PlayerState, PlayerState), RatingError> {
        let (new_winner, new_loser) = self.engine.update(
            &Glicko2State {
                rating: winner.rating,
                deviation: winner.deviation,
                volatility: winner.volatility,
            },
            &Glicko2State {
                rating: loser.rating,
                deviation: loser.deviation,
                volatility: loser.volatility,
            },
            Outcome::Player1Win,
        )?;

        Ok((
            PlayerState {
                rating: new_winner.rating,
                deviation: new_winner.deviation,
                volatility: new_winner.volatility,
                ..*winner
            },
            PlayerState {
                rating: new_loser.rating,
                deviation: new_loser.deviation,
                volatility: new_loser.volatility,
                ..*loser
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::types::RatingScheme;

    #[test]
    fn elo_engine_registers_players_at_1200() {
        let settings = RatingSettings {
            scheme: RatingScheme::Elo,
            ..RatingSettings::default()
        };
        let engine = engine_for(&settings);
        let state = engine.initial_state();
        assert_eq!(state.rating, 1200.0);
        assert_eq!(state.games_played, 0);
        assert_eq!(state.wins, 0);
    }

    #[test]
    fn glicko2_engine_registers_players_at_defaults() {
        let engine = engine_for(&RatingSettings::default());
        let state = engine.initial_state();
        assert_eq!(state.rating, 1500.0);
        assert_eq!(state.deviation, 350.0);
        assert_eq!(state.volatility, 0.06);
    }

    #[test]
    fn engines_leave_counters_to_the_caller() {
        for scheme in [RatingScheme::Elo, RatingScheme::Glicko2] {
            let settings = RatingSettings {
                scheme,
                ..RatingSettings::default()
            };
            let engine = engine_for(&settings);
            let mut state = engine.initial_state();
            state.games_played = 7;
            state.wins = 3;

            let (winner, loser) = engine.rate(&state, &state).unwrap();
            assert_eq!(winner.games_played, 7);
            assert_eq!(winner.wins, 3);
            assert_eq!(loser.games_played, 7);
            assert_eq!(loser.wins, 3);
        }
    }

    #[test]
    fn elo_rate_keeps_uncertainty_fields_untouched() {
        let settings = RatingSettings {
            scheme: RatingScheme::Elo,
            ..RatingSettings::default()
        };
        let engine = engine_for(&settings);
        let state = engine.initial_state();
        let (winner, loser) = engine.rate(&state, &state).unwrap();
        assert_eq!(winner.rating, 1216.0);
        assert_eq!(loser.rating, 1184.0);
        assert_eq!(winner.deviation, state.deviation);
        assert_eq!(winner.volatility, state.volatility);
    }
}
