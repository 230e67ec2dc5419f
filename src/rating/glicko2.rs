use crate::config::settings::Glicko2Settings;
use crate::errors::{RatingError, SolverError};
use crate::rating::solver;
use crate::rating::types::{Glicko2State, Outcome};

/// Conversion factor between the public scale (center 1500) and the
/// internal Glicko-2 scale.
const SCALE: f64 = 173.7178;

/// Per-match Glicko-2 update.
///
/// The canonical system rates a whole period of games at once; here each
/// match is its own rating period with a single opponent, and both players
/// are updated identically and independently in one call.
pub struct Glicko2Engine {
    settings: Glicko2Settings,
}

impl Glicko2Engine {
    pub fn new(settings: Glicko2Settings) -> Self {
        Self { settings }
    }

    pub fn initial_state(&self) -> Glicko2State {
        Glicko2State {
            rating: self.settings.initial_rating,
            deviation: self.settings.initial_deviation,
            volatility: self.settings.initial_volatility,
        }
    }

    /// Updates both players from one match; `outcome` is from player 1's
    /// perspective.
    ///
    /// Rating and deviation are rounded to whole numbers on output,
    /// volatility keeps full precision. Fails on invalid input state or if
    /// the volatility iteration does not converge within the configured cap.
    pub fn update(
        &self,
        player1: &Glicko2State,
        player2: &Glicko2State,
        outcome: Outcome,
    ) -> Result<(Glicko2State, Glicko2State), RatingError> {
        validate(player1)?;
        validate(player2)?;

        let (score1, score2) = outcome.scores();

        // Step 1: convert to the internal scale.
        let mu1 = (player1.rating - 1500.0) / SCALE;
        let mu2 = (player2.rating - 1500.0) / SCALE;
        let phi1 = player1.deviation / SCALE;
        let phi2 = player2.deviation / SCALE;

        let new1 = self.update_one(mu1, phi1, player1.volatility, mu2, phi2, score1)?;
        let new2 = self.update_one(mu2, phi2, player2.volatility, mu1, phi1, score2)?;

        Ok((new1, new2))
    }

    /// Steps 2-8 for a single player against a single opponent.
    fn update_one(
        &self,
        mu: f64,
        phi: f64,
        sigma: f64,
        mu_opp: f64,
        phi_opp: f64,
        score: f64,
    ) -> Result<Glicko2State, RatingError> {
        // Step 2: opponent weight and expected score.
        let g_opp = g(phi_opp);
        let e = expected(mu, mu_opp, phi_opp);

        // Step 3: estimated variance of performance.
        let v = 1.0 / (g_opp * g_opp * e * (1.0 - e));

        // Step 4: rating change magnitude.
        let delta = v * g_opp * (score - e);

        // Step 5: new volatility via root finding.
        let new_sigma = self.solve_volatility(sigma, phi, v, delta)?;

        // Step 6: inflate pre-update uncertainty by the new volatility.
        let phi_star = (phi * phi + new_sigma * new_sigma).sqrt();

        // Step 7: new deviation and rating on the internal scale.
        let new_phi = 1.0 / (1.0 / (phi_star * phi_star) + 1.0 / v).sqrt();
        let new_mu = mu + new_phi * new_phi * g_opp * (score - e);

        // Step 8: back to the public scale.
        Ok(Glicko2State {
            rating: (SCALE * new_mu + 1500.0).round(),
            deviation: (SCALE * new_phi).round(),
            volatility: new_sigma,
        })
    }

    /// Solves `f(x) = 0` for `x = ln(sigma'^2)`, the log of the new
    /// volatility squared.
    fn solve_volatility(
        &self,
        sigma: f64,
        phi: f64,
        v: f64,
        delta: f64,
    ) -> Result<f64, RatingError> {
        let tau = self.settings.tau;
        let a = (sigma * sigma).ln();
        let phi_sq = phi * phi;
        let delta_sq = delta * delta;

        let f = |x: f64| {
            let ex = x.exp();
            let num = ex * (delta_sq - phi_sq - v - ex);
            let denom = 2.0 * (phi_sq + v + ex).powi(2);
            num / denom - (x - a) / (tau * tau)
        };

        let b = if delta_sq > phi_sq + v {
            (delta_sq - phi_sq - v).ln()
        } else {
            // Walk the lower endpoint out in tau-sized steps until the
            // function changes sign. The walk is capped like the main
            // iteration; running off the end means the inputs are
            // numerically pathological.
            let mut k = 1usize;
            while f(a - k as f64 * tau) < 0.0 {
                k += 1;
                if k > self.settings.max_iterations {
                    return Err(RatingError::NonConvergence(SolverError::MaxIterations {
                        max_iterations: self.settings.max_iterations,
                        bracket_width: k as f64 * tau,
                    }));
                }
            }
            a - k as f64 * tau
        };

        let root = solver::illinois(
            f,
            a,
            b,
            self.settings.convergence_tolerance,
            self.settings.max_iterations,
        )?;

        Ok((root / 2.0).exp())
    }
}

fn g(phi: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi * phi / (std::f64::consts::PI * std::f64::consts::PI)).sqrt()
}

fn expected(mu: f64, mu_opp: f64, phi_opp: f64) -> f64 {
    1.0 / (1.0 + (-g(phi_opp) * (mu - mu_opp)).exp())
}

fn validate(state: &Glicko2State) -> Result<(), RatingError> {
    if !state.rating.is_finite() {
        return Err(RatingError::InvalidState(format!(
            "rating {} is not finite",
            state.rating
        )));
    }
    if !state.deviation.is_finite() || state.deviation <= 0.0 {
        return Err(RatingError::InvalidState(format!(
            "deviation {} must be positive and finite",
            state.deviation
        )));
    }
    if !state.volatility.is_finite() || state.volatility <= 0.0 {
        return Err(RatingError::InvalidState(format!(
            "volatility {} must be positive and finite",
            state.volatility
        )));
    }
    Ok(())
}
