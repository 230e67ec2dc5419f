use crate::rating::types::RatingScheme;

#[derive(Debug, Clone)]
pub struct EloSettings {
    pub k_factor: f64,
    pub initial_rating: f64,
}

impl Default for EloSettings {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            initial_rating: 1200.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Glicko2Settings {
    pub tau: f64,
    pub initial_rating: f64,
    pub initial_deviation: f64,
    pub initial_volatility: f64,
    pub convergence_tolerance: f64,
    pub max_iterations: usize,
}

impl Default for Glicko2Settings {
    fn default() -> Self {
        Self {
            // Glickman recommends tau between 0.3 and 1.2; lower values keep
            // volatility changes small.
            tau: 0.5,
            initial_rating: 1500.0,
            initial_deviation: 350.0,
            initial_volatility: 0.06,
            convergence_tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub scheme: RatingScheme,
    pub elo: EloSettings,
    pub glicko2: Glicko2Settings,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            scheme: RatingScheme::Glicko2,
            elo: EloSettings::default(),
            glicko2: Glicko2Settings::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rating: RatingSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
        }
    }

    pub fn with_scheme(scheme: RatingScheme) -> Self {
        Self {
            rating: RatingSettings {
                scheme,
                ..RatingSettings::default()
            },
        }
    }
}

// Config is passed explicitly (dependency injection) rather than read from
// globals, so multiple rating policies can coexist in one process.
