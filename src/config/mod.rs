pub mod settings;

pub use settings::{AppConfig, EloSettings, Glicko2Settings, RatingSettings};
