pub mod models;

pub use models::{MatchRecord, PlayerState, Snapshot, Standing};
