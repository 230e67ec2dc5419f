use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::domain::models::Snapshot;

/// Writes the store snapshot as pretty-printed JSON.
pub fn write_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;

    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    info!(
        "Exported {} players and {} matches to {}",
        snapshot.players.len(),
        snapshot.matches.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::PlayerState;
    use crate::rating::types::RatingScheme;
    use std::collections::BTreeMap;

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut players = BTreeMap::new();
        players.insert(
            "Alice".to_string(),
            PlayerState {
                rating: 1662.0,
                deviation: 290.0,
                volatility: 0.06,
                games_played: 1,
                wins: 1,
            },
        );
        let snapshot = Snapshot {
            scheme: RatingScheme::Glicko2,
            players,
            matches: Vec::new(),
        };

        let path = std::env::temp_dir().join("pingpong-ranking-export-test.json");
        write_snapshot(&snapshot, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["players"]["Alice"]["rating"], 1662.0);
        assert_eq!(value["players"]["Alice"]["wins"], 1);
        assert_eq!(value["scheme"], "Glicko2");
        fs::remove_file(&path).ok();
    }
}
