use colored::Colorize;

use crate::domain::models::{MatchRecord, Standing};

/// Plain-text leaderboard, one row per player.
pub fn render_standings(standings: &[Standing]) -> String {
    if standings.is_empty() {
        return "No players yet. Add a player to get started!".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:>4}  {:<20} {:>7} {:>5} {:>8} {:>7}  {}\n",
        "Rank", "Player", "Rating", "RD", "Vol", "Win%", "Record"
    ));

    for standing in standings {
        let rank = paint_rank(standing.rank);
        let state = &standing.state;
        out.push_str(&format!(
            "{rank}  {:<20} {:>7} {:>5} {:>8.4} {:>6.1}%  {}-{}\n",
            standing.name,
            state.rating as i64,
            state.deviation as i64,
            state.volatility,
            state.win_rate(),
            state.wins,
            state.games_played - state.wins,
        ));
    }

    out
}

// Top three get podium colors. Padding happens before painting so the
// escape codes do not throw off column widths.
fn paint_rank(rank: usize) -> String {
    let text = format!("{rank:>4}");
    match rank {
        1 => text.yellow().bold().to_string(),
        2 => text.bright_white().bold().to_string(),
        3 => text.truecolor(205, 127, 50).to_string(),
        _ => text,
    }
}

/// One line per match, e.g. `Alice (+16) defeated Bob (-16) 11-7 on 2026-08-06`.
pub fn render_match(record: &MatchRecord) -> String {
    let score = match (record.winner_score, record.loser_score) {
        (Some(w), Some(l)) => format!(" {w}-{l}"),
        _ => String::new(),
    };

    format!(
        "{} ({:+}) defeated {} ({:+}){} on {}",
        record.winner.bold(),
        record.winner_rating_change,
        record.loser.bold(),
        record.loser_rating_change,
        score,
        record.played_at.format("%Y-%m-%d"),
    )
}

pub fn render_recent(matches: &[MatchRecord]) -> String {
    if matches.is_empty() {
        return "No matches played yet.".to_string();
    }

    matches
        .iter()
        .map(render_match)
        .collect::<Vec<_>>()
        .join("\n")
}
