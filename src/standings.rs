use crate::config::SheetLayout;
use crate::error::{ScoreError, ScoreResult};
use crate::scoring::Game;
use crate::store::{parse_cell, GridSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingRow {
    pub player: String,
    pub per_game: Vec<(Game, u32)>,
    pub computed_total: u32,
    /// `None` when the sheet has no total column.
    pub recorded_total: Option<u32>,
}

impl StandingRow {
    /// The recorded total matches the sum of the game cells.
    pub fn is_consistent(&self) -> bool {
        self.recorded_total == Some(self.computed_total)
    }
}

/// Per-player totals from one snapshot, best first. Cells are read tolerantly
/// and games without a column contribute nothing.
pub fn compute_standings(
    snapshot: &GridSnapshot,
    layout: &SheetLayout,
    games: &[Game],
) -> ScoreResult<Vec<StandingRow>> {
    let key_column = snapshot.find_column(&layout.player_header).ok_or_else(|| {
        ScoreError::Config(format!(
            "Header '{}' missing from scoreboard",
            layout.player_header
        ))
    })?;
    let total_column = snapshot.find_column(&layout.total_column);
    let game_columns: Vec<_> = games
        .iter()
        .map(|&g| (g, snapshot.find_column(&g.to_string())))
        .collect();

    let mut rows = Vec::new();
    for (row, cells) in snapshot.data_rows() {
        let player = cells
            .get(key_column.0 - 1)
            .map(|s| s.trim())
            .unwrap_or_default();
        if player.is_empty() {
            continue;
        }

        let per_game: Vec<(Game, u32)> = game_columns
            .iter()
            .map(|&(g, col)| (g, col.map_or(0, |c| parse_cell(snapshot.cell(row, c)))))
            .collect();
        let computed_total = per_game
            .iter()
            .fold(0u32, |acc, &(_, v)| acc.saturating_add(v));

        rows.push(StandingRow {
            player: player.to_string(),
            per_game,
            computed_total,
            recorded_total: total_column.map(|c| parse_cell(snapshot.cell(row, c))),
        });
    }

    rows.sort_by(|a, b| {
        b.computed_total
            .cmp(&a.computed_total)
            .then_with(|| a.player.cmp(&b.player))
    });
    Ok(rows)
}
