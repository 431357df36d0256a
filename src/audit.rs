use crate::config::SheetLayout;
use crate::scoring::Game;
use crate::store::GridSnapshot;
use std::collections::HashSet;

/// Differences between the configured roster/catalog and the sheet layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
    pub player_header_missing: bool,
    pub total_missing: bool,
    pub missing_players: Vec<String>,
    pub missing_games: Vec<Game>,
    /// Rows in the sheet that are not on the roster. Informational only.
    pub extra_players: Vec<String>,
}

impl SchemaReport {
    pub fn is_clean(&self) -> bool {
        !self.player_header_missing
            && !self.total_missing
            && self.missing_players.is_empty()
            && self.missing_games.is_empty()
    }
}

pub fn audit_schema(
    snapshot: &GridSnapshot,
    layout: &SheetLayout,
    roster: &[String],
    games: &[Game],
) -> SchemaReport {
    let mut report = SchemaReport {
        total_missing: snapshot.find_column(&layout.total_column).is_none(),
        missing_games: games
            .iter()
            .copied()
            .filter(|g| snapshot.find_column(&g.to_string()).is_none())
            .collect(),
        ..Default::default()
    };

    let Some(key_column) = snapshot.find_column(&layout.player_header) else {
        report.player_header_missing = true;
        report.missing_players = roster.to_vec();
        return report;
    };

    let listed: HashSet<&str> = snapshot
        .data_rows()
        .filter_map(|(_, cells)| cells.get(key_column.0 - 1))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    report.missing_players = roster
        .iter()
        .filter(|p| !listed.contains(p.as_str()))
        .cloned()
        .collect();

    let on_roster: HashSet<&str> = roster.iter().map(String::as_str).collect();
    let mut extra: Vec<String> = listed
        .into_iter()
        .filter(|p| !on_roster.contains(p))
        .map(String::from)
        .collect();
    extra.sort();
    report.extra_players = extra;

    report
}
