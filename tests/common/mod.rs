#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use taverna::config::SheetLayout;
use taverna::error::{ScoreError, ScoreResult};
use taverna::scoring::{Game, ScoringTable};
use taverna::session::{Confirmer, Notifier, Selector};
use taverna::store::{ColumnHandle, Grid, GridSnapshot, MemoryGrid, RowHandle, ScoreboardStore};
use taverna::update::ScoreUpdateService;

pub const ROSTER: [&str; 3] = ["Baumcy", "Jujubex", "Floydorc"];

/// Header plus one row per roster player, every game column present and blank.
pub fn scoreboard_rows() -> Vec<Vec<String>> {
    let mut header = vec!["Jogador".to_string()];
    header.extend(
        ScoringTable::embedded()
            .games()
            .iter()
            .map(|g| g.to_string()),
    );
    header.push("Total".to_string());

    let width = header.len();
    let mut rows = vec![header];
    for player in ROSTER {
        let mut row = vec![String::new(); width];
        row[0] = player.to_string();
        rows.push(row);
    }
    rows
}

pub fn roster() -> Vec<String> {
    ROSTER.iter().map(|s| s.to_string()).collect()
}

pub fn service() -> ScoreUpdateService {
    ScoreUpdateService::new(Arc::new(ScoringTable::embedded()))
}

pub fn all_games() -> Vec<Game> {
    ScoringTable::embedded().games().to_vec()
}

/// Grid whose contents stay inspectable after it is boxed into a store.
#[derive(Clone, Default)]
pub struct SharedGrid {
    pub inner: Arc<Mutex<MemoryGrid>>,
    /// Writes to these columns fail.
    pub failing_columns: Vec<ColumnHandle>,
}

impl SharedGrid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryGrid::new(rows))),
            failing_columns: Vec::new(),
        }
    }

    pub fn failing_on(mut self, column: ColumnHandle) -> Self {
        self.failing_columns.push(column);
        self
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<String> {
        let grid = self.inner.lock().unwrap();
        grid.rows()
            .get(row - 1)
            .and_then(|r| r.get(column - 1))
            .cloned()
    }

    /// Cell addressed by player name and header text.
    pub fn value(&self, player: &str, header: &str) -> Option<String> {
        let rows = self.inner.lock().unwrap().rows().to_vec();
        let col = rows[0].iter().position(|h| h == header)?;
        let row = rows.iter().position(|r| r.first().map(String::as_str) == Some(player))?;
        rows[row].get(col).cloned()
    }

    pub fn set(&self, player: &str, header: &str, value: &str) {
        let mut grid = self.inner.lock().unwrap();
        let rows = grid.rows().to_vec();
        let col = rows[0].iter().position(|h| h == header).unwrap();
        let row = rows
            .iter()
            .position(|r| r.first().map(String::as_str) == Some(player))
            .unwrap();
        grid.write_cell(RowHandle(row + 1), ColumnHandle(col + 1), value)
            .unwrap();
    }
}

impl Grid for SharedGrid {
    fn describe(&self) -> String {
        "shared test grid".into()
    }

    fn read_all(&mut self) -> ScoreResult<GridSnapshot> {
        self.inner.lock().unwrap().read_all()
    }

    fn read_cell(&mut self, row: RowHandle, column: ColumnHandle) -> ScoreResult<Option<String>> {
        self.inner.lock().unwrap().read_cell(row, column)
    }

    fn write_cell(&mut self, row: RowHandle, column: ColumnHandle, value: &str) -> ScoreResult<()> {
        if self.failing_columns.contains(&column) {
            return Err(ScoreError::StoreWrite("quota exceeded".into()));
        }
        self.inner.lock().unwrap().write_cell(row, column, value)
    }
}

pub fn store_over(grid: &SharedGrid) -> ScoreboardStore {
    ScoreboardStore::connected(grid.clone(), SheetLayout::default())
}

/// Answers selections from a script and records everything it was shown.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Option<String>>,
    confirm_answer: bool,
    pub titles: Vec<String>,
    pub offered: Vec<Vec<String>>,
    pub confirmed: Vec<String>,
    pub successes: usize,
    pub errors: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[Option<&str>], confirm_answer: bool) -> Self {
        Self {
            answers: answers.iter().map(|a| a.map(String::from)).collect(),
            confirm_answer,
            ..Default::default()
        }
    }

    /// A full happy-path transaction.
    pub fn answering(player: &str, game: &str, players: &str, position: &str) -> Self {
        Self::new(
            &[Some(player), Some(game), Some(players), Some(position)],
            true,
        )
    }
}

impl Selector for ScriptedPrompter {
    fn ask(&mut self, title: &str, _prompt_label: &str, options: &[String]) -> Option<String> {
        self.titles.push(title.to_string());
        self.offered.push(options.to_vec());
        self.answers.pop_front().flatten()
    }
}

impl Confirmer for ScriptedPrompter {
    fn confirm(&mut self, summary: &str) -> bool {
        self.confirmed.push(summary.to_string());
        self.confirm_answer
    }
}

impl Notifier for ScriptedPrompter {
    fn notify_success(&mut self) {
        self.successes += 1;
    }

    fn notify_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
