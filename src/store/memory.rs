use super::{ColumnHandle, Grid, GridSnapshot, RowHandle};
use crate::error::{ScoreError, ScoreResult};

/// Grid held in memory. Writes outside the current bounds grow the grid.
#[derive(Debug, Clone, Default)]
pub struct MemoryGrid {
    rows: Vec<Vec<String>>,
}

impl MemoryGrid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn from_rows(rows: &[&[&str]]) -> Self {
        Self::new(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub(crate) fn get(&self, row: RowHandle, column: ColumnHandle) -> Option<&String> {
        self.rows
            .get(row.0.checked_sub(1)?)?
            .get(column.0.checked_sub(1)?)
    }

    pub(crate) fn set(&mut self, row: RowHandle, column: ColumnHandle, value: &str) -> ScoreResult<()> {
        if row.0 == 0 || column.0 == 0 {
            return Err(ScoreError::StoreWrite(format!(
                "Invalid cell ({}, {})",
                row.0, column.0
            )));
        }
        if self.rows.len() < row.0 {
            self.rows.resize_with(row.0, Vec::new);
        }
        let cells = &mut self.rows[row.0 - 1];
        if cells.len() < column.0 {
            cells.resize(column.0, String::new());
        }
        cells[column.0 - 1] = value.to_string();
        Ok(())
    }
}

impl Grid for MemoryGrid {
    fn describe(&self) -> String {
        format!("in-memory grid ({} rows)", self.rows.len())
    }

    fn read_all(&mut self) -> ScoreResult<GridSnapshot> {
        Ok(GridSnapshot::new(self.rows.clone()))
    }

    fn read_cell(&mut self, row: RowHandle, column: ColumnHandle) -> ScoreResult<Option<String>> {
        Ok(self.get(row, column).cloned())
    }

    fn write_cell(&mut self, row: RowHandle, column: ColumnHandle, value: &str) -> ScoreResult<()> {
        self.set(row, column, value)
    }
}
