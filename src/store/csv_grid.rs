use super::memory::MemoryGrid;
use super::{ColumnHandle, Grid, GridSnapshot, RowHandle};
use crate::error::{ScoreError, ScoreResult};
use std::path::{Path, PathBuf};

/// Scoreboard kept in a local CSV file. Every call goes back to disk so
/// edits made outside the process are seen, as with the remote sheet.
pub struct CsvGrid {
    path: PathBuf,
}

impl CsvGrid {
    /// The file must already exist; the layout is provisioned outside this tool.
    pub fn open<P: AsRef<Path>>(path: P) -> ScoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(ScoreError::Config(format!(
                "Scoreboard file '{}' does not exist",
                path.display()
            )));
        }
        let grid = Self { path };
        grid.load()?;
        Ok(grid)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> ScoreResult<MemoryGrid> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(String::from).collect());
        }
        Ok(MemoryGrid::new(rows))
    }

    fn persist(&self, grid: &MemoryGrid) -> ScoreResult<()> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;
        for row in grid.rows() {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl Grid for CsvGrid {
    fn describe(&self) -> String {
        format!("csv file '{}'", self.path.display())
    }

    fn read_all(&mut self) -> ScoreResult<GridSnapshot> {
        Ok(GridSnapshot::new(self.load()?.rows().to_vec()))
    }

    fn read_cell(&mut self, row: RowHandle, column: ColumnHandle) -> ScoreResult<Option<String>> {
        Ok(self.load()?.get(row, column).cloned())
    }

    fn write_cell(&mut self, row: RowHandle, column: ColumnHandle, value: &str) -> ScoreResult<()> {
        let mut grid = self.load()?;
        grid.set(row, column, value)?;
        self.persist(&grid)
    }
}
