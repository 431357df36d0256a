pub mod auth;
pub mod csv_grid;
pub mod memory;
pub mod sheets;
pub mod snapshot;

pub use self::csv_grid::CsvGrid;
pub use self::memory::MemoryGrid;
pub use self::sheets::SheetsGrid;
pub use self::snapshot::GridSnapshot;

use crate::config::{Config, SheetLayout, StoreBackend};
use crate::error::{ScoreError, ScoreResult};
use tracing::{debug, error, info, warn};

/// 1-based row index; row 1 is the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowHandle(pub usize);

/// 1-based column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnHandle(pub usize);

/// Raw cell access to whatever holds the scoreboard.
pub trait Grid {
    fn describe(&self) -> String;
    fn read_all(&mut self) -> ScoreResult<GridSnapshot>;
    fn read_cell(&mut self, row: RowHandle, column: ColumnHandle) -> ScoreResult<Option<String>>;
    fn write_cell(&mut self, row: RowHandle, column: ColumnHandle, value: &str)
        -> ScoreResult<()>;
}

/// Tolerant integer read: anything but plain ASCII digits is 0.
/// Digit strings past `u32::MAX` saturate rather than reset.
pub fn parse_cell(raw: Option<&str>) -> u32 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        .map(|s| s.parse().unwrap_or(u32::MAX))
        .unwrap_or(0)
}

/// Backend calls actually attempted. Refused calls on a disconnected store are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub reads: usize,
    pub writes: usize,
}

enum Connection {
    Connected(Box<dyn Grid>),
    Disconnected(String),
}

pub struct ScoreboardStore {
    connection: Connection,
    layout: SheetLayout,
    stats: StoreStats,
}

impl ScoreboardStore {
    pub fn connected(grid: impl Grid + 'static, layout: SheetLayout) -> Self {
        Self::from_boxed(Box::new(grid), layout)
    }

    pub fn from_boxed(grid: Box<dyn Grid>, layout: SheetLayout) -> Self {
        Self {
            connection: Connection::Connected(grid),
            layout,
            stats: StoreStats::default(),
        }
    }

    pub fn disconnected(reason: impl Into<String>, layout: SheetLayout) -> Self {
        Self {
            connection: Connection::Disconnected(reason.into()),
            layout,
            stats: StoreStats::default(),
        }
    }

    /// Opens the configured backend once. Any setup failure leaves the store
    /// disconnected for the rest of the process; there is no reconnect.
    pub fn open(config: &Config) -> Self {
        let layout = config.layout.clone();
        let grid: ScoreResult<Box<dyn Grid>> = match config.store.backend {
            StoreBackend::Csv => {
                CsvGrid::open(&config.store.csv_path).map(|g| Box::new(g) as Box<dyn Grid>)
            }
            StoreBackend::Sheets => {
                SheetsGrid::connect(&config.store).map(|g| Box::new(g) as Box<dyn Grid>)
            }
        };

        match grid {
            Ok(grid) => {
                info!("✅ Connected to scoreboard: {}", grid.describe());
                Self::from_boxed(grid, layout)
            }
            Err(e) => {
                error!("❌ Could not open scoreboard: {}", e);
                Self::disconnected(e.to_string(), layout)
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.connection, Connection::Connected(_))
    }

    /// Fails fast with `NotConnected` while disconnected.
    pub fn ensure_connected(&self) -> ScoreResult<()> {
        match &self.connection {
            Connection::Connected(_) => Ok(()),
            Connection::Disconnected(reason) => Err(ScoreError::NotConnected(reason.clone())),
        }
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    pub fn stats(&self) -> StoreStats {
        self.stats
    }

    fn backend(&mut self) -> ScoreResult<(&mut Box<dyn Grid>, &mut StoreStats)> {
        let Self {
            connection, stats, ..
        } = self;
        match connection {
            Connection::Connected(grid) => Ok((grid, stats)),
            Connection::Disconnected(reason) => Err(ScoreError::NotConnected(reason.clone())),
        }
    }

    pub fn snapshot(&mut self) -> ScoreResult<GridSnapshot> {
        let (grid, stats) = self.backend()?;
        stats.reads += 1;
        grid.read_all().map_err(as_read_error)
    }

    /// Looks the player up under the configured player header.
    pub fn find_row(&mut self, player: &str) -> ScoreResult<Option<RowHandle>> {
        let snapshot = self.snapshot()?;
        let Some(key_column) = snapshot.find_column(&self.layout.player_header) else {
            warn!(
                "⚠️  Header '{}' missing from scoreboard; cannot locate players.",
                self.layout.player_header
            );
            return Ok(None);
        };
        Ok(snapshot.find_row(key_column, player))
    }

    /// Searches the header row; used for game columns and the total column.
    pub fn find_column(&mut self, name: &str) -> ScoreResult<Option<ColumnHandle>> {
        Ok(self.snapshot()?.find_column(name))
    }

    /// Empty, missing or non-numeric cells read as 0.
    pub fn read_cell(&mut self, row: RowHandle, column: ColumnHandle) -> ScoreResult<u32> {
        let (grid, stats) = self.backend()?;
        stats.reads += 1;
        let raw = grid.read_cell(row, column).map_err(as_read_error)?;
        let value = parse_cell(raw.as_deref());
        if let Some(text) = raw.as_deref() {
            if value == 0 && !text.trim().is_empty() && text.trim() != "0" {
                debug!(
                    "Cell ({}, {}) holds non-numeric '{}'; reading as 0",
                    row.0, column.0, text
                );
            }
        }
        Ok(value)
    }

    pub fn write_cell(&mut self, row: RowHandle, column: ColumnHandle, value: u32) -> ScoreResult<()> {
        let (grid, stats) = self.backend()?;
        stats.writes += 1;
        debug!("Writing {} to ({}, {})", value, row.0, column.0);
        grid.write_cell(row, column, &value.to_string())
            .map_err(as_write_error)
    }
}

fn as_read_error(e: ScoreError) -> ScoreError {
    match e {
        ScoreError::NotConnected(_) | ScoreError::StoreRead(_) => e,
        other => ScoreError::StoreRead(other.to_string()),
    }
}

fn as_write_error(e: ScoreError) -> ScoreError {
    match e {
        ScoreError::NotConnected(_) | ScoreError::StoreWrite(_) => e,
        other => ScoreError::StoreWrite(other.to_string()),
    }
}
