use super::{ColumnHandle, RowHandle};

/// A full read of the grid. Row 1 is the header row; handles are 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridSnapshot {
    rows: Vec<Vec<String>>,
}

impl GridSnapshot {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// First header cell equal to `name` (surrounding whitespace ignored).
    pub fn find_column(&self, name: &str) -> Option<ColumnHandle> {
        let name = name.trim();
        self.header()
            .iter()
            .position(|h| h.trim() == name)
            .map(|i| ColumnHandle(i + 1))
    }

    /// First data row whose `key_column` cell equals `value`.
    pub fn find_row(&self, key_column: ColumnHandle, value: &str) -> Option<RowHandle> {
        let value = value.trim();
        self.rows
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, row)| {
                row.get(key_column.0 - 1)
                    .is_some_and(|cell| cell.trim() == value)
            })
            .map(|(i, _)| RowHandle(i + 1))
    }

    pub fn cell(&self, row: RowHandle, column: ColumnHandle) -> Option<&str> {
        self.rows
            .get(row.0.checked_sub(1)?)?
            .get(column.0.checked_sub(1)?)
            .map(String::as_str)
    }

    /// Data rows (header excluded) paired with their handles.
    pub fn data_rows(&self) -> impl Iterator<Item = (RowHandle, &[String])> {
        self.rows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, r)| (RowHandle(i + 1), r.as_slice()))
    }
}
