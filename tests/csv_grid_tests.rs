use std::fs;
use std::io::Write;
use taverna::config::SheetLayout;
use taverna::error::ScoreError;
use taverna::store::{ColumnHandle, CsvGrid, Grid, RowHandle, ScoreboardStore};
use tempfile::NamedTempFile;

fn scoreboard_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
fn missing_file_cannot_be_opened() {
    assert!(matches!(
        CsvGrid::open("/nonexistent/scoreboard.csv"),
        Err(ScoreError::Config(_))
    ));
}

#[test]
fn reads_ragged_rows() {
    let file = scoreboard_file("Jogador,Imagine,Total\nBaumcy,4\nJujubex,,1\n");
    let mut grid = CsvGrid::open(file.path()).unwrap();

    let snapshot = grid.read_all().unwrap();
    assert_eq!(snapshot.rows().len(), 3);
    assert_eq!(snapshot.cell(RowHandle(2), ColumnHandle(2)), Some("4"));
    assert_eq!(snapshot.cell(RowHandle(2), ColumnHandle(3)), None);
    assert_eq!(
        grid.read_cell(RowHandle(3), ColumnHandle(3)).unwrap().as_deref(),
        Some("1")
    );
}

#[test]
fn writes_persist_to_disk() {
    let file = scoreboard_file("Jogador,Imagine,Total\nBaumcy,4,4\n");
    let mut grid = CsvGrid::open(file.path()).unwrap();

    grid.write_cell(RowHandle(2), ColumnHandle(2), "44").unwrap();

    let text = fs::read_to_string(file.path()).unwrap();
    assert_eq!(text.lines().nth(1), Some("Baumcy,44,4"));
}

#[test]
fn outside_edits_are_seen_on_the_next_read() {
    let file = scoreboard_file("Jogador,Imagine,Total\nBaumcy,4,4\n");
    let mut store = ScoreboardStore::connected(
        CsvGrid::open(file.path()).unwrap(),
        SheetLayout::default(),
    );
    assert_eq!(store.read_cell(RowHandle(2), ColumnHandle(2)).unwrap(), 4);

    fs::write(file.path(), "Jogador,Imagine,Total\nBaumcy,9,9\n").unwrap();
    assert_eq!(store.read_cell(RowHandle(2), ColumnHandle(2)).unwrap(), 9);
}

#[test]
fn names_with_commas_survive_a_write() {
    let file = scoreboard_file("Jogador,Imagine,Total\n\"Pola, a destruidora\",1,1\n");
    let mut store = ScoreboardStore::connected(
        CsvGrid::open(file.path()).unwrap(),
        SheetLayout::default(),
    );

    let row = store.find_row("Pola, a destruidora").unwrap().unwrap();
    store.write_cell(row, ColumnHandle(2), 5).unwrap();

    let text = fs::read_to_string(file.path()).unwrap();
    assert!(text.contains("\"Pola, a destruidora\",5,1"));
}
