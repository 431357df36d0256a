use taverna::audit::audit_schema;
use taverna::config::SheetLayout;
use taverna::error::ScoreError;
use taverna::scoring::Game;
use taverna::standings::compute_standings;
use taverna::store::GridSnapshot;

fn snapshot(rows: &[&[&str]]) -> GridSnapshot {
    GridSnapshot::new(
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

const GAMES: [Game; 2] = [Game::Imagine, Game::HalliGalli];

#[test]
fn standings_are_ranked_by_computed_total() {
    let snap = snapshot(&[
        &["Jogador", "Imagine", "Halli Galli", "Total"],
        &["Baumcy", "10", "", "10"],
        &["Jujubex", "20", "15", "35"],
        &["Floydorc", "abc", "10", "99"],
        &["", "", "", ""],
        &["Camicaze", "10", "", "10"],
    ]);

    let rows = compute_standings(&snap, &SheetLayout::default(), &GAMES).unwrap();

    let order: Vec<&str> = rows.iter().map(|r| r.player.as_str()).collect();
    assert_eq!(order, ["Jujubex", "Baumcy", "Camicaze", "Floydorc"]);
    assert_eq!(rows[0].computed_total, 35);
    assert!(rows[0].is_consistent());

    let floydorc = &rows[3];
    assert_eq!(floydorc.per_game, [(Game::Imagine, 0), (Game::HalliGalli, 10)]);
    assert_eq!(floydorc.recorded_total, Some(99));
    assert!(!floydorc.is_consistent());
}

#[test]
fn missing_columns_contribute_nothing() {
    let snap = snapshot(&[&["Jogador", "Imagine"], &["Baumcy", "7"]]);
    let rows = compute_standings(&snap, &SheetLayout::default(), &GAMES).unwrap();

    assert_eq!(rows[0].computed_total, 7);
    assert_eq!(rows[0].recorded_total, None);
    assert!(!rows[0].is_consistent());
}

#[test]
fn standings_need_the_player_header() {
    let snap = snapshot(&[&["Nome", "Imagine"], &["Baumcy", "7"]]);
    assert!(matches!(
        compute_standings(&snap, &SheetLayout::default(), &GAMES),
        Err(ScoreError::Config(_))
    ));
}

#[test]
fn audit_reports_layout_drift() {
    let snap = snapshot(&[
        &["Jogador", "Imagine", "Soma"],
        &["Baumcy", "1", "1"],
        &["Visitante", "", ""],
    ]);
    let roster = vec!["Baumcy".to_string(), "Jujubex".to_string()];

    let report = audit_schema(&snap, &SheetLayout::default(), &roster, &GAMES);

    assert!(!report.is_clean());
    assert!(!report.player_header_missing);
    assert!(report.total_missing);
    assert_eq!(report.missing_players, ["Jujubex"]);
    assert_eq!(report.missing_games, [Game::HalliGalli]);
    assert_eq!(report.extra_players, ["Visitante"]);
}

#[test]
fn extra_rows_alone_keep_the_audit_clean() {
    let snap = snapshot(&[
        &["Jogador", "Imagine", "Halli Galli", "Total"],
        &["Baumcy", "", "", ""],
        &["Visitante", "", "", ""],
    ]);
    let report = audit_schema(&snap, &SheetLayout::default(), &["Baumcy".to_string()], &GAMES);
    assert!(report.is_clean());
    assert_eq!(report.extra_players, ["Visitante"]);
}

#[test]
fn audit_without_player_header_lists_the_whole_roster() {
    let snap = snapshot(&[&["Nome", "Imagine", "Halli Galli", "Total"]]);
    let roster = vec!["Baumcy".to_string()];
    let report = audit_schema(&snap, &SheetLayout::default(), &roster, &GAMES);
    assert!(report.player_header_missing);
    assert_eq!(report.missing_players, roster);
}
