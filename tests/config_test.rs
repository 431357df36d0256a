use clap::{CommandFactory, FromArgMatches, Parser};
use std::io::Write;
use taverna::config::{Config, RosterDefinitions, StoreBackend, DEFAULT_ROSTER, DEFAULT_SPREADSHEET};
use taverna::error::ScoreError;
use tempfile::NamedTempFile;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> (Config, clap::ArgMatches) {
    let matches = TestCli::command()
        .try_get_matches_from(std::iter::once("taverna").chain(args.iter().copied()))
        .unwrap();
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.config, matches)
}

fn write_config(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", json).unwrap();
    file
}

#[test]
fn defaults_match_the_league_setup() {
    let (config, _) = parse(&[]);
    assert_eq!(config.store.backend, StoreBackend::Sheets);
    assert_eq!(config.store.spreadsheet, DEFAULT_SPREADSHEET);
    assert_eq!(config.layout.player_header, "Jogador");
    assert_eq!(config.layout.total_column, "Total");
    assert_eq!(config.roster.get_players().len(), 8);
    assert_eq!(config.roster.get_players()[0], "The_Lernos");
}

#[test]
fn partial_file_falls_back_to_defaults() {
    let file = write_config(r#"{ "store": { "backend": "csv", "csv_path": "liga.csv" } }"#);
    let config = Config::load_from_file(file.path()).unwrap();

    assert_eq!(config.store.backend, StoreBackend::Csv);
    assert_eq!(config.store.csv_path, "liga.csv");
    assert_eq!(config.store.timeout_secs, 30);
    assert_eq!(config.roster.players, DEFAULT_ROSTER);
}

#[test]
fn explicit_flags_override_the_file() {
    let file = write_config(
        r#"{ "store": { "backend": "csv", "csv_path": "liga.csv", "worksheet": "2024" },
             "roster": { "players": "A,B" } }"#,
    );
    let mut config = Config::load_from_file(file.path()).unwrap();
    let (cli, matches) = parse(&["--csv-path", "outra.csv", "--total-column", "Soma"]);

    config.merge_from_cli(&cli, &matches);

    assert_eq!(config.store.csv_path, "outra.csv");
    assert_eq!(config.layout.total_column, "Soma");
    // Values only present as clap defaults do not clobber the file
    assert_eq!(config.store.backend, StoreBackend::Csv);
    assert_eq!(config.store.worksheet.as_deref(), Some("2024"));
    assert_eq!(config.roster.get_players(), ["A", "B"]);
}

#[test]
fn broken_file_is_an_error() {
    let file = write_config("{ not json");
    assert!(matches!(
        Config::load_from_file(file.path()),
        Err(ScoreError::Json(_))
    ));
    assert!(matches!(
        Config::load_from_file("/nonexistent/taverna.json"),
        Err(ScoreError::Config(_))
    ));
}

#[test]
fn roster_parsing_and_validation() {
    let roster = RosterDefinitions {
        players: " Baumcy , Jujubex,,Floydorc ".into(),
    };
    assert_eq!(roster.get_players(), ["Baumcy", "Jujubex", "Floydorc"]);
    assert!(roster.validate().is_ok());

    let empty = RosterDefinitions { players: " , ".into() };
    assert!(matches!(empty.validate(), Err(ScoreError::Config(_))));

    let dup = RosterDefinitions {
        players: "Baumcy,Jujubex,Baumcy".into(),
    };
    let err = dup.validate().unwrap_err();
    assert!(err.to_string().contains("Baumcy"));
}
