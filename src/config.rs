use crate::error::{ScoreError, ScoreResult};
use clap::{parser::ValueSource, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const DEFAULT_ROSTER: &str =
    "The_Lernos,Jujubex,The Rauls,Baumcy,Camicaze,Pola destruidora,Mike Ty,Floydorc";
pub const DEFAULT_SPREADSHEET: &str = "Tabela_de_pontos";
pub const DEFAULT_CREDENTIALS: &str = "credentials.json";
pub const DEFAULT_CSV_PATH: &str = "scoreboard.csv";
pub const DEFAULT_PLAYER_HEADER: &str = "Jogador";
pub const DEFAULT_TOTAL_COLUMN: &str = "Total";

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    #[serde(default)]
    pub store: StoreParams,
    #[command(flatten)]
    #[serde(default)]
    pub layout: SheetLayout,
    #[command(flatten)]
    #[serde(default)]
    pub roster: RosterDefinitions,
}

#[derive(Debug, Clone, Copy, ValueEnum, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Google Sheets over the REST API
    #[default]
    Sheets,
    /// Local CSV file with the same layout
    Csv,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreParams {
    #[arg(long, value_enum, default_value_t = StoreBackend::Sheets)]
    pub backend: StoreBackend,

    /// Service-account key file
    #[arg(long, default_value = DEFAULT_CREDENTIALS)]
    pub credentials: String,

    /// Spreadsheet name, resolved through Drive when no id is given
    #[arg(long, default_value = DEFAULT_SPREADSHEET)]
    pub spreadsheet: String,

    #[arg(long)]
    pub spreadsheet_id: Option<String>,

    /// Worksheet title (first sheet when omitted)
    #[arg(long)]
    pub worksheet: Option<String>,

    #[arg(long, default_value = DEFAULT_CSV_PATH)]
    pub csv_path: String,

    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

impl Default for StoreParams {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sheets,
            credentials: DEFAULT_CREDENTIALS.to_string(),
            spreadsheet: DEFAULT_SPREADSHEET.to_string(),
            spreadsheet_id: None,
            worksheet: None,
            csv_path: DEFAULT_CSV_PATH.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Header names the scoreboard is addressed by.
#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SheetLayout {
    #[arg(long, default_value = DEFAULT_PLAYER_HEADER)]
    pub player_header: String,
    #[arg(long, default_value = DEFAULT_TOTAL_COLUMN)]
    pub total_column: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            player_header: DEFAULT_PLAYER_HEADER.to_string(),
            total_column: DEFAULT_TOTAL_COLUMN.to_string(),
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterDefinitions {
    /// Comma-separated roster, in display order
    #[arg(long, default_value = DEFAULT_ROSTER)]
    pub players: String,
}

impl Default for RosterDefinitions {
    fn default() -> Self {
        Self {
            players: DEFAULT_ROSTER.to_string(),
        }
    }
}

impl RosterDefinitions {
    pub fn get_players(&self) -> Vec<String> {
        self.players
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> ScoreResult<()> {
        let players = self.get_players();
        if players.is_empty() {
            return Err(ScoreError::Config("Roster is empty".into()));
        }

        let mut seen = HashSet::new();
        for p in &players {
            if !seen.insert(p.as_str()) {
                return Err(ScoreError::Config(format!(
                    "Player '{}' is listed twice in the roster",
                    p
                )));
            }
        }
        Ok(())
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ScoreResult<Self> {
        let content = fs::read_to_string(&path).map_err(|e| {
            ScoreError::Config(format!(
                "Failed to read config '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Copies every flag the user typed explicitly onto `self`.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(store.backend);
        update_if_present!(store.credentials);
        update_if_present!(store.spreadsheet);
        update_if_present!(store.spreadsheet_id);
        update_if_present!(store.worksheet);
        update_if_present!(store.csv_path);
        update_if_present!(store.timeout_secs);

        update_if_present!(layout.player_header);
        update_if_present!(layout.total_column);

        update_if_present!(roster.players);
    }
}
