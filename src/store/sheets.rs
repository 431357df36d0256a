use super::auth::{ServiceAccountKey, TokenSource, DRIVE_READONLY_SCOPE, SHEETS_SCOPE};
use super::{ColumnHandle, Grid, GridSnapshot, RowHandle};
use crate::config::StoreParams;
use crate::error::{ScoreError, ScoreResult};
use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const DRIVE_FILES_API: &str = "https://www.googleapis.com/drive/v3/files";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

// --- Wire types ---

#[derive(Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Deserialize)]
struct DriveFile {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    major_dimension: Option<String>,
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

// --- A1 notation ---

/// 1 → "A", 26 → "Z", 27 → "AA".
pub fn column_letters(column: usize) -> String {
    let mut n = column;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

pub fn quote_sheet_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

pub fn cell_range(title: &str, row: RowHandle, column: ColumnHandle) -> String {
    format!(
        "{}!{}{}",
        quote_sheet_title(title),
        column_letters(column.0),
        row.0
    )
}

/// Read URLs ask for raw cell values so number formatting ("1.200") never reaches the parser.
pub fn unformatted(mut url: Url) -> Url {
    url.query_pairs_mut()
        .append_pair("valueRenderOption", "UNFORMATTED_VALUE");
    url
}

pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The scoreboard worksheet behind the Google Sheets v4 REST API.
pub struct SheetsGrid {
    client: Client,
    tokens: TokenSource,
    spreadsheet_id: String,
    sheet_title: String,
}

impl SheetsGrid {
    /// Authenticates and opens the worksheet. Any failure here is terminal for the process.
    pub fn connect(params: &StoreParams) -> ScoreResult<Self> {
        let key = ServiceAccountKey::load_from_file(&params.credentials)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(params.timeout_secs))
            .build()?;

        let mut tokens = TokenSource::new(key, client.clone(), &[SHEETS_SCOPE, DRIVE_READONLY_SCOPE]);
        tokens.token()?;

        let spreadsheet_id = match &params.spreadsheet_id {
            Some(id) => id.clone(),
            None => resolve_by_name(&client, &mut tokens, &params.spreadsheet)?,
        };

        let mut grid = Self {
            client,
            tokens,
            spreadsheet_id,
            sheet_title: String::new(),
        };
        grid.sheet_title = grid.resolve_worksheet(params.worksheet.as_deref())?;

        info!(
            "📄 Opened worksheet '{}' of spreadsheet {}",
            grid.sheet_title, grid.spreadsheet_id
        );
        Ok(grid)
    }

    fn spreadsheet_url(&self, tail: &[&str]) -> ScoreResult<Url> {
        let mut url = Url::parse(SHEETS_API)
            .map_err(|e| ScoreError::Config(format!("Bad Sheets API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ScoreError::Config("Sheets API URL cannot take segments".into()))?
            .push(&self.spreadsheet_id)
            .extend(tail);
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&mut self, url: Url) -> ScoreResult<T> {
        let token = self.tokens.token()?;
        debug!("GET {}", url);
        let response = self.client.get(url).bearer_auth(token).send()?;
        Ok(check(response)?.json()?)
    }

    fn resolve_worksheet(&mut self, wanted: Option<&str>) -> ScoreResult<String> {
        let mut url = self.spreadsheet_url(&[])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties.title");
        let meta: SpreadsheetMeta = self.get_json(url)?;

        let titles: Vec<String> = meta.sheets.into_iter().map(|s| s.properties.title).collect();
        match wanted {
            Some(title) => titles
                .into_iter()
                .find(|t| t == title)
                .ok_or_else(|| ScoreError::Config(format!("Worksheet '{}' not found", title))),
            None => titles
                .into_iter()
                .next()
                .ok_or_else(|| ScoreError::Config("Spreadsheet has no worksheets".into())),
        }
    }

    fn values_url(&self, range: &str) -> ScoreResult<Url> {
        self.spreadsheet_url(&["values", range])
    }
}

impl Grid for SheetsGrid {
    fn describe(&self) -> String {
        format!(
            "Google Sheet {} / '{}'",
            self.spreadsheet_id, self.sheet_title
        )
    }

    fn read_all(&mut self) -> ScoreResult<GridSnapshot> {
        let url = unformatted(self.values_url(&quote_sheet_title(&self.sheet_title))?);
        let range: ValueRange = self.get_json(url)?;
        Ok(GridSnapshot::new(
            range
                .values
                .iter()
                .map(|row| row.iter().map(value_to_text).collect())
                .collect(),
        ))
    }

    fn read_cell(&mut self, row: RowHandle, column: ColumnHandle) -> ScoreResult<Option<String>> {
        let url = unformatted(self.values_url(&cell_range(&self.sheet_title, row, column))?);
        let range: ValueRange = self.get_json(url)?;
        Ok(range
            .values
            .first()
            .and_then(|r| r.first())
            .map(value_to_text))
    }

    fn write_cell(&mut self, row: RowHandle, column: ColumnHandle, value: &str) -> ScoreResult<()> {
        let a1 = cell_range(&self.sheet_title, row, column);
        let mut url = self.values_url(&a1)?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let cell = match value.parse::<u64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::from(value),
        };
        let body = ValueRange {
            range: Some(a1),
            major_dimension: Some("ROWS".into()),
            values: vec![vec![cell]],
        };

        let token = self.tokens.token()?;
        debug!("PUT {}", url);
        let response = self.client.put(url).bearer_auth(token).json(&body).send()?;
        check(response)?;
        Ok(())
    }
}

/// Finds the spreadsheet id by name among files shared with the service account.
fn resolve_by_name(client: &Client, tokens: &mut TokenSource, name: &str) -> ScoreResult<String> {
    let query = format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        name.replace('\\', "\\\\").replace('\'', "\\'"),
        SPREADSHEET_MIME
    );
    let mut url = Url::parse(DRIVE_FILES_API)
        .map_err(|e| ScoreError::Config(format!("Bad Drive API URL: {}", e)))?;
    url.query_pairs_mut()
        .append_pair("q", &query)
        .append_pair("fields", "files(id,name)")
        .append_pair("pageSize", "10");

    let token = tokens.token()?;
    let response = client.get(url).bearer_auth(token).send()?;
    let list: DriveFileList = check(response)?.json()?;

    let file = list.files.into_iter().next().ok_or_else(|| {
        ScoreError::Config(format!(
            "Spreadsheet '{}' is not shared with {}",
            name,
            tokens.client_email()
        ))
    })?;
    debug!("Resolved spreadsheet '{}' to {}", file.name, file.id);
    Ok(file.id)
}

fn check(response: Response) -> ScoreResult<Response> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let body = response.text().unwrap_or_default();
        return Err(ScoreError::Auth(format!("{} from Google API: {}", status, body)));
    }
    Ok(response.error_for_status()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters_follow_spreadsheet_naming() {
        assert_eq!(column_letters(1), "A");
        assert_eq!(column_letters(13), "M");
        assert_eq!(column_letters(26), "Z");
        assert_eq!(column_letters(27), "AA");
        assert_eq!(column_letters(52), "AZ");
        assert_eq!(column_letters(703), "AAA");
    }

    #[test]
    fn cell_range_quotes_titles() {
        assert_eq!(
            cell_range("Página1", RowHandle(5), ColumnHandle(3)),
            "'Página1'!C5"
        );
        assert_eq!(
            cell_range("Bob's", RowHandle(2), ColumnHandle(1)),
            "'Bob''s'!A2"
        );
    }

    #[test]
    fn reads_request_unformatted_values() {
        let url = Url::parse("https://sheets.googleapis.com/v4/spreadsheets/abc/values/A1").unwrap();
        let url = unformatted(url);
        assert_eq!(url.query(), Some("valueRenderOption=UNFORMATTED_VALUE"));
        // A grouped number arrives as a JSON number and reads back whole
        assert_eq!(value_to_text(&Value::from(1200)), "1200");
    }

    #[test]
    fn values_render_as_text() {
        assert_eq!(value_to_text(&Value::from(30)), "30");
        assert_eq!(value_to_text(&Value::from("Jujubex")), "Jujubex");
        assert_eq!(value_to_text(&Value::Null), "");
    }

    #[test]
    fn value_range_reads_sparse_payloads() {
        let range: ValueRange = serde_json::from_str(r#"{"range": "'S'!A1:B2"}"#).unwrap();
        assert!(range.values.is_empty());

        let range: ValueRange =
            serde_json::from_str(r#"{"values": [["Jogador", "Total"], ["Baumcy", 12]]}"#).unwrap();
        assert_eq!(value_to_text(&range.values[1][1]), "12");
    }
}
