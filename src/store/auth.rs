//! Service-account OAuth for the Google APIs: a signed RS256 assertion is
//! exchanged for a short-lived bearer token, which is cached until shortly
//! before it expires.

use crate::error::{ScoreError, ScoreResult};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const DRIVE_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_TTL_SECS: u64 = 3600;
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// The subset of a Google service-account key file we need.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ScoreResult<Self> {
        let content = fs::read_to_string(&path).map_err(|e| {
            ScoreError::Auth(format!(
                "Failed to read credentials '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| ScoreError::Auth(format!("Malformed credentials file: {}", e)))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_TTL_SECS
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

pub struct TokenSource {
    key: ServiceAccountKey,
    client: Client,
    scope: String,
    cached: Option<CachedToken>,
}

impl TokenSource {
    pub fn new(key: ServiceAccountKey, client: Client, scopes: &[&str]) -> Self {
        Self {
            key,
            client,
            scope: scopes.join(" "),
            cached: None,
        }
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Signs the JWT-bearer assertion sent to the token endpoint.
    pub fn assertion(&self, now: SystemTime) -> ScoreResult<String> {
        let iat = now
            .duration_since(UNIX_EPOCH)
            .map_err(|_| ScoreError::Auth("System clock is before the epoch".into()))?
            .as_secs();

        let claims = AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: self.scope.clone(),
            aud: self.key.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_TTL_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        let key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())?;
        Ok(encode(&header, &claims, &key)?)
    }

    /// A valid bearer token, minting a new one when the cached one is about to lapse.
    pub fn token(&mut self) -> ScoreResult<String> {
        if let Some(cached) = &self.cached {
            if cached.expires_at > Instant::now() + REFRESH_MARGIN {
                return Ok(cached.value.clone());
            }
            debug!("Access token about to expire; requesting a new one");
        }

        let fresh = self.exchange()?;
        let value = fresh.value.clone();
        self.cached = Some(fresh);
        Ok(value)
    }

    fn exchange(&self) -> ScoreResult<CachedToken> {
        let assertion = self.assertion(SystemTime::now())?;
        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ScoreError::Auth(format!(
                "Token exchange rejected ({}): {}",
                status, body
            )));
        }

        let token: TokenResponse = response.json()?;
        info!("🔑 Authorized as {}", self.key.client_email);
        Ok(CachedToken {
            value: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        })
    }
}
