//! OAuth access tokens for the Sheets API.
//!
//! Service accounts authenticate with the JWT bearer grant: a short-lived
//! RS256 assertion signed with the account's private key is exchanged at the
//! key's `token_uri` for an access token.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use sheetgate_core::error::{Result, SheetError};

use crate::credentials::ServiceAccountKey;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each signed assertion.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Tokens are refreshed this long before the expiry the server reported.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Upper bound on how long an exchanged token is reused.
const MAX_TOKEN_REUSE: Duration = Duration::from_secs(24 * 60 * 60);

/// Supplies bearer tokens for Sheets API calls.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Returns a currently valid access token.
    async fn access_token(&self) -> Result<String>;
}

/// A fixed, pre-minted token.
#[derive(Clone, Debug)]
pub struct StaticToken(pub String);

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS as u64
}

struct CachedToken {
    access_token: String,
    refresh_at: Instant,
}

enum KeySource {
    File(PathBuf),
    Key(ServiceAccountKey),
}

/// Token source backed by a service-account key.
///
/// When built from a path, the key file is read each time a new token is
/// needed, so a missing or broken file surfaces as [`SheetError::Auth`] on
/// the request that needed it rather than at startup.
pub struct ServiceAccountAuth {
    source: KeySource,
    scope: String,
    http: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    /// Creates a token source that loads the key from `path`.
    pub fn from_file(path: impl Into<PathBuf>, scope: impl Into<String>, http: reqwest::Client) -> Self {
        Self::with_source(KeySource::File(path.into()), scope.into(), http)
    }

    /// Creates a token source from an already parsed key.
    pub fn from_key(key: ServiceAccountKey, scope: impl Into<String>, http: reqwest::Client) -> Self {
        Self::with_source(KeySource::Key(key), scope.into(), http)
    }

    fn with_source(source: KeySource, scope: String, http: reqwest::Client) -> Self {
        Self {
            source,
            scope,
            http,
            cached: Mutex::new(None),
        }
    }

    fn load_key(&self) -> Result<ServiceAccountKey> {
        match &self.source {
            KeySource::File(path) => ServiceAccountKey::from_file(path),
            KeySource::Key(key) => Ok(key.clone()),
        }
    }

    /// Builds the signed RS256 assertion for `key`.
    fn sign_assertion(&self, key: &ServiceAccountKey) -> Result<String> {
        let iat = chrono::Utc::now().timestamp();
        let claims = Claims {
            iss: &key.client_email,
            scope: &self.scope,
            aud: &key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = key.private_key_id.clone();

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| SheetError::Auth(format!("invalid private key: {}", e)))?;

        encode(&header, &claims, &encoding_key)
            .map_err(|e| SheetError::Auth(format!("failed to sign assertion: {}", e)))
    }

    #[instrument(skip(self, key), fields(client_email = %key.client_email))]
    async fn exchange(&self, key: &ServiceAccountKey) -> Result<TokenResponse> {
        let assertion = self.sign_assertion(key)?;

        let response = self
            .http
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| SheetError::Auth(format!("token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(SheetError::Auth(format!(
                "token endpoint returned {}: {}",
                status, text
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SheetError::Auth(format!("invalid token response: {}", e)))?;

        debug!(expires_in = token.expires_in, "Obtained access token");
        Ok(token)
    }
}

#[async_trait]
impl TokenSource for ServiceAccountAuth {
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.access_token.clone());
            }
        }

        let key = self.load_key()?;
        let token = self.exchange(&key).await?;
        let lifetime = Duration::from_secs(token.expires_in)
            .min(MAX_TOKEN_REUSE)
            .saturating_sub(EXPIRY_MARGIN);

        *cached = Instant::now()
            .checked_add(lifetime)
            .map(|refresh_at| CachedToken {
                access_token: token.access_token.clone(),
                refresh_at,
            });

        Ok(token.access_token)
    }
}
