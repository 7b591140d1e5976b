use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::credentials::ServiceAccountKey;

const SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;
/// Tokens within this margin of expiry are refreshed rather than reused.
const EXPIRY_MARGIN_SECS: i64 = 60;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Exchanges a service-account key for short-lived bearer tokens via the
/// JWT-bearer grant, caching the token until near expiry. The cache is the
/// one piece of cross-request mutable state in the process; it is read-mostly
/// behind an async RwLock.
pub struct GcpTokenProvider {
    client: Client,
    key: ServiceAccountKey,
    cached: RwLock<Option<CachedToken>>,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signing key: {0}")]
    InvalidKey(String),
    #[error("token exchange failed: {0}")]
    ExchangeFailed(String),
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

impl GcpTokenProvider {
    pub fn new(key: ServiceAccountKey) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            key,
            cached: RwLock::new(None),
        }
    }

    /// A bearer token valid for at least `EXPIRY_MARGIN_SECS` more seconds.
    pub async fn token(&self) -> Result<String, TokenError> {
        if let Some(cached) = self.cached.read().await.as_ref() {
            if cached.expires_at - Utc::now() > chrono::Duration::seconds(EXPIRY_MARGIN_SECS) {
                return Ok(cached.token.clone());
            }
        }

        let mut slot = self.cached.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(cached) = slot.as_ref() {
            if cached.expires_at - Utc::now() > chrono::Duration::seconds(EXPIRY_MARGIN_SECS) {
                return Ok(cached.token.clone());
            }
        }

        let minted = self.mint().await?;
        let token = minted.token.clone();
        *slot = Some(minted);
        Ok(token)
    }

    async fn mint(&self) -> Result<CachedToken, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SCOPE,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + TOKEN_LIFETIME_SECS,
        };

        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| TokenError::InvalidKey(e.to_string()))?;
        let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| TokenError::InvalidKey(e.to_string()))?;

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", &assertion)])
            .send()
            .await
            .map_err(|e| TokenError::ExchangeFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(TokenError::ExchangeFailed(format!(
                "token endpoint returned {status}: {text}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| TokenError::ExchangeFailed(e.to_string()))?;

        tracing::debug!(
            expires_in = token.expires_in,
            "Minted GCP access token"
        );

        Ok(CachedToken {
            token: token.access_token,
            expires_at: now + chrono::Duration::seconds(token.expires_in),
        })
    }
}
