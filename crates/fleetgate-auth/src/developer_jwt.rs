use std::{sync::Arc, time::Duration};

use chrono::{DateTime, TimeDelta, Utc};
use fleetgate_core::{DeveloperConfig, Error, GeneralTokenSource, MintError};
use serde::Serialize;
use tokio::sync::Mutex;
use url::Url;

use crate::{generate_jti, DeveloperClaims, EphemeralKey};

const TOKEN_LIFETIME_MINUTES: i64 = 60;
// cached tokens are dropped this long before they really expire
const EXPIRY_MARGIN_MINUTES: i64 = 5;
const REGISTRATION_INITIAL_RETRY_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct RegisterKey<'a> {
    client_id: &'a str,
    public_key: &'a str,
}

/// Mints ES256 developer tokens for the identity platform and caches the last one.
///
/// The cache lock is held for the whole refresh, so concurrent callers on an
/// expired cache wait for one mint instead of each registering a key.
#[derive(Clone)]
pub struct DeveloperJwtService(Arc<InnerDeveloperJwtService>);

struct InnerDeveloperJwtService {
    client: reqwest::Client,
    audience: String,
    register_url: Url,
    client_id: String,
    retries: u32,
    cache: Mutex<Option<CachedToken>>,
}

impl DeveloperJwtService {
    pub fn new(config: &DeveloperConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(MintError::from)?;
        let audience = config.api_url.as_str().trim_end_matches('/').to_string();
        let register_url = Url::parse(&format!("{audience}/developer/register-key"))?;
        Ok(Self(Arc::new(InnerDeveloperJwtService {
            client,
            audience,
            register_url,
            client_id: config.client_id.clone(),
            retries: config.retries,
            cache: Mutex::new(None),
        })))
    }

    async fn mint(&self) -> Result<CachedToken, MintError> {
        let inner = &self.0;
        tracing::info!(client_id = %inner.client_id, "minting developer token");

        let key = EphemeralKey::generate()?;
        let now = Utc::now();
        let claims = DeveloperClaims {
            iss: inner.client_id.clone(),
            sub: inner.client_id.clone(),
            aud: inner.audience.clone(),
            iat: now.timestamp(),
            exp: (now + TimeDelta::minutes(TOKEN_LIFETIME_MINUTES)).timestamp(),
            jti: generate_jti(),
        };
        let token = key.sign(&claims)?;
        self.register(key.kid()).await?;

        tracing::info!(client_id = %inner.client_id, "developer token minted");
        Ok(CachedToken {
            token,
            expires_at: now + TimeDelta::minutes(TOKEN_LIFETIME_MINUTES - EXPIRY_MARGIN_MINUTES),
        })
    }

    /// Registers the public key, retrying network errors and 5xx with doubling backoff.
    async fn register(&self, public_key: &str) -> Result<(), MintError> {
        let inner = &self.0;
        let payload = RegisterKey {
            client_id: &inner.client_id,
            public_key,
        };
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let delay = REGISTRATION_INITIAL_RETRY_DELAY * (1u32 << (attempts - 1).min(31));
            match inner
                .client
                .post(inner.register_url.clone())
                .json(&payload)
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => return Ok(()),
                Ok(response) if response.status().is_server_error() && attempts <= inner.retries => {
                    tracing::debug!(
                        status = response.status().as_u16(),
                        attempt = attempts,
                        delay_ms = delay.as_millis(),
                        "key registration returned 5xx, retrying"
                    );
                }
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(MintError::Registration { status, body });
                }
                Err(e) if attempts > inner.retries => return Err(e.into()),
                Err(e) => {
                    tracing::debug!(
                        error = %e,
                        attempt = attempts,
                        delay_ms = delay.as_millis(),
                        "key registration failed, retrying"
                    );
                }
            }
            tokio::time::sleep(delay).await;
        }
    }

    #[cfg(test)]
    async fn expire_cache(&self) {
        if let Some(cached) = self.0.cache.lock().await.as_mut() {
            cached.expires_at = Utc::now() - TimeDelta::seconds(1);
        }
    }
}

impl GeneralTokenSource for DeveloperJwtService {
    async fn token(&self) -> Result<String, Error> {
        let mut cache = self.0.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if Utc::now() < cached.expires_at {
                return Ok(cached.token.clone());
            }
        }
        let fresh = self.mint().await?;
        let token = fresh.token.clone();
        *cache = Some(fresh);
        Ok(token)
    }

    async fn refresh(&self) -> Result<String, Error> {
        let mut cache = self.0.cache.lock().await;
        let fresh = self.mint().await?;
        let token = fresh.token.clone();
        *cache = Some(fresh);
        Ok(token)
    }
}
