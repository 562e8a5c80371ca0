//! Remote JWKS provider (the identity provider's `/.well-known/jwks.json`).
//!
//! - Fetched lazily on first lookup, then cached for `ttl`.
//! - An unknown `kid` forces a re-fetch (key rotation), throttled by `min_refresh`.
//! - A failed fetch is remembered: callers queued behind it share its failure,
//!   and no new attempt is made until `min_refresh` has passed.
//! - Refreshes build a new `SigningKeySet` and swap the `Arc`; readers never see
//!   a partially updated set.
//! - Any fetch failure is an error; there is no fallback to "accept".

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use url::Url;

use super::key_set::{KeyProvider, KeySetError, SigningKeySet, VerificationKey};

#[derive(Debug, Clone)]
struct CachedKeys {
    keys: Arc<SigningKeySet>,
    fetched_at: Instant,
}

#[derive(Debug, Default)]
struct CacheState {
    keys: Option<CachedKeys>,
    // Set by a failed fetch, cleared by the next successful one.
    failed_at: Option<Instant>,
}

#[derive(Debug)]
pub struct RemoteJwks {
    client: reqwest::Client,
    url: Url,
    ttl: Duration,
    min_refresh: Duration,
    state: RwLock<CacheState>,
    // Serializes fetches so a burst of unknown kids costs one request.
    refresh: Mutex<()>,
}

impl RemoteJwks {
    pub fn new(
        url: Url,
        ttl: Duration,
        min_refresh: Duration,
        fetch_timeout: Duration,
    ) -> Result<Self, KeySetError> {
        let client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .connect_timeout(fetch_timeout)
            .build()?;

        Ok(Self::with_client(client, url, ttl, min_refresh))
    }

    pub fn with_client(client: reqwest::Client, url: Url, ttl: Duration, min_refresh: Duration) -> Self {
        Self {
            client,
            url,
            ttl,
            min_refresh,
            state: RwLock::new(CacheState::default()),
            refresh: Mutex::new(()),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Current key set, fetching it when absent or older than `ttl`.
    pub async fn key_set(&self) -> Result<Arc<SigningKeySet>, KeySetError> {
        if let Some(cached) = self.state.read().await.keys.as_ref()
            && cached.fetched_at.elapsed() < self.ttl
        {
            return Ok(cached.keys.clone());
        }

        self.refresh_if(|cached| match cached {
            Some(cached) => cached.fetched_at.elapsed() >= self.ttl,
            None => true,
        })
        .await
    }

    // Re-checks `needed` under the refresh lock so waiters reuse a fetch that
    // completed while they were queued. A failure that finished after this
    // caller queued, or within `min_refresh`, is returned without fetching.
    async fn refresh_if<F>(&self, needed: F) -> Result<Arc<SigningKeySet>, KeySetError>
    where
        F: Fn(Option<&CachedKeys>) -> bool,
    {
        let queued_at = Instant::now();
        let _guard = self.refresh.lock().await;

        {
            let state = self.state.read().await;
            if let Some(cached) = state.keys.as_ref()
                && !needed(Some(cached))
            {
                return Ok(cached.keys.clone());
            }
            if let Some(failed_at) = state.failed_at
                && (failed_at >= queued_at || failed_at.elapsed() < self.min_refresh)
            {
                return Err(KeySetError::RecentFailure);
            }
        }

        match self.fetch().await {
            Ok(keys) => {
                let keys = Arc::new(keys);
                *self.state.write().await = CacheState {
                    keys: Some(CachedKeys {
                        keys: keys.clone(),
                        fetched_at: Instant::now(),
                    }),
                    failed_at: None,
                };
                Ok(keys)
            }
            Err(err) => {
                self.state.write().await.failed_at = Some(Instant::now());
                Err(err)
            }
        }
    }

    async fn fetch(&self) -> Result<SigningKeySet, KeySetError> {
        let response = self.client.get(self.url.clone()).send().await.map_err(|e| {
            tracing::warn!(url = %self.url, error = %e, "jwks fetch failed");
            KeySetError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, %status, "jwks endpoint returned an error status");
            return Err(KeySetError::Status(status));
        }

        let body = response.bytes().await?;
        let keys = SigningKeySet::from_json(&body).inspect_err(|e| {
            tracing::warn!(url = %self.url, error = %e, "jwks document rejected");
        })?;

        tracing::info!(url = %self.url, keys = keys.len(), "jwks fetched");
        Ok(keys)
    }
}

#[async_trait]
impl KeyProvider for RemoteJwks {
    async fn find(&self, kid: &str) -> Result<Option<Arc<VerificationKey>>, KeySetError> {
        let keys = self.key_set().await?;
        if let Some(key) = keys.get(kid) {
            return Ok(Some(key));
        }

        // Possibly rotated: refetch unless the set we hold is too recent.
        let keys = self
            .refresh_if(|cached| match cached {
                Some(cached) => {
                    !cached.keys.contains(kid) && cached.fetched_at.elapsed() >= self.min_refresh
                }
                None => true,
            })
            .await?;

        Ok(keys.get(kid))
    }
}
