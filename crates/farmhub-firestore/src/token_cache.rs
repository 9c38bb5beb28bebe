//! Token caching for Firestore authentication.
//!
//! The provisioner issues a short burst of requests; one cached token with a
//! refresh margin covers the whole run. The cache still guards refresh with a
//! mutex so concurrent requests never race two refreshes.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use gcp_auth::TokenProvider;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{FirestoreError, FirestoreResult};

/// Refresh the token this long before its reported expiry.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Conservative TTL when the provider reports no usable expiry.
/// OAuth access tokens are typically valid for 60 minutes.
const TOKEN_DEFAULT_TTL: Duration = Duration::from_secs(50 * 60);

/// OAuth scope for Firestore/Datastore access.
pub const FIRESTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() + TOKEN_REFRESH_MARGIN < self.expires_at
    }
}

/// Async-aware access token cache.
pub struct TokenCache {
    auth: Arc<dyn TokenProvider>,
    cache: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    /// Create a new token cache over a service-account provider.
    pub fn new(auth: Arc<dyn TokenProvider>) -> Self {
        Self {
            auth,
            cache: Mutex::new(None),
        }
    }

    /// Drop the cached token so the next request refreshes.
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }

    /// Get a valid access token, refreshing if necessary.
    pub async fn get_token(&self) -> FirestoreResult<String> {
        let mut cache = self.cache.lock().await;

        if let Some(cached) = cache.as_ref() {
            if cached.is_valid() {
                return Ok(cached.access_token.clone());
            }
        }

        let token = self
            .auth
            .token(&[FIRESTORE_SCOPE])
            .await
            .map_err(|e| FirestoreError::auth_error(format!("Failed to obtain auth token: {}", e)))?;

        let access_token = token.as_str().to_string();
        let expires_at = match (token.expires_at() - Utc::now()).to_std() {
            Ok(ttl) if ttl > Duration::ZERO => Instant::now() + ttl,
            // Expiry missing or already past: cache briefly with the
            // conservative default rather than refusing the token.
            _ => Instant::now() + TOKEN_DEFAULT_TTL,
        };

        *cache = Some(CachedToken {
            access_token: access_token.clone(),
            expires_at,
        });

        debug!("Refreshed Firestore auth token");
        Ok(access_token)
    }
}
