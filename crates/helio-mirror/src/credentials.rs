//! In-memory credential store.
//!
//! The spec treats credential storage and refresh as an external
//! collaborator; this is the minimal host-side implementation: a token map
//! loaded at startup, resolving each user token to an authorized
//! [`MirrorClient`]. Swapping in a real store only means implementing
//! [`CredentialResolver`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::info;

use helio_core::defaults::{MIRROR_BASE_URL, MIRROR_UPLOAD_BASE_URL};
use helio_core::{CredentialResolver, Error, Result, TimelineClient};

use crate::client::MirrorClient;

/// Stored OAuth grant for one user.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredCredentials {
    pub access_token: String,
}

/// Credential resolver backed by an in-memory token map.
pub struct InMemoryCredentialStore {
    entries: RwLock<HashMap<String, StoredCredentials>>,
    base_url: String,
    upload_base_url: String,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::with_endpoints(
            MIRROR_BASE_URL.to_string(),
            MIRROR_UPLOAD_BASE_URL.to_string(),
        )
    }

    pub fn with_endpoints(base_url: String, upload_base_url: String) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            base_url,
            upload_base_url,
        }
    }

    /// Load the token map from a JSON object of `user_token -> access_token`.
    pub async fn load_json(&self, json: &str) -> Result<usize> {
        let map: HashMap<String, String> =
            serde_json::from_str(json).map_err(|e| Error::Config(format!("credentials: {e}")))?;
        let count = map.len();
        let mut entries = self.entries.write().await;
        for (token, access_token) in map {
            entries.insert(token, StoredCredentials { access_token });
        }
        info!(count, "Loaded stored credentials");
        Ok(count)
    }

    /// Store or replace credentials for one user.
    pub async fn insert(&self, user_token: impl Into<String>, credentials: StoredCredentials) {
        self.entries
            .write()
            .await
            .insert(user_token.into(), credentials);
    }

    /// Revoke a user's grant.
    pub async fn remove(&self, user_token: &str) -> bool {
        self.entries.write().await.remove(user_token).is_some()
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialResolver for InMemoryCredentialStore {
    async fn resolve(&self, user_token: &str) -> Result<Arc<dyn TimelineClient>> {
        let entries = self.entries.read().await;
        let credentials = entries.get(user_token).ok_or_else(|| {
            Error::Unauthorized(format!("no stored credentials for token {user_token}"))
        })?;

        Ok(Arc::new(MirrorClient::with_config(
            self.base_url.clone(),
            self.upload_base_url.clone(),
            credentials.access_token.clone(),
        )))
    }
}
