//! Bounded credential-to-client cache.
//!
//! Repeated executions with the same credentials reuse one client (and its
//! connection pool) instead of constructing a new one per call. The cache is
//! an explicit bounded map owned by the caller, capped at
//! [`MAX_CLIENT_CACHE_SIZE`] entries with eviction on insert at capacity.

use moka::sync::Cache;
use std::sync::Arc;

use crate::client::LaraClient;
use crate::config::{ClientConfig, Credentials, MAX_CLIENT_CACHE_SIZE};
use crate::error::{Error, Result};

pub struct ClientCache {
    cache: Cache<String, Arc<LaraClient>>,
    config: ClientConfig,
}

impl ClientCache {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default(), MAX_CLIENT_CACHE_SIZE)
    }

    pub fn with_config(config: ClientConfig, max_size: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_size).build(),
            config,
        }
    }

    /// Cache key for a credential pair. Hashed so the secret never sits in a
    /// plain map key.
    fn cache_key(credentials: &Credentials) -> String {
        crate::client::signing::md5_hex(
            format!(
                "{}:{}",
                credentials.access_key_id, credentials.access_key_secret
            )
            .as_bytes(),
        )
    }

    /// Retrieve the cached client for these credentials, or create one wired
    /// to the production transport.
    pub fn get_or_create(&self, credentials: &Credentials) -> Result<Arc<LaraClient>> {
        if credentials.access_key_id.is_empty() || credentials.access_key_secret.is_empty() {
            return Err(Error::Validation(
                "Missing credentials: access key id or access key secret".to_string(),
            ));
        }

        let key = Self::cache_key(credentials);
        if let Some(client) = self.cache.get(&key) {
            tracing::debug!("Client cache hit");
            return Ok(client);
        }

        let client = Arc::new(LaraClient::connect(
            credentials.clone(),
            self.config.clone(),
        )?);
        self.cache.insert(key, Arc::clone(&client));
        Ok(client)
    }

    /// Drop all cached clients.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl Default for ClientCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_credentials_reuse_client() {
        let cache = ClientCache::new();
        let creds = Credentials::new("id", "secret");
        let a = cache.get_or_create(&creds).unwrap();
        let b = cache.get_or_create(&creds).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_different_credentials_get_different_clients() {
        let cache = ClientCache::new();
        let a = cache
            .get_or_create(&Credentials::new("id-a", "secret"))
            .unwrap();
        let b = cache
            .get_or_create(&Credentials::new("id-b", "secret"))
            .unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let cache = ClientCache::new();
        assert!(cache.get_or_create(&Credentials::new("", "secret")).is_err());
        assert!(cache.get_or_create(&Credentials::new("id", "")).is_err());
    }

    #[test]
    fn test_clear_drops_entries() {
        let cache = ClientCache::new();
        let creds = Credentials::new("id", "secret");
        let a = cache.get_or_create(&creds).unwrap();
        cache.clear();
        let b = cache.get_or_create(&creds).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }
}
