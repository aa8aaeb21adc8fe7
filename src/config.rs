//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment
//! variables.

use std::env;
use std::time::Duration;

use crate::cache::CachePolicy;

/// Cache layer configuration parameters.
///
/// All values can be configured via environment variables with defaults
/// matching the film app's production settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the film app API
    pub api_base_url: String,
    /// Recommendations cache TTL in milliseconds
    pub recommendations_ttl_ms: u64,
    /// Watchlist cache TTL in milliseconds
    pub watchlist_ttl_ms: u64,
    /// Catalog cache TTL in milliseconds
    pub catalog_ttl_ms: u64,
    /// Per-fetch time limit in milliseconds, None = no limit
    pub fetch_timeout_ms: Option<u64>,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `API_BASE_URL` - Film app API base URL (default: http://localhost:3000)
    /// - `RECOMMENDATIONS_TTL_MS` - Recommendations TTL (default: 60000)
    /// - `WATCHLIST_TTL_MS` - Watchlist TTL (default: 30000)
    /// - `CATALOG_TTL_MS` - Catalog TTL (default: 300000)
    /// - `FETCH_TIMEOUT_MS` - Per-fetch time limit (default: none)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 900)
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            recommendations_ttl_ms: env::var("RECOMMENDATIONS_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60_000),
            watchlist_ttl_ms: env::var("WATCHLIST_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30_000),
            catalog_ttl_ms: env::var("CATALOG_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300_000),
            fetch_timeout_ms: env::var("FETCH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok()),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(900),
        }
    }

    // == Policy Helpers ==
    /// Policy for the session cache: cache forever once populated.
    pub fn session_policy(&self) -> CachePolicy {
        self.with_fetch_timeout(CachePolicy::cache_forever())
    }

    /// Policy for the recommendations cache.
    pub fn recommendations_policy(&self) -> CachePolicy {
        self.with_fetch_timeout(CachePolicy::with_ttl(Duration::from_millis(
            self.recommendations_ttl_ms,
        )))
    }

    /// Policy for the watchlist cache.
    pub fn watchlist_policy(&self) -> CachePolicy {
        self.with_fetch_timeout(CachePolicy::with_ttl(Duration::from_millis(
            self.watchlist_ttl_ms,
        )))
    }

    /// TTL for the catalog stores.
    pub fn catalog_ttl(&self) -> Duration {
        Duration::from_millis(self.catalog_ttl_ms)
    }

    fn with_fetch_timeout(&self, policy: CachePolicy) -> CachePolicy {
        match self.fetch_timeout_ms {
            Some(ms) => policy.with_timeout(Duration::from_millis(ms)),
            None => policy,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            recommendations_ttl_ms: 60_000,
            watchlist_ttl_ms: 30_000,
            catalog_ttl_ms: 300_000,
            fetch_timeout_ms: None,
            cleanup_interval: 900,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.recommendations_ttl_ms, 60_000);
        assert_eq!(config.watchlist_ttl_ms, 30_000);
        assert_eq!(config.catalog_ttl_ms, 300_000);
        assert_eq!(config.fetch_timeout_ms, None);
        assert_eq!(config.cleanup_interval, 900);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("API_BASE_URL");
        env::remove_var("RECOMMENDATIONS_TTL_MS");
        env::remove_var("WATCHLIST_TTL_MS");
        env::remove_var("CATALOG_TTL_MS");
        env::remove_var("FETCH_TIMEOUT_MS");
        env::remove_var("CLEANUP_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.recommendations_ttl_ms, 60_000);
        assert_eq!(config.watchlist_ttl_ms, 30_000);
        assert_eq!(config.catalog_ttl_ms, 300_000);
        assert_eq!(config.fetch_timeout_ms, None);
        assert_eq!(config.cleanup_interval, 900);
    }

    #[test]
    fn test_policy_helpers() {
        let config = Config {
            fetch_timeout_ms: Some(5_000),
            ..Config::default()
        };

        assert!(config.session_policy().ttl().is_none());
        assert_eq!(
            config.session_policy().timeout(),
            Some(Duration::from_secs(5))
        );
        assert_eq!(
            config.recommendations_policy().ttl(),
            Some(Duration::from_secs(60))
        );
        assert_eq!(
            config.watchlist_policy().ttl(),
            Some(Duration::from_secs(30))
        );
        assert_eq!(config.catalog_ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_policies_without_timeout() {
        let config = Config::default();

        assert!(config.session_policy().timeout().is_none());
        assert!(config.recommendations_policy().timeout().is_none());
    }
}
