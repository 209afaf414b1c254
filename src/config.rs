//! Client configuration
//!
//! Defaults mirror the public Trakt.tv API: base URL, three request
//! attempts, full response caching for an hour, the out-of-band OAuth
//! redirect URI and a 30-day token refresh window. Every field has a
//! serde default so embedders can load partial configuration from file.

use serde::Deserialize;

use crate::cache::CacheLevel;
use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_CACHE_TTL_SECS, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_MAX_RETRIES,
    DEFAULT_REDIRECT_URI, DEFAULT_REFRESH_WINDOW_SECS,
};

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

fn default_redirect_uri() -> String {
    DEFAULT_REDIRECT_URI.to_string()
}

fn default_refresh_window_secs() -> u64 {
    DEFAULT_REFRESH_WINDOW_SECS
}

fn default_cache_level() -> CacheLevel {
    CacheLevel::Full
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

/// OAuth-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OauthConfig {
    /// Redirect URI used when the caller does not supply one
    #[serde(default = "default_redirect_uri")]
    pub default_redirect_uri: String,
    /// Refresh the stored token when it expires within this window
    #[serde(default = "default_refresh_window_secs")]
    pub refresh_window_secs: u64,
}

impl Default for OauthConfig {
    fn default() -> Self {
        OauthConfig {
            default_redirect_uri: default_redirect_uri(),
            refresh_window_secs: default_refresh_window_secs(),
        }
    }
}

/// Response cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum cache level the client is willing to serve from
    #[serde(default = "default_cache_level")]
    pub level: CacheLevel,
    /// Time-to-live for cached responses in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub timeout_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            level: default_cache_level(),
            timeout_secs: default_cache_ttl_secs(),
        }
    }
}

/// Top-level client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Maximum attempts for a single request (including the first)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Request timeout in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    /// Refresh near-expiry credentials before each call
    #[serde(default)]
    pub auto_refresh_token: bool,
    #[serde(default)]
    pub oauth: OauthConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: default_base_url(),
            max_retries: default_max_retries(),
            http_timeout_secs: default_http_timeout_secs(),
            auto_refresh_token: false,
            oauth: OauthConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Builder-style override for the base URL (useful against mocks).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builder-style override for the cache level.
    pub fn with_cache_level(mut self, level: CacheLevel) -> Self {
        self.cache.level = level;
        self
    }

    /// Builder-style override for the cache TTL.
    pub fn with_cache_ttl_secs(mut self, secs: u64) -> Self {
        self.cache.timeout_secs = secs;
        self
    }

    /// Builder-style toggle for automatic token refresh.
    pub fn with_auto_refresh_token(mut self, enabled: bool) -> Self {
        self.auto_refresh_token = enabled;
        self
    }
}
