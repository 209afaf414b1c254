// Constants module - centralized default values for configuration
//
// This module defines all default values used throughout the codebase
// so that magic numbers live in exactly one place.

// =============================================================================
// API defaults
// =============================================================================

/// Public Trakt API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.trakt.tv";

/// API version sent in the `trakt-api-version` header
pub const API_VERSION: &str = "2";

/// Default request timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default maximum attempts for a single request (including the initial one)
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Initial retry backoff delay in milliseconds
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 100;

/// Maximum retry backoff delay in milliseconds
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 1000;

// =============================================================================
// OAuth defaults
// =============================================================================

/// Out-of-band redirect URI used when the embedder has no callback URL
pub const DEFAULT_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Refresh tokens this close to expiry before running a call (30 days)
pub const DEFAULT_REFRESH_WINDOW_SECS: u64 = 30 * 24 * 60 * 60;

// =============================================================================
// Cache defaults
// =============================================================================

/// Default TTL for cached GET responses in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

// =============================================================================
// Pagination defaults
// =============================================================================

/// First page requested when the caller does not pick one
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Page size used by `prefetch_all` to minimize round-trips
pub const PREFETCH_PER_PAGE: u32 = 100;
