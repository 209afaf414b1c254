//! TTL-based response cache
//!
//! Successful cacheable GET responses are kept in an in-memory map keyed
//! by a normalized request fingerprint ([`FrozenRequest`]). Whether an
//! endpoint may be served from cache is gated twice: by the level the
//! endpoint declares and by the maximum level the client is configured
//! for, with the strict ordering `No < Basic < Full`.
//!
//! There is no background eviction; expired entries are dropped lazily
//! when they are next looked up.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Deserialize;

use crate::config::CacheConfig;
use crate::http::ApiResponse;

/// Cache gating level. Variant order defines the gating order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheLevel {
    No,
    Basic,
    Full,
}

/// Normalized identity of one request: resolved path plus sorted query
/// and header pairs. Equality and hashing go through a deterministic
/// fingerprint string so insertion order never matters.
#[derive(Debug, Clone)]
pub struct FrozenRequest {
    path: String,
    query_args: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
}

impl FrozenRequest {
    pub fn new(
        path: impl Into<String>,
        query_args: &HashMap<String, String>,
        headers: &HashMap<String, String>,
    ) -> Self {
        FrozenRequest {
            path: path.into(),
            query_args: query_args
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            headers: headers.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        }
    }

    /// Deterministic fingerprint: path, then sorted query pairs, then
    /// sorted header pairs.
    fn unique_id(&self) -> String {
        let mut id = self.path.clone();
        for (k, v) in &self.query_args {
            let _ = write!(id, "&{}={}", k, v);
        }
        for (k, v) in &self.headers {
            let _ = write!(id, "#{}={}", k, v);
        }
        id
    }
}

impl PartialEq for FrozenRequest {
    fn eq(&self, other: &Self) -> bool {
        self.unique_id() == other.unique_id()
    }
}

impl Eq for FrozenRequest {}

impl Hash for FrozenRequest {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unique_id().hash(state);
    }
}

struct CacheEntry {
    response: ApiResponse,
    expires_at: Instant,
}

/// In-memory TTL cache for API responses.
pub struct CacheManager {
    entries: Mutex<HashMap<FrozenRequest, CacheEntry>>,
    max_level: CacheLevel,
    ttl: Duration,
}

impl CacheManager {
    pub fn new(config: &CacheConfig) -> Self {
        CacheManager {
            entries: Mutex::new(HashMap::new()),
            max_level: config.level,
            ttl: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Whether the configured maximum level permits caching an endpoint
    /// of the given declared level. An endpoint declared `No` is never
    /// cacheable regardless of configuration.
    pub fn accepted_level(&self, level: CacheLevel) -> bool {
        match level {
            CacheLevel::No => false,
            CacheLevel::Basic => {
                matches!(self.max_level, CacheLevel::Basic | CacheLevel::Full)
            }
            CacheLevel::Full => self.max_level == CacheLevel::Full,
        }
    }

    /// Whether a live entry exists for the key. Expired entries are
    /// evicted here.
    pub fn has(&self, req: &FrozenRequest) -> bool {
        let mut entries = self.entries.lock();

        match entries.get(req) {
            Some(entry) if Instant::now() <= entry.expires_at => true,
            Some(_) => {
                entries.remove(req);
                tracing::debug!(path = %req.path, "evicted expired cache entry");
                false
            }
            None => false,
        }
    }

    /// Cached response for the key, `None` when absent or expired.
    pub fn get(&self, req: &FrozenRequest) -> Option<ApiResponse> {
        if !self.has(req) {
            return None;
        }

        let entries = self.entries.lock();
        entries.get(req).map(|e| e.response.clone())
    }

    /// Insert or refresh an entry; expiry is `now + configured TTL`.
    pub fn set(&self, req: FrozenRequest, response: ApiResponse) {
        let entry = CacheEntry {
            response,
            expires_at: Instant::now() + self.ttl,
        };

        self.entries.lock().insert(req, entry);
    }

    /// Number of stored entries, live or not.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
