use log::warn;
use serde_json::Value;
use thiserror::Error;

pub mod memory;
pub mod redis;
pub mod writes;

use crate::config::CacheSettings;
use self::redis::RedisCache;
use writes::DeferredWrites;

pub use memory::MemoryCache;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    Connection(String),
    #[error("cache backend error: {0}")]
    Backend(String),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Cache key for one (host, play) pair.
pub fn build_cache_key(host_id: u64, play_id: u64) -> String {
    format!("dashboard:{host_id}:{play_id}")
}

enum CacheBackend {
    Redis(RedisCache),
    Memory(MemoryCache),
    NoOp,
}

impl CacheBackend {
    async fn mget(&self, keys: &[String]) -> CacheResult<Vec<Option<String>>> {
        match self {
            CacheBackend::Redis(cache) => cache.mget(keys).await,
            CacheBackend::Memory(cache) => cache.mget(keys).await,
            CacheBackend::NoOp => Ok(vec![None; keys.len()]),
        }
    }

    async fn set_batch(&self, entries: Vec<(String, String)>) -> CacheResult<()> {
        match self {
            CacheBackend::Redis(cache) => cache.set_batch(entries).await,
            CacheBackend::Memory(cache) => cache.set_batch(entries).await,
            CacheBackend::NoOp => Ok(()),
        }
    }

    fn is_enabled(&self) -> bool {
        !matches!(self, CacheBackend::NoOp)
    }
}

enum CacheTarget {
    Disabled,
    Redis { url: String },
    Memory(MemoryCache),
}

/// State cache configuration resolved into a concrete target. Opening a
/// [`CacheSession`] acquires the request-scoped client; a target that cannot
/// be reached degrades to always-miss rather than failing the request.
pub struct StateCache {
    target: CacheTarget,
}

impl StateCache {
    pub fn from_settings(settings: &CacheSettings) -> Self {
        if !settings.enabled {
            return Self::disabled();
        }

        let target = match settings.backend.as_str() {
            "redis" => match &settings.url {
                Some(url) => CacheTarget::Redis { url: url.clone() },
                None => {
                    warn!("redis cache enabled but no url configured, caching disabled");
                    CacheTarget::Disabled
                }
            },
            "memory" | "in-memory" => CacheTarget::Memory(MemoryCache::new()),
            "none" => CacheTarget::Disabled,
            other => {
                warn!("unknown cache backend '{other}', caching disabled");
                CacheTarget::Disabled
            }
        };

        StateCache { target }
    }

    pub fn disabled() -> Self {
        StateCache {
            target: CacheTarget::Disabled,
        }
    }

    pub fn memory() -> Self {
        StateCache {
            target: CacheTarget::Memory(MemoryCache::new()),
        }
    }

    /// Shares an existing in-process cache, so separate requests observe each
    /// other's entries.
    pub fn with_memory(cache: MemoryCache) -> Self {
        StateCache {
            target: CacheTarget::Memory(cache),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.target, CacheTarget::Disabled)
    }

    /// Acquires the request-scoped cache client. A redis target that cannot
    /// be reached logs the failure and serves the request without a cache.
    pub async fn session(&self) -> CacheSession {
        let backend = match &self.target {
            CacheTarget::Disabled => CacheBackend::NoOp,
            CacheTarget::Memory(cache) => CacheBackend::Memory(cache.clone()),
            CacheTarget::Redis { url } => match RedisCache::connect(url).await {
                Ok(cache) => CacheBackend::Redis(cache),
                Err(e) => {
                    warn!("state cache unavailable, serving without cache: {e}");
                    CacheBackend::NoOp
                }
            },
        };

        CacheSession {
            backend,
            writes: DeferredWrites::new(),
        }
    }
}

/// One request's view of the state cache: a batched read up front, staged
/// writes flushed once at the end. Any backend failure degrades the session
/// to always-miss for the rest of the request.
pub struct CacheSession {
    backend: CacheBackend,
    writes: DeferredWrites,
}

impl CacheSession {
    /// Fetches all keys in one round trip. The returned vector is aligned
    /// positionally with `keys`; a miss or an undecodable payload is `None`.
    pub async fn batch_get(&mut self, keys: &[String]) -> Vec<Option<Value>> {
        if keys.is_empty() {
            return Vec::new();
        }

        match self.backend.mget(keys).await {
            Ok(payloads) => payloads
                .into_iter()
                .enumerate()
                .map(|(i, payload)| payload.and_then(|p| decode_payload(&keys[i], &p)))
                .collect(),
            Err(e) => {
                warn!("cache read failed, treating all keys as misses: {e}");
                self.backend = CacheBackend::NoOp;
                vec![None; keys.len()]
            }
        }
    }

    /// Stages a freshly serialized state for write-behind; nothing reaches
    /// the backend until [`finish`](Self::finish).
    pub fn stage(&mut self, key: &str, state: &Value) {
        if !self.backend.is_enabled() {
            return;
        }
        self.writes.stage(key.to_string(), state.to_string());
    }

    /// Flushes staged writes in a single batch and releases the client. A
    /// flush failure is logged and swallowed: cache entries are an
    /// optimization, not a source of truth.
    pub async fn finish(mut self) {
        if self.writes.is_empty() {
            return;
        }
        if let Err(e) = self.backend.set_batch(self.writes.drain()).await {
            warn!("cache write-behind flush failed: {e}");
        }
    }
}

fn decode_payload(key: &str, payload: &str) -> Option<Value> {
    match serde_json::from_str(payload) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("discarding malformed cache payload for '{key}': {e}");
            None
        }
    }
}
