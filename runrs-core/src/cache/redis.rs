use log::debug;
use redis::aio::ConnectionManager;

use super::{CacheError, CacheResult};

/// Redis-backed state cache client. Batch reads use `MGET`; staged writes go
/// out as a single pipeline of `SET`s with no expiry, matching the snapshot
/// semantics of the cached states.
#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(url: &str) -> CacheResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| CacheError::Connection(format!("invalid redis url: {e}")))?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("failed to connect: {e}")))?;
        debug!("state cache connected");
        Ok(RedisCache { manager })
    }

    pub async fn mget(&self, keys: &[String]) -> CacheResult<Vec<Option<String>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.manager.clone();
        redis::cmd("MGET")
            .arg(keys)
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::Backend(format!("MGET failed: {e}")))
    }

    pub async fn set_batch(&self, entries: Vec<(String, String)>) -> CacheResult<()> {
        let mut conn = self.manager.clone();
        let mut pipe = redis::pipe();
        for (key, payload) in &entries {
            pipe.set(key, payload).ignore();
        }
        pipe.query_async::<()>(&mut conn)
            .await
            .map_err(|e| CacheError::Backend(format!("pipeline flush failed: {e}")))?;
        debug!("flushed {} cache entries", entries.len());
        Ok(())
    }
}
