use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::CacheResult;

/// In-process cache backend. Cloning shares the underlying map, so every
/// session opened from the same [`StateCache`](super::StateCache) sees the
/// same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn mget(&self, keys: &[String]) -> CacheResult<Vec<Option<String>>> {
        let entries = self.entries.lock().await;
        Ok(keys.iter().map(|key| entries.get(key).cloned()).collect())
    }

    pub async fn set_batch(&self, batch: Vec<(String, String)>) -> CacheResult<()> {
        let mut entries = self.entries.lock().await;
        entries.extend(batch);
        Ok(())
    }

    pub async fn insert(&self, key: String, value: String) {
        self.entries.lock().await.insert(key, value);
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_batch_then_mget() {
        let cache = MemoryCache::new();
        cache
            .set_batch(vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ])
            .await
            .unwrap();

        let values = cache
            .mget(&["a".to_string(), "missing".to_string(), "b".to_string()])
            .await
            .unwrap();
        assert_eq!(
            values,
            vec![Some("1".to_string()), None, Some("2".to_string())]
        );
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let cache = MemoryCache::new();
        let clone = cache.clone();
        clone.insert("k".to_string(), "v".to_string()).await;
        assert_eq!(cache.get("k").await, Some("v".to_string()));
    }
}
