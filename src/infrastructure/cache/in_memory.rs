//! In-memory cache implementation using moka

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::cache::Cache;
use crate::domain::DomainError;

/// Configuration for in-memory cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
    /// Entries older than this are evicted; `None` keeps them until evicted for capacity
    pub time_to_live: Option<Duration>,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            time_to_live: None,
        }
    }
}

impl InMemoryCacheConfig {
    /// Creates a new configuration with specified max capacity
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    /// Sets the time-to-live duration
    pub fn with_time_to_live(mut self, ttl: Duration) -> Self {
        self.time_to_live = Some(ttl);
        self
    }
}

/// Thread-safe in-memory cache implementation using moka
///
/// Values are stored as JSON strings. Capacity-bound eviction is LRU-like;
/// entries expire only when a time-to-live is configured.
#[derive(Debug)]
pub struct InMemoryCache {
    cache: MokaCache<String, String>,
    config: InMemoryCacheConfig,
}

impl InMemoryCache {
    /// Creates a new in-memory cache with default configuration
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    /// Creates a new in-memory cache with the given configuration
    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        let mut builder = MokaCache::builder().max_capacity(config.max_capacity);

        if let Some(ttl) = config.time_to_live {
            builder = builder.time_to_live(ttl);
        }

        Self {
            cache: builder.build(),
            config,
        }
    }

    pub fn config(&self) -> &InMemoryCacheConfig {
        &self.config
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.cache.get(key).await)
    }

    async fn set_raw(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.cache.contains_key(key))
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn size(&self) -> Result<usize, DomainError> {
        self.cache.run_pending_tasks().await;
        Ok(self.cache.entry_count() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::CacheExt;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = InMemoryCache::new();

        cache.set("key1", &"value1").await.unwrap();

        let result: Option<String> = cache.get("key1").await.unwrap();
        assert_eq!(result, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let cache = InMemoryCache::new();

        let result: Option<String> = cache.get("missing").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let cache = InMemoryCache::new();

        cache.set("Dish_1", &12.5).await.unwrap();
        cache.set("Dish_1", &14.0).await.unwrap();

        let result: Option<f64> = cache.get("Dish_1").await.unwrap();
        assert_eq!(result, Some(14.0));
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = InMemoryCache::new();

        cache.set("key1", &"value1").await.unwrap();

        let deleted = cache.delete("key1").await.unwrap();
        assert!(deleted);

        let result: Option<String> = cache.get("key1").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let cache = InMemoryCache::new();

        let deleted = cache.delete("missing").await.unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_exists() {
        let cache = InMemoryCache::new();

        cache.set("key1", &"value1").await.unwrap();

        assert!(cache.exists("key1").await.unwrap());
        assert!(!cache.exists("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_entries_do_not_expire_by_default() {
        let cache = InMemoryCache::new();

        cache.set("key1", &"value1").await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        let result: Option<String> = cache.get("key1").await.unwrap();
        assert_eq!(result, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_time_to_live_expiration() {
        let cache = InMemoryCache::with_config(
            InMemoryCacheConfig::default().with_time_to_live(Duration::from_millis(50)),
        );

        cache.set("key1", &"value1").await.unwrap();
        assert!(cache.exists("key1").await.unwrap());

        tokio::time::sleep(Duration::from_millis(150)).await;

        let result: Option<String> = cache.get("key1").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = InMemoryCache::new();

        cache.set("key1", &"value1").await.unwrap();
        cache.set("key2", &"value2").await.unwrap();

        cache.clear().await.unwrap();

        let size = cache.size().await.unwrap();
        assert_eq!(size, 0);
    }

    #[tokio::test]
    async fn test_size() {
        let cache = InMemoryCache::new();

        cache.set("Dishes", &Vec::<String>::new()).await.unwrap();
        cache.set("Drinks", &Vec::<String>::new()).await.unwrap();

        assert_eq!(cache.size().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_complex_types() {
        let cache = InMemoryCache::new();

        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        struct TestData {
            name: String,
            values: Vec<i32>,
        }

        let data = TestData {
            name: "test".to_string(),
            values: vec![1, 2, 3],
        };

        cache.set("complex", &data).await.unwrap();

        let result: Option<TestData> = cache.get("complex").await.unwrap();
        assert_eq!(result, Some(data));
    }

    #[tokio::test]
    async fn test_config() {
        let config = InMemoryCacheConfig::default()
            .with_max_capacity(100)
            .with_time_to_live(Duration::from_secs(300));

        let cache = InMemoryCache::with_config(config);

        assert_eq!(cache.config().max_capacity, 100);
        assert_eq!(cache.config().time_to_live, Some(Duration::from_secs(300)));
    }
}
