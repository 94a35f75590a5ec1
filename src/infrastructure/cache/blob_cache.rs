use crate::application::ports::BlobStore;
use crate::domain::value_objects::CacheKey;
use crate::shared::error::AppError;
use bytes::Bytes;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// Read-through / write-through LRU front over the durable blob store, so
/// repeatedly rendered images (license scans, shipper logos) skip the
/// database on the hot path while still surviving reloads.
pub struct BlobCache {
    store: Arc<dyn BlobStore>,
    hot: Mutex<LruCache<String, Bytes>>,
}

impl BlobCache {
    pub fn new(store: Arc<dyn BlobStore>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            store,
            hot: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub async fn put(
        &self,
        key: &CacheKey,
        content: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), AppError> {
        self.store.put(key, content.clone(), content_type).await?;
        if let Ok(mut hot) = self.hot.lock() {
            hot.put(key.as_str().to_string(), content);
        }
        Ok(())
    }

    pub async fn get(&self, key: &CacheKey) -> Result<Option<Bytes>, AppError> {
        if let Ok(mut hot) = self.hot.lock() {
            if let Some(content) = hot.get(key.as_str()) {
                return Ok(Some(content.clone()));
            }
        }

        let content = self.store.get(key).await?;
        if let Some(content) = &content {
            if let Ok(mut hot) = self.hot.lock() {
                hot.put(key.as_str().to_string(), content.clone());
            }
        }
        Ok(content)
    }

    pub async fn remove(&self, key: &CacheKey) -> Result<(), AppError> {
        self.store.delete(key).await?;
        if let Ok(mut hot) = self.hot.lock() {
            hot.pop(key.as_str());
        }
        Ok(())
    }

    pub async fn keys(&self) -> Result<Vec<CacheKey>, AppError> {
        self.store.keys().await
    }
}
