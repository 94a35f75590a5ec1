use crate::domain::value_objects::CacheKey;
use crate::shared::error::AppError;
use async_trait::async_trait;
use bytes::Bytes;

/// Arbitrary-key collection of the durable local store, used for cached
/// documents and images that must survive reloads.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(
        &self,
        key: &CacheKey,
        content: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), AppError>;

    async fn get(&self, key: &CacheKey) -> Result<Option<Bytes>, AppError>;

    async fn delete(&self, key: &CacheKey) -> Result<(), AppError>;

    async fn keys(&self) -> Result<Vec<CacheKey>, AppError>;
}
