use crate::domain::value_objects::RemoteId;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Per-entity-type surface of the authoritative remote store.
///
/// Each operation is independently callable and must tolerate a retried
/// `update`/`delete` (the offline queue gives at-least-once delivery).
/// `create` returns the persisted copy of the record: the server-assigned
/// durable identity plus any server-normalized fields.
#[async_trait]
pub trait RemoteCollection<T>: Send + Sync
where
    T: Send + Sync,
{
    async fn create(&self, record: &T) -> Result<T, AppError>;
    async fn update(&self, id: &RemoteId, record: &T) -> Result<(), AppError>;
    async fn delete(&self, id: &RemoteId) -> Result<(), AppError>;
}
