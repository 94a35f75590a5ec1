use crate::domain::entities::OfflineEvent;
use crate::domain::value_objects::{EventKind, EventPayload, SequenceId};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Append-friendly collection of the durable local store backing the offline
/// queue. Sequence ids are assigned by the store and strictly increase in
/// append order. Only single-key atomicity is assumed.
#[async_trait]
pub trait EventQueueStore: Send + Sync {
    async fn append(
        &self,
        kind: &EventKind,
        payload: &EventPayload,
        captured_at: DateTime<Utc>,
    ) -> Result<SequenceId, AppError>;

    /// All events awaiting replay, ascending by sequence id.
    async fn pending(&self) -> Result<Vec<OfflineEvent>, AppError>;

    async fn remove(&self, id: SequenceId) -> Result<(), AppError>;
}
