use crate::domain::entities::OfflineEvent;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Replays one captured event against the remote store.
///
/// `Ok(true)` confirms the remote write and releases the event from the
/// queue; `Ok(false)` or an error leaves it queued for a later drain.
/// Duplicate application must be tolerated by the remote side for event
/// kinds where it matters.
#[async_trait]
pub trait EventApplier: Send + Sync {
    async fn apply(&self, event: &OfflineEvent) -> Result<bool, AppError>;
}
