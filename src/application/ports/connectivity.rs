use async_trait::async_trait;

/// Boolean online signal the sync service consults before touching the
/// remote store. The concrete observable lives in the application shell.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn is_online(&self) -> bool;
}
