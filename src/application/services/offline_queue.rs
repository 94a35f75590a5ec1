use crate::application::ports::EventQueueStore;
use crate::domain::entities::{DrainReport, OfflineEvent};
use crate::domain::value_objects::{EventKind, EventPayload, SequenceId};
use crate::shared::error::AppError;
use crate::shared::metrics;
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Append-only queue of state-changing events captured while the remote
/// store is unreachable, replayed in capture order once connectivity
/// returns.
///
/// Delivery is at-least-once: a failed event stays queued and is retried on
/// a later drain while later events keep flowing. Consumers that need
/// stronger guarantees put idempotency keys into the event payload.
pub struct OfflineQueue {
    store: Arc<dyn EventQueueStore>,
    drain_lock: Mutex<()>,
}

impl OfflineQueue {
    pub fn new(store: Arc<dyn EventQueueStore>) -> Self {
        Self {
            store,
            drain_lock: Mutex::new(()),
        }
    }

    /// Captures an event. Never touches the network; the only failure mode
    /// is the durable store itself, which is fatal and surfaced as-is.
    pub async fn enqueue(
        &self,
        kind: EventKind,
        payload: EventPayload,
    ) -> Result<SequenceId, AppError> {
        let sequence_id = self.store.append(&kind, &payload, Utc::now()).await?;
        debug!(kind = kind.as_str(), %sequence_id, "offline event captured");
        Ok(sequence_id)
    }

    pub async fn pending_count(&self) -> Result<u32, AppError> {
        Ok(self.store.pending().await?.len() as u32)
    }

    /// Replays all queued events in ascending sequence order.
    ///
    /// `apply` confirming with `Ok(true)` deletes the event; `Ok(false)` or
    /// an error leaves it queued for the next drain and processing moves on
    /// to the next event, so a single stuck event cannot starve unrelated
    /// work. A drain issued while another is in flight is a no-op.
    pub async fn drain<F, Fut>(&self, mut apply: F) -> Result<DrainReport, AppError>
    where
        F: FnMut(OfflineEvent) -> Fut,
        Fut: Future<Output = Result<bool, AppError>>,
    {
        let Ok(_guard) = self.drain_lock.try_lock() else {
            debug!("queue drain already in flight, skipping");
            return Ok(DrainReport::not_run());
        };

        let events = self.store.pending().await?;
        let mut report = DrainReport {
            ran: true,
            ..DrainReport::default()
        };

        for event in events {
            let sequence_id = event.sequence_id;
            let kind = event.kind.clone();
            match apply(event).await {
                Ok(true) => {
                    self.store.remove(sequence_id).await?;
                    report.applied_count += 1;
                }
                Ok(false) => {
                    debug!(kind = kind.as_str(), %sequence_id, "event not accepted, left queued");
                    report.failed_count += 1;
                }
                Err(err) => {
                    warn!(
                        kind = kind.as_str(),
                        %sequence_id,
                        "event replay failed, left queued: {err}"
                    );
                    report.failed_count += 1;
                }
            }
        }

        report.pending_count = self.store.pending().await?.len() as u32;

        if report.failed_count == 0 {
            metrics::drain_metric().record_success();
        } else {
            metrics::drain_metric().record_failure();
        }

        debug!(
            applied = report.applied_count,
            failed = report.failed_count,
            pending = report.pending_count,
            "queue drain finished"
        );

        Ok(report)
    }
}
