use crate::application::ports::RemoteCollection;
use crate::domain::entities::SyncRecord;
use crate::domain::value_objects::{Identity, RemoteId};
use crate::shared::metrics;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Per-item remote rejection recorded during a reconciliation pass. These are
/// surfaced to the caller for user notification and never abort the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ReconcileError {
    #[error("create rejected for {entity} {key}: {reason}")]
    Create {
        entity: String,
        key: String,
        reason: String,
    },
    #[error("update rejected for {entity} {key}: {reason}")]
    Update {
        entity: String,
        key: String,
        reason: String,
    },
    #[error("delete rejected for {entity} {key}: {reason}")]
    Delete {
        entity: String,
        key: String,
        reason: String,
    },
}

impl ReconcileError {
    pub fn key(&self) -> &str {
        match self {
            ReconcileError::Create { key, .. }
            | ReconcileError::Update { key, .. }
            | ReconcileError::Delete { key, .. } => key,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileSummary {
    pub created: u32,
    pub updated: u32,
    pub unchanged: u32,
    pub deleted: u32,
    pub save_failures: u32,
    pub delete_failures: u32,
}

impl ReconcileSummary {
    pub fn saved(&self) -> u32 {
        self.created + self.updated + self.unchanged
    }

    pub fn attempted(&self) -> u32 {
        self.saved() + self.save_failures
    }

    /// Aggregate line for the UI, e.g. "3 of 4 saved". Partial success is an
    /// expected outcome, not an error state.
    pub fn describe(&self) -> String {
        format!("{} of {} saved", self.saved(), self.attempted())
    }
}

#[derive(Debug, Clone)]
pub struct ReconcileOutcome<T> {
    pub collection: Vec<T>,
    pub errors: Vec<ReconcileError>,
    pub summary: ReconcileSummary,
}

/// Synchronizes one in-memory entity collection with the remote store in a
/// single pass, tolerating independent per-item failure.
///
/// Items are processed sequentially in collection order; entity types are
/// independent of each other and may run concurrently. The reconciler owns
/// no cross-entity knowledge: cumulative-field cascades (a trip's distance
/// feeding a vehicle's accumulated km) are the caller's responsibility.
pub struct Reconciler<T> {
    remote: Arc<dyn RemoteCollection<T>>,
    entity: &'static str,
}

impl<T> Reconciler<T>
where
    T: SyncRecord + PartialEq + Send + Sync,
{
    pub fn new(remote: Arc<dyn RemoteCollection<T>>, entity: &'static str) -> Self {
        Self { remote, entity }
    }

    /// Classifies every item of `current` against `snapshot` (the last state
    /// fetched from the remote store), applies each change independently and
    /// folds remote-assigned identities back into the returned collection.
    ///
    /// The snapshot is used only as the deletion baseline and as the
    /// no-change reference: a persisted item byte-equal to its snapshot
    /// counterpart is not re-sent.
    pub async fn reconcile(&self, current: Vec<T>, snapshot: &[T]) -> ReconcileOutcome<T> {
        let mut errors = Vec::new();
        let mut summary = ReconcileSummary::default();

        self.delete_removed(&current, snapshot, &mut errors, &mut summary)
            .await;

        let mut collection = Vec::with_capacity(current.len());
        for item in current {
            match item.identity().clone() {
                Identity::Pending(_) => {
                    self.create_item(item, &mut collection, &mut errors, &mut summary)
                        .await;
                }
                Identity::Persisted(remote_id) => {
                    self.update_item(
                        remote_id,
                        item,
                        snapshot,
                        &mut collection,
                        &mut errors,
                        &mut summary,
                    )
                    .await;
                }
            }
        }

        if errors.is_empty() {
            metrics::reconcile_metric().record_success();
        } else {
            metrics::reconcile_metric().record_failure();
        }

        debug!(
            entity = self.entity,
            created = summary.created,
            updated = summary.updated,
            unchanged = summary.unchanged,
            deleted = summary.deleted,
            failures = summary.save_failures + summary.delete_failures,
            "reconcile pass finished"
        );

        ReconcileOutcome {
            collection,
            errors,
            summary,
        }
    }

    /// Items present in the snapshot whose identity no longer appears locally
    /// were removed by the user. Only persisted items produce remote deletes;
    /// a pending item that vanished locally never reached the remote store.
    async fn delete_removed(
        &self,
        current: &[T],
        snapshot: &[T],
        errors: &mut Vec<ReconcileError>,
        summary: &mut ReconcileSummary,
    ) {
        let live: HashSet<&str> = current.iter().map(|item| item.identity().key()).collect();

        for stale in snapshot {
            if live.contains(stale.identity().key()) {
                continue;
            }
            let Some(remote_id) = stale.identity().as_persisted() else {
                continue;
            };
            match self.remote.delete(remote_id).await {
                Ok(()) => summary.deleted += 1,
                Err(err) => {
                    // Accepted risk: the record reappears on the next full
                    // refresh instead of being silently re-deleted.
                    warn!(
                        entity = self.entity,
                        key = remote_id.as_str(),
                        "remote delete failed: {err}"
                    );
                    summary.delete_failures += 1;
                    errors.push(ReconcileError::Delete {
                        entity: self.entity.to_string(),
                        key: remote_id.as_str().to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    async fn create_item(
        &self,
        item: T,
        collection: &mut Vec<T>,
        errors: &mut Vec<ReconcileError>,
        summary: &mut ReconcileSummary,
    ) {
        let key = item.identity().key().to_string();
        match self.remote.create(&item).await {
            Ok(saved) if saved.identity().is_persisted() => {
                summary.created += 1;
                collection.push(saved);
            }
            Ok(_) => {
                summary.save_failures += 1;
                errors.push(ReconcileError::Create {
                    entity: self.entity.to_string(),
                    key,
                    reason: "remote returned a record without a durable identity".to_string(),
                });
                collection.push(item);
            }
            Err(err) => {
                warn!(entity = self.entity, key = %key, "remote create failed: {err}");
                summary.save_failures += 1;
                errors.push(ReconcileError::Create {
                    entity: self.entity.to_string(),
                    key,
                    reason: err.to_string(),
                });
                collection.push(item);
            }
        }
    }

    async fn update_item(
        &self,
        remote_id: RemoteId,
        item: T,
        snapshot: &[T],
        collection: &mut Vec<T>,
        errors: &mut Vec<ReconcileError>,
        summary: &mut ReconcileSummary,
    ) {
        let unchanged = snapshot
            .iter()
            .any(|s| s.identity().as_persisted() == Some(&remote_id) && *s == item);
        if unchanged {
            summary.unchanged += 1;
            collection.push(item);
            return;
        }

        match self.remote.update(&remote_id, &item).await {
            Ok(()) => summary.updated += 1,
            Err(err) => {
                warn!(
                    entity = self.entity,
                    key = remote_id.as_str(),
                    "remote update failed: {err}"
                );
                summary.save_failures += 1;
                errors.push(ReconcileError::Update {
                    entity: self.entity.to_string(),
                    key: remote_id.as_str().to_string(),
                    reason: err.to_string(),
                });
            }
        }
        // The item is retained either way: on success the remote copy is
        // assumed equal, on failure the pre-mutation state stays visible.
        collection.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Vehicle;
    use crate::shared::error::AppError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockVehicleRemote {
        calls: Mutex<Vec<String>>,
        fail_creates: Vec<String>,
        fail_updates: Vec<String>,
        fail_deletes: Vec<String>,
    }

    impl MockVehicleRemote {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RemoteCollection<Vehicle> for MockVehicleRemote {
        async fn create(&self, record: &Vehicle) -> Result<Vehicle, AppError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("create:{}", record.plate));
            if self.fail_creates.contains(&record.plate) {
                return Err(AppError::Remote("create rejected".to_string()));
            }
            let mut saved = record.clone();
            saved.assign_identity(
                RemoteId::new(format!("srv-{}-4cbb-9d2c-f1a2b3c4d5e6", record.plate)).unwrap(),
            );
            Ok(saved)
        }

        async fn update(&self, id: &RemoteId, _record: &Vehicle) -> Result<(), AppError> {
            self.calls.lock().unwrap().push(format!("update:{id}"));
            if self.fail_updates.contains(&id.as_str().to_string()) {
                return Err(AppError::Remote("update rejected".to_string()));
            }
            Ok(())
        }

        async fn delete(&self, id: &RemoteId) -> Result<(), AppError> {
            self.calls.lock().unwrap().push(format!("delete:{id}"));
            if self.fail_deletes.contains(&id.as_str().to_string()) {
                return Err(AppError::Remote("delete rejected".to_string()));
            }
            Ok(())
        }
    }

    fn persisted_vehicle(id: &str, plate: &str) -> Vehicle {
        let mut vehicle = Vehicle::new(plate.to_string(), "FH 540".to_string());
        vehicle.assign_identity(RemoteId::new(id.to_string()).unwrap());
        vehicle
    }

    fn reconciler(remote: Arc<MockVehicleRemote>) -> Reconciler<Vehicle> {
        Reconciler::new(remote, "vehicle")
    }

    #[tokio::test]
    async fn unchanged_collection_issues_no_remote_calls() {
        let remote = Arc::new(MockVehicleRemote::default());
        let snapshot = vec![
            persisted_vehicle("veh-1", "ABC1D23"),
            persisted_vehicle("veh-2", "DEF4E56"),
        ];

        let outcome = reconciler(remote.clone())
            .reconcile(snapshot.clone(), &snapshot)
            .await;

        assert!(remote.calls().is_empty());
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.summary.unchanged, 2);
        assert_eq!(outcome.collection, snapshot);
    }

    #[tokio::test]
    async fn pending_item_is_created_and_replaced_with_persisted_copy() {
        let remote = Arc::new(MockVehicleRemote::default());
        let fresh = Vehicle::new("GHI7F89".to_string(), "Actros".to_string());
        let temp_key = fresh.identity.key().to_string();

        let outcome = reconciler(remote.clone()).reconcile(vec![fresh], &[]).await;

        assert_eq!(remote.calls(), vec!["create:GHI7F89"]);
        assert_eq!(outcome.summary.created, 1);
        assert!(outcome.collection[0].identity.is_persisted());
        assert_ne!(outcome.collection[0].identity.key(), temp_key);
        assert_eq!(outcome.collection[0].plate, "GHI7F89");
    }

    #[tokio::test]
    async fn failed_create_retains_temp_item_and_retries_without_duplication() {
        let remote = Arc::new(MockVehicleRemote {
            fail_creates: vec!["GHI7F89".to_string()],
            ..Default::default()
        });
        let fresh = Vehicle::new("GHI7F89".to_string(), "Actros".to_string());
        let expected = fresh.clone();

        let outcome = reconciler(remote.clone())
            .reconcile(vec![fresh], &[])
            .await;

        assert_eq!(outcome.collection, vec![expected.clone()]);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].key(), expected.identity.key());
        assert_eq!(outcome.summary.describe(), "0 of 1 saved");

        // Next pass with a healthy remote: the same item is created once.
        let healthy = Arc::new(MockVehicleRemote::default());
        let retried = reconciler(healthy.clone())
            .reconcile(outcome.collection, &[])
            .await;
        assert_eq!(healthy.calls(), vec!["create:GHI7F89"]);
        assert_eq!(retried.collection.len(), 1);
        assert!(retried.collection[0].identity.is_persisted());
    }

    #[tokio::test]
    async fn locally_removed_persisted_item_gets_exactly_one_delete() {
        let remote = Arc::new(MockVehicleRemote::default());
        let kept = persisted_vehicle("veh-1", "ABC1D23");
        let removed = persisted_vehicle("veh-2", "DEF4E56");
        let never_persisted = Vehicle::new("JKL0G12".to_string(), "Scania".to_string());
        let snapshot = vec![kept.clone(), removed, never_persisted];

        let outcome = reconciler(remote.clone())
            .reconcile(vec![kept.clone()], &snapshot)
            .await;

        // One delete for the persisted removal, none for the pending one.
        assert_eq!(remote.calls(), vec!["delete:veh-2"]);
        assert_eq!(outcome.summary.deleted, 1);
        assert_eq!(outcome.collection, vec![kept]);
    }

    #[tokio::test]
    async fn failed_delete_does_not_block_the_rest_of_the_pass() {
        let remote = Arc::new(MockVehicleRemote {
            fail_deletes: vec!["veh-1".to_string()],
            ..Default::default()
        });
        let snapshot = vec![
            persisted_vehicle("veh-1", "ABC1D23"),
            persisted_vehicle("veh-2", "DEF4E56"),
        ];
        let fresh = Vehicle::new("GHI7F89".to_string(), "Actros".to_string());

        let outcome = reconciler(remote.clone())
            .reconcile(vec![fresh], &snapshot)
            .await;

        let calls = remote.calls();
        assert!(calls.contains(&"delete:veh-1".to_string()));
        assert!(calls.contains(&"delete:veh-2".to_string()));
        assert!(calls.contains(&"create:GHI7F89".to_string()));
        assert_eq!(outcome.summary.deleted, 1);
        assert_eq!(outcome.summary.delete_failures, 1);
        assert_eq!(outcome.summary.created, 1);
        assert_eq!(outcome.errors.len(), 1);
    }

    #[tokio::test]
    async fn changed_persisted_item_is_updated_in_place() {
        let remote = Arc::new(MockVehicleRemote::default());
        let snapshot = vec![persisted_vehicle("veh-1", "ABC1D23")];
        let mut edited = snapshot[0].clone();
        edited.total_km_accumulated = 1_250.0;

        let outcome = reconciler(remote.clone())
            .reconcile(vec![edited.clone()], &snapshot)
            .await;

        assert_eq!(remote.calls(), vec!["update:veh-1"]);
        assert_eq!(outcome.summary.updated, 1);
        assert_eq!(outcome.collection, vec![edited]);
    }

    #[tokio::test]
    async fn failed_update_retains_item_and_surfaces_error() {
        let remote = Arc::new(MockVehicleRemote {
            fail_updates: vec!["veh-1".to_string()],
            ..Default::default()
        });
        let snapshot = vec![persisted_vehicle("veh-1", "ABC1D23")];
        let mut edited = snapshot[0].clone();
        edited.model = "FH 460".to_string();
        let unchanged = persisted_vehicle("veh-2", "DEF4E56");

        let outcome = reconciler(remote)
            .reconcile(
                vec![edited.clone(), unchanged.clone()],
                &[snapshot[0].clone(), unchanged.clone()],
            )
            .await;

        assert_eq!(outcome.collection, vec![edited, unchanged]);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].key(), "veh-1");
        assert_eq!(outcome.summary.describe(), "1 of 2 saved");
    }
}
