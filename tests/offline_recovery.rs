mod common;

use common::CollectingApplier;
use frota_sync::application::ports::{EventApplier, EventQueueStore};
use frota_sync::application::services::OfflineQueue;
use frota_sync::domain::value_objects::{EventKind, EventPayload};
use frota_sync::infrastructure::storage::SqliteEventQueueStore;
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::sync::Arc;

async fn file_pool(path: &Path) -> Pool<Sqlite> {
    let url = format!("sqlite://{}?mode=rwc", path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

fn kind(value: &str) -> EventKind {
    EventKind::new(value.to_string()).unwrap()
}

fn payload(value: serde_json::Value) -> EventPayload {
    EventPayload::new(value).unwrap()
}

#[tokio::test]
async fn queued_events_survive_a_store_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("frota.db");

    {
        let pool = file_pool(&db_path).await;
        let queue = OfflineQueue::new(Arc::new(SqliteEventQueueStore::new(pool.clone())));
        queue
            .enqueue(kind("trip_delivered"), payload(json!({"trip": "t1"})))
            .await
            .unwrap();
        queue
            .enqueue(kind("fuel_entry_added"), payload(json!({"litres": 320})))
            .await
            .unwrap();
        pool.close().await;
    }

    // Simulated app restart: a fresh pool over the same file sees the queue
    // unchanged and in capture order.
    let store = SqliteEventQueueStore::new(file_pool(&db_path).await);
    let pending = store.pending().await.unwrap();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].kind.as_str(), "trip_delivered");
    assert_eq!(pending[1].kind.as_str(), "fuel_entry_added");
    assert!(pending[0].sequence_id < pending[1].sequence_id);
}

#[tokio::test]
async fn stuck_event_is_replayed_on_a_later_drain() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("frota.db");
    let pool = file_pool(&db_path).await;
    let queue = OfflineQueue::new(Arc::new(SqliteEventQueueStore::new(pool)));

    for (step, trip) in [("trip_delivered", "t1"), ("trip_paid", "t1"), ("trip_delivered", "t2")] {
        queue
            .enqueue(kind(step), payload(json!({"trip": trip})))
            .await
            .unwrap();
    }

    // The remote rejects payment confirmations for now; deliveries drain.
    let flaky = CollectingApplier::failing(&["trip_paid"]);
    let report = queue
        .drain(|event| {
            let applier = flaky.clone();
            async move { applier.apply(&event).await }
        })
        .await
        .unwrap();

    assert_eq!(report.applied_count, 2);
    assert_eq!(report.failed_count, 1);
    assert_eq!(report.pending_count, 1);
    assert_eq!(
        flaky.seen(),
        vec!["trip_delivered", "trip_paid", "trip_delivered"]
    );

    // Next drain, remote healthy again: only the stuck event is replayed.
    let healthy = CollectingApplier::accepting();
    let retry = queue
        .drain(|event| {
            let applier = healthy.clone();
            async move { applier.apply(&event).await }
        })
        .await
        .unwrap();

    assert_eq!(retry.applied_count, 1);
    assert_eq!(retry.pending_count, 0);
    assert_eq!(healthy.seen(), vec!["trip_paid"]);
}
