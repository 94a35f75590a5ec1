#![allow(dead_code)]

use async_trait::async_trait;
use frota_sync::application::ports::{
    ConnectivityProbe, EventApplier, EventQueueStore, RemoteCollection,
};
use frota_sync::application::services::OfflineQueue;
use frota_sync::domain::entities::{OfflineEvent, SyncRecord, Vehicle};
use frota_sync::domain::value_objects::RemoteId;
use frota_sync::shared::error::AppError;
use frota_sync::infrastructure::storage::SqliteEventQueueStore;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Connectivity signal the tests flip by hand.
pub struct FlipProbe(AtomicBool);

impl FlipProbe {
    pub fn online() -> Arc<Self> {
        Arc::new(Self(AtomicBool::new(true)))
    }

    pub fn offline() -> Arc<Self> {
        Arc::new(Self(AtomicBool::new(false)))
    }

    pub fn set_online(&self, online: bool) {
        self.0.store(online, Ordering::SeqCst);
    }
}

#[async_trait]
impl ConnectivityProbe for FlipProbe {
    async fn is_online(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Remote that accepts everything and assigns fresh durable identities.
pub struct AcceptingRemote;

#[async_trait]
impl<T> RemoteCollection<T> for AcceptingRemote
where
    T: SyncRecord + Send + Sync + 'static,
{
    async fn create(&self, record: &T) -> Result<T, AppError> {
        let mut saved = record.clone();
        saved.assign_identity(RemoteId::new(Uuid::new_v4().to_string()).unwrap());
        Ok(saved)
    }

    async fn update(&self, _id: &RemoteId, _record: &T) -> Result<(), AppError> {
        Ok(())
    }

    async fn delete(&self, _id: &RemoteId) -> Result<(), AppError> {
        Ok(())
    }
}

/// Vehicle remote that rejects creates for the scripted plates and records
/// every call it receives.
#[derive(Default)]
pub struct ScriptedVehicleRemote {
    pub fail_plates: Vec<String>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedVehicleRemote {
    pub fn failing(plates: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            fail_plates: plates.iter().map(|p| p.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteCollection<Vehicle> for ScriptedVehicleRemote {
    async fn create(&self, record: &Vehicle) -> Result<Vehicle, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("create:{}", record.plate));
        if self.fail_plates.contains(&record.plate) {
            return Err(AppError::Remote("create rejected".to_string()));
        }
        let mut saved = record.clone();
        saved.assign_identity(RemoteId::new(Uuid::new_v4().to_string()).unwrap());
        Ok(saved)
    }

    async fn update(&self, id: &RemoteId, _record: &Vehicle) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(format!("update:{id}"));
        Ok(())
    }

    async fn delete(&self, id: &RemoteId) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(format!("delete:{id}"));
        Ok(())
    }
}

/// Applier that records replayed kinds and rejects the scripted ones.
#[derive(Default)]
pub struct CollectingApplier {
    pub fail_kinds: Vec<String>,
    pub seen: Mutex<Vec<String>>,
}

impl CollectingApplier {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(kinds: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            fail_kinds: kinds.iter().map(|k| k.to_string()).collect(),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventApplier for CollectingApplier {
    async fn apply(&self, event: &OfflineEvent) -> Result<bool, AppError> {
        let kind = event.kind.as_str().to_string();
        self.seen.lock().unwrap().push(kind.clone());
        if self.fail_kinds.contains(&kind) {
            return Ok(false);
        }
        Ok(true)
    }
}

pub async fn memory_pool() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

pub async fn memory_queue() -> Arc<OfflineQueue> {
    let store: Arc<dyn EventQueueStore> = Arc::new(SqliteEventQueueStore::new(memory_pool().await));
    Arc::new(OfflineQueue::new(store))
}

pub fn persisted_vehicle(id: &str, plate: &str) -> Vehicle {
    let mut vehicle = Vehicle::new(plate.to_string(), "FH 540".to_string());
    vehicle.assign_identity(RemoteId::new(id.to_string()).unwrap());
    vehicle
}
