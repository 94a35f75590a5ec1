pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use application::ports::{
    BlobStore, ConnectivityProbe, EventApplier, EventQueueStore, RemoteCollection,
};
pub use application::services::{
    AlertInputs, FleetState, FleetSyncReport, OfflineQueue, ReconcileOutcome, Reconciler,
    RemoteStores, SyncService, carry_read_flags, compute_alerts,
    roll_trip_distance_into_vehicles,
};
pub use domain::entities::{
    Alert, AlertKind, DrainReport, Driver, OfflineEvent, Shipper, SyncRecord, Tire, Trailer, Trip,
    Vehicle,
};
pub use domain::value_objects::{Identity, LocalId, RemoteId};
pub use shared::config::AppConfig;
pub use shared::error::AppError;

/// Wires the tracing subscriber for hosts that do not install their own.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "frota_sync=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
