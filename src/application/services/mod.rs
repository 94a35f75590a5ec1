pub mod alert_engine;
pub mod offline_queue;
pub mod reconciler;
pub mod sync_service;

pub use alert_engine::{AlertInputs, carry_read_flags, compute_alerts};
pub use offline_queue::OfflineQueue;
pub use reconciler::{ReconcileError, ReconcileOutcome, ReconcileSummary, Reconciler};
pub use sync_service::{
    EntityReport, FleetState, FleetSyncReport, RemoteStores, SyncService, SyncStatus,
    roll_trip_distance_into_vehicles,
};
