use crate::application::ports::{ConnectivityProbe, EventApplier, RemoteCollection};
use crate::application::services::offline_queue::OfflineQueue;
use crate::application::services::reconciler::{
    ReconcileError, ReconcileOutcome, ReconcileSummary, Reconciler,
};
use crate::domain::entities::{DrainReport, Driver, Shipper, Tire, Trailer, Trip, Vehicle};
use crate::domain::value_objects::{EventKind, EventPayload, SequenceId};
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// One remote port per entity type. The implementations live in the
/// application shell; the core only relies on the collaborator contract.
pub struct RemoteStores {
    pub vehicles: Arc<dyn RemoteCollection<Vehicle>>,
    pub drivers: Arc<dyn RemoteCollection<Driver>>,
    pub shippers: Arc<dyn RemoteCollection<Shipper>>,
    pub trailers: Arc<dyn RemoteCollection<Trailer>>,
    pub tires: Arc<dyn RemoteCollection<Tire>>,
    pub trips: Arc<dyn RemoteCollection<Trip>>,
}

/// The entity collections the UI renders and edits.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FleetState {
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
    pub shippers: Vec<Shipper>,
    pub trailers: Vec<Trailer>,
    pub tires: Vec<Tire>,
    pub trips: Vec<Trip>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncStatus {
    pub is_syncing: bool,
    pub last_sync: Option<i64>,
    pub pending_events: u32,
    pub sync_errors: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityReport {
    pub summary: ReconcileSummary,
    pub errors: Vec<ReconcileError>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FleetSyncReport {
    /// False when the pass was skipped because another one was in flight.
    pub ran: bool,
    pub drain: DrainReport,
    pub vehicles: EntityReport,
    pub drivers: EntityReport,
    pub shippers: EntityReport,
    pub trailers: EntityReport,
    pub tires: EntityReport,
    pub trips: EntityReport,
}

impl FleetSyncReport {
    pub fn skipped() -> Self {
        Self::default()
    }

    fn entity_reports(&self) -> [&EntityReport; 6] {
        [
            &self.vehicles,
            &self.drivers,
            &self.shippers,
            &self.trailers,
            &self.tires,
            &self.trips,
        ]
    }

    pub fn total_errors(&self) -> usize {
        self.entity_reports()
            .iter()
            .map(|report| report.errors.len())
            .sum()
    }

    /// Aggregate line for the UI, e.g. "11 of 12 saved, 3 events replayed".
    pub fn describe(&self) -> String {
        let (saved, attempted) = self
            .entity_reports()
            .iter()
            .fold((0u32, 0u32), |(saved, attempted), report| {
                (
                    saved + report.summary.saved(),
                    attempted + report.summary.attempted(),
                )
            });
        format!(
            "{} of {} saved, {} events replayed",
            saved, attempted, self.drain.applied_count
        )
    }
}

fn split<T>(outcome: ReconcileOutcome<T>) -> (Vec<T>, EntityReport) {
    (
        outcome.collection,
        EntityReport {
            summary: outcome.summary,
            errors: outcome.errors,
        },
    )
}

/// Connectivity-aware orchestration over the reconcilers and the offline
/// queue. The UI is the sole writer: a pass superseded by a newer user
/// action simply runs to completion and is overwritten by the next pass
/// (last-write-wins at the collection level), so there are no cancellation
/// tokens.
pub struct SyncService {
    connectivity: Arc<dyn ConnectivityProbe>,
    queue: Arc<OfflineQueue>,
    applier: Arc<dyn EventApplier>,
    vehicles: Reconciler<Vehicle>,
    drivers: Reconciler<Driver>,
    shippers: Reconciler<Shipper>,
    trailers: Reconciler<Trailer>,
    tires: Reconciler<Tire>,
    trips: Reconciler<Trip>,
    status: Arc<RwLock<SyncStatus>>,
}

impl SyncService {
    pub fn new(
        connectivity: Arc<dyn ConnectivityProbe>,
        queue: Arc<OfflineQueue>,
        applier: Arc<dyn EventApplier>,
        remotes: RemoteStores,
    ) -> Self {
        Self {
            connectivity,
            queue,
            applier,
            vehicles: Reconciler::new(remotes.vehicles, "vehicle"),
            drivers: Reconciler::new(remotes.drivers, "driver"),
            shippers: Reconciler::new(remotes.shippers, "shipper"),
            trailers: Reconciler::new(remotes.trailers, "trailer"),
            tires: Reconciler::new(remotes.tires, "tire"),
            trips: Reconciler::new(remotes.trips, "trip"),
            status: Arc::new(RwLock::new(SyncStatus {
                is_syncing: false,
                last_sync: None,
                pending_events: 0,
                sync_errors: 0,
            })),
        }
    }

    /// Offline write path: the action is captured durably and replayed on a
    /// later drain instead of hitting the remote store now.
    pub async fn capture(
        &self,
        kind: EventKind,
        payload: EventPayload,
    ) -> Result<SequenceId, AppError> {
        let sequence_id = self.queue.enqueue(kind, payload).await?;
        let pending = self.queue.pending_count().await?;
        self.status.write().await.pending_events = pending;
        Ok(sequence_id)
    }

    /// Replays queued events when the remote store is reachable; a no-op
    /// while offline so the scheduled trigger can fire unconditionally.
    pub async fn drain_pending(&self) -> Result<DrainReport, AppError> {
        if !self.connectivity.is_online().await {
            debug!("skipping queue drain while offline");
            return Ok(DrainReport::not_run());
        }

        let applier = self.applier.clone();
        let report = self
            .queue
            .drain(move |event| {
                let applier = applier.clone();
                async move { applier.apply(&event).await }
            })
            .await?;

        self.status.write().await.pending_events = report.pending_count;
        Ok(report)
    }

    /// Full synchronization pass: queued events first (capture order), then
    /// every entity collection, concurrently across types and sequentially
    /// within each. Returns the folded collections and a per-type report.
    ///
    /// `baseline` is the snapshot fetched from the remote store at session
    /// start; it is the deletion baseline and the no-change reference.
    ///
    /// The caller passes a copy of its rendered collections and swaps in the
    /// folded result on success; on an error the rendered state stays as it
    /// was and nothing has to be rolled back.
    pub async fn sync_fleet(
        &self,
        current: FleetState,
        baseline: &FleetState,
    ) -> Result<(FleetState, FleetSyncReport), AppError> {
        {
            let mut status = self.status.write().await;
            if status.is_syncing {
                debug!("sync pass already in flight, skipping");
                return Ok((current, FleetSyncReport::skipped()));
            }
            status.is_syncing = true;
        }

        let outcome = self.run_pass(current, baseline).await;

        let mut status = self.status.write().await;
        status.is_syncing = false;
        match &outcome {
            Ok((_, report)) => {
                status.last_sync = Some(chrono::Utc::now().timestamp());
                status.pending_events = report.drain.pending_count;
                info!("{}", report.describe());
            }
            Err(err) => {
                status.sync_errors += 1;
                error!("sync pass failed: {err}");
            }
        }

        outcome
    }

    async fn run_pass(
        &self,
        current: FleetState,
        baseline: &FleetState,
    ) -> Result<(FleetState, FleetSyncReport), AppError> {
        if !self.connectivity.is_online().await {
            return Err(AppError::Remote(
                "remote store unreachable while offline".to_string(),
            ));
        }

        let drain = {
            let applier = self.applier.clone();
            self.queue
                .drain(move |event| {
                    let applier = applier.clone();
                    async move { applier.apply(&event).await }
                })
                .await?
        };

        let FleetState {
            vehicles,
            drivers,
            shippers,
            trailers,
            tires,
            trips,
        } = current;

        let (vehicles, drivers, shippers, trailers, tires, trips) = tokio::join!(
            self.vehicles.reconcile(vehicles, &baseline.vehicles),
            self.drivers.reconcile(drivers, &baseline.drivers),
            self.shippers.reconcile(shippers, &baseline.shippers),
            self.trailers.reconcile(trailers, &baseline.trailers),
            self.tires.reconcile(tires, &baseline.tires),
            self.trips.reconcile(trips, &baseline.trips),
        );

        let (vehicles, vehicles_report) = split(vehicles);
        let (drivers, drivers_report) = split(drivers);
        let (shippers, shippers_report) = split(shippers);
        let (trailers, trailers_report) = split(trailers);
        let (tires, tires_report) = split(tires);
        let (trips, trips_report) = split(trips);

        let report = FleetSyncReport {
            ran: true,
            drain,
            vehicles: vehicles_report,
            drivers: drivers_report,
            shippers: shippers_report,
            trailers: trailers_report,
            tires: tires_report,
            trips: trips_report,
        };

        let state = FleetState {
            vehicles,
            drivers,
            shippers,
            trailers,
            tires,
            trips,
        };

        Ok((state, report))
    }

    pub async fn status(&self) -> SyncStatus {
        self.status.read().await.clone()
    }

    /// Timer-based drain trigger. Errors are logged and counted, never
    /// propagated out of the loop.
    pub fn schedule_drain(self: Arc<Self>, interval_secs: u64) {
        let service = self;
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(tokio::time::Duration::from_secs(interval_secs));

            loop {
                interval.tick().await;

                match service.drain_pending().await {
                    Ok(report) if report.ran => {
                        debug!(
                            applied = report.applied_count,
                            pending = report.pending_count,
                            "scheduled drain finished"
                        );
                    }
                    Ok(_) => {}
                    Err(err) => {
                        error!("scheduled drain failed: {err}");
                        service.status.write().await.sync_errors += 1;
                    }
                }
            }
        });
    }
}

/// Cross-entity cascade, owned by the caller by contract: the reconciler
/// knows nothing about cumulative formulas. Folds a trip's distance delta
/// into the owning vehicle's accumulated km; `previous_distance_km` is the
/// distance the trip carried before the edit (0.0 for a new trip).
///
/// Returns false when the trip references no vehicle or the vehicle is not
/// in the collection.
pub fn roll_trip_distance_into_vehicles(
    vehicles: &mut [Vehicle],
    trip: &Trip,
    previous_distance_km: f64,
) -> bool {
    let Some(key) = trip.vehicle_key.as_deref() else {
        return false;
    };
    let Some(vehicle) = vehicles
        .iter_mut()
        .find(|vehicle| vehicle.identity.key() == key)
    else {
        return false;
    };
    vehicle.total_km_accumulated += trip.distance_km - previous_distance_km;
    true
}
