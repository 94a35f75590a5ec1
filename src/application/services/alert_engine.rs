use crate::domain::entities::{Alert, AlertKind, Driver, Trip, Vehicle};
use crate::domain::value_objects::AlertId;
use crate::shared::config::AlertConfig;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct AlertInputs<'a> {
    pub trips: &'a [Trip],
    pub vehicles: &'a [Vehicle],
    pub drivers: &'a [Driver],
}

/// Recomputes the complete notification set from scratch.
///
/// Pure and deterministic for identical inputs and a fixed `now`: alert ids
/// are derived from the rule kind and the source entity, so an alert that
/// describes the same underlying fact keeps its identity across
/// recomputations. There is no incremental state; callers rerun this on any
/// change to the input collections or the config snapshot and merge read
/// flags with [`carry_read_flags`].
pub fn compute_alerts(
    inputs: AlertInputs<'_>,
    config: &AlertConfig,
    now: DateTime<Utc>,
) -> Vec<Alert> {
    let today = now.date_naive();
    let mut alerts = Vec::new();

    if config.payment_delay_enabled {
        for trip in inputs.trips {
            if trip.is_paid() {
                continue;
            }
            let Some(raw) = non_empty(trip.return_date.as_deref()) else {
                continue;
            };
            let Some(returned) = parse_date(raw, "return_date", trip.identity.key()) else {
                continue;
            };
            let elapsed = (today - returned).num_days();
            if elapsed >= config.payment_delay_days {
                alerts.push(Alert::new(
                    AlertKind::PaymentDelay,
                    trip.identity.key(),
                    "Payment overdue".to_string(),
                    format!("Trip returned {elapsed} days ago and is still awaiting payment"),
                    now,
                ));
            }
        }
    }

    if config.incomplete_data_enabled {
        for trip in inputs.trips {
            if trip.distance_km <= 0.0 || trip.fuel_cost <= 0.0 {
                alerts.push(Alert::new(
                    AlertKind::IncompleteData,
                    trip.identity.key(),
                    "Trip data incomplete".to_string(),
                    "Distance or fuel cost has not been filled in for this trip".to_string(),
                    now,
                ));
            }
        }
    }

    if config.maintenance_enabled {
        for vehicle in inputs.vehicles {
            let interval = vehicle.oil_change_km.unwrap_or(config.service_interval_km);
            if interval <= 0.0 {
                continue;
            }
            let run = vehicle.km_since_maintenance();
            if run >= interval * config.maintenance_warning_ratio {
                alerts.push(Alert::new(
                    AlertKind::MaintenanceDue,
                    vehicle.identity.key(),
                    "Maintenance due soon".to_string(),
                    format!(
                        "{} has run {:.0} km of its {:.0} km service interval",
                        vehicle.plate, run, interval
                    ),
                    now,
                ));
            }
        }
    }

    if config.license_enabled {
        for driver in inputs.drivers {
            let Some(raw) = non_empty(driver.cnh_validity.as_deref()) else {
                continue;
            };
            let Some(expiry) = parse_date(raw, "cnh_validity", driver.identity.key()) else {
                continue;
            };
            let remaining = (expiry - today).num_days();
            // Expired suppresses the expiring-soon subtype for the same
            // driver on the same day.
            if remaining < 0 {
                alerts.push(Alert::new(
                    AlertKind::LicenseExpired,
                    driver.identity.key(),
                    "License expired".to_string(),
                    format!("{}'s license expired {} days ago", driver.name, -remaining),
                    now,
                ));
            } else if remaining <= config.license_warning_days {
                alerts.push(Alert::new(
                    AlertKind::LicenseExpiringSoon,
                    driver.identity.key(),
                    "License expiring soon".to_string(),
                    format!("{}'s license expires in {} days", driver.name, remaining),
                    now,
                ));
            }
        }
    }

    alerts
}

/// Carries `read=true` over from a previous feed for alert ids that
/// reappear in the freshly computed one.
pub fn carry_read_flags(previous: &[Alert], mut fresh: Vec<Alert>) -> Vec<Alert> {
    let read: HashSet<&AlertId> = previous
        .iter()
        .filter(|alert| alert.read)
        .map(|alert| &alert.id)
        .collect();

    for alert in &mut fresh {
        if read.contains(&alert.id) {
            alert.read = true;
        }
    }
    fresh
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Malformed dates skip only the affected item's alert, never the whole
/// recomputation.
fn parse_date(raw: &str, field: &str, entity_key: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(err) => {
            debug!(field, entity_key, "skipping malformed date {raw:?}: {err}");
            None
        }
    }
}
