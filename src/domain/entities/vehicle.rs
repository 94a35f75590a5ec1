use crate::domain::entities::SyncRecord;
use crate::domain::value_objects::{Identity, RemoteId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub identity: Identity,
    pub plate: String,
    pub model: String,
    pub year: Option<i32>,
    pub total_km_accumulated: f64,
    pub last_maintenance_km: f64,
    /// Per-vehicle oil change interval in km; the configured default applies
    /// when absent.
    pub oil_change_km: Option<f64>,
}

impl Vehicle {
    pub fn new(plate: String, model: String) -> Self {
        Self {
            identity: Identity::fresh(),
            plate,
            model,
            year: None,
            total_km_accumulated: 0.0,
            last_maintenance_km: 0.0,
            oil_change_km: None,
        }
    }

    pub fn km_since_maintenance(&self) -> f64 {
        self.total_km_accumulated - self.last_maintenance_km
    }

    pub fn register_maintenance(&mut self) {
        self.last_maintenance_km = self.total_km_accumulated;
    }
}

impl SyncRecord for Vehicle {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn assign_identity(&mut self, id: RemoteId) {
        self.identity = Identity::Persisted(id);
    }
}
