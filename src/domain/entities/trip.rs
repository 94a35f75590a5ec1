use crate::domain::entities::SyncRecord;
use crate::domain::value_objects::{Identity, RemoteId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Partial,
    Paid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub identity: Identity,
    pub vehicle_key: Option<String>,
    pub driver_key: Option<String>,
    pub shipper_key: Option<String>,
    pub payment_status: PaymentStatus,
    pub departure_date: Option<String>,
    /// Return date as stored by the backoffice (`YYYY-MM-DD`); parsed
    /// defensively by the alert engine.
    pub return_date: Option<String>,
    pub distance_km: f64,
    pub fuel_cost: f64,
    pub freight_value: f64,
}

impl Trip {
    pub fn new() -> Self {
        Self {
            identity: Identity::fresh(),
            vehicle_key: None,
            driver_key: None,
            shipper_key: None,
            payment_status: PaymentStatus::Pending,
            departure_date: None,
            return_date: None,
            distance_km: 0.0,
            fuel_cost: 0.0,
            freight_value: 0.0,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    pub fn mark_paid(&mut self) {
        self.payment_status = PaymentStatus::Paid;
    }
}

impl Default for Trip {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncRecord for Trip {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn assign_identity(&mut self, id: RemoteId) {
        self.identity = Identity::Persisted(id);
    }
}
