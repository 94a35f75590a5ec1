use crate::domain::entities::SyncRecord;
use crate::domain::value_objects::{Identity, RemoteId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tire {
    pub identity: Identity,
    pub fire_number: String,
    pub brand: Option<String>,
    pub position: Option<String>,
    pub vehicle_key: Option<String>,
    pub km_installed: Option<f64>,
}

impl Tire {
    pub fn new(fire_number: String) -> Self {
        Self {
            identity: Identity::fresh(),
            fire_number,
            brand: None,
            position: None,
            vehicle_key: None,
            km_installed: None,
        }
    }
}

impl SyncRecord for Tire {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn assign_identity(&mut self, id: RemoteId) {
        self.identity = Identity::Persisted(id);
    }
}
