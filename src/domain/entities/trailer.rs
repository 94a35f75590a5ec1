use crate::domain::entities::SyncRecord;
use crate::domain::value_objects::{Identity, RemoteId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trailer {
    pub identity: Identity,
    pub plate: String,
    pub axle_count: Option<u8>,
    /// Identity key of the tractor unit this trailer is coupled to, if any.
    pub vehicle_key: Option<String>,
}

impl Trailer {
    pub fn new(plate: String) -> Self {
        Self {
            identity: Identity::fresh(),
            plate,
            axle_count: None,
            vehicle_key: None,
        }
    }
}

impl SyncRecord for Trailer {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn assign_identity(&mut self, id: RemoteId) {
        self.identity = Identity::Persisted(id);
    }
}
