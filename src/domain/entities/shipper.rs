use crate::domain::entities::SyncRecord;
use crate::domain::value_objects::{Identity, RemoteId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shipper {
    pub identity: Identity,
    pub name: String,
    pub document: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl Shipper {
    pub fn new(name: String) -> Self {
        Self {
            identity: Identity::fresh(),
            name,
            document: None,
            city: None,
            state: None,
        }
    }
}

impl SyncRecord for Shipper {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn assign_identity(&mut self, id: RemoteId) {
        self.identity = Identity::Persisted(id);
    }
}
