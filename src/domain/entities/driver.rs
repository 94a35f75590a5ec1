use crate::domain::entities::SyncRecord;
use crate::domain::value_objects::{Identity, RemoteId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Driver {
    pub identity: Identity,
    pub name: String,
    pub cnh_number: Option<String>,
    /// License expiry as stored by the backoffice (`YYYY-MM-DD`); parsed
    /// defensively by the alert engine.
    pub cnh_validity: Option<String>,
    pub phone: Option<String>,
}

impl Driver {
    pub fn new(name: String) -> Self {
        Self {
            identity: Identity::fresh(),
            name,
            cnh_number: None,
            cnh_validity: None,
            phone: None,
        }
    }
}

impl SyncRecord for Driver {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn assign_identity(&mut self, id: RemoteId) {
        self.identity = Identity::Persisted(id);
    }
}
