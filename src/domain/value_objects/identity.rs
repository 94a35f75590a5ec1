use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity tag carried by every syncable record.
///
/// A freshly created record holds a client-generated [`LocalId`] until the
/// remote store acknowledges it; after that it carries the server-assigned
/// [`RemoteId`]. Create-vs-update classification during reconciliation is a
/// match on this enum, never a string-format heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "id", rename_all = "snake_case")]
pub enum Identity {
    Pending(LocalId),
    Persisted(RemoteId),
}

impl Identity {
    /// New identity for a record that has never been persisted remotely.
    pub fn fresh() -> Self {
        Identity::Pending(LocalId::generate())
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, Identity::Persisted(_))
    }

    pub fn as_persisted(&self) -> Option<&RemoteId> {
        match self {
            Identity::Persisted(id) => Some(id),
            Identity::Pending(_) => None,
        }
    }

    /// Stable string key for either variant. Used to correlate records
    /// across collections and to derive alert identities.
    pub fn key(&self) -> &str {
        match self {
            Identity::Pending(id) => id.as_str(),
            Identity::Persisted(id) => id.as_str(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Client-assigned placeholder id for a not-yet-persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalId(String);

impl LocalId {
    pub fn new(value: String) -> Result<Self, String> {
        if value.trim().is_empty() {
            return Err("Local id cannot be empty".to_string());
        }
        Ok(Self(value))
    }

    pub fn generate() -> Self {
        let token = Uuid::new_v4().simple().to_string();
        Self(format!("tmp-{}", &token[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-assigned identifier proving the record exists in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteId(String);

impl RemoteId {
    pub fn new(value: String) -> Result<Self, String> {
        if value.trim().is_empty() {
            return Err("Remote id cannot be empty".to_string());
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RemoteId> for String {
    fn from(value: RemoteId) -> Self {
        value.0
    }
}
