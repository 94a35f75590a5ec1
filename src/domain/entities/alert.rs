use crate::domain::value_objects::AlertId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    PaymentDelay,
    IncompleteData,
    MaintenanceDue,
    LicenseExpired,
    LicenseExpiringSoon,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::PaymentDelay => "payment_delay",
            AlertKind::IncompleteData => "incomplete_data",
            AlertKind::MaintenanceDue => "maintenance_due",
            AlertKind::LicenseExpired => "license_expired",
            AlertKind::LicenseExpiringSoon => "license_expiring_soon",
        }
    }
}

/// One entry of the derived notification feed. The whole feed is recomputed
/// from entity state; `read` is the only field that outlives a recomputation,
/// carried over by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub id: AlertId,
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub related_entity_key: Option<String>,
}

impl Alert {
    pub fn new(
        kind: AlertKind,
        entity_key: &str,
        title: String,
        message: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AlertId::derive(kind.as_str(), entity_key),
            kind,
            title,
            message,
            timestamp,
            read: false,
            related_entity_key: Some(entity_key.to_string()),
        }
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }
}
