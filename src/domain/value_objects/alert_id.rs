use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fmt::Write as _;

/// Deterministic alert identity derived from the rule kind and the source
/// entity key. Recomputing the feed for the same underlying fact always
/// yields the same id, which is what lets read-state survive recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlertId(String);

impl AlertId {
    pub fn derive(rule_kind: &str, entity_key: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(rule_kind.as_bytes());
        hasher.update(b":");
        hasher.update(entity_key.as_bytes());
        let digest = hasher.finalize();

        let mut hex = String::with_capacity(24);
        for byte in digest.iter().take(12) {
            let _ = write!(hex, "{byte:02x}");
        }
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
