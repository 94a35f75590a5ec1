use crate::domain::value_objects::{EventKind, EventPayload, SequenceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A state-changing action captured while the remote store was unreachable.
/// Lives in the durable queue until the corresponding remote write is
/// confirmed, at which point it is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OfflineEvent {
    pub sequence_id: SequenceId,
    pub kind: EventKind,
    pub payload: EventPayload,
    pub captured_at: DateTime<Utc>,
    pub synced: bool,
}

impl OfflineEvent {
    pub fn new(
        sequence_id: SequenceId,
        kind: EventKind,
        payload: EventPayload,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sequence_id,
            kind,
            payload,
            captured_at,
            synced: false,
        }
    }
}
