use serde::{Deserialize, Serialize};

/// Outcome of one queue drain pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DrainReport {
    /// False when the pass was skipped because another drain was in flight.
    pub ran: bool,
    pub applied_count: u32,
    pub failed_count: u32,
    pub pending_count: u32,
}

impl DrainReport {
    pub fn not_run() -> Self {
        Self::default()
    }

    pub fn is_clean(&self) -> bool {
        self.ran && self.failed_count == 0 && self.pending_count == 0
    }
}
