pub mod drain_report;
pub mod offline_event;

pub use drain_report::DrainReport;
pub use offline_event::OfflineEvent;
