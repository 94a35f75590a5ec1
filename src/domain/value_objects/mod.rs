pub mod alert_id;
pub mod cache_key;
pub mod event_kind;
pub mod event_payload;
pub mod identity;
pub mod sequence_id;

pub use alert_id::AlertId;
pub use cache_key::CacheKey;
pub use event_kind::EventKind;
pub use event_payload::EventPayload;
pub use identity::{Identity, LocalId, RemoteId};
pub use sequence_id::SequenceId;
