mod mappers;
mod rows;
pub mod sqlite_blob_store;
pub mod sqlite_event_store;

pub use sqlite_blob_store::SqliteBlobStore;
pub use sqlite_event_store::SqliteEventQueueStore;
