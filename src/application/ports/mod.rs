pub mod blob_store;
pub mod connectivity;
pub mod event_applier;
pub mod event_store;
pub mod remote_store;

pub use blob_store::BlobStore;
pub use connectivity::ConnectivityProbe;
pub use event_applier::EventApplier;
pub use event_store::EventQueueStore;
pub use remote_store::RemoteCollection;
