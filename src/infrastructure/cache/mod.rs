pub mod blob_cache;

pub use blob_cache::BlobCache;
