//! Storage module
//!
//! Content-addressed blob storage for attachment bytes.

pub mod blob_store;

pub use blob_store::BlobStore;
