//! Object storage integration for fetching source images
//!
//! Images are addressed by key within a single bucket chosen by process
//! configuration.

pub mod client;
pub mod mock;

pub use client::S3ObjectStore;
pub use mock::MockObjectStore;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the full contents of the object stored under `key`.
    async fn get_object(&self, key: &str) -> Result<Vec<u8>>;
}
