use super::types::{ByteStream, StoredObject};

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Byte storage for uploaded files, addressed by container and key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Opens the object for reading.
    ///
    /// `Ok(None)` means the object does not exist. Any other failure is an
    /// `Err` and must not be mistaken for a missing object.
    async fn fetch(&self, container: &str, key: &str) -> Result<Option<ByteStream>>;

    async fn store(&self, data: Bytes, container: &str, key: &str) -> Result<()>;

    async fn list(&self, container: &str) -> Result<Vec<StoredObject>>;
}
