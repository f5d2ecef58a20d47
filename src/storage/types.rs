use anyhow::Result;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

/// Chunked file content as returned by `ObjectStore::fetch`.
pub type ByteStream = BoxStream<'static, Result<Bytes>>;

/// Listing entry for one stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    pub key: String,
    pub size_bytes: u64,
    pub last_modified: DateTime<Utc>,
}
