use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One uploaded file, as recorded after the bytes reached the object store.
///
/// Records are immutable once inserted and are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    /// Identifier assigned by the gateway on insert.
    pub id: u64,
    /// Logical bucket the key lives in.
    pub container_name: String,
    /// Object key, unique within the container.
    pub key: String,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
}
