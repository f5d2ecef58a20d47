//! Metadata gateway contract.

use super::types::UploadRecord;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Row storage for upload records.
///
/// Offsets passed to `get_at_offset` are interpreted against the
/// most-recent-first ordering of the container, the same ordering
/// `get_most_recent` reads the head of.
#[async_trait]
pub trait MetadataGateway: Send + Sync {
    /// Number of records currently stored under `container`.
    async fn count(&self, container: &str) -> Result<u64>;

    /// Record at position `offset` (0 = most recent), or `None` past the end.
    async fn get_at_offset(&self, container: &str, offset: u64) -> Result<Option<UploadRecord>>;

    async fn get_most_recent(&self, container: &str) -> Result<Option<UploadRecord>>;

    async fn insert(
        &self,
        container: &str,
        key: &str,
        size_bytes: u64,
        uploaded_at: DateTime<Utc>,
    ) -> Result<UploadRecord>;
}
