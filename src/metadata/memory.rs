use super::gateway::MetadataGateway;
use super::types::UploadRecord;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-process metadata store.
///
/// Each container keeps its records sorted oldest-first by
/// `(uploaded_at, id)`, so the most-recent-first offset is a plain index
/// from the back and `count` never touches the rows.
pub struct InMemoryMetadataGateway {
    containers: Arc<DashMap<String, Vec<UploadRecord>>>,
    next_id: AtomicU64,
}

impl InMemoryMetadataGateway {
    pub fn new() -> Self {
        Self {
            containers: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryMetadataGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataGateway for InMemoryMetadataGateway {
    async fn count(&self, container: &str) -> Result<u64> {
        Ok(self
            .containers
            .get(container)
            .map(|records| records.len() as u64)
            .unwrap_or(0))
    }

    async fn get_at_offset(&self, container: &str, offset: u64) -> Result<Option<UploadRecord>> {
        let Some(records) = self.containers.get(container) else {
            return Ok(None);
        };

        let Ok(offset) = usize::try_from(offset) else {
            return Ok(None);
        };

        if offset >= records.len() {
            return Ok(None);
        }

        Ok(Some(records[records.len() - 1 - offset].clone()))
    }

    async fn get_most_recent(&self, container: &str) -> Result<Option<UploadRecord>> {
        Ok(self
            .containers
            .get(container)
            .and_then(|records| records.last().cloned()))
    }

    async fn insert(
        &self,
        container: &str,
        key: &str,
        size_bytes: u64,
        uploaded_at: DateTime<Utc>,
    ) -> Result<UploadRecord> {
        let record = UploadRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            container_name: container.to_string(),
            key: key.to_string(),
            size_bytes,
            uploaded_at,
        };

        let mut records = self.containers.entry(container.to_string()).or_default();
        let position = records
            .partition_point(|r| (r.uploaded_at, r.id) <= (record.uploaded_at, record.id));
        records.insert(position, record.clone());

        tracing::debug!(
            "Recorded upload {} as id {} in container {}",
            record.key,
            record.id,
            container
        );

        Ok(record)
    }
}
