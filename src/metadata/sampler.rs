use super::gateway::MetadataGateway;
use super::types::UploadRecord;

use anyhow::Result;
use rand::Rng;
use rand::distributions::Standard;
use std::sync::Arc;

/// Picks one record uniformly at random from a container.
///
/// Costs two gateway round-trips (count, then offset lookup) whatever the
/// number of stored records.
pub struct UniformRecordSampler {
    metadata: Arc<dyn MetadataGateway>,
}

impl UniformRecordSampler {
    pub fn new(metadata: Arc<dyn MetadataGateway>) -> Self {
        Self { metadata }
    }

    /// Returns `None` when the container holds no records.
    pub async fn sample<R>(&self, container: &str, rng: &mut R) -> Result<Option<UploadRecord>>
    where
        R: Rng + Send,
    {
        let total = self.metadata.count(container).await?;
        if total == 0 {
            return Ok(None);
        }

        let offset = offset_for(rng.sample(Standard), total);
        tracing::debug!(
            "Sampling record {} of {} in container {}",
            offset,
            total,
            container
        );

        self.metadata.get_at_offset(container, offset).await
    }
}

/// Maps a draw from [0, 1) onto `0..total`.
///
/// Float rounding can land exactly on `total`, so the result is clamped to
/// the last valid offset.
pub fn offset_for(draw: f64, total: u64) -> u64 {
    let offset = (draw * total as f64).floor();
    if offset <= 0.0 {
        0
    } else {
        (offset as u64).min(total.saturating_sub(1))
    }
}
