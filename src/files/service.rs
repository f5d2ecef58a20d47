use super::types::{
    FileSource, LongestLineItem, LongestLinesResponse, RandomLineBackwardsResponse,
};
use crate::analysis::ranker::{LONGEST_LINES_LIMIT, longest_lines};
use crate::analysis::sampler::{sample_line, sample_line_reversed};
use crate::analysis::tokenizer::read_lines;
use crate::error::{FileServiceError, Result};
use crate::metadata::gateway::MetadataGateway;
use crate::metadata::sampler::UniformRecordSampler;
use crate::metadata::types::UploadRecord;
use crate::negotiation::negotiator::render;
use crate::negotiation::types::{NegotiatedPayload, Representation};
use crate::storage::backend::ObjectStore;
use crate::storage::types::StoredObject;

use bytes::Bytes;
use chrono::Utc;
use rand::Rng;
use std::sync::Arc;

/// Request-scoped orchestration over the two stores.
///
/// Holds only shared handles; every line sequence and payload is built per
/// call and dropped with it.
pub struct FileService {
    metadata: Arc<dyn MetadataGateway>,
    store: Arc<dyn ObjectStore>,
    records: UniformRecordSampler,
    container: String,
    allowed_extensions: Vec<String>,
}

impl FileService {
    pub fn new(
        metadata: Arc<dyn MetadataGateway>,
        store: Arc<dyn ObjectStore>,
        container: impl Into<String>,
        allowed_extensions: Vec<String>,
    ) -> Self {
        Self {
            records: UniformRecordSampler::new(metadata.clone()),
            metadata,
            store,
            container: container.into(),
            allowed_extensions,
        }
    }

    /// Validates, stores the bytes, then records the upload.
    pub async fn upload(
        &self,
        filename: Option<&str>,
        content_type: Option<&str>,
        data: Bytes,
    ) -> Result<UploadRecord> {
        let key = validate_upload(filename, content_type, &self.allowed_extensions)?;
        let size_bytes = data.len() as u64;

        if let Err(e) = self.store.store(data, &self.container, &key).await {
            tracing::error!("Failed to upload file: {}. Error: {:#}", key, e);
            return Err(FileServiceError::UploadFailed { key });
        }

        let record = self
            .metadata
            .insert(&self.container, &key, size_bytes, Utc::now())
            .await?;

        tracing::info!("Uploaded {} ({} bytes) as record {}", key, size_bytes, record.id);
        Ok(record)
    }

    pub async fn list_all(&self) -> Result<Vec<StoredObject>> {
        let objects = self.store.list(&self.container).await?;
        if objects.is_empty() {
            return Err(FileServiceError::NoRecords);
        }
        Ok(objects)
    }

    pub async fn last_uploaded(&self) -> Result<UploadRecord> {
        self.metadata
            .get_most_recent(&self.container)
            .await?
            .ok_or(FileServiceError::NoRecords)
    }

    /// Random line of the most recent file, shaped by the `Accept` header.
    pub async fn one_random_line<R: Rng + Send>(
        &self,
        accept: Option<&str>,
        rng: &mut R,
    ) -> Result<NegotiatedPayload> {
        let representation = Representation::from_accept(accept)?;

        let record = self.resolve(FileSource::MostRecent, rng).await?;
        let lines = self.load_lines(&record).await?;
        let sampled = sample_line(&lines, rng)?;

        tracing::debug!(
            "Sampled line {} of {} from {} as {:?}",
            sampled.index,
            lines.len(),
            record.key,
            representation
        );

        render(representation, sampled, &record.key)
    }

    /// Random line of a uniformly random file, reversed.
    pub async fn one_random_line_backwards<R: Rng + Send>(
        &self,
        rng: &mut R,
    ) -> Result<RandomLineBackwardsResponse> {
        let record = self.resolve(FileSource::Random, rng).await?;
        let lines = self.load_lines(&record).await?;
        let sampled = sample_line_reversed(&lines, rng)?;

        Ok(RandomLineBackwardsResponse {
            random_line_backwards: sampled.content,
        })
    }

    /// Longest lines of the most recent or of a random file.
    ///
    /// An empty file yields an empty list rather than an error.
    pub async fn longest_lines<R: Rng + Send>(
        &self,
        source: FileSource,
        rng: &mut R,
    ) -> Result<LongestLinesResponse> {
        let record = self.resolve(source, rng).await?;
        let lines = self.load_lines(&record).await?;

        let lines = longest_lines(lines, LONGEST_LINES_LIMIT)
            .into_iter()
            .map(|line_content| LongestLineItem { line_content })
            .collect();

        Ok(LongestLinesResponse {
            file_key: record.key,
            lines,
        })
    }

    async fn resolve<R: Rng + Send>(&self, source: FileSource, rng: &mut R) -> Result<UploadRecord> {
        let record = match source {
            FileSource::MostRecent => self.metadata.get_most_recent(&self.container).await?,
            FileSource::Random => self.records.sample(&self.container, rng).await?,
        };

        record.ok_or(FileServiceError::NoRecords)
    }

    async fn load_lines(&self, record: &UploadRecord) -> Result<Vec<String>> {
        let Some(stream) = self
            .store
            .fetch(&record.container_name, &record.key)
            .await?
        else {
            tracing::error!(
                "File is missing in the storage: {}/{}",
                record.container_name,
                record.key
            );
            return Err(FileServiceError::ObjectMissing {
                container: record.container_name.clone(),
                key: record.key.clone(),
            });
        };

        read_lines(stream).await
    }
}

/// Checks an upload's name and content type, returning the key to store it under.
pub fn validate_upload(
    filename: Option<&str>,
    content_type: Option<&str>,
    allowed_extensions: &[String],
) -> Result<String> {
    let filename = filename
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| FileServiceError::InvalidUpload("File must have a valid extension.".into()))?;

    let Some((_, extension)) = filename.rsplit_once('.') else {
        return Err(FileServiceError::InvalidUpload(
            "File must have a valid extension.".into(),
        ));
    };

    let extension = extension.to_ascii_lowercase();
    if !allowed_extensions.iter().any(|allowed| *allowed == extension) {
        let listed: Vec<String> = allowed_extensions
            .iter()
            .map(|ext| format!(".{}", ext))
            .collect();
        return Err(FileServiceError::InvalidUpload(format!(
            "Invalid file format. Only {} files are allowed.",
            listed.join(", ")
        )));
    }

    if !content_type.is_some_and(|ct| ct.starts_with("text/")) {
        return Err(FileServiceError::InvalidUpload(
            "Invalid file format. Only text-based files are allowed.".into(),
        ));
    }

    Ok(filename.to_string())
}
