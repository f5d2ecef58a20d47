use super::backend::ObjectStore;
use super::types::{ByteStream, StoredObject};
use crate::config::{Settings, StorageBackend};

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use futures::{StreamExt, TryStreamExt};
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore as ObjectStoreClient, PutPayload};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// Objects live at `<container>/<key>` inside a shared namespace.
    Prefixed,
    /// The client is bound to one bucket, objects live at `<key>`.
    Bucket,
}

/// `ObjectStore` over an `object_store` client.
pub struct BlobStore {
    client: Arc<dyn ObjectStoreClient>,
    layout: Layout,
}

impl BlobStore {
    pub fn in_memory() -> Self {
        Self {
            client: Arc::new(InMemory::new()),
            layout: Layout::Prefixed,
        }
    }

    pub fn local(root: &Path) -> Result<Self> {
        std::fs::create_dir_all(root)
            .with_context(|| format!("Failed to create storage root {}", root.display()))?;
        let client = LocalFileSystem::new_with_prefix(root)
            .with_context(|| format!("Failed to open local store at {}", root.display()))?;

        Ok(Self {
            client: Arc::new(client),
            layout: Layout::Prefixed,
        })
    }

    pub fn s3(endpoint: &str, bucket: &str, region: &str, key: &str, secret: &str) -> Result<Self> {
        let client = AmazonS3Builder::new()
            .with_endpoint(endpoint)
            .with_allow_http(endpoint.starts_with("http://"))
            .with_bucket_name(bucket)
            .with_region(region)
            .with_access_key_id(key)
            .with_secret_access_key(secret)
            .build()
            .with_context(|| format!("Failed to build S3 client for bucket {}", bucket))?;

        Ok(Self {
            client: Arc::new(client),
            layout: Layout::Bucket,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        match settings.storage {
            StorageBackend::Memory => {
                tracing::info!("Using in-memory object store");
                Ok(Self::in_memory())
            }
            StorageBackend::Local => {
                tracing::info!(
                    "Using local object store at {}",
                    settings.storage_path.display()
                );
                Self::local(&settings.storage_path)
            }
            StorageBackend::S3 => {
                // Credentials are not logged
                tracing::info!(
                    "Using S3 object store at {} (bucket {})",
                    settings.s3_url,
                    settings.bucket
                );
                Self::s3(
                    &settings.s3_url,
                    &settings.bucket,
                    &settings.s3_region,
                    &settings.s3_access_key,
                    &settings.s3_secret_key,
                )
            }
        }
    }

    fn location(&self, container: &str, key: &str) -> ObjectPath {
        match self.layout {
            Layout::Prefixed => ObjectPath::from(format!("{}/{}", container, key)),
            Layout::Bucket => ObjectPath::from(key),
        }
    }

    fn list_prefix(&self, container: &str) -> Option<ObjectPath> {
        match self.layout {
            Layout::Prefixed => Some(ObjectPath::from(container)),
            Layout::Bucket => None,
        }
    }
}

#[async_trait]
impl ObjectStore for BlobStore {
    async fn fetch(&self, container: &str, key: &str) -> Result<Option<ByteStream>> {
        let location = self.location(container, key);

        match self.client.get(&location).await {
            Ok(result) => Ok(Some(result.into_stream().map_err(anyhow::Error::from).boxed())),
            Err(object_store::Error::NotFound { .. }) => {
                tracing::debug!("Object {} not found", location);
                Ok(None)
            }
            Err(e) => Err(anyhow::Error::from(e).context(format!("Failed to read {}", location))),
        }
    }

    async fn store(&self, data: Bytes, container: &str, key: &str) -> Result<()> {
        let location = self.location(container, key);
        let size = data.len();

        self.client
            .put(&location, PutPayload::from(data))
            .await
            .with_context(|| format!("Failed to write {}", location))?;

        tracing::info!("Stored {} ({} bytes)", location, size);
        Ok(())
    }

    async fn list(&self, container: &str) -> Result<Vec<StoredObject>> {
        let prefix = self.list_prefix(container);
        let strip = prefix.as_ref().map(|p| format!("{}/", p));

        let metas = self
            .client
            .list(prefix.as_ref())
            .try_collect::<Vec<_>>()
            .await
            .with_context(|| format!("Failed to list container {}", container))?;

        let mut objects: Vec<StoredObject> = metas
            .into_iter()
            .map(|meta| {
                let location = meta.location.to_string();
                let key = match &strip {
                    Some(strip) => location
                        .strip_prefix(strip.as_str())
                        .unwrap_or(&location)
                        .to_string(),
                    None => location.clone(),
                };
                StoredObject {
                    key,
                    size_bytes: meta.size,
                    last_modified: meta.last_modified,
                }
            })
            .collect();

        objects.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(objects)
    }
}
