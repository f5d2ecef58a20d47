//! Runtime settings.
//!
//! Every flag can also be provided through the environment variable named in
//! its `env` attribute; explicit flags win.

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Largest request body the upload endpoint accepts.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    Memory,
    Local,
    S3,
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "text-sampler",
    version,
    about = "Upload text files and query random, reversed and longest lines"
)]
pub struct Settings {
    /// HTTP listen address.
    #[arg(long, env = "APP_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    #[arg(long, env = "STORAGE_BACKEND", value_enum, default_value = "memory")]
    pub storage: StorageBackend,

    /// Root directory for the `local` backend.
    #[arg(long, env = "STORAGE_PATH", default_value = "./data")]
    pub storage_path: PathBuf,

    #[arg(long, env = "S3_URL", default_value = "http://localhost:9000")]
    pub s3_url: String,

    #[arg(long, env = "S3_ACCESS_KEY", default_value = "s3_local_access_key")]
    pub s3_access_key: String,

    #[arg(long, env = "S3_SECRET_KEY", default_value = "s3_local_secret_key")]
    pub s3_secret_key: String,

    #[arg(long, env = "S3_REGION", default_value = "us-east-1")]
    pub s3_region: String,

    /// Container every upload is recorded under.
    #[arg(long, env = "S3_DEFAULT_BUCKET_NAME", default_value = "default-bucket")]
    pub bucket: String,

    /// File extensions accepted by the upload endpoint.
    #[arg(
        long,
        env = "ALLOWED_EXTENSIONS",
        value_delimiter = ',',
        default_value = "txt,csv,json"
    )]
    pub allowed_extensions: Vec<String>,

    /// Request body cap for uploads, in bytes.
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: tracing::Level,
}

impl Settings {
    /// Allowed extensions, lower-cased and without a leading dot.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.allowed_extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect()
    }
}
