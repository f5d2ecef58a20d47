//! Error taxonomy shared by the sampling core and the HTTP layer.
//!
//! Every variant except `Backend` is a user-visible failure with its own
//! status code. `Backend` wraps collaborator I/O errors: the full chain is
//! logged server side and the caller only sees a generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FileServiceError>;

const INTERNAL_ERROR_DETAIL: &str = "An internal server error occurred";

#[derive(Debug, Error)]
pub enum FileServiceError {
    #[error("No files have been uploaded yet.")]
    NoRecords,

    #[error("File is missing in the storage: {key}")]
    ObjectMissing { container: String, key: String },

    #[error("Empty file")]
    EmptyContent,

    #[error("File is not valid UTF-8 text (line {line})")]
    Decoding { line: usize },

    #[error("Line contains no alphabetic characters")]
    NoAlphabeticContent,

    #[error("Header is missing: accept")]
    MissingNegotiationHeader,

    #[error("{0}")]
    InvalidUpload(String),

    #[error("File exceeds the upload size limit.")]
    UploadTooLarge,

    #[error("Failed to upload file: {key}")]
    UploadFailed { key: String },

    #[error("Backend failure: {0:#}")]
    Backend(#[from] anyhow::Error),
}

impl FileServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NoRecords | Self::ObjectMissing { .. } => StatusCode::NOT_FOUND,
            Self::EmptyContent
            | Self::Decoding { .. }
            | Self::NoAlphabeticContent
            | Self::MissingNegotiationHeader
            | Self::InvalidUpload(_)
            | Self::UploadFailed { .. } => StatusCode::BAD_REQUEST,
            Self::UploadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for FileServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = match &self {
            Self::Backend(e) => {
                tracing::error!("Request failed on a backend call: {:?}", e);
                INTERNAL_ERROR_DETAIL.to_string()
            }
            other => {
                tracing::debug!("Request rejected ({}): {}", status, other);
                other.to_string()
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}
