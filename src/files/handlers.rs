use super::service::FileService;
use super::types::{
    FileSource, LastUploadedResponse, ListAllResponse, LongestLinesParams, LongestLinesResponse,
    RandomLineBackwardsResponse, UploadResponse,
};
use crate::error::{FileServiceError, Result};
use crate::negotiation::types::NegotiatedPayload;

use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::http::header::ACCEPT;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

pub const ENDPOINT_UPLOAD: &str = "/files/upload/";
pub const ENDPOINT_LIST_ALL: &str = "/files/list_all/";
pub const ENDPOINT_LAST_UPLOADED: &str = "/files/last_uploaded/";
pub const ENDPOINT_ONE_RANDOM_LINE: &str = "/files/one_random_line/";
pub const ENDPOINT_ONE_RANDOM_LINE_BACKWARDS: &str = "/files/one_random_line_backwards/";
pub const ENDPOINT_LONGEST_LINES: &str = "/files/20_longest_line_of_one_file/";

/// Multipart field carrying the uploaded file.
const UPLOAD_FIELD: &str = "file";

/// Mounts the file endpoints. `max_upload_bytes` replaces axum's default
/// body cap for every route.
pub fn router(service: Arc<FileService>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route(ENDPOINT_UPLOAD, post(handle_upload))
        .route(ENDPOINT_LIST_ALL, get(handle_list_all))
        .route(ENDPOINT_LAST_UPLOADED, get(handle_last_uploaded))
        .route(ENDPOINT_ONE_RANDOM_LINE, get(handle_one_random_line))
        .route(
            ENDPOINT_ONE_RANDOM_LINE_BACKWARDS,
            get(handle_one_random_line_backwards),
        )
        .route(ENDPOINT_LONGEST_LINES, get(handle_longest_lines))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(Extension(service))
}

fn upload_error(e: MultipartError) -> FileServiceError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        FileServiceError::UploadTooLarge
    } else {
        FileServiceError::InvalidUpload(e.body_text())
    }
}

pub async fn handle_upload(
    Extension(service): Extension<Arc<FileService>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(upload_error)?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(upload_error)?;

        let record = service
            .upload(filename.as_deref(), content_type.as_deref(), data)
            .await?;

        return Ok(Json(UploadResponse {
            key: record.key.clone(),
            filename: record.key,
        }));
    }

    Err(FileServiceError::InvalidUpload(format!(
        "Missing multipart field: {}",
        UPLOAD_FIELD
    )))
}

pub async fn handle_list_all(
    Extension(service): Extension<Arc<FileService>>,
) -> Result<Json<ListAllResponse>> {
    let results = service.list_all().await?;
    Ok(Json(ListAllResponse { results }))
}

pub async fn handle_last_uploaded(
    Extension(service): Extension<Arc<FileService>>,
) -> Result<Json<LastUploadedResponse>> {
    let results = service.last_uploaded().await?;
    Ok(Json(LastUploadedResponse { results }))
}

pub async fn handle_one_random_line(
    Extension(service): Extension<Arc<FileService>>,
    headers: HeaderMap,
) -> Result<NegotiatedPayload> {
    // Non-ASCII bytes do not make the header absent
    let accept = headers
        .get(ACCEPT)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
    let mut rng = StdRng::from_entropy();

    service.one_random_line(accept.as_deref(), &mut rng).await
}

pub async fn handle_one_random_line_backwards(
    Extension(service): Extension<Arc<FileService>>,
) -> Result<Json<RandomLineBackwardsResponse>> {
    let mut rng = StdRng::from_entropy();
    service.one_random_line_backwards(&mut rng).await.map(Json)
}

pub async fn handle_longest_lines(
    Extension(service): Extension<Arc<FileService>>,
    Query(params): Query<LongestLinesParams>,
) -> Result<Json<LongestLinesResponse>> {
    let source = if params.random_file {
        FileSource::Random
    } else {
        FileSource::MostRecent
    };
    let mut rng = StdRng::from_entropy();

    service.longest_lines(source, &mut rng).await.map(Json)
}
