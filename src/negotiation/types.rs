use axum::Json;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

pub const MIME_JSON: &str = "application/json";
pub const MIME_XML: &str = "application/xml";
pub const MIME_ANY_APPLICATION: &str = "application/*";
pub const MIME_PLAIN_UTF8: &str = "text/plain; charset=utf-8";

/// Shape selected from the `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Json,
    Xml,
    Detail,
    PlainText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomLineJson {
    pub random_line: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDetail {
    pub line_number: usize,
    pub filename: String,
    pub most_freq_letter: char,
}

/// Exactly one of these is produced per random-line request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NegotiatedPayload {
    PlainText(String),
    Json(RandomLineJson),
    Xml(String),
    Detail(LineDetail),
}

impl IntoResponse for NegotiatedPayload {
    fn into_response(self) -> Response {
        match self {
            Self::PlainText(line) => ([(CONTENT_TYPE, MIME_PLAIN_UTF8)], line).into_response(),
            Self::Json(body) => Json(body).into_response(),
            Self::Xml(document) => ([(CONTENT_TYPE, MIME_XML)], document).into_response(),
            Self::Detail(detail) => Json(detail).into_response(),
        }
    }
}
