//! Request and response bodies of the `/files` endpoints.

use crate::metadata::types::UploadRecord;
use crate::storage::types::StoredObject;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub key: String,
    pub filename: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListAllResponse {
    pub results: Vec<StoredObject>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LastUploadedResponse {
    pub results: UploadRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomLineBackwardsResponse {
    pub random_line_backwards: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongestLineItem {
    pub line_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongestLinesResponse {
    pub file_key: String,
    pub lines: Vec<LongestLineItem>,
}

/// Query string of the longest-lines endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct LongestLinesParams {
    /// Read a uniformly random file instead of the most recent one.
    #[serde(default)]
    pub random_file: bool,
}

/// Which record an analysis endpoint reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSource {
    MostRecent,
    Random,
}
