use crate::error::{FileServiceError, Result};
use crate::storage::types::ByteStream;

use futures::TryStreamExt;

/// Incremental line decoder.
///
/// Bytes are buffered until a `\n` arrives, so a chunk boundary may fall
/// anywhere, even inside a multi-byte character. Lines are returned without
/// their terminator (`\n` or `\r\n`). A trailing terminator does not produce
/// an extra empty line; a final unterminated line is returned by `finish`.
#[derive(Debug, Default)]
pub struct LineTokenizer {
    pending: Vec<u8>,
    emitted: usize,
}

impl LineTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk and returns every line it completed.
    ///
    /// Only the new bytes are searched for terminators; the buffered tail
    /// already holds none.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<String>> {
        let mut search_from = self.pending.len();
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(pos) = self.pending[search_from..].iter().position(|&b| b == b'\n') {
            let end = search_from + pos;
            let raw = &self.pending[start..end];
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            lines.push(decode_line(raw, self.emitted + 1)?);
            self.emitted += 1;
            start = end + 1;
            search_from = start;
        }

        self.pending.drain(..start);
        Ok(lines)
    }

    /// Flushes the last line if the input did not end with a terminator.
    pub fn finish(self) -> Result<Option<String>> {
        if self.pending.is_empty() {
            return Ok(None);
        }
        decode_line(&self.pending, self.emitted + 1).map(Some)
    }
}

/// `line` is 1-based.
fn decode_line(raw: &[u8], line: usize) -> Result<String> {
    String::from_utf8(raw.to_vec()).map_err(|_| FileServiceError::Decoding { line })
}

/// Drains `stream` once and returns its lines in file order.
///
/// Transport errors from the stream surface as `Backend`, bad bytes as
/// `Decoding`. The stream is dropped on the first error.
pub async fn read_lines(mut stream: ByteStream) -> Result<Vec<String>> {
    let mut tokenizer = LineTokenizer::new();
    let mut lines = Vec::new();

    while let Some(chunk) = stream.try_next().await? {
        lines.extend(tokenizer.push(&chunk)?);
    }
    lines.extend(tokenizer.finish()?);

    tracing::debug!("Tokenized {} lines", lines.len());
    Ok(lines)
}
