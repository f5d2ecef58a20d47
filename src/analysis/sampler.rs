use super::types::SampledLine;
use crate::error::{FileServiceError, Result};

use rand::Rng;

/// Picks one line uniformly from `lines`.
///
/// An empty slice is rejected with `EmptyContent`; callers never get an
/// index outside `0..lines.len()`.
pub fn sample_line<R: Rng + ?Sized>(lines: &[String], rng: &mut R) -> Result<SampledLine> {
    if lines.is_empty() {
        return Err(FileServiceError::EmptyContent);
    }

    let index = rng.gen_range(0..lines.len());
    Ok(SampledLine {
        index,
        content: lines[index].clone(),
    })
}

/// Same draw as `sample_line`, with the content reversed.
pub fn sample_line_reversed<R: Rng + ?Sized>(
    lines: &[String],
    rng: &mut R,
) -> Result<SampledLine> {
    let sampled = sample_line(lines, rng)?;
    Ok(SampledLine {
        index: sampled.index,
        content: reverse_line(&sampled.content),
    })
}

/// Reverses a line by `char`, so multi-byte code points stay intact.
pub fn reverse_line(line: &str) -> String {
    line.chars().rev().collect()
}
