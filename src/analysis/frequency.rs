use super::types::FrequencyResult;
use crate::error::{FileServiceError, Result};

use std::collections::BTreeMap;

/// Finds the most frequent letter of `line`, ignoring case.
///
/// Only alphabetic characters are counted. When several letters share the
/// top count the one with the smallest code point wins, which is plain a-z
/// order for ASCII text.
pub fn most_frequent_letter(line: &str) -> Result<FrequencyResult> {
    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    for letter in line
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphabetic())
    {
        *counts.entry(letter).or_insert(0) += 1;
    }

    // BTreeMap iterates in ascending order; only a strictly higher count replaces the leader
    counts
        .into_iter()
        .fold(None, |best: Option<FrequencyResult>, (letter, count)| match best {
            Some(leader) if leader.count >= count => Some(leader),
            _ => Some(FrequencyResult { letter, count }),
        })
        .ok_or(FileServiceError::NoAlphabeticContent)
}
