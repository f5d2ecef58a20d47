/// A line drawn from a file, with its 0-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledLine {
    pub index: usize,
    pub content: String,
}

/// Most frequent letter of a line and how often it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyResult {
    pub letter: char,
    pub count: usize,
}
