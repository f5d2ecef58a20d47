/// How many lines the longest-lines query returns.
pub const LONGEST_LINES_LIMIT: usize = 20;

/// Returns up to `limit` lines, longest first.
///
/// Length is counted in `char`s. The sort is stable, so lines of equal
/// length keep their order from the file.
pub fn longest_lines(lines: Vec<String>, limit: usize) -> Vec<String> {
    let mut ranked: Vec<(usize, String)> = lines
        .into_iter()
        .map(|line| (line.chars().count(), line))
        .collect();

    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked.truncate(limit);

    ranked.into_iter().map(|(_, line)| line).collect()
}
