use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::types::LineCount;

/// Count lines in a source file in a single forward pass.
///
/// Every line increments `total`. A line increments `code` when, after
/// trimming whitespace, it is non-empty and does not start with
/// `comment_prefix`.
pub fn count_lines(path: &Path, comment_prefix: &str) -> io::Result<LineCount> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut counts = LineCount::default();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with(comment_prefix) {
            counts.code += 1;
        }
        counts.total += 1;
    }
    Ok(counts)
}

/// On-disk size of a native artifact, in bytes.
pub fn file_size(path: &Path) -> io::Result<u64> {
    Ok(std::fs::metadata(path)?.len())
}
