use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Classification of an installed file, derived from its path suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileKind {
    Source,
    NativeBinary,
    Other,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Source => write!(f, "source"),
            FileKind::NativeBinary => write!(f, "native-binary"),
            FileKind::Other => write!(f, "other"),
        }
    }
}

/// Line counts for a single source file.
/// `code` excludes blank lines and lines starting with the comment prefix
/// (after trimming); `total` counts every line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCount {
    pub code: u64,
    pub total: u64,
}

/// A native artifact owned by a package: its install-root-relative path and
/// on-disk size in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryArtifact {
    pub path: PathBuf,
    pub size: u64,
}

/// One row of the LOC ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocEntry {
    pub package: String,
    pub code_lines: u64,
}

/// All native artifacts of one package, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryGroup {
    pub package: String,
    pub artifacts: Vec<BinaryArtifact>,
}

/// Aggregate counts over a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootprintSummary {
    pub package_count: usize,
    pub source_file_count: usize,
    pub binary_file_count: usize,
    pub skipped_file_count: usize,
}

/// Result of a footprint run.
///
/// `loc` is sorted by code-line count descending, ties broken by package
/// name ascending. `binaries` is grouped by package (name ascending) and
/// only contains packages that own at least one native artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootprintReport {
    pub loc: Vec<LocEntry>,
    pub binaries: Vec<BinaryGroup>,
    pub summary: FootprintSummary,
}
