use std::path::Path;

use crate::config::ClassifyConfig;
use crate::types::FileKind;

/// Classifies installed files by path suffix.
///
/// The suffix sets come from configuration; defaults are `py` for source and
/// `so` for native binaries. Classification looks at nothing but the final
/// extension, so the same suffix always yields the same kind regardless of
/// which package owns the file.
pub struct FileClassifier {
    source_extensions: Vec<String>,
    binary_extensions: Vec<String>,
}

impl FileClassifier {
    pub fn new(config: &ClassifyConfig) -> Self {
        Self {
            source_extensions: config.source_extensions.clone(),
            binary_extensions: config.binary_extensions.clone(),
        }
    }

    /// Classify a file path into source, native binary, or other.
    pub fn classify(&self, path: &Path) -> FileKind {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return FileKind::Other;
        };
        if self.source_extensions.iter().any(|s| s == ext) {
            FileKind::Source
        } else if self.binary_extensions.iter().any(|s| s == ext) {
            FileKind::NativeBinary
        } else {
            FileKind::Other
        }
    }
}
