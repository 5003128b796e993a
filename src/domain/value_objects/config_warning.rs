//! Unknown configuration keys

use std::path::PathBuf;

/// A key the loader did not recognise; reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Last segment of the ignored key path, e.g. `memroy`
    pub key: String,
    pub file: PathBuf,
    /// 1-based line of the first occurrence
    pub line: Option<usize>,
    /// Closest known key, when one is near enough
    pub suggestion: Option<String>,
}

impl ConfigWarning {
    /// `file:line`, or just `file` when the line is unknown
    pub fn location(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{}", self.file.display(), line),
            None => self.file.display().to_string(),
        }
    }
}
