//! File sink for fetched quotes.

use std::path::{Path, PathBuf};

use crate::domain::Quote;

/// Overwrites a file with `"<label>: <bid>"`.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    label: String,
}

impl FileSink {
    /// Creates a sink writing to `path` with the given label.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }

    /// Target file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Line written for `quote`.
    #[must_use]
    pub fn render(&self, quote: &Quote) -> String {
        format!("{}: {}", self.label, quote.bid)
    }

    /// Replaces the file's content with the rendered quote.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be written.
    pub async fn write(&self, quote: &Quote) -> std::io::Result<()> {
        tokio::fs::write(&self.path, self.render(quote)).await
    }
}
