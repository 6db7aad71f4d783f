use std::io;
use std::path::Path;
use tempfile::TempPath;

use super::model::OutputFormat;

const FILE_PREFIX: &str = "tts_";

/// Uniquely named file that buffers one streamed response.
///
/// The file is removed when the guard is released or dropped, whichever comes
/// first. Removal errors are logged and never surfaced.
#[derive(Debug)]
pub struct TransientFile {
    path: Option<TempPath>,
}

impl TransientFile {
    pub fn create_in(dir: &Path, format: OutputFormat) -> io::Result<Self> {
        let suffix = format!(".{}", format.extension());
        let path = tempfile::Builder::new()
            .prefix(FILE_PREFIX)
            .suffix(&suffix)
            .tempfile_in(dir)?
            .into_temp_path();

        tracing::debug!(path = %path.display(), "Transient file created");

        Ok(Self { path: Some(path) })
    }

    pub fn path(&self) -> &Path {
        match &self.path {
            Some(path) => &**path,
            None => Path::new(""),
        }
    }

    /// Delete the file now
    pub fn release(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        if let Some(path) = self.path.take() {
            let shown = path.display().to_string();
            match path.close() {
                Ok(()) => tracing::debug!(path = %shown, "Transient file removed"),
                Err(e) => tracing::debug!(
                    path = %shown,
                    error = %e,
                    "Failed to remove transient file"
                ),
            }
        }
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        self.remove();
    }
}
