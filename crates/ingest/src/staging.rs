use std::path::{Path, PathBuf};

use tracing::warn;

/// A file staged on local storage for the duration of one extraction call.
///
/// The underlying file is removed when the guard drops, on every exit path.
/// Removal failures are logged and never replace the error that is already
/// being surfaced.
#[derive(Debug)]
pub struct StagedFile {
    path: Option<PathBuf>,
}

impl StagedFile {
    /// Take ownership of an existing file on disk.
    pub fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// Write `bytes` to `path` and take ownership of the result.
    pub async fn create(path: PathBuf, bytes: &[u8]) -> std::io::Result<Self> {
        tokio::fs::write(&path, bytes).await?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        self.path.as_deref().expect("staged file path present until drop")
    }

    /// Move the staged file to a new path; the guard follows it.
    pub async fn rename(&mut self, new_path: PathBuf) -> std::io::Result<()> {
        tokio::fs::rename(self.path(), &new_path).await?;
        self.path = Some(new_path);
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("failed to remove staged file {}: {}", path.display(), e);
                }
            }
        }
    }
}
