//! Per-attempt working directory.

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// A uniquely named directory holding one attempt's transaction files.
///
/// Removed by `remove`, or on drop if the attempt bailed out early.
#[derive(Debug)]
pub struct WorkDir {
    path: PathBuf,
    removed: bool,
}

impl WorkDir {
    /// Create `<root>/<uuid v4>`.
    pub async fn create(root: &Path) -> io::Result<Self> {
        let path = root.join(Uuid::new_v4().to_string());
        tokio::fs::create_dir(&path).await?;
        tracing::debug!(work_dir = %path.display(), "Created working directory");
        Ok(Self {
            path,
            removed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a file inside the directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Delete the directory and everything in it.
    pub async fn remove(mut self) -> io::Result<()> {
        self.removed = true;
        tokio::fs::remove_dir_all(&self.path).await?;
        tracing::debug!(work_dir = %self.path.display(), "Removed working directory");
        Ok(())
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = std::fs::remove_dir_all(&self.path) {
            tracing::error!(work_dir = %self.path.display(), error = %e, "Error removing directory");
        }
    }
}
