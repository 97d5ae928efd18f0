use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chirp_core::{MediaStore, StoreError};
use tracing::debug;
use uuid::Uuid;

/// Images live under `<root>/tweets/` with random names.
#[derive(Debug, Clone)]
pub struct FsMediaStore {
    root: PathBuf,
}

const UPLOAD_DIR: &str = "tweets";

impl FsMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl MediaStore for FsMediaStore {
    async fn save(&self, bytes: &[u8], extension: &str) -> Result<String, StoreError> {
        let relative = format!("{UPLOAD_DIR}/{}.{extension}", Uuid::new_v4().simple());
        let dir = self.root.join(UPLOAD_DIR);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(self.root.join(&relative), bytes).await?;
        debug!(path = %relative, size = bytes.len(), "stored image");
        Ok(relative)
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.root.join(path)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
