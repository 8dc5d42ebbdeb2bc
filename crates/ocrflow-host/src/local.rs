use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{HostError, HostResult};
use crate::file_store::FileStore;
use ocrflow_core::models::{FileHandle, FileLookup};

const FALLBACK_MIME: &str = "application/octet-stream";

/// Local filesystem file store
///
/// Maps host file-tree paths (`/docs/scan.pdf`) onto a directory on disk.
/// Useful when the plugin runs against a plain directory instead of a
/// platform-provided tree, and as the reference store in tests.
#[derive(Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Create a new LocalFileStore rooted at `root`, creating the directory
    /// if needed.
    pub async fn new(root: impl Into<PathBuf>) -> HostResult<Self> {
        let root = root.into();

        fs::create_dir_all(&root).await.map_err(|e| {
            HostError::Store(format!(
                "Failed to create file store root {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(LocalFileStore { root })
    }

    /// Convert a tree path to a filesystem path with traversal validation.
    fn tree_to_fs_path(&self, path: &str) -> HostResult<PathBuf> {
        let relative = path.trim_start_matches('/');
        if relative
            .split('/')
            .any(|segment| segment == ".." || segment == ".")
        {
            return Err(HostError::InvalidPath(format!(
                "Path '{}' contains traversal segments",
                path
            )));
        }
        Ok(self.root.join(relative))
    }

    /// MIME type by file extension; octet-stream when unknown.
    fn mime_for(path: &str) -> String {
        mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(FALLBACK_MIME)
            .to_string()
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> HostResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn resolve(&self, path: &str) -> HostResult<FileLookup> {
        let fs_path = self.tree_to_fs_path(path)?;

        let metadata = match fs::metadata(&fs_path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(FileLookup::NotFound);
            }
            Err(e) => return Err(e.into()),
        };

        if !metadata.is_file() {
            return Ok(FileLookup::NotAFile);
        }

        Ok(FileLookup::Found(FileHandle::new(path, Self::mime_for(path))))
    }

    async fn read(&self, file: &FileHandle) -> HostResult<Vec<u8>> {
        let fs_path = self.tree_to_fs_path(&file.path)?;
        fs::read(&fs_path).await.map_err(|e| {
            HostError::Store(format!("Failed to read {}: {}", fs_path.display(), e))
        })
    }

    async fn write_file(&self, directory: &str, filename: &str, data: Vec<u8>) -> HostResult<()> {
        let tree_path = if directory == "/" || directory == "." {
            format!("/{}", filename)
        } else {
            format!("{}/{}", directory.trim_end_matches('/'), filename)
        };
        let fs_path = self.tree_to_fs_path(&tree_path)?;
        let size = data.len();

        self.ensure_parent_dir(&fs_path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&fs_path).await.map_err(|e| {
            HostError::Store(format!("Failed to create file {}: {}", fs_path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            HostError::Store(format!("Failed to write file {}: {}", fs_path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            HostError::Store(format!("Failed to sync file {}: {}", fs_path.display(), e))
        })?;

        tracing::info!(
            path = %fs_path.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local file store write successful"
        );

        Ok(())
    }
}
