//! Ephemeral upload storage

use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Writes uploaded bytes under the configured upload directory
///
/// Stored names are unique per upload, so concurrent uploads of the same
/// client filename never collide.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

/// A stored upload
#[derive(Debug, Clone)]
pub struct StoredUpload {
    /// Unique name the bytes were written under
    pub stored_name: String,
    /// Full path of the stored file
    pub path: PathBuf,
}

impl UploadStore {
    /// Create the store, ensuring the upload directory exists
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .map_err(|e| Error::Config(format!("failed to create upload dir {}: {}", root.display(), e)))?;
        Ok(Self { root })
    }

    /// Reduce a client-supplied filename to a safe basename
    ///
    /// Strips any directory components (both separator styles) so uploads
    /// cannot escape the storage root.
    pub fn sanitize(filename: &str) -> Result<String> {
        let base = filename
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim();

        if base.is_empty() || base == "." || base == ".." {
            return Err(Error::Validation(format!("invalid filename: {filename:?}")));
        }

        Ok(base.to_string())
    }

    /// Write upload bytes under a unique stored name
    pub async fn store(&self, filename: &str, data: &[u8]) -> Result<StoredUpload> {
        let safe = Self::sanitize(filename)?;
        let stored_name = format!("{}_{}", Uuid::new_v4(), safe);
        let path = self.root.join(&stored_name);

        tokio::fs::write(&path, data).await?;

        tracing::debug!("Stored upload {} as {}", filename, stored_name);

        Ok(StoredUpload { stored_name, path })
    }

    /// The storage root
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_directory_components() {
        assert_eq!(
            UploadStore::sanitize("../../etc/passwd").unwrap(),
            "passwd"
        );
        assert_eq!(
            UploadStore::sanitize("..\\..\\windows\\system32").unwrap(),
            "system32"
        );
        assert_eq!(UploadStore::sanitize("report.csv").unwrap(), "report.csv");
    }

    #[test]
    fn sanitize_rejects_empty_and_dot_names() {
        assert!(UploadStore::sanitize("").is_err());
        assert!(UploadStore::sanitize("uploads/").is_err());
        assert!(UploadStore::sanitize("..").is_err());
        assert!(UploadStore::sanitize("a/..").is_err());
    }

    #[tokio::test]
    async fn store_writes_under_root_with_unique_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path()).unwrap();

        let first = store.store("notes.txt", b"one").await.unwrap();
        let second = store.store("notes.txt", b"two").await.unwrap();

        assert_ne!(first.stored_name, second.stored_name);
        assert!(first.path.starts_with(dir.path()));
        assert_eq!(std::fs::read(&first.path).unwrap(), b"one");
        assert_eq!(std::fs::read(&second.path).unwrap(), b"two");
    }

    #[tokio::test]
    async fn traversal_attempts_stay_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path()).unwrap();

        let stored = store.store("../../escape.txt", b"x").await.unwrap();
        assert!(stored.path.starts_with(dir.path()));
        assert!(stored.stored_name.ends_with("escape.txt"));
    }
}
