//! # Filesystem-backed key-value store
//!
//! [`FileStore`] persists each key as one file under a base directory. It is
//! used on native targets so the session survives restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── persist_root.json     # key "persist:root"
//! ```
//!
//! Use `dirs::data_dir()` joined with an app directory for a platform-appropriate base.

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::session::{KeyValueStore, SessionStoreError};

#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.base.join(format!("{name}.json"))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        std::fs::create_dir_all(&self.base)?;
        std::fs::write(self.path(key), value)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, SessionPersistence};

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("catalog");

        let persistence = SessionPersistence::new(FileStore::new(base.clone()));
        let session = Session::signed_in("tok", "file@example.com");
        persistence.save(&session).await.unwrap();
        assert!(base.join("persist_root.json").exists());

        // Re-open from same directory
        let reopened = SessionPersistence::new(FileStore::new(base.clone()));
        assert_eq!(reopened.load().await, session);

        reopened.clear().await.unwrap();
        assert!(!base.join("persist_root.json").exists());
        reopened.clear().await.unwrap();
    }
}
