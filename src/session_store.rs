//! JSON file [`SessionStore`].
//!
//! Holds the signed-in user between CLI runs. A file that cannot be
//! decoded is deleted and treated as signed-out.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use vriksha_core::models::User;
use vriksha_core::session::SessionStore;

pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<User>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read session file: {}", self.path.display())
                })
            }
        };

        match serde_json::from_str::<User>(&content) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding unreadable session");
                self.clear()?;
                Ok(None)
            }
        }
    }

    fn save(&self, user: &User) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(user)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove session file: {}", self.path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vriksha_core::users::demo_user;

    #[test]
    fn test_missing_file_is_signed_out() {
        let tmp = TempDir::new().unwrap();
        let store = FileSessionStore::new(tmp.path().join("session.json"));
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn test_save_load_clear() {
        let tmp = TempDir::new().unwrap();
        let store = FileSessionStore::new(tmp.path().join("nested").join("session.json"));

        store.save(&demo_user()).unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"createdAt\""));
        assert_eq!(store.load().unwrap(), Some(demo_user()));

        store.clear().unwrap();
        assert!(!store.path().exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_removed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.load().unwrap().is_none());
        assert!(!path.exists());
    }
}
