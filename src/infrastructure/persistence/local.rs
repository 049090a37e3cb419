use std::path::{Path, PathBuf};

use tokio::fs;

use crate::utils::error::{Error, Result};

/// Key holding the cached session projection.
pub const SESSION_KEY: &str = "user";
/// Key holding the full roster array.
pub const ROSTER_KEY: &str = "users";

/// Hard ceiling per written value. Exceeding it is a reportable failure,
/// never a silent truncation.
pub const MAX_VALUE_BYTES: u64 = 4 * 1024 * 1024;

/// Browser-storage-style fallback: a handful of top-level keys, each one a
/// JSON document read and written wholesale. No partial updates.
#[derive(Debug, Clone)]
pub struct LocalRecordStore {
    dir: PathBuf,
}

impl LocalRecordStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let size_bytes = value.len() as u64;
        if size_bytes > MAX_VALUE_BYTES {
            return Err(Error::StorageQuotaExceeded { size_bytes });
        }

        fs::create_dir_all(&self.dir).await?;
        fs::write(self.path_for(key), value).await?;
        Ok(())
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalRecordStore::new(tmp.path());

        assert_eq!(store.get(ROSTER_KEY).await.unwrap(), None);
        store.set(ROSTER_KEY, "[]").await.unwrap();
        assert_eq!(store.get(ROSTER_KEY).await.unwrap().as_deref(), Some("[]"));
        store.remove(ROSTER_KEY).await.unwrap();
        assert_eq!(store.get(ROSTER_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn oversized_write_reports_quota() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalRecordStore::new(tmp.path());

        let big = "x".repeat((MAX_VALUE_BYTES + 1) as usize);
        match store.set(SESSION_KEY, &big).await {
            Err(Error::StorageQuotaExceeded { size_bytes }) => {
                assert_eq!(size_bytes, MAX_VALUE_BYTES + 1);
            }
            other => panic!("expected quota error, got {other:?}"),
        }
        // nothing was written
        assert_eq!(store.get(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn removing_a_missing_key_is_fine() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalRecordStore::new(tmp.path());
        store.remove("user").await.unwrap();
    }
}
