//! Local storage persisted as a flat JSON object on disk.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::domain::{LocalStorage, StorageError};

pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Load `path`, starting empty when the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!("Opened storage {} ({} key(s))", path.display(), entries.len());
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    fn update(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| std::io::Error::other("storage lock poisoned"))?;
        change(&mut entries);
        self.persist(&entries)
    }
}

impl LocalStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("codearena-storage-{}-{}", std::process::id(), name))
            .join("storage.json")
    }

    #[test]
    fn test_values_survive_reopen() {
        // テスト項目: 保存した値は再度開いても残っている
        // given (前提条件):
        let path = temp_path("reopen");
        let _ = fs::remove_file(&path);
        let storage = FileStorage::open(&path).unwrap();

        // when (操作):
        storage.set("token", "abc").unwrap();
        storage.set("userId", "alice").unwrap();
        storage.remove("userId").unwrap();
        let reopened = FileStorage::open(&path).unwrap();

        // then (期待する結果):
        assert_eq!(reopened.get("token").as_deref(), Some("abc"));
        assert_eq!(reopened.get("userId"), None);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        // テスト項目: JSON として不正なファイルはエラーになる
        // given (前提条件):
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        // when (操作):
        let result = FileStorage::open(&path);

        // then (期待する結果):
        assert!(matches!(result, Err(StorageError::Json(_))));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
