//! # Persisted State
//!
//! Key-value storage standing in for the browser's local storage.
//!
//! ## Layout
//! - One key per collection: `favorites`, `history`, `theme`, `diet`
//! - Every value is written as `{"version": N, "data": ...}`
//! - Values are read once on open and rewritten whole on every change
//!
//! ## Migration
//! - No envelope means version 0, the raw layout the browser app wrote
//! - Version 0 strings may not even be JSON (`dark` instead of `"dark"`), those are read as plain strings
//! - Version 0 data is decoded as the current type and rewritten with an envelope
//! - Versions newer than [`CURRENT_VERSION`] are refused
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

pub const CURRENT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage io error: {0}")]
    Io(#[from] io::Error),

    #[error("Corrupt stored value: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{key} was written by a newer version ({version})")]
    UnsupportedVersion { key: String, version: u32 },
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside `root`.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;

        let path = self.path(key);
        let temp = path.with_extension("json.tmp");

        fs::write(&temp, value)?;
        fs::rename(&temp, &path)?;

        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

/// A typed value living under one key of a [`KeyValueStore`].
#[derive(Debug)]
pub struct Persisted<T> {
    key: &'static str,
    value: T,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    pub fn open(store: &mut dyn KeyValueStore, key: &'static str) -> Result<Self, StoreError> {
        let Some(raw) = store.get(key)? else {
            debug!("{key} not stored yet, using default");
            return Ok(Self {
                key,
                value: T::default(),
            });
        };

        let parsed = serde_json::from_str::<Value>(&raw).unwrap_or(Value::String(raw));

        let value = match envelope_version(&parsed) {
            Some(version) if version > CURRENT_VERSION => {
                return Err(StoreError::UnsupportedVersion {
                    key: key.to_string(),
                    version,
                });
            }
            Some(_) => serde_json::from_value::<Envelope<T>>(parsed)?.data,
            None => {
                info!("Migrating {key} from the unversioned layout");

                let value = serde_json::from_value::<T>(parsed)?;
                let migrated = Self { key, value };
                migrated.save(store)?;

                return Ok(migrated);
            }
        };

        Ok(Self { key, value })
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Applies `change` to a copy and rewrites the whole value. The held value only changes once
    /// the write succeeded.
    pub fn update<R>(
        &mut self,
        store: &mut dyn KeyValueStore,
        change: impl FnOnce(&mut T) -> R,
    ) -> Result<R, StoreError> {
        let mut next = self.value.clone();
        let result = change(&mut next);
        self.replace(store, next)?;

        Ok(result)
    }

    pub fn replace(&mut self, store: &mut dyn KeyValueStore, value: T) -> Result<(), StoreError> {
        write(store, self.key, &value)?;
        self.value = value;

        Ok(())
    }

    fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        write(store, self.key, &self.value)
    }
}

fn write<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<(), StoreError> {
    let envelope = Envelope {
        version: CURRENT_VERSION,
        data: value,
    };

    store.set(key, &serde_json::to_string(&envelope)?)
}

/// Memory store that can be told to refuse writes to some keys. Clones share their contents.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub(crate) struct FlakyStore {
    values: std::sync::Arc<std::sync::Mutex<HashMap<String, String>>>,
    failing: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

#[cfg(test)]
impl FlakyStore {
    pub(crate) fn fail(&self, key: &str) {
        self.failing.lock().unwrap().push(key.to_string());
    }
}

#[cfg(test)]
impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.failing.lock().unwrap().iter().any(|failing| failing == key) {
            return Err(io::Error::other("disk full").into());
        }

        self.values.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn envelope_version(value: &Value) -> Option<u32> {
    let object = value.as_object()?;

    if object.len() != 2 || !object.contains_key("data") {
        return None;
    }

    object
        .get("version")?
        .as_u64()
        .and_then(|version| u32::try_from(version).ok())
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use tempfile::tempdir;

    use super::{
        CURRENT_VERSION, FileStore, FlakyStore, KeyValueStore, MemoryStore, Persisted, StoreError,
    };

    #[test]
    fn test_missing_key_defaults() {
        let mut store = MemoryStore::new();
        let names = Persisted::<Vec<String>>::open(&mut store, "names").unwrap();

        assert!(names.get().is_empty());
        assert_eq!(store.get("names").unwrap(), None);
    }

    #[test]
    fn test_update_rewrites_envelope() {
        let mut store = MemoryStore::new();
        let mut names = Persisted::<Vec<String>>::open(&mut store, "names").unwrap();

        names
            .update(&mut store, |names| names.push("dal".to_string()))
            .unwrap();

        let raw: Value = serde_json::from_str(&store.get("names").unwrap().unwrap()).unwrap();
        assert_eq!(raw, json!({ "version": CURRENT_VERSION, "data": ["dal"] }));

        let reopened = Persisted::<Vec<String>>::open(&mut store, "names").unwrap();
        assert_eq!(reopened.get(), &vec!["dal".to_string()]);
    }

    #[test]
    fn test_failed_write_keeps_value() {
        let mut store = FlakyStore::default();
        let mut names = Persisted::<Vec<String>>::open(&mut store, "names").unwrap();
        names
            .update(&mut store, |names| names.push("dal".to_string()))
            .unwrap();

        store.fail("names");
        let result = names.update(&mut store, |names| names.push("rice".to_string()));

        assert!(matches!(result, Err(StoreError::Io(_))));
        assert_eq!(names.get(), &vec!["dal".to_string()]);
    }

    #[test]
    fn test_legacy_array_migrates() {
        let mut store = MemoryStore::new();
        store.set("names", r#"["rice","egg"]"#).unwrap();

        let names = Persisted::<Vec<String>>::open(&mut store, "names").unwrap();
        assert_eq!(names.get().len(), 2);

        let raw: Value = serde_json::from_str(&store.get("names").unwrap().unwrap()).unwrap();
        assert_eq!(raw["version"], CURRENT_VERSION);
        assert_eq!(raw["data"], json!(["rice", "egg"]));
    }

    #[test]
    fn test_legacy_bare_string_migrates() {
        let mut store = MemoryStore::new();
        store.set("theme", "dark").unwrap();

        let theme = Persisted::<String>::open(&mut store, "theme").unwrap();
        assert_eq!(theme.get(), "dark");
    }

    #[test]
    fn test_newer_version_refused() {
        let mut store = MemoryStore::new();
        store.set("names", r#"{"version":99,"data":[]}"#).unwrap();

        let result = Persisted::<Vec<String>>::open(&mut store, "names");
        assert!(matches!(
            result,
            Err(StoreError::UnsupportedVersion { version: 99, .. })
        ));
    }

    #[test]
    fn test_corrupt_value() {
        let mut store = MemoryStore::new();
        store.set("names", r#"{"oops": true}"#).unwrap();

        assert!(matches!(
            Persisted::<Vec<String>>::open(&mut store, "names"),
            Err(StoreError::Json(_))
        ));
    }

    #[test]
    fn test_file_store() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get("history").unwrap(), None);

        store.set("history", "[]").unwrap();
        assert_eq!(store.get("history").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("nested").join("history.json").exists());
        assert!(!dir.path().join("nested").join("history.json.tmp").exists());
    }
}
