//! Key/value storages backing the persisted session
//!
//! Every write publishes a [`StorageEvent`] to all handles sharing the
//! storage, which is how other views ("tabs") learn about logins and logouts.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use crate::error::{AppError, AppResult};

/// Change notification for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    pub new_value: Option<String>,
}

/// String-keyed persistent storage
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
    fn subscribe(&self) -> broadcast::Receiver<StorageEvent>;
}

const EVENT_CAPACITY: usize = 32;

fn lock_error<T>(_: T) -> AppError {
    AppError::Storage("storage lock poisoned".to_string())
}

/// Process-local storage
#[derive(Clone)]
pub struct MemoryStorage {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
    events: broadcast::Sender<StorageEvent>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            entries: Arc::new(Mutex::new(BTreeMap::new())),
            events,
        }
    }

    fn publish(&self, key: &str, new_value: Option<&str>) {
        // No subscribers is fine
        let _ = self.events.send(StorageEvent {
            key: key.to_string(),
            new_value: new_value.map(str::to_string),
        });
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.lock().map_err(lock_error)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries
            .lock()
            .map_err(lock_error)?
            .insert(key.to_string(), value.to_string());
        self.publish(key, Some(value));
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let removed = self.entries.lock().map_err(lock_error)?.remove(key);
        if removed.is_some() {
            self.publish(key, None);
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.events.subscribe()
    }
}

/// JSON-object file storage.
///
/// The file is re-read on every access so writes made by other processes are
/// visible; writes go through a temporary file and a rename.
///
/// Access is blocking `std::fs` I/O on the caller's thread, including tokio
/// workers. The file holds two short entries, so each call is one small read
/// (and at most one small write); move it behind `spawn_blocking` if it ever
/// holds more.
#[derive(Clone)]
pub struct FileStorage {
    path: PathBuf,
    guard: Arc<Mutex<()>>,
    events: broadcast::Sender<StorageEvent>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            path: path.into(),
            guard: Arc::new(Mutex::new(())),
            events,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> AppResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                AppError::Storage(format!("corrupt session file {}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| AppError::Internal(format!("Failed to encode session file: {}", e)))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn publish(&self, key: &str, new_value: Option<&str>) {
        let _ = self.events.send(StorageEvent {
            key: key.to_string(),
            new_value: new_value.map(str::to_string),
        });
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let _guard = self.guard.lock().map_err(lock_error)?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        {
            let _guard = self.guard.lock().map_err(lock_error)?;
            let mut entries = self.read_all()?;
            entries.insert(key.to_string(), value.to_string());
            self.write_all(&entries)?;
        }
        self.publish(key, Some(value));
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let removed = {
            let _guard = self.guard.lock().map_err(lock_error)?;
            let mut entries = self.read_all()?;
            let removed = entries.remove(key).is_some();
            if removed {
                self.write_all(&entries)?;
            }
            removed
        };
        if removed {
            self.publish(key, None);
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.events.subscribe()
    }
}
