use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::store::errors::StoreError;


/// Raw string-keyed backend the typed store sits on. Implementations wrap
/// whatever session-scoped storage the host platform provides; values do
/// not outlive the session.
pub trait StoreIo: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

pub type ProductionSessionStore = SessionStore<MemoryStoreIo>;

/// Typed session store. Strings and JSON values have separate accessors;
/// a value written through one is not readable through the other.
///
/// Every operation is best-effort: backend failures are logged and the
/// operation degrades (reads yield nothing, writes leave the session
/// unpersisted) instead of reaching the caller.
pub struct SessionStore<Io: StoreIo> {
    io: Io,
}

impl<Io: StoreIo> SessionStore<Io> {
    pub fn new(io: Io) -> SessionStore<Io> {
        SessionStore { io }
    }

    pub fn set_string(&self, key: &str, value: &str) {
        if let Err(e) = self.io.set(key, value.to_owned()) {
            error!("failed to store \"{key}\": {e}");
        }
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.io.get(key) {
            Ok(value) => value,
            Err(e) => {
                error!("failed to read \"{key}\": {e}");
                None
            }
        }
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) {
        let serialized = match serde_json::to_string(value) {
            Ok(serialized) => serialized,
            Err(e) => {
                error!("failed to serialize value for \"{key}\": {e}");
                return;
            }
        };
        if let Err(e) = self.io.set(key, serialized) {
            error!("failed to store \"{key}\": {e}");
        }
    }

    /// Read and deserialize the value under [key]. A stored value that
    /// does not parse as `T` is treated as absent.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get_string(key)?;
        match serde_json::from_str(&value) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("stored value for \"{key}\" does not parse: {e}");
                None
            }
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.io.remove(key) {
            error!("failed to remove \"{key}\": {e}");
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.io.clear() {
            error!("failed to clear session storage: {e}");
        }
    }
}

/// Process-lifetime in-memory backend, the session-scoped default: state
/// dies with the process, so leaked values do not outlive the session.
#[derive(Default)]
pub struct MemoryStoreIo {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStoreIo {
    fn guard(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StoreIo for MemoryStoreIo {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.guard().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.guard().insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.guard().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.guard().clear();
        Ok(())
    }
}
