//! In-memory session storage for tests and ephemeral wiring.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::domain::ports::{SessionKind, SessionStorage, SessionStorageError};

/// Session storage holding entries in a process-local map.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    entries: Mutex<HashMap<SessionKind, String>>,
}

impl MemorySessionStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<SessionKind, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self, kind: SessionKind) -> Result<Option<String>, SessionStorageError> {
        Ok(self.entries().get(&kind).cloned())
    }

    fn store(&self, kind: SessionKind, payload: &str) -> Result<(), SessionStorageError> {
        self.entries().insert(kind, payload.to_owned());
        Ok(())
    }

    fn remove(&self, kind: SessionKind) -> Result<(), SessionStorageError> {
        self.entries().remove(&kind);
        Ok(())
    }
}
