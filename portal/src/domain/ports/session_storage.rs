//! Driven port for durable client-local session storage.
//!
//! The store keeps one serialised identity per session kind under independent
//! keys, so an admin and a member session can coexist. Adapters own nothing
//! but the byte transport; (de)serialisation stays in the session store.

/// The two independent session kinds the portal persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    /// Administrative session.
    Admin,
    /// Member session.
    Member,
}

impl SessionKind {
    /// Storage key the kind is persisted under.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "team_member",
        }
    }
}

/// Errors raised by session storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStorageError {
    /// Reading or writing the backing store failed.
    #[error("session storage i/o failed: {message}")]
    Io { message: String },
    /// Serialising an identity for storage failed.
    #[error("session serialisation failed: {message}")]
    Serialization { message: String },
}

impl SessionStorageError {
    /// Build an [`SessionStorageError::Io`] from any displayable cause.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Build a [`SessionStorageError::Serialization`] from any displayable
    /// cause.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

/// Port for the durable string-keyed storage behind the session store.
///
/// Synchronous by design: the backing store is client-local (a file on disk
/// here, browser local storage in the system this models) and is never
/// reached over the network.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStorage: Send + Sync {
    /// Read the serialised identity for a kind, `None` when absent.
    fn load(&self, kind: SessionKind) -> Result<Option<String>, SessionStorageError>;

    /// Overwrite the serialised identity for a kind.
    fn store(&self, kind: SessionKind, payload: &str) -> Result<(), SessionStorageError>;

    /// Remove the serialised identity for a kind; absent entries are fine.
    fn remove(&self, kind: SessionKind) -> Result<(), SessionStorageError>;
}

/// Fixture storage that persists nothing and always restores nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSessionStorage;

impl SessionStorage for NoopSessionStorage {
    fn load(&self, _kind: SessionKind) -> Result<Option<String>, SessionStorageError> {
        Ok(None)
    }

    fn store(&self, _kind: SessionKind, _payload: &str) -> Result<(), SessionStorageError> {
        Ok(())
    }

    fn remove(&self, _kind: SessionKind) -> Result<(), SessionStorageError> {
        Ok(())
    }
}
