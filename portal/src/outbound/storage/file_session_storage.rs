//! File-backed session storage scoped to one directory.
//!
//! One file per session kind inside a cap-std `Dir`, so the adapter can
//! never write outside the configured directory. Writes go through a staged
//! file and a rename, keeping each entry atomic: a torn write leaves the
//! previous identity intact rather than a half-written one.

use std::io::ErrorKind;
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};

use crate::domain::ports::{SessionKind, SessionStorage, SessionStorageError};

/// Session storage persisting each kind to `<kind>.json` in one directory.
pub struct FileSessionStorage {
    dir: Dir,
}

impl FileSessionStorage {
    /// Open (creating if needed) the storage directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionStorageError> {
        let path = path.as_ref();
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(map_io_error)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(map_io_error)?;
        Ok(Self { dir })
    }

    fn entry_name(kind: SessionKind) -> String {
        format!("{}.json", kind.storage_key())
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self, kind: SessionKind) -> Result<Option<String>, SessionStorageError> {
        match self.dir.read_to_string(Self::entry_name(kind)) {
            Ok(payload) => Ok(Some(payload)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(map_io_error(error)),
        }
    }

    fn store(&self, kind: SessionKind, payload: &str) -> Result<(), SessionStorageError> {
        let name = Self::entry_name(kind);
        let staged = format!(".{name}.staged");
        self.dir
            .write(&staged, payload.as_bytes())
            .map_err(map_io_error)?;
        self.dir
            .rename(&staged, &self.dir, &name)
            .map_err(map_io_error)
    }

    fn remove(&self, kind: SessionKind) -> Result<(), SessionStorageError> {
        match self.dir.remove_file(Self::entry_name(kind)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(map_io_error(error)),
        }
    }
}

fn map_io_error(error: std::io::Error) -> SessionStorageError {
    SessionStorageError::io(error.to_string())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use tempfile::TempDir;

    fn open_storage(dir: &TempDir) -> FileSessionStorage {
        FileSessionStorage::open(dir.path()).expect("storage opens")
    }

    #[test]
    fn missing_entries_load_as_none() {
        let dir = TempDir::new().expect("temp dir");
        let storage = open_storage(&dir);
        assert_eq!(storage.load(SessionKind::Admin).expect("load"), None);
    }

    #[test]
    fn entries_round_trip_and_overwrite() {
        let dir = TempDir::new().expect("temp dir");
        let storage = open_storage(&dir);

        storage
            .store(SessionKind::Member, "{\"id\":\"m1\"}")
            .expect("store");
        assert_eq!(
            storage.load(SessionKind::Member).expect("load").as_deref(),
            Some("{\"id\":\"m1\"}")
        );

        storage
            .store(SessionKind::Member, "{\"id\":\"m2\"}")
            .expect("overwrite");
        assert_eq!(
            storage.load(SessionKind::Member).expect("load").as_deref(),
            Some("{\"id\":\"m2\"}")
        );
    }

    #[test]
    fn entries_survive_reopening_the_directory() {
        let dir = TempDir::new().expect("temp dir");
        open_storage(&dir)
            .store(SessionKind::Admin, "{\"id\":\"a1\"}")
            .expect("store");

        let reopened = open_storage(&dir);
        assert_eq!(
            reopened.load(SessionKind::Admin).expect("load").as_deref(),
            Some("{\"id\":\"a1\"}")
        );
    }

    #[test]
    fn kinds_do_not_collide() {
        let dir = TempDir::new().expect("temp dir");
        let storage = open_storage(&dir);
        storage.store(SessionKind::Admin, "admin").expect("store");
        storage.store(SessionKind::Member, "member").expect("store");

        storage.remove(SessionKind::Admin).expect("remove");
        assert_eq!(storage.load(SessionKind::Admin).expect("load"), None);
        assert_eq!(
            storage.load(SessionKind::Member).expect("load").as_deref(),
            Some("member")
        );
    }

    #[test]
    fn removing_an_absent_entry_is_a_no_op() {
        let dir = TempDir::new().expect("temp dir");
        let storage = open_storage(&dir);
        storage.remove(SessionKind::Member).expect("remove");
    }
}
