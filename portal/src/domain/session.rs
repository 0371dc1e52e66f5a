//! Session store holding the authenticated identities.
//!
//! An explicit object injected into the workflows rather than ambient state:
//! it owns the in-memory identity slots and the durable entries behind the
//! [`SessionStorage`] port. Malformed or unreadable persisted entries are
//! treated as "not logged in", never as an error.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::warn;

use super::identity::{AdminIdentity, MemberIdentity};
use super::ports::{SessionKind, SessionStorage, SessionStorageError};

/// In-memory and durable holder for the portal's session identities.
///
/// ## Invariants
/// - At most one identity per [`SessionKind`] is held at a time.
/// - A held identity implies a previously successful verification exchange.
/// - The durable entry is written atomically by the adapter; an identity is
///   only held in memory once the durable write succeeded.
pub struct SessionStore<S> {
    storage: Arc<S>,
    admin: RwLock<Option<AdminIdentity>>,
    member: RwLock<Option<MemberIdentity>>,
}

impl<S> SessionStore<S> {
    /// Create an empty store over the given storage adapter.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            admin: RwLock::new(None),
            member: RwLock::new(None),
        }
    }
}

impl<S: SessionStorage> SessionStore<S> {
    /// Load both session kinds from durable storage.
    ///
    /// Absent, unreadable, and malformed entries all restore to "not logged
    /// in"; unreadable and malformed entries are logged and otherwise
    /// ignored.
    pub fn restore(&self) {
        *write_slot(&self.admin) = self.load_kind(SessionKind::Admin);
        *write_slot(&self.member) = self.load_kind(SessionKind::Member);
    }

    fn load_kind<T: serde::de::DeserializeOwned>(&self, kind: SessionKind) -> Option<T> {
        let payload = match self.storage.load(kind) {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(error) => {
                warn!(key = kind.storage_key(), error = %error, "session restore failed");
                return None;
            }
        };
        match serde_json::from_str(&payload) {
            Ok(identity) => Some(identity),
            Err(error) => {
                warn!(
                    key = kind.storage_key(),
                    error = %error,
                    "discarding malformed persisted session"
                );
                None
            }
        }
    }

    /// Currently held admin identity, if any.
    pub fn admin(&self) -> Option<AdminIdentity> {
        read_slot(&self.admin).clone()
    }

    /// Currently held member identity, if any.
    pub fn member(&self) -> Option<MemberIdentity> {
        read_slot(&self.member).clone()
    }

    /// Whether the held admin identity carries the elevated role.
    ///
    /// Computed purely from the stored role; gates capabilities such as
    /// content edit mode.
    pub fn is_super_admin(&self) -> bool {
        read_slot(&self.admin)
            .as_ref()
            .is_some_and(AdminIdentity::is_super_admin)
    }

    /// Whether a member identity is currently held.
    pub fn is_member_authenticated(&self) -> bool {
        read_slot(&self.member).is_some()
    }

    /// Persist an admin identity, overwriting any previous one.
    pub fn persist_admin(&self, identity: &AdminIdentity) -> Result<(), SessionStorageError> {
        self.persist_kind(SessionKind::Admin, identity)?;
        *write_slot(&self.admin) = Some(identity.clone());
        Ok(())
    }

    /// Persist a member identity, overwriting any previous one.
    pub fn persist_member(&self, identity: &MemberIdentity) -> Result<(), SessionStorageError> {
        self.persist_kind(SessionKind::Member, identity)?;
        *write_slot(&self.member) = Some(identity.clone());
        Ok(())
    }

    fn persist_kind<T: serde::Serialize>(
        &self,
        kind: SessionKind,
        identity: &T,
    ) -> Result<(), SessionStorageError> {
        let payload = serde_json::to_string(identity)
            .map_err(|error| SessionStorageError::serialization(error.to_string()))?;
        self.storage.store(kind, &payload)
    }

    /// Drop the admin identity from memory and durable storage.
    ///
    /// The in-memory slot is cleared even when the durable removal fails.
    pub fn clear_admin(&self) -> Result<(), SessionStorageError> {
        *write_slot(&self.admin) = None;
        self.storage.remove(SessionKind::Admin)
    }

    /// Drop the member identity from memory and durable storage.
    ///
    /// The in-memory slot is cleared even when the durable removal fails.
    pub fn clear_member(&self) -> Result<(), SessionStorageError> {
        *write_slot(&self.member) = None;
        self.storage.remove(SessionKind::Member)
    }
}

// Session slots tolerate lock poisoning: the held data is a plain clone-out
// value and stays coherent even if a writer panicked.
fn read_slot<T>(slot: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    slot.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_slot<T>(slot: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    slot.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockSessionStorage;
    use crate::outbound::storage::MemorySessionStorage;
    use rstest::rstest;

    fn admin_identity() -> AdminIdentity {
        AdminIdentity::try_from_parts("a1", "root", "super_admin").expect("valid identity")
    }

    fn member_identity() -> MemberIdentity {
        MemberIdentity::try_from_parts("m1", "9876543210", Some("Devi".to_owned()), true)
            .expect("valid identity")
    }

    #[test]
    fn restore_with_empty_storage_holds_nothing() {
        let store = SessionStore::new(Arc::new(MemorySessionStorage::new()));
        store.restore();
        assert_eq!(store.admin(), None);
        assert_eq!(store.member(), None);
        assert!(!store.is_super_admin());
        assert!(!store.is_member_authenticated());
    }

    #[rstest]
    #[case("not json at all")]
    #[case("{\"id\":\"\"}")]
    #[case("42")]
    #[case("")]
    fn malformed_persisted_entries_restore_to_none(#[case] payload: &str) {
        let storage = Arc::new(MemorySessionStorage::new());
        storage
            .store(SessionKind::Admin, payload)
            .expect("seed storage");
        storage
            .store(SessionKind::Member, payload)
            .expect("seed storage");
        let store = SessionStore::new(storage);
        store.restore();
        assert_eq!(store.admin(), None);
        assert_eq!(store.member(), None);
    }

    #[test]
    fn storage_read_failure_restores_to_none() {
        let mut storage = MockSessionStorage::new();
        storage
            .expect_load()
            .times(2)
            .returning(|_| Err(SessionStorageError::io("disk on fire")));
        let store = SessionStore::new(Arc::new(storage));
        store.restore();
        assert_eq!(store.admin(), None);
        assert_eq!(store.member(), None);
    }

    #[test]
    fn persisted_identities_survive_a_restore() {
        let storage = Arc::new(MemorySessionStorage::new());
        let store = SessionStore::new(Arc::clone(&storage));
        store.persist_admin(&admin_identity()).expect("persist");
        store.persist_member(&member_identity()).expect("persist");

        let reopened = SessionStore::new(storage);
        reopened.restore();
        assert_eq!(reopened.admin(), Some(admin_identity()));
        assert_eq!(reopened.member(), Some(member_identity()));
        assert!(reopened.is_super_admin());
        assert!(reopened.is_member_authenticated());
    }

    #[test]
    fn both_kinds_coexist_under_independent_keys() {
        let storage = Arc::new(MemorySessionStorage::new());
        let store = SessionStore::new(Arc::clone(&storage));
        store.persist_admin(&admin_identity()).expect("persist");
        store.persist_member(&member_identity()).expect("persist");

        store.clear_admin().expect("clear");
        assert_eq!(store.admin(), None);
        assert_eq!(store.member(), Some(member_identity()));
        assert!(
            storage
                .load(SessionKind::Member)
                .expect("load")
                .is_some(),
            "member entry must survive the admin clear"
        );
    }

    #[test]
    fn clearing_an_absent_identity_is_a_no_op() {
        let store = SessionStore::new(Arc::new(MemorySessionStorage::new()));
        store.clear_admin().expect("clear");
        store.clear_member().expect("clear");
    }

    #[test]
    fn persist_is_an_idempotent_overwrite() {
        let store = SessionStore::new(Arc::new(MemorySessionStorage::new()));
        store.persist_admin(&admin_identity()).expect("persist");
        store.persist_admin(&admin_identity()).expect("persist again");
        assert_eq!(store.admin(), Some(admin_identity()));
    }

    #[test]
    fn memory_slot_stays_empty_when_the_durable_write_fails() {
        let mut storage = MockSessionStorage::new();
        storage
            .expect_store()
            .times(1)
            .returning(|_, _| Err(SessionStorageError::io("read-only volume")));
        let store = SessionStore::new(Arc::new(storage));
        let err = store
            .persist_admin(&admin_identity())
            .expect_err("persist must fail");
        assert!(matches!(err, SessionStorageError::Io { .. }));
        assert_eq!(store.admin(), None);
    }
}
