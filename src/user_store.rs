//! Username to email storage shared by the singleton registry and the directory.
//!
//! Every read and write takes the store's mutex, so concurrent registration of
//! the same username admits exactly one winner. Listing returns entries in
//! insertion order.

use std::sync::{Mutex, MutexGuard};

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::{is_valid_email, is_valid_username, RegistryError};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserRecord {
    pub username: String,
    pub email: String,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }

    /// Builds a record after checking both fields.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidUsername`] if the username is empty or not alphanumeric
    /// - [`RegistryError::InvalidEmail`] if the email does not look like `local@domain.tld`
    pub fn parse(username: &str, email: &str) -> Result<Self, RegistryError> {
        if !is_valid_username(username) {
            return Err(RegistryError::InvalidUsername {
                username: username.to_string(),
            });
        }
        if !is_valid_email(email) {
            return Err(RegistryError::InvalidEmail {
                email: email.to_string(),
            });
        }
        Ok(Self::new(username, email))
    }
}

/// Insertion-ordered username to email map behind a mutex.
#[derive(Debug, Default)]
pub struct UserStore {
    users: Mutex<IndexMap<String, String>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Every critical section is a single map operation, so a poisoned lock
    // still guards a consistent map.
    fn lock(&self) -> MutexGuard<'_, IndexMap<String, String>> {
        self.users.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Inserts a new user. An existing entry is never overwritten.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateKey`] if `username` is already present.
    pub fn insert(&self, username: &str, email: &str) -> Result<(), RegistryError> {
        match self.lock().entry(username.to_string()) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateKey {
                username: username.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(email.to_string());
                Ok(())
            }
        }
    }

    pub fn get(&self, username: &str) -> Option<String> {
        self.lock().get(username).cloned()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.lock().contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of all entries, in insertion order.
    pub fn snapshot(&self) -> Vec<UserRecord> {
        self.lock()
            .iter()
            .map(|(username, email)| UserRecord::new(username.as_str(), email.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let store = UserStore::new();
        assert!(store.is_empty());

        store.insert("alice", "a@x.com").unwrap();

        assert_eq!(store.get("alice").as_deref(), Some("a@x.com"));
        assert!(store.contains("alice"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_missing_is_none() {
        let store = UserStore::new();
        assert_eq!(store.get("nobody"), None);
        assert!(!store.contains("nobody"));
    }

    #[test]
    fn test_duplicate_keeps_original() {
        let store = UserStore::new();
        store.insert("alice", "a@x.com").unwrap();

        let err = store.insert("alice", "other@x.com").unwrap_err();
        assert!(matches!(
            err,
            RegistryError::DuplicateKey { ref username } if username == "alice"
        ));
        assert_eq!(store.get("alice").as_deref(), Some("a@x.com"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_snapshot_keeps_insertion_order() {
        let store = UserStore::new();
        store.insert("zoe", "z@x.com").unwrap();
        store.insert("adam", "a@x.com").unwrap();
        store.insert("mia", "m@x.com").unwrap();

        let names: Vec<String> = store.snapshot().into_iter().map(|r| r.username).collect();
        assert_eq!(names, ["zoe", "adam", "mia"]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = UserStore::new();
        store.insert("alice", "a@x.com").unwrap();

        let before = store.snapshot();
        store.insert("bob", "b@x.com").unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(store.snapshot().len(), 2);
    }

    #[test]
    fn test_record_parse() {
        let record = UserRecord::parse("alice", "a@x.com").unwrap();
        assert_eq!(record, UserRecord::new("alice", "a@x.com"));

        assert!(matches!(
            UserRecord::parse("al ice", "a@x.com"),
            Err(RegistryError::InvalidUsername { .. })
        ));
        assert!(matches!(
            UserRecord::parse("alice", "a@x"),
            Err(RegistryError::InvalidEmail { .. })
        ));
    }

    #[test]
    fn test_concurrent_insert_single_winner() {
        use std::sync::{Arc, Barrier};
        use std::thread;

        let store = Arc::new(UserStore::new());
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    store.insert("alice", &format!("a{i}@x.com")).is_ok()
                })
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(store.len(), 1);
    }
}
