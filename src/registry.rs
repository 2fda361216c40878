//! The process-wide user registry.
//!
//! [`SingletonRegistry::get_instance`] returns the one shared instance,
//! constructing it on first call. The free functions in this module delegate
//! to that instance.
//!
//! # Examples
//!
//! ```
//! use user_registry::{get_email, register};
//!
//! register("docs", "docs@example.com").unwrap();
//! assert_eq!(get_email("docs").as_deref(), Some("docs@example.com"));
//! ```

use crate::{RegistryError, SingletonCell, UserRecord, UserRegistryApi, UserStore};

/// Global registry instance, built on first access.
static INSTANCE: SingletonCell<SingletonRegistry> = SingletonCell::new();

/// A lazily constructed, process-wide username to email registry.
///
/// There is no public constructor: the only instances are the crate's default
/// one and those declared with [`define_user_registry!`](crate::define_user_registry),
/// each living in its own static.
#[derive(Debug)]
pub struct SingletonRegistry {
    store: UserStore,
}

impl SingletonRegistry {
    fn new() -> Self {
        Self {
            store: UserStore::new(),
        }
    }

    /// The shared instance.
    pub fn get_instance() -> &'static SingletonRegistry {
        INSTANCE.registry()
    }

    /// How many times the shared instance has been constructed (0 or 1).
    pub fn constructions() -> usize {
        INSTANCE.constructions()
    }
}

impl UserRegistryApi for SingletonRegistry {
    fn store(&self) -> &UserStore {
        &self.store
    }
}

impl SingletonCell<SingletonRegistry> {
    /// The registry held by this cell, constructing an empty one on first access.
    pub fn registry(&self) -> &SingletonRegistry {
        self.get_or_init(SingletonRegistry::new)
    }
}

// -------------------------------------------------------------------------------------------------
// Free functions over the shared instance
// -------------------------------------------------------------------------------------------------

/// Shorthand for [`SingletonRegistry::get_instance`].
pub fn get_instance() -> &'static SingletonRegistry {
    SingletonRegistry::get_instance()
}

/// Register a user in the shared registry.
///
/// # Errors
///
/// [`RegistryError::DuplicateKey`] if `username` is already registered.
pub fn register(username: &str, email: &str) -> Result<(), RegistryError> {
    get_instance().register(username, email)
}

/// Email of `username` in the shared registry.
pub fn get_email(username: &str) -> Option<String> {
    get_instance().get_email(username)
}

/// Snapshot of the shared registry.
pub fn list_all() -> Vec<UserRecord> {
    get_instance().list_all()
}

pub fn contains(username: &str) -> bool {
    get_instance().contains(username)
}
