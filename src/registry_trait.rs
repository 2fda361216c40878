//! Core trait defining user registry behavior.
//!
//! This module provides the `UserRegistryApi` trait with default implementations
//! for registration, lookup and listing over a [`UserStore`].
//!
//! The registry is keyed by username: each username maps to exactly one email,
//! and registering a username that is already present fails instead of replacing it.

use tracing::{debug, info, warn};

use crate::{RegistryError, UserRecord, UserStore};

/// Core trait defining user registry behavior.
///
/// Provides default implementations for all registry operations, requiring only
/// the `store` accessor to be implemented by the implementor.
///
/// Both [`SingletonRegistry`](crate::SingletonRegistry) and
/// [`UserDirectory`](crate::UserDirectory) implement it, so call sites written
/// against the trait can be handed either the process-wide instance or an
/// explicitly constructed directory.
pub trait UserRegistryApi {
    /// Access the backing store.
    fn store(&self) -> &UserStore;

    /// Hook run after a user has been stored.
    ///
    /// The store lock is already released, so the new entry is visible to
    /// anything this hook calls. The default does nothing.
    ///
    /// # Errors
    ///
    /// Whatever the implementor reports; the user stays registered.
    fn on_registered(&self, record: &UserRecord) -> Result<(), RegistryError> {
        let _ = record;
        Ok(())
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateKey`] if `username` is already registered;
    ///   the stored email is left unchanged
    /// - any error returned by [`on_registered`](Self::on_registered)
    fn register(&self, username: &str, email: &str) -> Result<(), RegistryError> {
        if let Err(err) = self.store().insert(username, email) {
            warn!(username, "registration rejected: {err}");
            return Err(err);
        }

        info!(username, email, "user registered");
        self.on_registered(&UserRecord::new(username, email))
    }

    /// Email of `username`, or `None` if it is not registered.
    fn get_email(&self, username: &str) -> Option<String> {
        let email = self.store().get(username);
        debug!(username, found = email.is_some(), "email lookup");
        email
    }

    /// Snapshot of every registered user, in registration order.
    ///
    /// Later registrations do not show up in a snapshot already taken.
    fn list_all(&self) -> Vec<UserRecord> {
        self.store().snapshot()
    }

    fn contains(&self, username: &str) -> bool {
        self.store().contains(username)
    }

    fn len(&self) -> usize {
        self.store().len()
    }

    fn is_empty(&self) -> bool {
        self.store().is_empty()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
