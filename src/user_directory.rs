//! Explicitly constructed user directory with optional notifications.

use std::sync::Arc;

use crate::{Event, NotificationBus, RegistryError, UserRecord, UserRegistryApi, UserStore};

/// A username to email store that announces new users on a bound
/// [`NotificationBus`].
///
/// Unlike [`SingletonRegistry`](crate::SingletonRegistry), a directory is an
/// ordinary value: construct one and pass it (or a reference) to whoever needs it.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use user_registry::{EmailNotificationService, NotificationBus, UserDirectory};
///
/// let bus = Arc::new(NotificationBus::new());
/// let email = Arc::new(EmailNotificationService::new());
/// bus.subscribe(email.clone());
///
/// let directory = UserDirectory::with_bus(bus);
/// directory.register_user("alice", "a@x.com").unwrap();
///
/// assert_eq!(email.sent()[0].to, "a@x.com");
/// ```
#[derive(Debug, Default)]
pub struct UserDirectory {
    store: UserStore,
    bus: Option<Arc<NotificationBus>>,
}

impl UserDirectory {
    /// A directory that does not notify anyone.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bus(bus: Arc<NotificationBus>) -> Self {
        Self {
            store: UserStore::new(),
            bus: Some(bus),
        }
    }

    pub fn bus(&self) -> Option<&Arc<NotificationBus>> {
        self.bus.as_ref()
    }

    /// Stores the user, then publishes `USER_REGISTERED` if a bus is bound.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateKey`] if `username` is already registered;
    ///   nothing is published
    /// - [`RegistryError::Notification`] if delivery failed; the user is
    ///   registered regardless
    pub fn register_user(&self, username: &str, email: &str) -> Result<(), RegistryError> {
        self.register(username, email)
    }

    /// Every registered user, in registration order.
    pub fn list_users(&self) -> Vec<UserRecord> {
        self.list_all()
    }
}

impl UserRegistryApi for UserDirectory {
    fn store(&self) -> &UserStore {
        &self.store
    }

    fn on_registered(&self, record: &UserRecord) -> Result<(), RegistryError> {
        if let Some(bus) = &self.bus {
            bus.notify(&Event::user_registered(&record.username, &record.email))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Observer, ObserverError, USER_REGISTERED};
    use std::sync::Mutex;

    /// Records each event together with what the directory held at that moment.
    struct Peek {
        directory: Mutex<Option<Arc<UserDirectory>>>,
        seen: Mutex<Vec<(String, Option<String>)>>,
    }

    impl Observer for Peek {
        fn update(&self, event: &Event) -> Result<(), ObserverError> {
            let username = event.get_str("username").unwrap_or_default().to_string();
            let stored = self
                .directory
                .lock()
                .unwrap()
                .as_ref()
                .and_then(|d| d.get_email(&username));
            self.seen.lock().unwrap().push((username, stored));
            Ok(())
        }
    }

    #[test]
    fn test_unbound_directory_registers() {
        let directory = UserDirectory::new();
        assert!(directory.bus().is_none());

        directory.register_user("alice", "a@x.com").unwrap();

        assert_eq!(directory.list_users(), vec![UserRecord::new("alice", "a@x.com")]);
        assert_eq!(directory.get_email("alice").as_deref(), Some("a@x.com"));
    }

    #[test]
    fn test_duplicate_is_rejected_and_not_published() {
        let bus = Arc::new(NotificationBus::new());
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        bus.subscribe(Arc::new(crate::FnObserver::new("sink", move |e: &Event| {
            sink.lock().unwrap().push(e.clone());
            Ok(())
        })));
        let directory = UserDirectory::with_bus(bus);

        directory.register_user("alice", "a@x.com").unwrap();
        let err = directory.register_user("alice", "b@x.com").unwrap_err();

        assert!(matches!(err, RegistryError::DuplicateKey { .. }));
        assert_eq!(directory.get_email("alice").as_deref(), Some("a@x.com"));

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].is(USER_REGISTERED));
        assert_eq!(events[0].get_str("email"), Some("a@x.com"));
    }

    #[test]
    fn test_observer_sees_inserted_user() {
        let bus = Arc::new(NotificationBus::new());
        let peek = Arc::new(Peek {
            directory: Mutex::new(None),
            seen: Mutex::new(Vec::new()),
        });
        bus.subscribe(peek.clone());

        let directory = Arc::new(UserDirectory::with_bus(bus));
        *peek.directory.lock().unwrap() = Some(directory.clone());

        directory.register_user("alice", "a@x.com").unwrap();

        // break the directory -> bus -> peek -> directory cycle
        peek.directory.lock().unwrap().take();

        assert_eq!(
            *peek.seen.lock().unwrap(),
            vec![("alice".to_string(), Some("a@x.com".to_string()))]
        );
    }

    #[test]
    fn test_notification_failure_keeps_user() {
        let bus = Arc::new(NotificationBus::new());
        bus.subscribe(Arc::new(crate::FnObserver::new("broken", |_: &Event| {
            Err(ObserverError::new("smtp down"))
        })));
        let directory = UserDirectory::with_bus(bus);

        let err = directory.register_user("alice", "a@x.com").unwrap_err();

        assert!(matches!(err, RegistryError::Notification(_)));
        assert!(directory.contains("alice"));
    }
}
