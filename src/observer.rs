//! Observer capability and the stock observers.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use tracing::info;

use crate::{Event, ObserverError, USER_REGISTERED};

/// Receives events from a [`NotificationBus`](crate::NotificationBus).
///
/// `update` runs synchronously on the notifying thread. Returning an error
/// hands the failure to the bus's [`DeliveryPolicy`](crate::DeliveryPolicy).
pub trait Observer: Send + Sync {
    fn update(&self, event: &Event) -> Result<(), ObserverError>;

    /// Label used in logs and delivery errors.
    fn name(&self) -> &str {
        "observer"
    }
}

/// Adapts a closure into an [`Observer`].
///
/// ```rust
/// use std::sync::Arc;
/// use user_registry::{Event, FnObserver, NotificationBus};
///
/// let bus = NotificationBus::new();
/// bus.subscribe(Arc::new(FnObserver::new("printer", |event: &Event| {
///     println!("{event}");
///     Ok(())
/// })));
/// bus.notify(&Event::named("PING")).unwrap();
/// ```
pub struct FnObserver<F> {
    name: String,
    callback: F,
}

impl<F> FnObserver<F>
where
    F: Fn(&Event) -> Result<(), ObserverError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, callback: F) -> Self {
        Self {
            name: name.into(),
            callback,
        }
    }
}

impl<F> Observer for FnObserver<F>
where
    F: Fn(&Event) -> Result<(), ObserverError> + Send + Sync,
{
    fn update(&self, event: &Event) -> Result<(), ObserverError> {
        (self.callback)(event)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for FnObserver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnObserver").field("name", &self.name).finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|p| p.into_inner())
}

fn registered_fields(event: &Event) -> Result<(&str, &str), ObserverError> {
    let username = event
        .get_str("username")
        .ok_or_else(|| ObserverError::new(format!("{} without username", event.name())))?;
    let email = event
        .get_str("email")
        .ok_or_else(|| ObserverError::new(format!("{} without email", event.name())))?;
    Ok((username, email))
}

/// A welcome message "sent" by [`EmailNotificationService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeEmail {
    pub to: String,
    pub username: String,
}

/// Sends a welcome email for every `USER_REGISTERED` event.
///
/// Delivery is simulated: each message is logged and kept in an outbox.
#[derive(Debug, Default)]
pub struct EmailNotificationService {
    outbox: Mutex<Vec<WelcomeEmail>>,
}

impl EmailNotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, oldest first.
    pub fn sent(&self) -> Vec<WelcomeEmail> {
        lock(&self.outbox).clone()
    }
}

impl Observer for EmailNotificationService {
    fn update(&self, event: &Event) -> Result<(), ObserverError> {
        if !event.is(USER_REGISTERED) {
            return Ok(());
        }

        let (username, email) = registered_fields(event)?;
        info!(target: "email", to = email, "welcome, {username}! a message was sent to {email}");
        lock(&self.outbox).push(WelcomeEmail {
            to: email.to_string(),
            username: username.to_string(),
        });
        Ok(())
    }

    fn name(&self) -> &str {
        "email-notification"
    }
}

/// Writes an audit line for every `USER_REGISTERED` event.
#[derive(Debug, Default)]
pub struct AuditLogService {
    entries: Mutex<Vec<String>>,
}

impl AuditLogService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        lock(&self.entries).clone()
    }
}

impl Observer for AuditLogService {
    fn update(&self, event: &Event) -> Result<(), ObserverError> {
        if !event.is(USER_REGISTERED) {
            return Ok(());
        }

        let (username, email) = registered_fields(event)?;
        let line = format!("user registered: {username} ({email})");
        info!(target: "audit", "{line}");
        lock(&self.entries).push(line);
        Ok(())
    }

    fn name(&self) -> &str {
        "audit-log"
    }
}
