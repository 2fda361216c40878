use thiserror::Error;

/// Errors returned by registry and directory operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The username is already present; the stored email was left untouched.
    #[error("user '{username}' is already registered")]
    DuplicateKey { username: String },

    #[error("invalid username '{username}': must be non-empty and alphanumeric")]
    InvalidUsername { username: String },

    #[error("invalid email '{email}'")]
    InvalidEmail { email: String },

    /// The user was stored, but delivering the registration event failed.
    #[error("user registered but notification failed: {0}")]
    Notification(#[from] NotifyError),
}

/// Error reported by an [`Observer`](crate::Observer) from its `update` call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ObserverError {
    message: String,
}

impl ObserverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One failed delivery collected under [`DeliveryPolicy::ContinueOnError`](crate::DeliveryPolicy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverFailure {
    /// Position of the observer in subscription order.
    pub position: usize,
    pub observer: String,
    pub error: ObserverError,
}

/// Errors returned by [`NotificationBus::notify`](crate::NotificationBus::notify).
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Delivery stopped at the first failing observer.
    #[error("observer '{observer}' (#{position}) failed on {event}: {source}")]
    Aborted {
        event: String,
        position: usize,
        observer: String,
        #[source]
        source: ObserverError,
    },

    /// Every observer was invoked; these ones failed.
    #[error("{} observer(s) failed on {event}", .failures.len())]
    Collected {
        event: String,
        failures: Vec<ObserverFailure>,
    },
}
