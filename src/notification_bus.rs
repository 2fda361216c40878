//! Ordered, synchronous observer fan-out.
//!
//! Observers are invoked in subscription order on the thread that calls
//! [`NotificationBus::notify`]. The subscriber list is copied under the lock
//! and the lock is released before any observer runs, so observers may
//! subscribe, unsubscribe or notify from inside `update`; such changes apply
//! to the next `notify` call.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::{Event, NotifyError, Observer, ObserverFailure};

/// What `notify` does when an observer returns an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeliveryPolicy {
    /// Stop at the first failure; later observers are not invoked.
    ///
    /// A single misbehaving observer silences every observer after it, which
    /// is rarely what a long-running service wants.
    #[default]
    AbortOnError,
    /// Invoke every observer and report all failures together.
    ContinueOnError,
}

/// Ordered list of observers with a synchronous `notify`.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use user_registry::{AuditLogService, Event, NotificationBus};
///
/// let bus = NotificationBus::new();
/// let audit = Arc::new(AuditLogService::new());
/// bus.subscribe(audit.clone());
///
/// bus.notify(&Event::user_registered("alice", "a@x.com")).unwrap();
/// assert_eq!(audit.entries().len(), 1);
/// ```
#[derive(Default)]
pub struct NotificationBus {
    observers: Mutex<Vec<Arc<dyn Observer>>>,
    policy: DeliveryPolicy,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: DeliveryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> DeliveryPolicy {
        self.policy
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<dyn Observer>>> {
        self.observers.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Appends `observer`. Subscribing the same observer twice makes it
    /// receive every event twice.
    pub fn subscribe(&self, observer: Arc<dyn Observer>) {
        debug!(observer = observer.name(), "subscribed");
        self.lock().push(observer);
    }

    /// Removes the first subscription of this exact observer instance.
    ///
    /// Returns `false` and changes nothing if it is not subscribed.
    pub fn unsubscribe<O: Observer + ?Sized>(&self, observer: &Arc<O>) -> bool {
        let target = Arc::as_ptr(observer) as *const ();
        let mut observers = self.lock();

        match observers
            .iter()
            .position(|o| Arc::as_ptr(o) as *const () == target)
        {
            Some(index) => {
                let removed = observers.remove(index);
                debug!(observer = removed.name(), "unsubscribed");
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Delivers `event` to every current observer, in subscription order.
    ///
    /// # Errors
    ///
    /// - [`NotifyError::Aborted`] under [`DeliveryPolicy::AbortOnError`] when an
    ///   observer fails; observers after it were not invoked
    /// - [`NotifyError::Collected`] under [`DeliveryPolicy::ContinueOnError`]
    ///   when one or more observers failed
    pub fn notify(&self, event: &Event) -> Result<(), NotifyError> {
        let observers: Vec<Arc<dyn Observer>> = self.lock().clone();
        debug!(event = event.name(), observers = observers.len(), "notifying");

        let mut failures = Vec::new();
        for (position, observer) in observers.iter().enumerate() {
            let Err(source) = observer.update(event) else {
                continue;
            };

            warn!(
                event = event.name(),
                observer = observer.name(),
                position,
                "observer failed: {source}"
            );

            match self.policy {
                DeliveryPolicy::AbortOnError => {
                    return Err(NotifyError::Aborted {
                        event: event.name().to_string(),
                        position,
                        observer: observer.name().to_string(),
                        source,
                    });
                }
                DeliveryPolicy::ContinueOnError => failures.push(ObserverFailure {
                    position,
                    observer: observer.name().to_string(),
                    error: source,
                }),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(NotifyError::Collected {
                event: event.name().to_string(),
                failures,
            })
        }
    }
}

impl fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.lock().iter().map(|o| o.name().to_string()).collect();
        f.debug_struct("NotificationBus")
            .field("observers", &names)
            .field("policy", &self.policy)
            .finish()
    }
}
