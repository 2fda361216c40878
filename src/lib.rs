//! # User Registry
//!
//! A process-wide singleton user registry and a synchronous observer
//! notification bus, around a username to email mapping.
//!
//! ## Quick Start
//!
//! ```rust
//! use user_registry::{get_email, register, SingletonRegistry, UserRegistryApi};
//!
//! // Register through the shared instance
//! register("alice", "alice@example.com").unwrap();
//!
//! // Every call site sees the same storage
//! let registry = SingletonRegistry::get_instance();
//! assert_eq!(registry.get_email("alice"), get_email("alice"));
//! ```
//!
//! ## Features
//!
//! - **Single instance**: [`SingletonRegistry::get_instance`] constructs the registry exactly
//!   once, even under concurrent first access
//! - **Guarded storage**: every read and write of the user map is serialized
//! - **Observers**: [`NotificationBus`] delivers events in subscription order, with an
//!   explicit [`DeliveryPolicy`] for observer failures
//! - **Injection-friendly**: [`UserDirectory`] is an explicitly constructed alternative
//!   to the singleton; both implement [`UserRegistryApi`]
//!
//! ## Logging
//!
//! Operations emit `tracing` events. The crate never installs a subscriber.

mod macros;
mod notification_bus;
mod observer;
mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;
mod singleton;
mod user_directory;
mod user_store;
mod validation;

pub use notification_bus::{DeliveryPolicy, NotificationBus};
pub use observer::{AuditLogService, EmailNotificationService, FnObserver, Observer, WelcomeEmail};
pub use registry::{contains, get_email, get_instance, list_all, register, SingletonRegistry};
pub use registry_error::{NotifyError, ObserverError, ObserverFailure, RegistryError};
pub use registry_event::{Event, Payload, USER_REGISTERED};
pub use registry_trait::UserRegistryApi;
pub use singleton::SingletonCell;
pub use user_directory::UserDirectory;
pub use user_store::{UserRecord, UserStore};
pub use validation::{is_valid_email, is_valid_username};
