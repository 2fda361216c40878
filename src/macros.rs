//! Macros for declaring isolated singleton registries.

/// Declares a module holding its own process-wide [`SingletonRegistry`](crate::SingletonRegistry).
///
/// The macro generates a module containing:
/// - the registry's `SingletonCell` static (hidden)
/// - `get_instance()` and `constructions()`
/// - free functions delegating to the instance: `register`, `get_email`,
///   `list_all`, `contains`
///
/// # Examples
///
/// ```rust
/// use user_registry::define_user_registry;
///
/// define_user_registry!(staff);
///
/// staff::register("alice", "alice@corp.io").unwrap();
/// assert_eq!(staff::get_email("alice").as_deref(), Some("alice@corp.io"));
/// assert!(std::ptr::eq(staff::get_instance(), staff::get_instance()));
/// ```
///
/// # Multiple Registries
///
/// Each declared module is isolated from the others and from the crate's
/// default instance:
///
/// ```rust
/// use user_registry::define_user_registry;
///
/// define_user_registry!(customers);
/// define_user_registry!(vendors);
///
/// customers::register("acme", "sales@acme.io").unwrap();
///
/// assert!(customers::contains("acme"));
/// assert!(!vendors::contains("acme"));
/// ```
#[macro_export]
macro_rules! define_user_registry {
    ($name:ident) => {
        pub mod $name {
            static INSTANCE: $crate::SingletonCell<$crate::SingletonRegistry> =
                $crate::SingletonCell::new();

            /// The registry instance of this module.
            pub fn get_instance() -> &'static $crate::SingletonRegistry {
                INSTANCE.registry()
            }

            /// How many times this module's registry has been constructed.
            pub fn constructions() -> usize {
                INSTANCE.constructions()
            }

            /// Register a user in this module's registry.
            pub fn register(username: &str, email: &str) -> Result<(), $crate::RegistryError> {
                use $crate::UserRegistryApi;
                get_instance().register(username, email)
            }

            /// Email of `username` in this module's registry.
            pub fn get_email(username: &str) -> Option<String> {
                use $crate::UserRegistryApi;
                get_instance().get_email(username)
            }

            /// Snapshot of this module's registry.
            pub fn list_all() -> Vec<$crate::UserRecord> {
                use $crate::UserRegistryApi;
                get_instance().list_all()
            }

            /// Check whether `username` is registered in this module's registry.
            pub fn contains(username: &str) -> bool {
                use $crate::UserRegistryApi;
                get_instance().contains(username)
            }
        }
    };
}
