//! Integration tests using the building blocks directly, WITHOUT the macro.
//!
//! A `SingletonCell` static plus a type implementing `UserRegistryApi` is all a
//! custom singleton registry needs.
//!
//! NOTE: All tests use #[serial] because they share the same static registry (TENANTS).

use serial_test::serial;
use std::sync::atomic::{AtomicUsize, Ordering};
use user_registry::{RegistryError, SingletonCell, UserRecord, UserRegistryApi, UserStore};

// ============================================================================
// Manual Registry Implementation (Without Macro)
// ============================================================================

/// Storage plus a counter of successful registrations.
#[derive(Default)]
struct TenantRegistry {
    store: UserStore,
    registrations: AtomicUsize,
}

impl UserRegistryApi for TenantRegistry {
    fn store(&self) -> &UserStore {
        &self.store
    }

    fn on_registered(&self, _record: &UserRecord) -> Result<(), RegistryError> {
        self.registrations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

static TENANTS: SingletonCell<TenantRegistry> = SingletonCell::new();

fn tenants() -> &'static TenantRegistry {
    TENANTS.get_or_init(TenantRegistry::default)
}

// ============================================================================
// Tests Using Manual Implementation
// ============================================================================

#[test]
#[serial]
fn test_basic_register_and_get() {
    let _ = tenants().register("acme", "ops@acme.io");

    assert_eq!(tenants().get_email("acme").as_deref(), Some("ops@acme.io"));
}

#[test]
#[serial]
fn test_duplicate_does_not_run_hook() {
    let _ = tenants().register("globex", "it@globex.io");
    let before = tenants().registrations.load(Ordering::SeqCst);

    let result = tenants().register("globex", "other@globex.io");

    assert!(matches!(result, Err(RegistryError::DuplicateKey { .. })));
    assert_eq!(tenants().registrations.load(Ordering::SeqCst), before);
    assert_eq!(tenants().get_email("globex").as_deref(), Some("it@globex.io"));
}

#[test]
#[serial]
fn test_single_construction() {
    let a = tenants();
    let b = tenants();

    assert!(std::ptr::eq(a, b));
    assert_eq!(TENANTS.constructions(), 1);
    assert!(TENANTS.is_initialized());
}

#[test]
#[serial]
fn test_list_all_contains_registered() {
    let _ = tenants().register("initech", "help@initech.io");

    let all = tenants().list_all();

    assert!(all.contains(&UserRecord::new("initech", "help@initech.io")));
    assert_eq!(all.len(), tenants().len());
}

#[test]
#[serial]
fn test_missing_user_is_none() {
    assert_eq!(tenants().get_email("nobody"), None);
    assert!(!tenants().contains("nobody"));
}
