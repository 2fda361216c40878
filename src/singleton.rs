//! Lazily constructed single-instance cell.
//!
//! [`SingletonCell`] performs double-checked construction: an unsynchronized
//! fast-path read, then the construction mutex, then a second check before the
//! initializer runs. After the first construction every access is a single
//! atomic load.

use std::any::type_name;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock};

use tracing::debug;

/// Holds at most one `T`, built on first access.
///
/// Usable in a `static`:
///
/// ```rust
/// use user_registry::SingletonCell;
///
/// static COUNTER_NAME: SingletonCell<String> = SingletonCell::new();
///
/// let a = COUNTER_NAME.get_or_init(|| "requests".to_string());
/// let b = COUNTER_NAME.get_or_init(|| unreachable!());
/// assert!(std::ptr::eq(a, b));
/// assert_eq!(COUNTER_NAME.constructions(), 1);
/// ```
pub struct SingletonCell<T> {
    value: OnceLock<T>,
    init_lock: Mutex<()>,
    constructions: AtomicUsize,
}

impl<T> SingletonCell<T> {
    pub const fn new() -> Self {
        Self {
            value: OnceLock::new(),
            init_lock: Mutex::new(()),
            constructions: AtomicUsize::new(0),
        }
    }

    /// The instance, if it has been constructed.
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    /// The instance, constructing it with `init` on first access.
    ///
    /// Concurrent first callers block on the construction lock; exactly one of
    /// them runs `init` and all of them receive the same instance.
    ///
    /// # Lock Poisoning Recovery
    ///
    /// If `init` panics, the cell stays empty and the next caller retries
    /// construction with the recovered lock.
    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> &T {
        if let Some(value) = self.value.get() {
            return value;
        }

        let _guard = self.init_lock.lock().unwrap_or_else(|p| p.into_inner());

        if let Some(value) = self.value.get() {
            return value;
        }

        debug!(type_name = type_name::<T>(), "constructing singleton");
        self.constructions.fetch_add(1, Ordering::SeqCst);
        self.value.get_or_init(init)
    }

    pub fn is_initialized(&self) -> bool {
        self.value.get().is_some()
    }

    /// How many times an initializer has been started (0 or 1 unless `init` panicked).
    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }
}

impl<T> Default for SingletonCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SingletonCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingletonCell")
            .field("value", &self.value.get())
            .field("constructions", &self.constructions())
            .finish()
    }
}
