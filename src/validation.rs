//! Username and email format checks.
//!
//! Both helpers return `bool`; callers at the input boundary decide whether to
//! re-prompt. [`UserRecord::parse`](crate::UserRecord::parse) turns a failed
//! check into a [`RegistryError`](crate::RegistryError).

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Non-empty and made only of ASCII letters and digits.
///
/// ```rust
/// use user_registry::is_valid_username;
///
/// assert!(is_valid_username("user1"));
/// assert!(!is_valid_username("user 1"));
/// ```
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty() && username.chars().all(|c| c.is_ascii_alphanumeric())
}

/// `local@domain.tld` with a TLD of at least two letters.
///
/// ```rust
/// use user_registry::is_valid_email;
///
/// assert!(is_valid_email("a@b.com"));
/// assert!(!is_valid_email("a@b"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
