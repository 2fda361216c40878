use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// Event name emitted after a user has been stored.
pub const USER_REGISTERED: &str = "USER_REGISTERED";

/// Event payload: field name to value.
pub type Payload = BTreeMap<String, Value>;

/// A named event with an immutable payload, delivered to observers.
///
/// # Examples
///
/// ```rust
/// use user_registry::{Event, USER_REGISTERED};
///
/// let event = Event::user_registered("alice", "a@x.com");
/// assert_eq!(event.name(), USER_REGISTERED);
/// assert_eq!(event.get_str("email"), Some("a@x.com"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    name: String,
    payload: Payload,
}

impl Event {
    pub fn new(name: impl Into<String>, payload: Payload) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    /// An event without payload.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Payload::new())
    }

    /// The `USER_REGISTERED` event carrying `username` and `email`.
    pub fn user_registered(username: &str, email: &str) -> Self {
        let mut payload = Payload::new();
        payload.insert("username".to_string(), Value::from(username));
        payload.insert("email".to_string(), Value::from(email));
        Self::new(USER_REGISTERED, payload)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Payload value for `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.name)?;
        for (i, (key, value)) in self.payload.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {key}: {value}")?;
        }
        write!(f, " }}")
    }
}
