//! Element identifiers backed by string interning.
//!
//! Every node, sequence flow, lane and diagram shape in a process diagram is
//! addressed by an [`Id`]. Identifiers are assigned by the discovery service
//! and never change, so they are interned once and compared as symbols.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Interned identifier of a diagram element.
///
/// # Examples
///
/// ```
/// use swimlane_core::identifier::Id;
///
/// let task = Id::new("Activity_0x1");
/// let lane = Id::prefixed("Lane_", "Clerk");
/// assert_eq!(lane, "Lane_Clerk");
///
/// let lane_shape = lane.suffixed("_di");
/// assert_eq!(lane_shape, "Lane_Clerk_di");
/// assert_ne!(task, lane);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates an `Id` by joining a fixed prefix and a name, e.g. `Lane_` + role.
    pub fn prefixed(prefix: &str, name: &str) -> Self {
        Self::new(&format!("{prefix}{name}"))
    }

    /// Creates a derived `Id` by appending `suffix` to this identifier.
    ///
    /// Diagram shapes are conventionally named after their element with a
    /// `_di` suffix.
    pub fn suffixed(&self, suffix: &str) -> Self {
        let mut interner = interner();
        let base = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        let derived = format!("{base}{suffix}");
        Self(interner.get_or_intern(&derived))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = interner()
            .resolve(self.0)
            .expect("Symbol should exist in interner")
            .to_string();
        f.write_str(&value)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        interner()
            .resolve(self.0)
            .is_some_and(|value| value == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Id::new(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("Task_1");
        let id2 = Id::new("Task_1");
        let id3 = Id::new("Task_2");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "Task_1");
    }

    #[test]
    fn test_prefixed() {
        let lane = Id::prefixed("Lane_", "Accounts_Payable");
        assert_eq!(lane, "Lane_Accounts_Payable");
        assert_eq!(lane, Id::new("Lane_Accounts_Payable"));
    }

    #[test]
    fn test_suffixed() {
        let lane = Id::new("Lane_Tester");
        assert_eq!(lane.suffixed("_di"), "Lane_Tester_di");
        // The base identifier is untouched.
        assert_eq!(lane, "Lane_Tester");
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("display_test");
        assert_eq!(format!("{id}"), "display_test");
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("StartEvent_1");

        assert!(id == "StartEvent_1");
        assert!(id != "EndEvent_1");

        let empty = Id::new("");
        assert!(empty == "");
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(Id::new("key1"), "value1");
        map.insert(Id::new("key2"), "value2");

        assert_eq!(map.get(&Id::new("key1")), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }
}
