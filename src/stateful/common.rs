//! Configuration handle over the common store.

use super::Stateful;
use crate::core::{StateContainer, Value};

/// Fluent access to the properties that survive every transition.
///
/// Unlike writes through [`Stateful::set`], writes here always land in the
/// common store, which is how common keys are created in the first place.
/// Assignments are independent of each other, so their order does not
/// matter.
///
/// ```rust
/// use stateworks::{Stateful, StateContainer, Value};
///
/// let object = Stateful::from_state(StateContainer::new()).unwrap();
/// let object = object.common().set("hello", 42).set("shared", 33).done();
///
/// assert_eq!(object.get("shared"), Value::from(33));
/// ```
#[derive(Clone)]
pub struct CommonStore {
    owner: Stateful,
}

impl CommonStore {
    pub(super) fn new(owner: Stateful) -> Self {
        Self { owner }
    }

    fn container(&self) -> StateContainer {
        self.owner.inner.borrow().common.clone()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.container().insert(key, value);
        self.clone()
    }

    /// Merge many entries at once, overwriting existing keys.
    pub fn extend<I, K, V>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let container = self.container();
        for (key, value) in entries {
            container.insert(key, value);
        }
        self.clone()
    }

    /// Value stored in the common store itself, ignoring state scopes.
    pub fn get(&self, key: &str) -> Value {
        self.container().get(key).unwrap_or_default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.container().contains(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.container().keys()
    }

    /// Return to the owning object.
    pub fn done(&self) -> Stateful {
        self.owner.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container;

    #[test]
    fn set_creates_common_keys() {
        let object = Stateful::from_state(container! { "hello" => "state" }).unwrap();

        object.common().set("hello", 42);

        assert!(object.common().contains("hello"));
        assert_eq!(object.get("hello"), Value::from(42));
    }

    #[test]
    fn set_returns_owned_handle() {
        let object = Stateful::from_state(StateContainer::new()).unwrap();

        let store = object.common().set("a", 1);
        store.extend(vec![("b", 2)]).set("c", 3);

        assert_eq!(store.keys(), vec!["a", "b", "c"]);
        assert!(store.done().ptr_eq(&object));
    }

    #[test]
    fn extend_merges_entries() {
        let object = Stateful::from_state(StateContainer::new()).unwrap();

        object
            .common()
            .extend(vec![("hello", 42), ("shared", 33)])
            .extend(vec![("hello", 43)]);

        assert_eq!(object.common().keys(), vec!["hello", "shared"]);
        assert_eq!(object.common().get("hello"), Value::from(43));
    }

    #[test]
    fn get_ignores_state_scopes() {
        let object = Stateful::from_state(container! { "mode" => "idle" }).unwrap();

        assert!(object.common().get("mode").is_undefined());
    }

    #[test]
    fn assignment_order_is_irrelevant() {
        let a = Stateful::from_state(StateContainer::new()).unwrap();
        let b = Stateful::from_state(StateContainer::new()).unwrap();

        a.common().set("x", 1).set("y", 2);
        b.common().set("y", 2).set("x", 1);

        for key in ["x", "y"] {
            assert_eq!(a.get(key), b.get(key));
        }
    }

    #[test]
    fn done_returns_owner() {
        let object = Stateful::from_state(StateContainer::new()).unwrap();

        assert!(object.common().set("k", true).done().ptr_eq(&object));
    }
}
