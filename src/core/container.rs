//! Property containers: one per state, plus the common store and base object.

use super::value::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

/// Ordered mapping from property name to [`Value`].
///
/// A container is a shared handle: cloning it yields another reference to the
/// same properties, which is what lets a state method capture the next state
/// and enter it later while writes made in between stay visible. Keys keep
/// their insertion order for enumeration.
///
/// Containers are owned by exactly one [`Stateful`](crate::Stateful); sharing
/// one between two objects is not supported.
#[derive(Clone)]
pub struct StateContainer {
    id: Uuid,
    props: Rc<RefCell<Vec<(String, Value)>>>,
}

impl StateContainer {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            props: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Insert a property and return the container, for fluent construction.
    pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Identity of this container, stable for its lifetime.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.props
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Insert or overwrite a property, returning the previous value.
    /// Overwriting keeps the key's original position.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        let mut props = self.props.borrow_mut();
        match props.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                props.push((key, value));
                None
            }
        }
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        let mut props = self.props.borrow_mut();
        let index = props.iter().position(|(k, _)| k == key)?;
        Some(props.remove(index).1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.props.borrow().iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.props.borrow().iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.props.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.borrow().is_empty()
    }

    /// True if both handles refer to the same container.
    pub fn ptr_eq(&self, other: &StateContainer) -> bool {
        Rc::ptr_eq(&self.props, &other.props)
    }

    /// Data-only snapshot as a JSON object. Methods and undefined values
    /// are skipped.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .props
            .borrow()
            .iter()
            .filter_map(|(k, v)| v.as_data().map(|data| (k.clone(), data.clone())))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

impl Default for StateContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StateContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateContainer")
            .field("id", &self.id)
            .field("keys", &self.keys())
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for StateContainer
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let container = StateContainer::new();
        for (key, value) in iter {
            container.insert(key, value);
        }
        container
    }
}
