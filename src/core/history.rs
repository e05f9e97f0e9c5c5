//! Transition journal.
//!
//! Provides an immutable record of the transitions a stateful object went
//! through. Anonymous states are identified by their container id.

use super::container::StateContainer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Identifies a state in the journal: its registry name if it has one, and
/// the identity of its container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRef {
    pub name: Option<String>,
    pub id: Uuid,
}

impl StateRef {
    pub fn new(name: Option<&str>, container: &StateContainer) -> Self {
        Self {
            name: name.map(str::to_string),
            id: container.id(),
        }
    }
}

impl fmt::Display for StateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => f.write_str(name),
            None => write!(f, "anonymous({})", self.id),
        }
    }
}

/// Record of a single completed transition.
///
/// # Example
///
/// ```rust
/// use stateworks::core::{StateRef, StateTransition};
/// use stateworks::StateContainer;
/// use chrono::Utc;
///
/// let idle = StateContainer::new();
/// let busy = StateContainer::new();
///
/// let transition = StateTransition {
///     from: StateRef::new(Some("idle"), &idle),
///     to: StateRef::new(Some("busy"), &busy),
///     timestamp: Utc::now(),
///     sequence: 1,
/// };
/// assert_eq!(transition.to.to_string(), "busy");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being left
    pub from: StateRef,
    /// The state being entered
    pub to: StateRef,
    /// When the swap happened
    pub timestamp: DateTime<Utc>,
    /// Position of this transition in the object's lifetime, starting at 1
    pub sequence: u64,
}

/// Ordered history of transitions.
///
/// `record` returns a new history with the transition appended; the original
/// is left untouched.
///
/// # Example
///
/// ```rust
/// use stateworks::core::{StateHistory, StateRef, StateTransition};
/// use stateworks::StateContainer;
/// use chrono::Utc;
///
/// let (a, b, c) = (StateContainer::new(), StateContainer::new(), StateContainer::new());
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: StateRef::new(Some("a"), &a),
///         to: StateRef::new(Some("b"), &b),
///         timestamp: Utc::now(),
///         sequence: 1,
///     })
///     .record(StateTransition {
///         from: StateRef::new(Some("b"), &b),
///         to: StateRef::new(None, &c),
///         timestamp: Utc::now(),
///         sequence: 2,
///     });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[1].name.as_deref(), Some("b"));
/// assert!(path[2].name.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Keep only the most recent `limit` transitions.
    pub fn trimmed(&self, limit: usize) -> Self {
        let skip = self.transitions.len().saturating_sub(limit);
        Self {
            transitions: self.transitions[skip..].to_vec(),
        }
    }

    /// States traversed: the first recorded origin, then each target.
    pub fn get_path(&self) -> Vec<&StateRef> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
