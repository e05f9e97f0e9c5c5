//! The transition engine.
//!
//! `enter` validates the target, fires the pre-transition hook, swaps the
//! current state, records the swap in the journal and fires the
//! post-transition hook, all before returning.
//!
//! Transitions may be re-entered from hooks and state methods. There is no
//! guard against unbounded recursion; a state that enters itself from its
//! own enter hook will loop until the stack runs out.

use super::hooks::{Event, TransitionInfo, ENTER_HOOK, LEAVE_HOOK};
use super::{ActiveState, HookMode, Inner, Stateful, StatefulError, WeakStateful};
use crate::core::{StateContainer, StateTransition};
use chrono::Utc;
use std::fmt;
use tracing::debug;

/// What to enter: a registered state by name, or an anonymous container.
#[derive(Clone, Debug)]
pub enum Target {
    Named(String),
    Anonymous(StateContainer),
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::Named(name.to_string())
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Target::Named(name)
    }
}

impl From<StateContainer> for Target {
    fn from(container: StateContainer) -> Self {
        Target::Anonymous(container)
    }
}

impl From<&StateContainer> for Target {
    fn from(container: &StateContainer) -> Self {
        Target::Anonymous(container.clone())
    }
}

/// The transition primitive.
///
/// Holds only a weak reference, so state methods can capture it without
/// keeping their object alive.
#[derive(Clone)]
pub struct Transition {
    target: WeakStateful,
}

impl Transition {
    /// Enter `target` on the owning object.
    pub fn enter(&self, target: impl Into<Target>) -> Result<Stateful, StatefulError> {
        let stateful = self.target.upgrade().ok_or(StatefulError::Detached)?;
        stateful.enter(target)
    }

    /// True if both primitives drive the same object.
    pub fn same_target(&self, other: &Transition) -> bool {
        self.target.inner.ptr_eq(&other.target.inner)
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("attached", &(self.target.inner.strong_count() > 0))
            .finish()
    }
}

impl Inner {
    fn lookup(&self, target: Target) -> Result<ActiveState, StatefulError> {
        match target {
            Target::Named(name) => match self.registry.get(&name) {
                Some(container) => Ok(ActiveState {
                    container: container.clone(),
                    name: Some(name),
                }),
                None => Err(StatefulError::InvalidState { name }),
            },
            Target::Anonymous(container) => Ok(ActiveState::anonymous(container)),
        }
    }

    fn swap(&mut self, incoming: ActiveState) {
        let outgoing = std::mem::replace(&mut self.current, incoming);
        self.sequence += 1;
        let from = outgoing.state_ref();
        let to = self.current.state_ref();
        debug!(%from, %to, sequence = self.sequence, "entered state");
        if self.config.history_limit > 0 {
            let transition = StateTransition {
                from,
                to,
                timestamp: Utc::now(),
                sequence: self.sequence,
            };
            self.history = self
                .history
                .record(transition)
                .trimmed(self.config.history_limit);
        }
    }
}

impl Stateful {
    /// Enter a new state.
    ///
    /// Named targets must be registered; otherwise this fails with
    /// [`StatefulError::InvalidState`] before any hook runs and the current
    /// state is left unchanged.
    ///
    /// Hooks never prevent the swap. If a property hook fails, the
    /// transition still completes and the first hook error is returned.
    ///
    /// On success the handle is returned so calls can be chained.
    pub fn enter(&self, target: impl Into<Target>) -> Result<Stateful, StatefulError> {
        let (mode, outgoing, incoming) = {
            let inner = self.inner.borrow();
            let incoming = inner.lookup(target.into())?;
            (inner.config.hook_mode, inner.current.clone(), incoming)
        };

        let mut hook_error = None;
        match mode {
            HookMode::Properties => hook_error = self.fire_property_hook(LEAVE_HOOK),
            HookMode::Events => self.fire_event(Event::Leave, &outgoing.container),
            HookMode::Handler => self.fire_handler(&TransitionInfo {
                from_name: outgoing.name.clone(),
                from: outgoing.container.clone(),
                to_name: incoming.name.clone(),
                to: incoming.container.clone(),
            }),
        }

        let entered = incoming.container.clone();
        self.inner.borrow_mut().swap(incoming);

        match mode {
            HookMode::Properties => {
                let err = self.fire_property_hook(ENTER_HOOK);
                hook_error = hook_error.or(err);
            }
            HookMode::Events => self.fire_event(Event::Enter, &entered),
            HookMode::Handler => {}
        }

        match hook_error {
            Some(err) => Err(err),
            None => Ok(self.clone()),
        }
    }

    /// The transition primitive for this object.
    pub fn transition(&self) -> Transition {
        Transition {
            target: self.downgrade(),
        }
    }

    /// Add or replace a named state.
    pub fn register(&self, name: impl Into<String>, container: StateContainer) {
        let name = name.into();
        debug!(state = %name, "registered state");
        self.inner.borrow_mut().registry.insert(name, container);
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.inner.borrow().registry.contains_key(name)
    }

    /// Names of all registered states, sorted.
    pub fn state_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.borrow().registry.keys().cloned().collect();
        names.sort();
        names
    }

    /// Mark a registered state as the default scope for reads.
    pub fn set_default(&self, name: &str) -> Result<(), StatefulError> {
        let mut inner = self.inner.borrow_mut();
        if !inner.registry.contains_key(name) {
            return Err(StatefulError::invalid_state(name));
        }
        inner.default = Some(name.to_string());
        Ok(())
    }
}
