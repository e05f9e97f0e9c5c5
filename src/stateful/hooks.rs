//! Transition hooks.
//!
//! Which kind of hook fires is decided by [`HookMode`], fixed at
//! construction. In every mode a missing hook is not an error: the
//! transition simply proceeds.

use super::{HookMode, Stateful, StatefulError};
use crate::core::{StateContainer, Value};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::{trace, warn};

/// Property name of the method invoked before leaving a state in
/// [`HookMode::Properties`].
pub const LEAVE_HOOK: &str = "on_state_leave";

/// Property name of the method invoked after entering a state in
/// [`HookMode::Properties`].
pub const ENTER_HOOK: &str = "on_state_enter";

/// Transition events in [`HookMode::Events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// Fired before the swap with the outgoing container
    Leave,
    /// Fired after the swap with the incoming container
    Enter,
}

/// Both sides of a transition, passed to the transition handler.
#[derive(Debug, Clone)]
pub struct TransitionInfo {
    pub from_name: Option<String>,
    pub from: StateContainer,
    pub to_name: Option<String>,
    pub to: StateContainer,
}

pub(crate) type Listener = Rc<dyn Fn(&Stateful, &StateContainer)>;
pub(crate) type Handler = Rc<dyn Fn(&Stateful, &TransitionInfo)>;

#[derive(Default)]
pub(crate) struct Hooks {
    listeners: Vec<(Event, Listener)>,
    handler: Option<Handler>,
}

impl Hooks {
    fn listeners(&self, event: Event) -> Vec<Listener> {
        self.listeners
            .iter()
            .filter(|(e, _)| *e == event)
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }
}

impl Stateful {
    /// Register a listener for `event`. Listeners run in registration order.
    ///
    /// Fails with [`StatefulError::HookUnavailable`] unless the object was
    /// configured with [`HookMode::Events`].
    pub fn on<F>(&self, event: Event, listener: F) -> Result<(), StatefulError>
    where
        F: Fn(&Stateful, &StateContainer) + 'static,
    {
        self.add_listener(event, Rc::new(listener))
    }

    /// Install the transition handler, replacing any previous one.
    ///
    /// Fails with [`StatefulError::HookUnavailable`] unless the object was
    /// configured with [`HookMode::Handler`].
    pub fn set_transition_handler<F>(&self, handler: F) -> Result<(), StatefulError>
    where
        F: Fn(&Stateful, &TransitionInfo) + 'static,
    {
        self.install_handler(Rc::new(handler))
    }

    pub(crate) fn add_listener(
        &self,
        event: Event,
        listener: Listener,
    ) -> Result<(), StatefulError> {
        let mut inner = self.inner.borrow_mut();
        let mode = inner.config.hook_mode;
        if mode != HookMode::Events {
            return Err(StatefulError::HookUnavailable { hook: "on", mode });
        }
        inner.hooks.listeners.push((event, listener));
        Ok(())
    }

    pub(crate) fn install_handler(&self, handler: Handler) -> Result<(), StatefulError> {
        let mut inner = self.inner.borrow_mut();
        let mode = inner.config.hook_mode;
        if mode != HookMode::Handler {
            return Err(StatefulError::HookUnavailable {
                hook: "transition_handler",
                mode,
            });
        }
        inner.hooks.handler = Some(handler);
        Ok(())
    }

    /// Invoke the method stored under `name`, if there is one.
    pub(super) fn fire_property_hook(&self, name: &str) -> Option<StatefulError> {
        let Value::Method(method) = self.get(name) else {
            return None;
        };
        trace!(hook = name, "invoking property hook");
        match self.invoke(&method, Vec::new()) {
            Ok(_) => None,
            Err(err) => {
                warn!(hook = name, error = %err, "property hook failed");
                Some(err)
            }
        }
    }

    pub(super) fn fire_event(&self, event: Event, container: &StateContainer) {
        let listeners = self.inner.borrow().hooks.listeners(event);
        trace!(?event, count = listeners.len(), "dispatching listeners");
        for listener in listeners {
            listener(self, container);
        }
    }

    pub(super) fn fire_handler(&self, info: &TransitionInfo) {
        let handler = self.inner.borrow().hooks.handler.clone();
        if let Some(handler) = handler {
            trace!("invoking transition handler");
            handler(self, info);
        }
    }
}
