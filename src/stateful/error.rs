//! Errors surfaced by stateful objects.

use super::config::HookMode;
use thiserror::Error;

/// Errors that can occur when resolving, invoking, or transitioning.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StatefulError {
    /// A referenced state name is not registered
    #[error("Invalid state '{name}'")]
    InvalidState { name: String },

    /// An action is not valid while in the given state. Never raised by the
    /// engine itself; state implementations raise it deliberately.
    #[error("Invalid operation '{operation}' in state '{state}'")]
    InvalidOperation { operation: String, state: String },

    /// A resolved property was invoked but is not a method
    #[error("Property '{name}' is not callable")]
    NotCallable { name: String },

    /// A hook was registered that the configured mode never fires
    #[error("Hook '{hook}' is not available in {mode:?} hook mode")]
    HookUnavailable { hook: &'static str, mode: HookMode },

    /// A weak handle outlived its stateful object
    #[error("Stateful object no longer exists")]
    Detached,
}

impl StatefulError {
    pub fn invalid_state(name: impl Into<String>) -> Self {
        Self::InvalidState { name: name.into() }
    }

    pub fn invalid_operation(operation: impl Into<String>, state: impl Into<String>) -> Self {
        Self::InvalidOperation {
            operation: operation.into(),
            state: state.into(),
        }
    }
}
