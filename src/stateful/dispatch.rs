//! Property access and method dispatch through the handle.

use super::{Stateful, StatefulError};
use crate::core::{Method, MethodResult, Scope, Value};
use tracing::trace;

/// A method resolved through a handle, with its receiver fixed to that
/// handle.
///
/// Invoking it behaves exactly like [`Stateful::call`] at the time the
/// method was resolved, even if the object has since left the state that
/// provided it.
#[derive(Clone, Debug)]
pub struct BoundMethod {
    name: String,
    receiver: Stateful,
    method: Method,
}

impl BoundMethod {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: Vec<Value>) -> MethodResult {
        self.receiver.invoke(&self.method, args)
    }
}

impl Stateful {
    /// Resolve `key` through common, current, default and base, in that
    /// order. Absent keys read as [`Value::Undefined`].
    pub fn get(&self, key: &str) -> Value {
        self.inner.borrow().scopes().resolve(key)
    }

    /// The scope that currently answers reads of `key`.
    pub fn owner(&self, key: &str) -> Option<Scope> {
        self.inner.borrow().scopes().owner(key)
    }

    /// Write `key` into common if common already holds it, otherwise into
    /// the current state. New keys never land in base or default.
    pub fn set(&self, key: &str, value: impl Into<Value>) {
        let inner = self.inner.borrow();
        let scopes = inner.scopes();
        let scope = scopes.write_target(key);
        trace!(key, ?scope, "set property");
        if let Some(container) = scopes.container(scope) {
            container.insert(key, value);
        }
    }

    /// Define `key` on the current state, bypassing the common store.
    pub fn define(&self, key: &str, value: impl Into<Value>) {
        trace!(key, "define property");
        self.inner.borrow().current.container.insert(key, value);
    }

    pub fn has(&self, key: &str) -> bool {
        self.inner.borrow().scopes().has(key)
    }

    /// Delete `key`, returning whether anything changed.
    ///
    /// Common keys are never removed: their value becomes
    /// [`Value::Undefined`] and they stay enumerable. Keys that live only
    /// in default or base are left alone.
    pub fn delete(&self, key: &str) -> bool {
        let inner = self.inner.borrow();
        let scopes = inner.scopes();
        match scopes.delete_target(key) {
            Some(Scope::Common) => {
                trace!(key, "soft-delete common property");
                scopes.common.insert(key, Value::Undefined);
                true
            }
            Some(scope) => {
                trace!(key, ?scope, "delete property");
                scopes
                    .container(scope)
                    .and_then(|container| container.remove(key))
                    .is_some()
            }
            None => false,
        }
    }

    /// Keys of common, current and base, without duplicates.
    pub fn keys(&self) -> Vec<String> {
        self.inner.borrow().scopes().keys()
    }

    /// Resolve `name` to a method bound to this handle.
    pub fn method(&self, name: &str) -> Option<BoundMethod> {
        match self.get(name) {
            Value::Method(method) => Some(BoundMethod {
                name: name.to_string(),
                receiver: self.clone(),
                method,
            }),
            _ => None,
        }
    }

    /// Resolve `name` and invoke it with this handle as receiver.
    pub fn call(&self, name: &str, args: Vec<Value>) -> MethodResult {
        match self.get(name) {
            Value::Method(method) => self.invoke(&method, args),
            _ => Err(StatefulError::NotCallable {
                name: name.to_string(),
            }),
        }
    }

    pub(crate) fn invoke(&self, method: &Method, mut args: Vec<Value>) -> MethodResult {
        if self.inner.borrow().config.inject_transition {
            args.insert(0, Value::Transition(self.transition()));
        }
        method.invoke(self, args)
    }
}
