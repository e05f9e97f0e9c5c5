//! Scope resolution.
//!
//! Every property access on a stateful object is answered by exactly one
//! scope, checked in a fixed priority order:
//!
//! 1. [`Scope::Common`] - wins outright whenever it holds the key
//! 2. [`Scope::Current`] - the active state's container
//! 3. [`Scope::Default`] - the configured default state, if any
//! 4. [`Scope::Base`] - a plain fallback object, if any
//!
//! The functions here are pure lookups over borrowed containers; they never
//! invoke methods and never change which state is current.

use super::container::StateContainer;
use super::value::Value;
use serde::{Deserialize, Serialize};

/// Resolution tier that owns a property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Common,
    Current,
    Default,
    Base,
}

/// Borrowed view over the containers of one stateful object.
#[derive(Clone, Copy, Debug)]
pub struct Scopes<'a> {
    pub common: &'a StateContainer,
    pub current: &'a StateContainer,
    pub default: Option<&'a StateContainer>,
    pub base: Option<&'a StateContainer>,
}

impl<'a> Scopes<'a> {
    fn tiers(&self) -> impl Iterator<Item = (Scope, &'a StateContainer)> {
        [
            Some((Scope::Common, self.common)),
            Some((Scope::Current, self.current)),
            self.default.map(|c| (Scope::Default, c)),
            self.base.map(|c| (Scope::Base, c)),
        ]
        .into_iter()
        .flatten()
    }

    pub fn container(&self, scope: Scope) -> Option<&'a StateContainer> {
        match scope {
            Scope::Common => Some(self.common),
            Scope::Current => Some(self.current),
            Scope::Default => self.default,
            Scope::Base => self.base,
        }
    }

    /// The first scope holding `key`, in priority order.
    pub fn owner(&self, key: &str) -> Option<Scope> {
        self.tiers()
            .find(|(_, container)| container.contains(key))
            .map(|(scope, _)| scope)
    }

    /// Value of `key` from its owning scope, or `Undefined`.
    pub fn resolve(&self, key: &str) -> Value {
        self.tiers()
            .find_map(|(_, container)| container.get(key))
            .unwrap_or_default()
    }

    /// Writes go to common if it already owns the key, otherwise to the
    /// current state. Base and default are never written through the handle.
    pub fn write_target(&self, key: &str) -> Scope {
        if self.common.contains(key) {
            Scope::Common
        } else {
            Scope::Current
        }
    }

    /// Deletes consider common and current only. `None` means nothing to
    /// delete.
    pub fn delete_target(&self, key: &str) -> Option<Scope> {
        if self.common.contains(key) {
            Some(Scope::Common)
        } else if self.current.contains(key) {
            Some(Scope::Current)
        } else {
            None
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.owner(key).is_some()
    }

    /// Union of keys across common, current and base. Duplicates keep the
    /// position of their first occurrence.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        let enumerated = [Some(self.common), Some(self.current), self.base];
        for container in enumerated.into_iter().flatten() {
            for key in container.keys() {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }
}
