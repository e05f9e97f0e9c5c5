//! Core data model and scope resolution.
//!
//! This module contains the parts of a stateful object that hold no engine
//! state of their own:
//! - Property values and methods
//! - State containers
//! - The fixed-priority scope resolver
//! - The transition journal
//!
//! Nothing in here invokes methods or swaps states; that is the job of
//! [`crate::stateful`].

mod container;
mod history;
mod scope;
mod value;

pub use container::StateContainer;
pub use history::{StateHistory, StateRef, StateTransition};
pub use scope::{Scope, Scopes};
pub use value::{Method, MethodResult, Value};
