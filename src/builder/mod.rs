//! Builder API for constructing stateful objects.
//!
//! This module provides a fluent builder for objects whose states are
//! registered by name up front, and the [`container!`](crate::container)
//! macro for declaring state containers with minimal boilerplate.

pub mod error;
pub mod macros;
pub mod stateful;

pub use error::BuildError;
pub use stateful::StatefulBuilder;
