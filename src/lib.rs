//! Stateworks: stateful object composition.
//!
//! A [`Stateful`] object behaves as if its properties and methods were
//! swapped out wholesale whenever its state changes. Every access goes
//! through a fixed-priority resolver:
//!
//! 1. **Common** properties, which survive every transition
//! 2. The **current** state's container
//! 3. The **default** state's container, if one is configured
//! 4. A **base** object, if one is supplied
//!
//! Methods are invoked with the object itself as receiver, so a state's code
//! reads and writes "its own" properties through the same chain and can
//! enter the next state.
//!
//! # Core Concepts
//!
//! - **StateContainer**: an ordered bag of data and methods for one state
//! - **Stateful**: the dispatch handle and transition engine
//! - **CommonStore**: properties that take priority over every state
//! - **Hooks**: leave/enter notifications, configured per object
//!
//! The object is single-threaded and synchronous: hooks run inline before
//! `enter` returns, and nothing here is safe to share across threads.
//!
//! # Example
//!
//! ```rust
//! use stateworks::{container, Method, Stateful, Value};
//!
//! let object = Stateful::create(|_this, common, enter| {
//!     common.set("hello", 42);
//!
//!     let done = container! {};
//!     let enter = enter.clone();
//!     let greeting = container! {
//!         "greet" => Method::new(move |this, _| {
//!             enter.enter(&done)?;
//!             Ok(format!("greeted with {}", this.get("hello").as_i64().unwrap_or(0)).into())
//!         }),
//!     };
//!     Some(greeting.into())
//! })
//! .unwrap();
//!
//! assert_eq!(object.call("greet", vec![]).unwrap(), Value::from("greeted with 42"));
//! assert!(object.get("greet").is_undefined());
//! assert_eq!(object.get("hello"), Value::from(42));
//! ```

pub mod builder;
pub mod core;
pub mod stateful;

// Re-export commonly used types
pub use builder::{BuildError, StatefulBuilder};
pub use self::core::{Method, MethodResult, Scope, StateContainer, StateHistory, Value};
pub use stateful::{
    BoundMethod, CommonStore, Event, HookMode, Stateful, StatefulConfig, StatefulError, Target,
    Transition, TransitionInfo, WeakStateful, ENTER_HOOK, LEAVE_HOOK,
};
