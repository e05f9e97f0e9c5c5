//! The stateful object: dispatch handle and transition engine.
//!
//! A [`Stateful`] is the only externally visible piece. Every property
//! read, write, delete and enumeration goes through the scope resolver in
//! [`crate::core`], and every method is invoked with the handle itself as
//! receiver, so code inside a state sees the same object as outside callers.
//!
//! # Example
//!
//! ```rust
//! use stateworks::{container, Method, Stateful, Value};
//!
//! let object = Stateful::create(|this, common, _enter| {
//!     common.set("visits", 0);
//!     this.register("closed", container! {
//!         "open" => Method::new(|this, _| {
//!             this.enter("opened")?;
//!             Ok(Value::Undefined)
//!         }),
//!     });
//!     this.register("opened", container! {
//!         "visit" => Method::new(|this, _| {
//!             let visits = this.get("visits").as_i64().unwrap_or(0);
//!             this.set("visits", visits + 1);
//!             Ok(Value::Undefined)
//!         }),
//!     });
//!     Some("closed".into())
//! })
//! .unwrap();
//!
//! assert!(object.call("visit", vec![]).is_err());
//! object.call("open", vec![]).unwrap();
//! object.call("visit", vec![]).unwrap();
//! assert_eq!(object.get("visits"), Value::from(1));
//! assert_eq!(object.state_name().as_deref(), Some("opened"));
//! ```

mod common;
mod config;
mod dispatch;
mod error;
mod hooks;
mod transition;

pub use common::CommonStore;
pub use config::{HookMode, StatefulConfig};
pub use dispatch::BoundMethod;
pub use error::StatefulError;
pub use hooks::{Event, TransitionInfo, ENTER_HOOK, LEAVE_HOOK};
pub use transition::{Target, Transition};

use crate::builder::StatefulBuilder;
use crate::core::{Scopes, StateContainer, StateHistory, StateRef};
use hooks::Hooks;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// The active state: its container and, for registered states, its name.
#[derive(Clone, Debug)]
pub(crate) struct ActiveState {
    name: Option<String>,
    container: StateContainer,
}

impl ActiveState {
    fn anonymous(container: StateContainer) -> Self {
        Self {
            name: None,
            container,
        }
    }

    fn state_ref(&self) -> StateRef {
        StateRef::new(self.name.as_deref(), &self.container)
    }
}

pub(crate) struct Inner {
    config: StatefulConfig,
    common: StateContainer,
    base: Option<StateContainer>,
    registry: HashMap<String, StateContainer>,
    default: Option<String>,
    current: ActiveState,
    hooks: Hooks,
    history: StateHistory,
    sequence: u64,
}

impl Inner {
    fn scopes(&self) -> Scopes<'_> {
        Scopes {
            common: &self.common,
            current: &self.current.container,
            default: self.default.as_ref().and_then(|name| self.registry.get(name)),
            base: self.base.as_ref(),
        }
    }
}

/// Handle to a stateful object.
///
/// Cloning the handle is cheap and yields another reference to the same
/// object. The object is single-threaded; nothing here is `Send`.
///
/// Methods stored in the object should reach it through their receiver
/// argument or a [`Transition`]. A method that captures a strong `Stateful`
/// keeps the object alive forever; use [`Stateful::downgrade`] instead.
#[derive(Clone)]
pub struct Stateful {
    inner: Rc<RefCell<Inner>>,
}

/// Non-owning reference to a [`Stateful`].
#[derive(Clone, Debug)]
pub struct WeakStateful {
    inner: Weak<RefCell<Inner>>,
}

impl WeakStateful {
    pub fn upgrade(&self) -> Option<Stateful> {
        self.inner.upgrade().map(|inner| Stateful { inner })
    }
}

impl Stateful {
    /// Create an object whose initial state is established by `initializer`.
    ///
    /// The initializer runs once, synchronously, with the handle being
    /// built, the common store and the transition primitive. A returned
    /// target is entered (firing hooks); `None` keeps whatever state the
    /// initializer entered itself.
    pub fn create<F>(initializer: F) -> Result<Self, StatefulError>
    where
        F: FnOnce(&Stateful, &CommonStore, &Transition) -> Option<Target>,
    {
        Self::create_with(StatefulConfig::default(), None, initializer)
    }

    /// Like [`Stateful::create`], with a base object as lowest-priority scope.
    pub fn with_base<F>(base: StateContainer, initializer: F) -> Result<Self, StatefulError>
    where
        F: FnOnce(&Stateful, &CommonStore, &Transition) -> Option<Target>,
    {
        Self::create_with(StatefulConfig::default(), Some(base), initializer)
    }

    pub fn create_with<F>(
        config: StatefulConfig,
        base: Option<StateContainer>,
        initializer: F,
    ) -> Result<Self, StatefulError>
    where
        F: FnOnce(&Stateful, &CommonStore, &Transition) -> Option<Target>,
    {
        let stateful = Self::bare(config, base);
        let common = stateful.common();
        let transition = stateful.transition();
        if let Some(target) = initializer(&stateful, &common, &transition) {
            stateful.enter(target)?;
        }
        Ok(stateful)
    }

    /// Create an object that starts in `initial`, an anonymous state.
    pub fn from_state(initial: StateContainer) -> Result<Self, StatefulError> {
        Self::create(|_, _, _| Some(initial.into()))
    }

    pub fn builder() -> StatefulBuilder {
        StatefulBuilder::new()
    }

    /// An object sitting in an empty anonymous state, with no hooks fired.
    pub(crate) fn bare(config: StatefulConfig, base: Option<StateContainer>) -> Self {
        let inner = Inner {
            config,
            common: StateContainer::new(),
            base,
            registry: HashMap::new(),
            default: None,
            current: ActiveState::anonymous(StateContainer::new()),
            hooks: Hooks::default(),
            history: StateHistory::new(),
            sequence: 0,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    pub fn downgrade(&self) -> WeakStateful {
        WeakStateful {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// True if both handles refer to the same object.
    pub fn ptr_eq(&self, other: &Stateful) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn config(&self) -> StatefulConfig {
        self.inner.borrow().config.clone()
    }

    /// Configuration handle over the common store.
    pub fn common(&self) -> CommonStore {
        CommonStore::new(self.clone())
    }

    /// The current state's container.
    pub fn state(&self) -> StateContainer {
        self.inner.borrow().current.container.clone()
    }

    /// Registry name of the current state; `None` for anonymous states.
    pub fn state_name(&self) -> Option<String> {
        self.inner.borrow().current.name.clone()
    }

    /// Human-readable label of the current state, as used in errors and logs.
    pub fn state_label(&self) -> String {
        self.inner.borrow().current.state_ref().to_string()
    }

    pub fn default_state(&self) -> Option<String> {
        self.inner.borrow().default.clone()
    }

    /// `InvalidOperation` for `operation`, labelled with the current state.
    pub fn invalid_operation(&self, operation: impl Into<String>) -> StatefulError {
        StatefulError::invalid_operation(operation, self.state_label())
    }

    /// Journal of the most recent transitions.
    pub fn history(&self) -> StateHistory {
        self.inner.borrow().history.clone()
    }
}

/// Handles are equal when they drive the same object.
impl PartialEq for Stateful {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Stateful {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stateful")
            .field("state", &self.state_label())
            .field("keys", &self.keys())
            .finish()
    }
}
