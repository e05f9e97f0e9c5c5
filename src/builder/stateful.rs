//! Builder for stateful objects with named states.

use crate::builder::error::BuildError;
use crate::core::{StateContainer, Value};
use crate::stateful::{Event, HookMode, Stateful, StatefulConfig, StatefulError, TransitionInfo};
use std::rc::Rc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Listener = Rc<dyn Fn(&Stateful, &StateContainer)>;
type Handler = Rc<dyn Fn(&Stateful, &TransitionInfo)>;

/// Builder for stateful objects with a fluent API.
///
/// # Example
///
/// ```
/// use stateworks::{container, Stateful, Value};
///
/// let door = Stateful::builder()
///     .state("closed", container! { "status" => "closed" })
///     .state("open", container! { "status" => "open" })
///     .common("material", "oak")
///     .initial("closed")
///     .build()
///     .unwrap();
///
/// door.enter("open").unwrap();
/// assert_eq!(door.get("status"), Value::from("open"));
/// assert_eq!(door.get("material"), Value::from("oak"));
/// ```
pub struct StatefulBuilder {
    config: StatefulConfig,
    states: Vec<(String, StateContainer)>,
    initial: Option<String>,
    default: Option<String>,
    base: Option<StateContainer>,
    common: Vec<(String, Value)>,
    listeners: Vec<(Event, Listener)>,
    handler: Option<Handler>,
}

impl StatefulBuilder {
    pub fn new() -> Self {
        Self {
            config: StatefulConfig::default(),
            states: Vec::new(),
            initial: None,
            default: None,
            base: None,
            common: Vec::new(),
            listeners: Vec::new(),
            handler: None,
        }
    }

    /// Register a named state. Registering a name twice keeps the last one.
    pub fn state(mut self, name: impl Into<String>, container: StateContainer) -> Self {
        self.states.push((name.into(), container));
        self
    }

    /// Register several named states at once.
    pub fn states<I, N>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = (N, StateContainer)>,
        N: Into<String>,
    {
        self.states
            .extend(states.into_iter().map(|(name, c)| (name.into(), c)));
        self
    }

    /// Set the state entered by `build`. Defaults to the default state.
    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.initial = Some(name.into());
        self
    }

    /// Set the state consulted for keys the current state lacks.
    pub fn default_state(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    /// Set the lowest-priority fallback object.
    pub fn base(mut self, base: StateContainer) -> Self {
        self.base = Some(base);
        self
    }

    /// Seed a common property.
    pub fn common(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.common.push((key.into(), value.into()));
        self
    }

    pub fn config(mut self, config: StatefulConfig) -> Self {
        self.config = config;
        self
    }

    pub fn hook_mode(mut self, mode: HookMode) -> Self {
        self.config.hook_mode = mode;
        self
    }

    pub fn inject_transition(mut self, inject: bool) -> Self {
        self.config.inject_transition = inject;
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    /// Add an event listener. Requires [`HookMode::Events`] at build time.
    pub fn on<F>(mut self, event: Event, listener: F) -> Self
    where
        F: Fn(&Stateful, &StateContainer) + 'static,
    {
        self.listeners.push((event, Rc::new(listener)));
        self
    }

    /// Set the transition handler. Requires [`HookMode::Handler`] at build
    /// time.
    pub fn transition_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Stateful, &TransitionInfo) + 'static,
    {
        self.handler = Some(Rc::new(handler));
        self
    }

    fn check_registered(&self, name: &str) -> Validation<(), NonEmptyVec<StatefulError>> {
        if self.states.iter().any(|(n, _)| n == name) {
            Validation::success(())
        } else {
            Validation::fail(StatefulError::invalid_state(name))
        }
    }

    /// Validate the state references and build the object.
    ///
    /// All invalid references are reported together. On success the
    /// initial state has been entered, with hooks fired.
    pub fn build(self) -> Result<Stateful, BuildError> {
        let initial = self
            .initial
            .clone()
            .or_else(|| self.default.clone())
            .ok_or(BuildError::MissingInitialState)?;

        let mut checks: Vec<Validation<(), NonEmptyVec<StatefulError>>> = Vec::new();
        checks.push(self.check_registered(&initial));
        if let Some(default) = self.default.as_deref().filter(|d| *d != initial) {
            checks.push(self.check_registered(default));
        }
        if let Validation::Failure(errors) = Validation::all_vec(checks).map(|_| ()) {
            return Err(BuildError::Rejected(errors.iter().cloned().collect()));
        }

        let stateful = Stateful::bare(self.config, self.base);
        for (name, container) in self.states {
            stateful.register(name, container);
        }
        if let Some(default) = &self.default {
            stateful.set_default(default)?;
        }
        stateful.common().extend(self.common);
        for (event, listener) in self.listeners {
            stateful.add_listener(event, listener)?;
        }
        if let Some(handler) = self.handler {
            stateful.install_handler(handler)?;
        }

        stateful.enter(initial)?;
        Ok(stateful)
    }
}

impl Default for StatefulBuilder {
    fn default() -> Self {
        Self::new()
    }
}
