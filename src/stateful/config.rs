//! Per-object configuration, fixed at construction.

use serde::{Deserialize, Serialize};

/// How transition hooks are discovered and fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookMode {
    /// Methods named [`LEAVE_HOOK`](super::LEAVE_HOOK) and
    /// [`ENTER_HOOK`](super::ENTER_HOOK), resolved through the handle
    #[default]
    Properties,

    /// Listeners registered with [`Stateful::on`](super::Stateful::on)
    Events,

    /// A single handler registered with
    /// [`Stateful::set_transition_handler`](super::Stateful::set_transition_handler),
    /// called once per transition before the swap
    Handler,
}

/// Configuration of a stateful object.
///
/// Missing fields fall back to their defaults when deserialized, so a
/// partial JSON document is enough:
///
/// ```rust
/// use stateworks::{HookMode, StatefulConfig};
///
/// let config = StatefulConfig::from_json(r#"{ "hook_mode": "events" }"#).unwrap();
/// assert_eq!(config.hook_mode, HookMode::Events);
/// assert!(!config.inject_transition);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatefulConfig {
    pub hook_mode: HookMode,

    /// Prepend the transition primitive to the arguments of every method
    /// invoked through the handle
    pub inject_transition: bool,

    /// Number of transitions kept in the journal; 0 disables recording
    pub history_limit: usize,
}

impl Default for StatefulConfig {
    fn default() -> Self {
        Self {
            hook_mode: HookMode::Properties,
            inject_transition: false,
            history_limit: 64,
        }
    }
}

impl StatefulConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
