//! Build errors for the stateful object builder.

use crate::stateful::StatefulError;
use thiserror::Error;

/// Errors that can occur when building a stateful object.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(name) or .default_state(name) before .build()")]
    MissingInitialState,

    /// Every invalid state reference, not just the first one found
    #[error("Invalid state references: {}", describe(.0))]
    Rejected(Vec<StatefulError>),

    #[error(transparent)]
    Stateful(#[from] StatefulError),
}

fn describe(errors: &[StatefulError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
