//! Turn-level error taxonomy.

use thiserror::Error;

/// Errors that abort an inbound turn.
///
/// Ambiguous score extraction and unknown stimuli are deliberately absent:
/// both are recoverable control flow, not failures. Upstream variants carry
/// internal detail for logs; the user-visible text comes from
/// [`TurnError::user_message`] and is always generic.
#[derive(Debug, Error)]
pub enum TurnError {
    /// No or invalid caller identity; surfaced immediately, no state touched.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Malformed inbound turn; surfaced immediately.
    #[error("invalid turn input: {0}")]
    Validation(String),

    /// The record store failed; the turn is aborted with nothing partially
    /// committed beyond the tolerated write-once slot race.
    #[error("record store failure: {0}")]
    Store(String),

    /// The language oracle was unavailable or returned a transport error.
    #[error("oracle failure: {0}")]
    Oracle(String),

    /// Survey catalog invariants failed at startup.
    #[error("survey catalog invalid: {0}")]
    Catalog(String),
}

impl TurnError {
    /// Stable category tag for the outbound error envelope.
    pub fn category(&self) -> &'static str {
        match self {
            TurnError::Unauthorized(_) => "authentication_failure",
            TurnError::Validation(_) => "validation_failure",
            TurnError::Store(_) | TurnError::Oracle(_) => "upstream_unavailable",
            TurnError::Catalog(_) => "catalog_invalid",
        }
    }

    /// Generic user-visible message; upstream detail never leaks verbatim.
    pub fn user_message(&self) -> &'static str {
        match self {
            TurnError::Unauthorized(_) => "You are not signed in.",
            TurnError::Validation(_) => "That message could not be understood.",
            TurnError::Store(_) | TurnError::Oracle(_) | TurnError::Catalog(_) => {
                "Something went wrong on our side. Please try again."
            }
        }
    }
}

/// Convenience alias used throughout the services layer.
pub type TurnResult<T> = Result<T, TurnError>;

impl From<sqlx::Error> for TurnError {
    fn from(err: sqlx::Error) -> Self {
        TurnError::Store(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_errors_share_a_generic_user_message() {
        let store = TurnError::Store("disk on fire".to_string());
        let oracle = TurnError::Oracle("429 too many requests".to_string());
        assert_eq!(store.category(), "upstream_unavailable");
        assert_eq!(oracle.category(), "upstream_unavailable");
        assert_eq!(store.user_message(), oracle.user_message());
        assert!(!store.user_message().contains("disk"));
    }
}
