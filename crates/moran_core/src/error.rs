//! Error types for the Moran engine.
//!
//! Every failure is surfaced to the caller immediately; nothing is retried
//! inside the engine. Reaching fixation is not an error, see
//! [`crate::moran::Generation::Terminated`].

use thiserror::Error;

/// Main error type for `moran_core` operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MoranError {
    /// Bad parameters, rejected at construction or at run-to-completion entry.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Atomic mutation requested on an agent that cannot mutate itself.
    #[error("Incompatible agent: {0}")]
    IncompatibleAgent(String),

    /// Neither ordering of a strategy pair is present in the outcome cache.
    #[error("No cached outcome for the pairing ({first}, {second})")]
    UncoveredOutcome { first: String, second: String },
}

/// Result type alias for `moran_core` operations.
pub type Result<T> = std::result::Result<T, MoranError>;

impl MoranError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Creates a new incompatible agent error.
    #[must_use]
    pub fn incompatible_agent<S: Into<String>>(msg: S) -> Self {
        Self::IncompatibleAgent(msg.into())
    }

    /// Creates a new uncovered outcome error for the given name pair.
    #[must_use]
    pub fn uncovered<A: Into<String>, B: Into<String>>(first: A, second: B) -> Self {
        Self::UncoveredOutcome {
            first: first.into(),
            second: second.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MoranError::invalid_config("mode must be bd or db");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: mode must be bd or db"
        );
    }

    #[test]
    fn test_uncovered_display_names_both_sides() {
        let err = MoranError::uncovered("Cooperator", "Defector");
        let msg = err.to_string();
        assert!(msg.contains("Cooperator"));
        assert!(msg.contains("Defector"));
    }
}
