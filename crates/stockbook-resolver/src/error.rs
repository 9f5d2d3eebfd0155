//! Error types for the resolver
//!
//! Every collaborator failure is caught at the call site and ends up here
//! or in a notice; none of them invalidate form state.

use stockbook_catalog::TransportError;
use stockbook_model::ValidationError;

/// Submission did not result in a write
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Form failed local validation, nothing was sent
    #[error("invalid form: {0}")]
    Validation(#[from] ValidationError),

    /// A collaborator could not be reached
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),

    /// The write was refused, message passed through verbatim
    #[error("{0}")]
    Rejected(String),
}

impl SubmitError {
    /// Whether nothing was sent to any collaborator
    #[inline]
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether retrying the same action may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// ISBN generation did not produce an identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Another generation is still pending
    #[error("an ISBN is already being generated")]
    Busy,

    /// Ticket does not belong to the pending generation
    #[error("generation result no longer applies")]
    Stale,

    /// Allocator refused
    #[error("{0}")]
    Refused(String),

    /// Allocator could not be reached
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),
}

/// Configuration could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File unreadable
    #[error("cannot read {path}: {source}")]
    Io {
        /// Offending path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or type error
    #[error("invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Value out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
