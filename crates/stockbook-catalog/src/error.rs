//! Collaborator failures

/// A collaborator call did not complete
///
/// Distinct from a rejected write, which is a completed call carrying an
/// error message in [`crate::WriteOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Backend or network unavailable
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Call took too long
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Elapsed budget
        timeout_ms: u64,
    },
}

impl TransportError {
    /// Unavailable with a reason
    #[inline]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }
}
