//! Error types.

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors produced by the stand-in simulation.
///
/// Stepping the world cannot fail once it is constructed, so the only core
/// error is a rejected configuration.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A configuration value is out of range (e.g. a zero world size).
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What was wrong with the configuration.
        reason: String,
    },

    /// A snapshot or config document could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SimError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
