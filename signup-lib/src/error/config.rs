//! Configuration error types

/// Errors raised while loading [`Config`](crate::Config).
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The configured endpoint is not a valid absolute URL.
    #[error("Invalid {var}: '{value}' ({reason})")]
    InvalidUrl {
        /// Environment variable the value came from.
        var: &'static str,
        /// The offending value.
        value: String,
        /// Parser message.
        reason: String,
    },
}
