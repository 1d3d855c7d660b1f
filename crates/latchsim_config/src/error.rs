//! Error types for circuit file loading.

/// Errors that can occur when loading or lowering a circuit file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the circuit file.
    #[error("failed to read circuit file: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse circuit file: {0}")]
    ParseError(String),

    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A trace literal could not be read.
    #[error("invalid trace for '{signal}': {reason}")]
    InvalidTrace {
        /// The signal the trace belongs to.
        signal: String,
        /// Why the literal was rejected.
        reason: String,
    },

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}
