//! Common error types for stub-window and schedule configuration

use thiserror::Error;

/// Common result type for stubcfg operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a process configuration
///
/// Every variant is a configuration-time failure: nothing is retried, the
/// caller is expected to abort before any stage runs.
#[derive(Error, Debug)]
pub enum Error {
    /// Unknown stub-window profile name
    #[error("Configuration error: unknown stub-window profile '{name}' (valid: {})", .valid.join(", "))]
    Configuration { name: String, valid: Vec<String> },

    /// A requested stage cannot be produced from the configured input
    #[error("Unsatisfiable dependency: stage {stage} {reason} (fix: {})", .remedies.join("; "))]
    UnsatisfiableDependency {
        stage: String,
        reason: String,
        remedies: Vec<String>,
    },

    /// Parameter value out of range or malformed
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Job configuration missing or unusable
    #[error("Job configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML job file
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
