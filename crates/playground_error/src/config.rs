//! Configuration error types.

/// Configuration failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A required setting is missing.
    #[display("Missing setting: {_0}")]
    Missing(String),
    /// A setting has an unusable value.
    #[display("Invalid setting {key}: {reason}")]
    Invalid {
        /// Setting name
        key: String,
        /// Why the value was rejected
        reason: String,
    },
    /// The configuration file could not be read.
    #[display("Failed to read config file: {_0}")]
    Io(String),
    /// The configuration file could not be parsed.
    #[display("Failed to parse config: {_0}")]
    Parse(String),
}

/// Configuration error with source location.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    line: u32,
    file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use playground_error::{ConfigError, ConfigErrorKind};
    ///
    /// let err = ConfigError::new(ConfigErrorKind::Missing("PLAYGROUND_PUBLIC_KEY".into()));
    /// assert!(err.to_string().contains("PLAYGROUND_PUBLIC_KEY"));
    /// ```
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }
}
