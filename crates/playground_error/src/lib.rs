//! Error types for the connector playground.
//!
//! Every layer gets a kind enum describing what went wrong and a wrapping
//! error struct that records where it went wrong. The crate-level
//! [`PlaygroundError`] aggregates them so callers can use `?` across layers.

mod api;
mod config;
mod edit;
mod session;

pub use api::{ApiError, ApiErrorKind, ApiResult};
pub use config::{ConfigError, ConfigErrorKind};
pub use edit::{EditError, EditErrorKind};
pub use session::{SessionError, SessionErrorKind};

/// Crate-level error variants.
#[derive(Debug, Clone, derive_more::From, derive_more::Display)]
pub enum PlaygroundErrorKind {
    /// Remote connector API error
    #[display("{_0}")]
    Api(ApiError),
    /// Configuration error
    #[display("{_0}")]
    Config(ConfigError),
    /// Inline edit error
    #[display("{_0}")]
    Edit(EditError),
    /// Session or connection error
    #[display("{_0}")]
    Session(SessionError),
}

/// Playground error with kind discrimination.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Playground Error: {_0}")]
pub struct PlaygroundError(#[error(not(source))] Box<PlaygroundErrorKind>);

impl PlaygroundError {
    /// Create a new error from a kind.
    pub fn new(kind: PlaygroundErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PlaygroundErrorKind {
        &self.0
    }
}

impl<T> From<T> for PlaygroundError
where
    T: Into<PlaygroundErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for playground operations.
pub type PlaygroundResult<T> = std::result::Result<T, PlaygroundError>;
