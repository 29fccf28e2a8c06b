//! Session and connection error types.

/// Page-level failures while establishing or checking a connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SessionErrorKind {
    /// The remote service refused to create a session token.
    #[display("Could not create session token: {_0}")]
    Create(String),
    /// The connection status could not be retrieved.
    #[display("Could not retrieve connection: {_0}")]
    Retrieve(String),
    /// The connection exists but is not authorized.
    #[display("Connection is not authorized (status {_0})")]
    NotAuthorized(String),
}

/// Session error with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Session Error: {} at line {} in {}", kind, line, file)]
pub struct SessionError {
    kind: SessionErrorKind,
    line: u32,
    file: &'static str,
}

impl SessionError {
    /// Create a new session error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SessionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SessionErrorKind {
        &self.kind
    }
}
