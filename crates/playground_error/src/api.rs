//! Remote connector API error types.

/// Specific failure conditions when talking to the remote connector API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ApiErrorKind {
    /// Transport-level failure (connection refused, TLS, timeout).
    #[display("HTTP error: {_0}")]
    Http(String),
    /// Non-success HTTP status.
    #[display("API error (status {status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or error message
        message: String,
    },
    /// The service answered with an error envelope.
    #[display("Remote error: {_0}")]
    Remote(String),
    /// The response body could not be decoded.
    #[display("Response parsing failed: {_0}")]
    Decode(String),
    /// A request could not be assembled.
    #[display("Builder error: {_0}")]
    Builder(String),
}

/// Remote API error with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("API Error: {} at line {} in {}", kind, line, file)]
pub struct ApiError {
    kind: ApiErrorKind,
    line: u32,
    file: &'static str,
}

impl ApiError {
    /// Create a new API error at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use playground_error::{ApiError, ApiErrorKind};
    ///
    /// let err = ApiError::new(ApiErrorKind::Remote("Unknown model".into()));
    /// assert_eq!(err.user_message(), Some("Unknown model"));
    /// ```
    #[track_caller]
    pub fn new(kind: ApiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ApiErrorKind {
        &self.kind
    }

    /// The human-readable message carried by the failure, if it has one.
    ///
    /// Empty messages count as absent so callers can fall back to their own
    /// wording.
    pub fn user_message(&self) -> Option<&str> {
        let message = match &self.kind {
            ApiErrorKind::Http(m)
            | ApiErrorKind::Remote(m)
            | ApiErrorKind::Decode(m)
            | ApiErrorKind::Builder(m) => m,
            ApiErrorKind::Status { message, .. } => message,
        };
        let trimmed = message.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

impl<T> From<T> for ApiError
where
    T: Into<ApiErrorKind>,
{
    #[track_caller]
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for remote API calls.
pub type ApiResult<T> = Result<T, ApiError>;
