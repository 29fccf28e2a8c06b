//! Inline cell edit error types.

/// Reasons a cell edit cannot proceed locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum EditErrorKind {
    /// The cell holds a boolean, list, object or reference value.
    #[display("Field {_0} is read-only")]
    NotEditable(String),
    /// The cell was numeric and the draft is not a finite number.
    #[display("Not a number: {_0}")]
    InvalidNumber(String),
    /// An operation needed the cell to be in the editing state.
    #[display("Cell is not being edited")]
    NotEditing,
    /// An update for the cell is already in flight.
    #[display("Cell update already in progress")]
    Submitting,
}

/// Edit error with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Edit Error: {} at line {} in {}", kind, line, file)]
pub struct EditError {
    kind: EditErrorKind,
    line: u32,
    file: &'static str,
}

impl EditError {
    /// Create a new edit error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: EditErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &EditErrorKind {
        &self.kind
    }
}
