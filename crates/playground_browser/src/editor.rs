//! Inline cell editing.

use playground_core::{Value, format_field_value};
use playground_error::{EditError, EditErrorKind};
use playground_interface::FieldUpdate;
use tracing::debug;

/// Where a cell is in its edit lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellState {
    /// Showing the stored value.
    Viewing,
    /// Accepting a draft.
    Editing,
    /// An update has been sent and not yet answered.
    Submitting,
    /// The last update failed; the draft was reset to the stored value and
    /// the cell accepts a new draft.
    EditingWithError {
        /// Message to show next to the cell
        message: String,
    },
}

/// Result of committing a draft.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitAction {
    /// The draft matches the stored value; nothing to send.
    Unchanged,
    /// Send this update to the service.
    Submit(FieldUpdate),
}

/// Edit state for one cell of one record.
///
/// Only null, text and numeric cells are editable. Committing a draft that
/// equals the stored value's text is a no-op; a numeric cell submits a
/// number, any other cell submits text.
///
/// # Examples
///
/// ```
/// use playground_browser::{CellEditor, CommitAction};
/// use playground_core::Value;
///
/// let stored = Value::from(42);
/// let mut cell = CellEditor::new("crmContact", "r1", "age", Some(&stored));
/// cell.begin_edit().unwrap();
/// cell.set_draft("43").unwrap();
///
/// match cell.commit().unwrap() {
///     CommitAction::Submit(update) => assert_eq!(update.value(), &Value::from(43)),
///     CommitAction::Unchanged => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct CellEditor {
    /// Model the record belongs to
    model: String,
    /// Record being edited
    record_id: String,
    /// Field being edited
    field: String,
    /// Value the cell held when the editor was created
    original: Value,
    /// Current text in the input
    draft: String,
    /// Lifecycle state
    state: CellState,
}

impl CellEditor {
    /// Creates an editor for a cell holding `value`; an absent field counts as null.
    pub fn new(
        model: impl Into<String>,
        record_id: impl Into<String>,
        field: impl Into<String>,
        value: Option<&Value>,
    ) -> Self {
        let original = value.cloned().unwrap_or_default();
        Self {
            model: model.into(),
            record_id: record_id.into(),
            field: field.into(),
            draft: original_text(&original),
            original,
            state: CellState::Viewing,
        }
    }

    /// Whether the cell accepts edits at all.
    pub fn is_editable(&self) -> bool {
        self.original.is_editable()
    }

    /// Whether the cell has nothing to show (null, absent or empty list).
    pub fn is_empty(&self) -> bool {
        !self.original.is_meaningful()
    }

    /// Whether the cell currently accepts keystrokes.
    pub fn is_editing(&self) -> bool {
        matches!(
            self.state,
            CellState::Editing | CellState::EditingWithError { .. }
        )
    }

    /// The error shown next to the cell, if the last update failed.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            CellState::EditingWithError { message } => Some(message),
            _ => None,
        }
    }

    /// The text the cell displays right now.
    pub fn display_text(&self) -> String {
        match self.state {
            CellState::Viewing => format_field_value(Some(&self.original)),
            _ => self.draft.clone(),
        }
    }

    /// Enters editing with the stored value as the draft.
    pub fn begin_edit(&mut self) -> Result<(), EditError> {
        if !self.is_editable() {
            return Err(EditError::new(EditErrorKind::NotEditable(self.field.clone())));
        }
        match self.state {
            CellState::Viewing => {
                self.draft = original_text(&self.original);
                self.state = CellState::Editing;
                Ok(())
            }
            CellState::Editing | CellState::EditingWithError { .. } => Ok(()),
            CellState::Submitting => Err(EditError::new(EditErrorKind::Submitting)),
        }
    }

    /// Replaces the draft text.
    pub fn set_draft(&mut self, text: impl Into<String>) -> Result<(), EditError> {
        self.ensure_editing()?;
        self.draft = text.into();
        Ok(())
    }

    /// Leaves editing and restores the stored value's text.
    ///
    /// Ignored while an update is in flight.
    pub fn cancel(&mut self) {
        if self.state == CellState::Submitting {
            return;
        }
        self.draft = original_text(&self.original);
        self.state = CellState::Viewing;
    }

    /// Ends editing and decides whether an update must be sent.
    ///
    /// On [`CommitAction::Submit`] the cell moves to
    /// [`CellState::Submitting`] until [`Self::resolve`] is called. A draft
    /// that is not a number for a numeric cell fails locally and leaves the
    /// cell in [`CellState::EditingWithError`].
    pub fn commit(&mut self) -> Result<CommitAction, EditError> {
        self.ensure_editing()?;

        if self.draft == original_text(&self.original) {
            debug!(field = %self.field, "Draft unchanged, nothing to submit");
            self.state = CellState::Viewing;
            return Ok(CommitAction::Unchanged);
        }

        let value = match &self.original {
            Value::Number(_) => match parse_number(&self.draft) {
                Some(number) => Value::Number(number),
                None => {
                    let err = EditError::new(EditErrorKind::InvalidNumber(self.draft.clone()));
                    self.fail(err.kind().to_string());
                    return Err(err);
                }
            },
            _ => Value::String(self.draft.clone()),
        };

        self.state = CellState::Submitting;
        Ok(CommitAction::Submit(FieldUpdate::new(self.field.clone(), value)))
    }

    /// Applies the service's answer to a submitted update.
    ///
    /// Success returns the cell to viewing; the stored value is replaced once
    /// the records are refreshed. Failure resets the draft and shows `message`.
    pub fn resolve(&mut self, outcome: Result<(), String>) {
        if self.state != CellState::Submitting {
            return;
        }
        match outcome {
            Ok(()) => self.state = CellState::Viewing,
            Err(message) => self.fail(message),
        }
    }

    fn fail(&mut self, message: String) {
        self.draft = original_text(&self.original);
        self.state = CellState::EditingWithError { message };
    }

    fn ensure_editing(&self) -> Result<(), EditError> {
        match self.state {
            CellState::Editing | CellState::EditingWithError { .. } => Ok(()),
            CellState::Submitting => Err(EditError::new(EditErrorKind::Submitting)),
            CellState::Viewing => Err(EditError::new(EditErrorKind::NotEditing)),
        }
    }
}

/// Text form of a stored value as it appears in the input; null is empty.
fn original_text(value: &Value) -> String {
    format_field_value(Some(value))
}

/// Parses draft text as a JSON number, integers first.
fn parse_number(text: &str) -> Option<serde_json::Number> {
    let text = text.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Some(n.into());
    }
    text.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
}
