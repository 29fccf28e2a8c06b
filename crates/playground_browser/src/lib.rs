//! Resource browser for connected business systems.
//!
//! Given an authorized connection, the browser discovers which models can be
//! listed, loads field metadata (cache first), lists records, derives the
//! columns to display and handles inline cell edits.
//!
//! Every asynchronous load is tied to a generation ticket taken when it
//! starts. When the result arrives the ticket is compared with the current
//! generation, and results of loads whose inputs have since changed are
//! discarded instead of overwriting newer data.

mod browser;
mod discovery;
mod editor;
mod fields;
mod host;
mod projector;
mod staleness;

pub use browser::{BrowserStatus, BrowserView, EditOutcome, LoadPhase, ResourceBrowser};
pub use discovery::{LIST_OPERATION, discover_models, models_with_list_operations};
pub use editor::{CellEditor, CellState, CommitAction};
pub use fields::{FieldGroups, group_unpinned_fields};
pub use host::ConnectionHost;
pub use projector::{PinnedFields, compare_column_names, project_columns};
pub use staleness::{Generation, Ticket};
