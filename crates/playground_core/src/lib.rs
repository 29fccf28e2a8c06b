//! Core data types for the connector playground.
//!
//! Records fetched from a connector are semi-structured: each carries an
//! identifier and a bag of fields whose values are modelled by the closed
//! [`Value`] type, so the column and edit logic can match on every shape a
//! value can take.

mod field;
mod format;
mod record;
mod value;

pub use field::{FieldDescriptor, FieldDescriptorBuilder};
pub use format::{format_column_name, format_field_value, truncate_id, MAX_ID_LENGTH, MAX_REFS_SHOWN};
pub use record::{Record, RecordBuilder};
pub use value::{ResourceRef, Value, RESOURCE_REF_OBJECT};
