//! Records listed from a connector model.

use crate::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single record of a connector model.
///
/// Records are never patched locally; a successful edit is reflected by
/// fetching the record set again.
///
/// # Examples
///
/// ```
/// use playground_core::{Record, Value};
///
/// let record = Record::new("r1").with_field("name", "Ada").with_field("age", 36);
///
/// assert_eq!(record.id(), "r1");
/// assert_eq!(record.field("name"), Some(&Value::from("Ada")));
/// assert!(record.has_value("age"));
/// assert!(!record.has_value("phone"));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Default,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct Record {
    /// Remote record identifier
    id: String,
    /// Field name to value
    #[serde(default)]
    #[builder(default)]
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates a record with no fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Returns a builder for constructing a Record.
    pub fn builder() -> RecordBuilder {
        RecordBuilder::default()
    }

    /// Adds a field, replacing any previous value under the same name.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns the value stored under `name`, if the record carries it.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Whether the record has a meaningful (non-null, non-empty) value for `name`.
    pub fn has_value(&self, name: &str) -> bool {
        self.field(name).is_some_and(Value::is_meaningful)
    }
}
