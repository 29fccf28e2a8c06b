//! Field metadata descriptors.

use serde::{Deserialize, Serialize};

/// Metadata describing one field of a connector model.
///
/// Descriptors are fetched per (connector, model) independently of records
/// and drive the field picker and column labels.
///
/// # Examples
///
/// ```
/// use playground_core::FieldDescriptor;
///
/// let field = FieldDescriptor::builder()
///     .id("firstName")
///     .field_type("text")
///     .display_name(Some("First name".to_string()))
///     .build()
///     .unwrap();
///
/// assert_eq!(field.label(), Some("First name"));
/// assert!(!field.is_custom());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct FieldDescriptor {
    /// Field identifier, as used in record field maps
    id: String,
    /// Short name provided by the connector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    name: Option<String>,
    /// Human display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    display_name: Option<String>,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    description: Option<String>,
    /// Type tag (text, number, boolean, date, ...)
    #[serde(rename = "type")]
    field_type: String,
    /// Whether the connector requires the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    required: Option<bool>,
    /// Tenant-defined field rather than a built-in one
    #[serde(default)]
    #[builder(default)]
    #[getter(skip)]
    is_custom: bool,
}

impl FieldDescriptor {
    /// Creates a system field descriptor with only an id and type tag.
    pub fn new(id: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            display_name: None,
            description: None,
            field_type: field_type.into(),
            required: None,
            is_custom: false,
        }
    }

    /// Returns a builder for constructing a FieldDescriptor.
    pub fn builder() -> FieldDescriptorBuilder {
        FieldDescriptorBuilder::default()
    }

    /// Whether the field is tenant-defined.
    pub fn is_custom(&self) -> bool {
        self.is_custom
    }

    /// Marks the descriptor as a custom field.
    pub fn custom(mut self) -> Self {
        self.is_custom = true;
        self
    }

    /// Preferred label: the connector's name, then its display name.
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().or(self.display_name.as_deref())
    }
}
