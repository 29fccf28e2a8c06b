//! Record listing and mutation requests.

use playground_core::Value;

/// Options for listing records.
///
/// # Examples
///
/// ```
/// use playground_interface::ListRecordsOptions;
///
/// let options = ListRecordsOptions::new(0).with_fields(Vec::<String>::new());
/// assert_eq!(*options.limit(), 1);
/// assert!(options.fields().is_none());
///
/// let options = ListRecordsOptions::new(5).with_fields(vec!["email".to_string()]);
/// assert_eq!(options.fields().as_deref(), Some(&["email".to_string()][..]));
/// ```
///
/// The only constructor is [`ListRecordsOptions::new`], so the page size can
/// never be zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct ListRecordsOptions {
    /// Page size, at least 1
    limit: u32,
    /// Explicit projection; `None` keeps the service's default fields
    fields: Option<Vec<String>>,
}

impl ListRecordsOptions {
    /// Creates options with the given page size, clamped to at least 1.
    pub fn new(limit: u32) -> Self {
        Self {
            limit: limit.max(1),
            fields: None,
        }
    }

    /// Sets the projection; an empty list means the default projection.
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = (!fields.is_empty()).then_some(fields);
        self
    }
}

/// A single-field record update.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct FieldUpdate {
    field: String,
    value: Value,
}

impl FieldUpdate {
    /// Creates an update setting `field` to `value`.
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// The JSON body `{field: value}` sent to the service.
    pub fn to_body(&self) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        body.insert(self.field.clone(), serde_json::Value::from(self.value.clone()));
        serde_json::Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_never_zero() {
        assert_eq!(*ListRecordsOptions::new(0).limit(), 1);
        assert_eq!(*ListRecordsOptions::new(1).limit(), 1);
        assert_eq!(*ListRecordsOptions::new(25).limit(), 25);

        let projected = ListRecordsOptions::new(0).with_fields(vec!["email".to_string()]);
        assert_eq!(*projected.limit(), 1);
    }

    #[test]
    fn test_update_body_is_single_field_object() {
        let update = FieldUpdate::new("age", 43);
        assert_eq!(update.to_body(), serde_json::json!({"age": 43}));
    }
}
