//! Column projection and pinned fields.

use playground_core::Record;
use std::cmp::Ordering;

/// User-pinned field identifiers, kept in the order they were pinned.
///
/// Pinned fields always appear as columns, even when no record holds a value
/// for them, and are sent to the service as the record projection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinnedFields {
    fields: Vec<String>,
}

impl PinnedFields {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `field` is pinned.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// Pins `field`. Returns false if it was already pinned.
    pub fn add(&mut self, field: impl Into<String>) -> bool {
        let field = field.into();
        if self.contains(&field) {
            return false;
        }
        self.fields.push(field);
        true
    }

    /// Unpins `field`. Returns false if it was not pinned.
    pub fn remove(&mut self, field: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|f| f != field);
        self.fields.len() != before
    }

    /// Flips the pin state of `field`. Returns true if it is now pinned.
    pub fn toggle(&mut self, field: &str) -> bool {
        if self.remove(field) {
            false
        } else {
            self.fields.push(field.to_string());
            true
        }
    }

    /// Unpins everything.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Number of pinned fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether nothing is pinned.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Pinned identifiers in pin order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Pinned identifiers as an owned list, in pin order.
    pub fn to_vec(&self) -> Vec<String> {
        self.fields.clone()
    }
}

impl<S: Into<String>> FromIterator<S> for PinnedFields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut pinned = Self::new();
        for field in iter {
            pinned.add(field);
        }
        pinned
    }
}

/// Orders column identifiers alphabetically, ignoring case first.
///
/// Identifiers equal up to case put the lowercase spelling first.
pub fn compare_column_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Derives the ordered columns to display for `records`.
///
/// A column is shown when it is pinned or when at least one record holds a
/// meaningful value (not null, not an empty list) for it. Pinned columns come
/// first, the rest follow; each group is sorted with
/// [`compare_column_names`]. Record identifiers are not columns.
///
/// # Examples
///
/// ```
/// use playground_browser::{PinnedFields, project_columns};
/// use playground_core::{Record, Value};
///
/// let records = vec![
///     Record::new("1").with_field("name", "Ada").with_field("age", 36).with_field("phone", Value::Null),
///     Record::new("2").with_field("name", "Bo"),
/// ];
/// assert_eq!(project_columns(&records, &PinnedFields::new()), vec!["age", "name"]);
///
/// let pinned: PinnedFields = ["phone"].into_iter().collect();
/// assert_eq!(project_columns(&records, &pinned), vec!["phone", "age", "name"]);
/// ```
pub fn project_columns(records: &[Record], pinned: &PinnedFields) -> Vec<String> {
    let mut pinned_columns: Vec<String> = pinned.to_vec();
    pinned_columns.sort_by(|a, b| compare_column_names(a, b));

    let mut other_columns: Vec<String> = Vec::new();
    for record in records {
        for (name, value) in record.fields() {
            if !value.is_meaningful() || pinned.contains(name) {
                continue;
            }
            if !other_columns.iter().any(|c| c == name) {
                other_columns.push(name.clone());
            }
        }
    }
    other_columns.sort_by(|a, b| compare_column_names(a, b));

    pinned_columns.extend(other_columns);
    pinned_columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use playground_core::Value;

    #[test]
    fn test_pinned_fields_set_semantics() {
        let mut pinned = PinnedFields::new();
        assert!(pinned.add("email"));
        assert!(!pinned.add("email"));
        assert!(pinned.toggle("phone"));
        assert_eq!(pinned.to_vec(), vec!["email", "phone"]);

        assert!(!pinned.toggle("email"));
        assert!(!pinned.contains("email"));
        assert!(!pinned.remove("email"));
        assert_eq!(pinned.len(), 1);

        pinned.clear();
        assert!(pinned.is_empty());
    }

    #[test]
    fn test_columns_skip_empty_values() {
        let records = vec![
            Record::new("1")
                .with_field("tags", Value::List(vec![]))
                .with_field("phone", Value::Null)
                .with_field("Name", "Ada"),
            Record::new("2").with_field("active", Value::Bool(false)),
        ];
        assert_eq!(
            project_columns(&records, &PinnedFields::new()),
            vec!["active", "Name"]
        );
    }

    #[test]
    fn test_pinned_columns_shown_without_records() {
        let pinned: PinnedFields = ["zip", "city"].into_iter().collect();
        assert_eq!(project_columns(&[], &pinned), vec!["city", "zip"]);
    }

    #[test]
    fn test_case_insensitive_ordering() {
        let mut columns = vec!["beta", "Alpha", "alpha", "Gamma"];
        columns.sort_by(|a, b| compare_column_names(a, b));
        assert_eq!(columns, vec!["alpha", "Alpha", "beta", "Gamma"]);
    }
}
