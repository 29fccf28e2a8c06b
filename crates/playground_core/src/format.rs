//! Display formatting for cells and column headers.

use crate::{ResourceRef, Value};

/// Identifiers longer than this are cut and suffixed with `...`.
pub const MAX_ID_LENGTH: usize = 20;

/// At most this many references from a list are spelled out.
pub const MAX_REFS_SHOWN: usize = 3;

/// Truncates an identifier to [`MAX_ID_LENGTH`] characters.
///
/// # Examples
///
/// ```
/// use playground_core::truncate_id;
///
/// assert_eq!(truncate_id("short"), "short");
/// assert_eq!(truncate_id("0123456789abcdefghijKLM"), "0123456789abcdefghij...");
/// ```
pub fn truncate_id(id: &str) -> String {
    if id.chars().count() <= MAX_ID_LENGTH {
        return id.to_string();
    }
    let head: String = id.chars().take(MAX_ID_LENGTH).collect();
    format!("{}...", head)
}

/// Renders a cell value as display text.
///
/// Absent and null values render empty. References never render as raw
/// JSON: a reference shows its truncated target id, and a list made only of
/// references shows up to [`MAX_REFS_SHOWN`] of them.
pub fn format_field_value(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Reference(r) => truncate_id(&r.id),
        Value::List(items) if items.is_empty() => String::new(),
        Value::List(items) => {
            let refs: Option<Vec<&ResourceRef>> = items.iter().map(Value::as_reference).collect();
            match refs {
                Some(refs) => {
                    let ids: Vec<String> = refs
                        .iter()
                        .take(MAX_REFS_SHOWN)
                        .map(|r| truncate_id(&r.id))
                        .collect();
                    if refs.len() > MAX_REFS_SHOWN {
                        format!("{}...", ids.join(", "))
                    } else {
                        ids.join(", ")
                    }
                }
                None => to_json(value),
            }
        }
        Value::Object(_) => to_json(value),
    }
}

fn to_json(value: &Value) -> String {
    serde_json::Value::from(value.clone()).to_string()
}

/// Turns a field identifier into a column header.
///
/// camelCase boundaries and underscores become spaces, then each word is
/// capitalised.
///
/// # Examples
///
/// ```
/// use playground_core::format_column_name;
///
/// assert_eq!(format_column_name("firstName"), "First Name");
/// assert_eq!(format_column_name("created_at"), "Created At");
/// assert_eq!(format_column_name("crmContact"), "Crm Contact");
/// ```
pub fn format_column_name(column: &str) -> String {
    let mut spaced = String::with_capacity(column.len() + 4);
    let mut previous: Option<char> = None;
    for c in column.chars() {
        if c.is_ascii_uppercase() && previous.is_some_and(|p| p.is_ascii_lowercase()) {
            spaced.push(' ');
        }
        spaced.push(if c == '_' { ' ' } else { c });
        previous = Some(c);
    }

    spaced
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
