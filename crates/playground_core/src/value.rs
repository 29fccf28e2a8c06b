//! Field values carried by connector records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Discriminator marking an object as a cross-record pointer.
pub const RESOURCE_REF_OBJECT: &str = "resourceRef";

/// A pointer from one record to another record of some model.
///
/// On the wire it is an object of the shape
/// `{"object": "resourceRef", "model": "...", "id": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Target model identifier
    pub model: String,
    /// Target record identifier
    pub id: String,
}

impl ResourceRef {
    /// Creates a reference to `id` in `model`.
    pub fn new(model: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            id: id.into(),
        }
    }

    fn from_json(map: &serde_json::Map<String, serde_json::Value>) -> Option<Self> {
        if map.get("object").and_then(serde_json::Value::as_str) != Some(RESOURCE_REF_OBJECT) {
            return None;
        }
        let model = map.get("model")?.as_str()?;
        let id = map.get("id")?.as_str()?;
        Some(Self::new(model, id))
    }
}

/// A record field value.
///
/// Numbers keep the integer/float distinction of the JSON they came from so
/// that `42` renders and round-trips as `42`, not `42.0`.
///
/// # Examples
///
/// ```
/// use playground_core::{ResourceRef, Value};
/// use serde_json::json;
///
/// let value: Value = json!({"object": "resourceRef", "model": "crmAccount", "id": "a1"}).into();
/// assert_eq!(value, Value::Reference(ResourceRef::new("crmAccount", "a1")));
///
/// let plain: Value = json!({"object": "other", "id": "a1"}).into();
/// assert!(matches!(plain, Value::Object(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_more::From)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    /// JSON null
    #[default]
    #[from(ignore)]
    Null,
    /// Boolean
    Bool(bool),
    /// Integer or floating point number
    Number(serde_json::Number),
    /// Text
    String(String),
    /// Pointer to another record
    Reference(ResourceRef),
    /// Ordered list of values
    List(Vec<Value>),
    /// Nested object that is not a reference
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Whether the value counts as data for column projection.
    ///
    /// Null and empty lists do not.
    pub fn is_meaningful(&self) -> bool {
        match self {
            Value::Null => false,
            Value::List(items) => !items.is_empty(),
            _ => true,
        }
    }

    /// Whether a cell holding this value may be edited inline.
    ///
    /// Only text, numbers and null are editable; booleans, lists, objects
    /// and references render read-only.
    pub fn is_editable(&self) -> bool {
        matches!(self, Value::Null | Value::String(_) | Value::Number(_))
    }

    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the reference if this value is one.
    pub fn as_reference(&self) -> Option<&ResourceRef> {
        match self {
            Value::Reference(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the number if this value is one.
    pub fn as_number(&self) -> Option<&serde_json::Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the text if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<f64> for Value {
    /// Non-finite floats have no JSON representation and become null.
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => match ResourceRef::from_json(&map) {
                Some(reference) => Value::Reference(reference),
                None => Value::Object(
                    map.into_iter()
                        .map(|(key, value)| (key, Value::from(value)))
                        .collect(),
                ),
            },
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => serde_json::Value::Number(n),
            Value::String(s) => serde_json::Value::String(s),
            Value::Reference(r) => serde_json::json!({
                "object": RESOURCE_REF_OBJECT,
                "model": r.model,
                "id": r.id,
            }),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, serde_json::Value::from(value)))
                    .collect(),
            ),
        }
    }
}
