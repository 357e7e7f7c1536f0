//! Dynamic property values
//!
//! Component properties are declared by name at runtime, so the store holds a
//! single dynamic value type rather than one generic parameter per property.
//! [`PropValue`] covers the shapes a host or a config file can hand over,
//! plus an explicit [`PropValue::Undefined`] for cells that were declared
//! without a default and never given one.

use std::collections::BTreeMap;
use std::fmt;

/// A dynamically typed property value
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PropValue {
    /// Explicit null
    Null,
    /// Boolean value
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// UTF-8 string
    Str(String),
    /// Ordered list of values
    List(Vec<PropValue>),
    /// String-keyed map of values
    Map(BTreeMap<String, PropValue>),
    /// No value was ever supplied
    #[default]
    Undefined,
}

impl PropValue {
    /// Whether the cell never received a value
    pub fn is_undefined(&self) -> bool {
        matches!(self, PropValue::Undefined)
    }

    /// Extract as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract as i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract as f64 (integers widen)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Float(v) => Some(*v),
            PropValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Extract as string reference
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Extract as list reference
    pub fn as_list(&self) -> Option<&[PropValue]> {
        match self {
            PropValue::List(v) => Some(v),
            _ => None,
        }
    }

    /// Extract as map reference
    pub fn as_map(&self) -> Option<&BTreeMap<String, PropValue>> {
        match self {
            PropValue::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Get type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            PropValue::Null => "null",
            PropValue::Bool(_) => "bool",
            PropValue::Int(_) => "int",
            PropValue::Float(_) => "float",
            PropValue::Str(_) => "string",
            PropValue::List(_) => "list",
            PropValue::Map(_) => "map",
            PropValue::Undefined => "undefined",
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Null => f.write_str("null"),
            PropValue::Undefined => f.write_str("undefined"),
            PropValue::Bool(v) => write!(f, "{}", v),
            PropValue::Int(v) => write!(f, "{}", v),
            PropValue::Float(v) => write!(f, "{}", v),
            PropValue::Str(v) => f.write_str(v),
            PropValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            PropValue::Map(_) => f.write_str("[object]"),
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        PropValue::Bool(v)
    }
}

impl From<i32> for PropValue {
    fn from(v: i32) -> Self {
        PropValue::Int(v as i64)
    }
}

impl From<i64> for PropValue {
    fn from(v: i64) -> Self {
        PropValue::Int(v)
    }
}

impl From<u32> for PropValue {
    fn from(v: u32) -> Self {
        PropValue::Int(v as i64)
    }
}

impl From<f32> for PropValue {
    fn from(v: f32) -> Self {
        PropValue::Float(v as f64)
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        PropValue::Float(v)
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        PropValue::Str(v.to_string())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        PropValue::Str(v)
    }
}

impl<T: Into<PropValue>> From<Vec<T>> for PropValue {
    fn from(v: Vec<T>) -> Self {
        PropValue::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(PropValue::Null)
    }
}

impl From<serde_json::Value> for PropValue {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;
        match v {
            Value::Null => PropValue::Null,
            Value::Bool(b) => PropValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => PropValue::Int(i),
                None => PropValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => PropValue::Str(s),
            Value::Array(items) => PropValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                PropValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_undefined() {
        assert!(PropValue::default().is_undefined());
        assert_eq!(PropValue::default().type_name(), "undefined");
    }

    #[test]
    fn test_numeric_accessors() {
        assert_eq!(PropValue::from(5).as_i64(), Some(5));
        assert_eq!(PropValue::from(5).as_f64(), Some(5.0));
        assert_eq!(PropValue::from(2.5).as_i64(), None);
        assert_eq!(PropValue::from("x").as_f64(), None);
    }

    #[test]
    fn test_from_json() {
        let value: PropValue = serde_json::json!({
            "label": "ok",
            "items": [1, 2.5, null, true],
        })
        .into();

        let map = value.as_map().unwrap();
        assert_eq!(map["label"], PropValue::from("ok"));
        assert_eq!(
            map["items"],
            PropValue::List(vec![
                PropValue::Int(1),
                PropValue::Float(2.5),
                PropValue::Null,
                PropValue::Bool(true),
            ])
        );
    }

    #[test]
    fn test_json_null_is_not_undefined() {
        let value = PropValue::from(serde_json::Value::Null);
        assert_eq!(value, PropValue::Null);
        assert!(!value.is_undefined());
        assert_ne!(value, PropValue::Undefined);
    }

    #[test]
    fn test_display() {
        assert_eq!(PropValue::Undefined.to_string(), "undefined");
        assert_eq!(PropValue::from(vec![1, 2]).to_string(), "[1,2]");
        assert_eq!(PropValue::from(Some("hi")).to_string(), "hi");
        assert_eq!(PropValue::from(None::<i32>), PropValue::Null);
    }
}
