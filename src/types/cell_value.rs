//! Scalar values as they appear in a single dataframe cell, and the key type
//! used by row/column indices.
//!
//! `CellValue` is the common currency between JSON-encoded wire columns,
//! schema `categories` declarations, and column summaries. Floats compare and
//! hash by bit pattern so NaN participates in category de-duplication.

use crate::error::CellscopeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single scalar cell value.
///
/// `#[serde(untagged)]` lets schema documents declare categories as plain
/// JSON scalars (`["lung", "liver"]`, `[true, false]`).
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Null,
}

impl CellValue {
    /// Borrow the contained string, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The contained value widened to f64, if numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            // Bitwise equality: NaN must de-duplicate in category sets.
            (CellValue::Float(a), CellValue::Float(b)) => a.to_bits() == b.to_bits(),
            (CellValue::String(a), CellValue::String(b)) => a == b,
            (CellValue::Null, CellValue::Null) => true,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Bool(v) => v.hash(state),
            CellValue::Int(v) => v.hash(state),
            CellValue::Float(v) => v.to_bits().hash(state),
            CellValue::String(v) => v.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Bool(v) => write!(f, "{}", v),
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::String(v) => write!(f, "{}", v),
            CellValue::Null => write!(f, "null"),
        }
    }
}

impl TryFrom<serde_json::Value> for CellValue {
    type Error = CellscopeError;

    /// Converts a JSON scalar from a JSON-encoded wire column. Nested arrays
    /// and objects are not valid cell values.
    fn try_from(value: serde_json::Value) -> Result<Self, CellscopeError> {
        match value {
            serde_json::Value::Null => Ok(CellValue::Null),
            serde_json::Value::Bool(b) => Ok(CellValue::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(CellValue::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(CellValue::Float(f))
                } else {
                    Err(CellscopeError::FormatError(format!(
                        "JSON column value {} is not representable",
                        n
                    )))
                }
            }
            serde_json::Value::String(s) => Ok(CellValue::String(s)),
            other => Err(CellscopeError::FormatError(format!(
                "JSON column contains a non-scalar value: {}",
                other
            ))),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

/// A row or column key: either a dense integer position (the wire format's
/// positional column keys) or a field/axis name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(untagged)]
pub enum Key {
    Int(u32),
    Str(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(v) => write!(f, "{}", v),
            Key::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<u32> for Key {
    fn from(v: u32) -> Self {
        Key::Int(v)
    }
}

impl From<usize> for Key {
    fn from(v: usize) -> Self {
        Key::Int(v as u32)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_values_compare_equal_bitwise() {
        let a = CellValue::Float(f64::NAN);
        let b = CellValue::Float(f64::NAN);
        assert_eq!(a, b);
        assert_ne!(CellValue::Float(1.0), CellValue::Float(2.0));
    }

    #[test]
    fn test_json_scalar_conversion() {
        let v: CellValue = serde_json::json!("lung").try_into().unwrap();
        assert_eq!(v, CellValue::String("lung".to_string()));
        let v: CellValue = serde_json::json!(true).try_into().unwrap();
        assert_eq!(v, CellValue::Bool(true));
        let v: CellValue = serde_json::json!(7).try_into().unwrap();
        assert_eq!(v, CellValue::Int(7));

        let nested = serde_json::json!([1, 2]);
        assert!(CellValue::try_from(nested).is_err());
    }

    #[test]
    fn test_categories_deserialize_untagged() {
        let cats: Vec<CellValue> = serde_json::from_str(r#"[true, false]"#).unwrap();
        assert_eq!(cats, vec![CellValue::Bool(true), CellValue::Bool(false)]);
        let cats: Vec<CellValue> = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(cats.len(), 2);
    }
}
