//! Dynamic values held by structure attributes
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

use crate::instance::Instance;
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;

/// An owned dynamic value, the unit of everything the engine validates.
///
/// `Map` preserves insertion order and keys by equality rather than by
/// hash, because keys may be any value kind (floats included). `Set` is a
/// vector whose uniqueness is maintained by the validators that produce it.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Struct(Instance),
}

impl Value {
    /// Human-readable name of the value's kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "array",
            Value::Tuple(_) => "tuple",
            Value::Set(_) => "set",
            Value::Map(_) => "mapping",
            Value::Struct(_) => "structure",
        }
    }

    /// Length of the value, for kinds that have one.
    ///
    /// Strings are measured in characters, not bytes.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::List(v) | Value::Tuple(v) | Value::Set(v) => Some(v.len()),
            Value::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Build a set value, keeping the first occurrence of each element.
    pub fn set_of<I>(items: I) -> Value
    where
        I: IntoIterator<Item = Value>,
    {
        let mut unique: Vec<Value> = Vec::new();
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Value::Set(unique)
    }

    /// Convert from a JSON document value. Arrays become `List`, objects
    /// become insertion-ordered `Map`s with string keys.
    pub fn from_json(json: &JsonValue) -> Value {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            JsonValue::String(s) => Value::Str(s.clone()),
            JsonValue::Array(items) => Value::List(items.iter().map(Value::from_json).collect()),
            JsonValue::Object(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(k, v)| (Value::Str(k.clone()), Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert to a JSON document value. Tuples and sets flatten to JSON
    /// arrays; non-string map keys render through their display form.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Int(i) => JsonValue::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Str(s) => JsonValue::String(s.clone()),
            Value::List(v) | Value::Tuple(v) | Value::Set(v) => {
                JsonValue::Array(v.iter().map(Value::to_json).collect())
            }
            Value::Map(entries) => {
                let mut out = serde_json::Map::new();
                for (k, v) in entries {
                    out.insert(k.as_object_key(), v.to_json());
                }
                JsonValue::Object(out)
            }
            Value::Struct(inst) => {
                let mut out = serde_json::Map::new();
                for (name, value) in inst.attrs() {
                    out.insert(name.to_string(), value.to_json());
                }
                JsonValue::Object(out)
            }
        }
    }

    fn as_object_key(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            // numeric equality crosses the int/float divide, as it does in
            // the collection uniqueness checks
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => {
                a.len() == b.len() && a.iter().all(|item| b.contains(item))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| map_get(b, k).map(|other| other == v).unwrap_or(false))
            }
            (Value::Struct(a), Value::Struct(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", item)?;
            }
            Ok(())
        }
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::List(v) => {
                write!(f, "[")?;
                join(f, v)?;
                write!(f, "]")
            }
            Value::Tuple(v) => {
                write!(f, "(")?;
                join(f, v)?;
                write!(f, ")")
            }
            Value::Set(v) => {
                write!(f, "{{")?;
                join(f, v)?;
                write!(f, "}}")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
            Value::Struct(inst) => write!(f, "{}", inst),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Value {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Value {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Value {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Value {
        Value::List(items)
    }
}

impl From<Instance> for Value {
    fn from(inst: Instance) -> Value {
        Value::Struct(inst)
    }
}

impl From<&JsonValue> for Value {
    fn from(json: &JsonValue) -> Value {
        Value::from_json(json)
    }
}

/// Equality-keyed lookup in an insertion-ordered map.
pub(crate) fn map_get<'a>(entries: &'a [(Value, Value)], key: &Value) -> Option<&'a Value> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

/// Insert or replace, keeping the original position on replacement.
pub(crate) fn map_insert(entries: &mut Vec<(Value, Value)>, key: Value, value: Value) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => entries.push((key, value)),
    }
}

pub(crate) fn map_remove(entries: &mut Vec<(Value, Value)>, key: &Value) -> Option<Value> {
    let pos = entries.iter().position(|(k, _)| k == key)?;
    Some(entries.remove(pos).1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cross_numeric_equality() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Int(1), Value::Float(1.5));
        assert_ne!(Value::Int(1), Value::Str("1".into()));
    }

    #[test]
    fn test_set_equality_ignores_order() {
        let a = Value::set_of([Value::Int(1), Value::Int(2)]);
        let b = Value::set_of([Value::Int(2), Value::Int(1)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_set_of_keeps_first_occurrence() {
        let s = Value::set_of([Value::Int(1), Value::Int(1), Value::Int(2)]);
        assert_eq!(s, Value::Set(vec![Value::Int(1), Value::Int(2)]));
    }

    #[test]
    fn test_map_equality_ignores_order() {
        let a = Value::Map(vec![
            (Value::from("x"), Value::Int(1)),
            (Value::from("y"), Value::Int(2)),
        ]);
        let b = Value::Map(vec![
            (Value::from("y"), Value::Int(2)),
            (Value::from("x"), Value::Int(1)),
        ]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_string_length_counts_characters() {
        assert_eq!(Value::from("héllo").length(), Some(5));
    }

    #[test]
    fn test_json_round_trip() {
        let json = json!({"a": 1, "b": [true, "x"], "c": {"d": 2.5}});
        let value = Value::from_json(&json);
        assert_eq!(value.to_json(), json);
    }

    #[test]
    fn test_map_insert_replaces_in_place() {
        let mut entries = vec![
            (Value::from("a"), Value::Int(1)),
            (Value::from("b"), Value::Int(2)),
        ];
        map_insert(&mut entries, Value::from("a"), Value::Int(9));
        assert_eq!(entries[0], (Value::from("a"), Value::Int(9)));
        assert_eq!(entries.len(), 2);
    }
}
