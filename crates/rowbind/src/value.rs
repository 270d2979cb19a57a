//! Dynamically typed field values.
//!
//! Every field handed to the parser, whether read from an annotated record or
//! taken from a string-keyed map, is carried as a [`Value`]. Records convert
//! their typed members through the `From` impls below; map sources build
//! values directly or convert them from `serde_json::Value`.

use std::time::{SystemTime, UNIX_EPOCH};

use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};

/// A string-keyed map of values: one map-shaped row, or a set of conditions.
///
/// Iteration order is unspecified, so field order derived from a `ValueMap`
/// is not stable across builds.
pub type ValueMap = FxHashMap<String, Value>;

/// A single field value.
///
/// Serializes as the bare inner value. `Time` is written as signed seconds
/// since the Unix epoch, negative for instants before it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Time(SystemTime),
    /// Arrays and objects, kept as JSON.
    Json(serde_json::Value),
}

impl Value {
    /// Whether this is the empty form of its kind.
    ///
    /// This is the type-agnostic predicate used for map sources, where the
    /// declared type of a value is not known. Records use
    /// [`IsZero`](crate::record::IsZero) on the member's own type instead.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !*b,
            Value::Int(n) => *n == 0,
            Value::UInt(n) => *n == 0,
            // Only +0.0 is the zero value; -0.0 has a sign bit set.
            Value::Float(f) => f.to_bits() == 0,
            Value::Text(s) => s.is_empty(),
            Value::Bytes(b) => b.is_empty(),
            Value::Time(t) => *t == UNIX_EPOCH,
            Value::Json(json) => json_is_zero(json),
        }
    }

    /// Short name of the value kind, used in logs and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Time(_) => "time",
            Value::Json(_) => "json",
        }
    }
}

pub(crate) fn json_is_zero(json: &serde_json::Value) -> bool {
    match json {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(b) => !*b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f.to_bits() == 0),
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        serde_json::Value::Object(map) => map.is_empty(),
    }
}

/// Seconds between `time` and the Unix epoch, negative before it.
pub fn epoch_seconds(time: SystemTime) -> f64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_secs_f64(),
        Err(before) => -before.duration().as_secs_f64(),
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::UInt(n) => serializer.serialize_u64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Bytes(b) => b.serialize(serializer),
            Value::Time(t) => serializer.serialize_f64(epoch_seconds(*t)),
            Value::Json(json) => json.serialize(serializer),
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

macro_rules! value_from_int {
    ($($t:ty),+ $(,)?) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(v as i64)
            }
        })+
    };
}

value_from_int!(i8, i16, i32, i64, isize, u8, u16, u32);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::UInt(v as u64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<SystemTime> for Value {
    fn from(v: SystemTime) -> Self {
        Value::Time(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    // Every JSON number that is not an integer fits in f64.
                    Value::Float(n.as_f64().unwrap_or_default())
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            other => Value::Json(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_zero_scalars() {
        assert!(Value::Null.is_zero());
        assert!(Value::from(false).is_zero());
        assert!(Value::from(0i64).is_zero());
        assert!(Value::from(0u64).is_zero());
        assert!(Value::from(0.0f64).is_zero());
        assert!(Value::from("").is_zero());
        assert!(Value::from(Vec::<u8>::new()).is_zero());
        assert!(Value::from(UNIX_EPOCH).is_zero());
    }

    #[test]
    fn test_non_zero_scalars() {
        assert!(!Value::from(true).is_zero());
        assert!(!Value::from(-1i32).is_zero());
        assert!(!Value::from(7usize).is_zero());
        assert!(!Value::from(0.5f32).is_zero());
        assert!(!Value::from("test").is_zero());
        assert!(!Value::from(vec![0u8]).is_zero());
        assert!(!Value::from(UNIX_EPOCH + Duration::from_secs(1)).is_zero());
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(3i64)), Value::Int(3));
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(Value::from(serde_json::json!(null)), Value::Null);
        assert_eq!(Value::from(serde_json::json!(1)), Value::Int(1));
        assert_eq!(
            Value::from(serde_json::json!(u64::MAX)),
            Value::UInt(u64::MAX)
        );
        assert_eq!(Value::from(serde_json::json!(1.5)), Value::Float(1.5));
        assert_eq!(Value::from(serde_json::json!("a")), Value::Text("a".into()));
    }

    #[test]
    fn test_from_json_compound() {
        let v = Value::from(serde_json::json!([1, 2]));
        assert_eq!(v.kind(), "json");
        assert!(!v.is_zero());
        assert!(Value::from(serde_json::json!({})).is_zero());
        assert!(Value::from(serde_json::json!([])).is_zero());
    }

    #[test]
    fn test_serialize_untagged() {
        let values = vec![
            Value::Int(1),
            Value::Text("test".into()),
            Value::Null,
            Value::Json(serde_json::json!({"a": 1})),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[1,"test",null,{"a":1}]"#);
    }

    #[test]
    fn test_serialize_bytes_as_array() {
        let json = serde_json::to_value(Value::Bytes(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!([1, 2]));
    }

    #[test]
    fn test_serialize_time_after_epoch() {
        let time = UNIX_EPOCH + Duration::from_millis(1_500);
        let json = serde_json::to_value(Value::Time(time)).unwrap();
        assert_eq!(json, serde_json::json!(1.5));
    }

    #[test]
    fn test_serialize_time_before_epoch() {
        let time = UNIX_EPOCH - Duration::from_secs(86_400);
        let json = serde_json::to_value(Value::Time(time)).unwrap();
        assert_eq!(json, serde_json::json!(-86_400.0));
        assert_eq!(epoch_seconds(UNIX_EPOCH), 0.0);
    }

    #[test]
    fn test_negative_zero_float_is_not_zero() {
        assert!(!Value::from(-0.0f64).is_zero());
        assert!(!Value::from(serde_json::json!(-0.0)).is_zero());
        assert!(Value::from(serde_json::json!(0.0)).is_zero());
    }
}
