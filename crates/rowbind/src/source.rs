//! The four input shapes accepted by the parser.

use std::borrow::Cow;

use crate::error::ParseError;
use crate::record::Record;
use crate::value::{Value, ValueMap};

/// Input to [`Parser::parse`](crate::parser::Parser::parse) and
/// [`Parser::extract_conditions`](crate::parser::Parser::extract_conditions).
pub enum Source<'a> {
    /// A single annotated record.
    Record(&'a dyn Record),
    /// A sequence of annotated records, expected to share one type.
    Records(Vec<&'a dyn Record>),
    /// A single string-keyed map.
    Map(Cow<'a, ValueMap>),
    /// A sequence of string-keyed maps.
    Maps(Cow<'a, [ValueMap]>),
}

impl<'a> Source<'a> {
    pub fn record<R: Record>(record: &'a R) -> Self {
        Source::Record(record)
    }

    pub fn records<R: Record>(records: &'a [R]) -> Self {
        Source::Records(records.iter().map(|r| r as &dyn Record).collect())
    }

    pub fn map(map: &'a ValueMap) -> Self {
        Source::Map(Cow::Borrowed(map))
    }

    pub fn maps(maps: &'a [ValueMap]) -> Self {
        Source::Maps(Cow::Borrowed(maps))
    }

    /// Human-readable name of the shape, used in errors and logs.
    pub fn shape(&self) -> &'static str {
        match self {
            Source::Record(_) => "record",
            Source::Records(_) => "record sequence",
            Source::Map(_) => "map",
            Source::Maps(_) => "map sequence",
        }
    }

    /// Number of rows this source yields.
    pub fn len(&self) -> usize {
        match self {
            Source::Record(_) | Source::Map(_) => 1,
            Source::Records(records) => records.len(),
            Source::Maps(maps) => maps.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this is one of the sequence shapes.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Source::Records(_) | Source::Maps(_))
    }
}

impl Source<'static> {
    /// Build a map source from a JSON document.
    ///
    /// An object becomes [`Source::Map`], an array of objects becomes
    /// [`Source::Maps`]. Anything else, including an array holding a
    /// non-object element, is `UnsupportedType`.
    pub fn from_json(json: serde_json::Value) -> Result<Self, ParseError> {
        match json {
            serde_json::Value::Object(object) => Ok(Source::Map(Cow::Owned(object_to_map(object)))),
            serde_json::Value::Array(items) => {
                let mut maps = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        serde_json::Value::Object(object) => maps.push(object_to_map(object)),
                        other => {
                            return Err(ParseError::unsupported(format!(
                                "array of {}",
                                json_kind(&other)
                            )))
                        }
                    }
                }
                Ok(Source::Maps(Cow::Owned(maps)))
            }
            other => Err(ParseError::unsupported(json_kind(&other))),
        }
    }
}

fn object_to_map(object: serde_json::Map<String, serde_json::Value>) -> ValueMap {
    object
        .into_iter()
        .map(|(key, value)| (key, Value::from(value)))
        .collect()
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
