use std::fmt;

use serde::Serialize;

/// An error produced while turning a source into rows or conditions.
///
/// Parsing is all-or-nothing: when one of these is returned no partial
/// result exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParseError {
    /// The input is not a record, record sequence, map, or map sequence
    /// (or is a sequence where only a single value is accepted).
    UnsupportedType { shape: String },
    /// A sequence input contained no elements.
    EmptySource { shape: &'static str },
    /// A record sequence mixed record types.
    InconsistentShape {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
    /// A record returned a different number of values than it has fields.
    FieldCountMismatch {
        record: &'static str,
        fields: usize,
        values: usize,
    },
}

impl ParseError {
    pub(crate) fn unsupported(shape: impl Into<String>) -> Self {
        Self::UnsupportedType {
            shape: shape.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedType { shape } => write!(f, "unsupported source type: {shape}"),
            Self::EmptySource { shape } => write!(f, "empty source: {shape} has no elements"),
            Self::InconsistentShape {
                index,
                expected,
                found,
            } => write!(
                f,
                "inconsistent record shape at index {index}: expected {expected}, found {found}"
            ),
            Self::FieldCountMismatch {
                record,
                fields,
                values,
            } => write!(
                f,
                "record {record} declares {fields} field(s) but returned {values} value(s)"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display_all_variants() {
        assert_eq!(
            ParseError::unsupported("number").to_string(),
            "unsupported source type: number"
        );
        assert_eq!(
            ParseError::EmptySource { shape: "map sequence" }.to_string(),
            "empty source: map sequence has no elements"
        );
        assert_eq!(
            ParseError::InconsistentShape {
                index: 2,
                expected: "User",
                found: "Order",
            }
            .to_string(),
            "inconsistent record shape at index 2: expected User, found Order"
        );
        assert_eq!(
            ParseError::FieldCountMismatch {
                record: "User",
                fields: 3,
                values: 2,
            }
            .to_string(),
            "record User declares 3 field(s) but returned 2 value(s)"
        );
    }
}
