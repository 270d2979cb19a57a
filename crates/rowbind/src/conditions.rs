//! Equality condition extraction.
//!
//! Produces a `field name -> value` map from a single record or map, meant
//! for `WHERE field = value` clauses. Annotation and emptiness rules are the
//! same as for [`Parser::parse`].

use crate::error::ParseError;
use crate::parser::{map_row, record_row, Parser};
use crate::source::Source;
use crate::value::ValueMap;

/// Field name to value map for equality filters.
pub type Conditions = ValueMap;

impl Parser {
    /// Extract equality conditions from a single record or map.
    ///
    /// Sequence sources are `UnsupportedType`.
    pub fn extract_conditions(
        &self,
        source: &Source<'_>,
        allow_empty: bool,
    ) -> Result<Conditions, ParseError> {
        let mut conditions = Conditions::default();
        self.extract_conditions_into(source, &mut conditions, allow_empty)?;
        Ok(conditions)
    }

    /// Extract equality conditions into an existing map.
    ///
    /// Existing entries with the same field name are overwritten. On error
    /// the map is left untouched.
    pub fn extract_conditions_into(
        &self,
        source: &Source<'_>,
        conditions: &mut Conditions,
        allow_empty: bool,
    ) -> Result<(), ParseError> {
        let row = match source {
            Source::Record(record) => record_row(*record, allow_empty)?,
            Source::Map(map) => map_row(map, allow_empty),
            Source::Records(_) | Source::Maps(_) => {
                return Err(ParseError::unsupported(source.shape()))
            }
        };
        log::debug!(
            "extracted {} condition(s) from {}",
            row.len(),
            source.shape()
        );
        conditions.extend(row.into_map());
        Ok(())
    }
}

/// Extract conditions with the default configuration.
pub fn extract_conditions(source: &Source<'_>, allow_empty: bool) -> Result<Conditions, ParseError> {
    Parser::default().extract_conditions(source, allow_empty)
}
