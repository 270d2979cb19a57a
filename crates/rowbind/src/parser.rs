//! The value parser.
//!
//! Turns a [`Source`] into the pieces a SQL statement builder binds against:
//! the ordered field name set, one [`Row`] per input element, one list of
//! named-parameter tokens per row, and the flattened row-major value list.
//!
//! Field order follows declaration order for records and iteration order
//! (unspecified) for maps. Zero values are dropped from a row unless the
//! caller passes `allow_empty = true`.

use rustc_hash::FxHashSet;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::record::Record;
use crate::source::Source;
use crate::value::{Value, ValueMap};

// ── Rows ─────────────────────────────────────────────────────────────

/// One record's included fields, in field order.
///
/// Behaves like a map keyed by field name: a name appears once, and
/// inserting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    entries: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Drop the ordering and return a plain map.
    pub fn into_map(self) -> ValueMap {
        self.entries.into_iter().collect()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Build a row from a record's annotated members.
pub(crate) fn record_row(record: &dyn Record, allow_empty: bool) -> Result<Row, ParseError> {
    let fields = record.fields();
    let values = record.values();
    if fields.len() != values.len() {
        return Err(ParseError::FieldCountMismatch {
            record: record.record_name(),
            fields: fields.len(),
            values: values.len(),
        });
    }
    let mut row = Row::new();
    for (meta, value) in fields.iter().zip(values) {
        let Some(column) = meta.column() else {
            continue;
        };
        if !allow_empty && record.is_zero_field(meta.rust) {
            log::trace!("skipping zero field {}.{}", record.record_name(), meta.rust);
            continue;
        }
        row.insert(column, value);
    }
    Ok(row)
}

/// Build a row from a string-keyed map.
pub(crate) fn map_row(map: &ValueMap, allow_empty: bool) -> Row {
    let mut row = Row::new();
    for (key, value) in map {
        if !allow_empty && value.is_zero() {
            log::trace!("skipping zero {} value for key {:?}", value.kind(), key);
            continue;
        }
        row.insert(key.as_str(), value.clone());
    }
    row
}

// ── Parse result ─────────────────────────────────────────────────────

/// Output of [`Parser::parse`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    /// Union of field names over all rows, first-seen order.
    pub fields: Vec<String>,
    pub rows: Vec<Row>,
    /// Named-parameter tokens, one list per row, in that row's field order.
    pub named_values: Vec<Vec<String>>,
    /// Every row's values concatenated, row-major.
    pub data: Vec<Value>,
}

impl ParseResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Tokens for one row, e.g. `[":id", ":name"]`.
    pub fn named_params(&self, row: usize) -> Option<&[String]> {
        self.named_values.get(row).map(Vec::as_slice)
    }
}

// ── Parser ───────────────────────────────────────────────────────────

/// Converts sources into parse results and condition maps.
///
/// Holds only its configuration, so one parser can be shared freely across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a parser, rejecting an invalid configuration.
    pub fn new(config: ParserConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a source into fields, rows, named-parameter tokens and data.
    pub fn parse(&self, source: &Source<'_>, allow_empty: bool) -> Result<ParseResult, ParseError> {
        log::debug!(
            "parsing {} with {} row(s), allow_empty = {}",
            source.shape(),
            source.len(),
            allow_empty
        );
        let rows = self.collect_rows(source, allow_empty)?;
        Ok(self.assemble(rows))
    }

    fn collect_rows(&self, source: &Source<'_>, allow_empty: bool) -> Result<Vec<Row>, ParseError> {
        if source.is_sequence() && source.is_empty() {
            return Err(ParseError::EmptySource {
                shape: source.shape(),
            });
        }
        let rows = match source {
            Source::Record(record) => vec![record_row(*record, allow_empty)?],
            Source::Records(records) => {
                self.check_uniform(records)?;
                records
                    .iter()
                    .map(|record| record_row(*record, allow_empty))
                    .collect::<Result<_, _>>()?
            }
            Source::Map(map) => vec![map_row(map, allow_empty)],
            Source::Maps(maps) => maps.iter().map(|map| map_row(map, allow_empty)).collect(),
        };
        Ok(rows)
    }

    /// Reject a record sequence whose elements are not all the same type.
    fn check_uniform(&self, records: &[&dyn Record]) -> Result<(), ParseError> {
        if !self.config.uniform_records {
            return Ok(());
        }
        let Some(first) = records.first() else {
            return Ok(());
        };
        for (index, record) in records.iter().enumerate().skip(1) {
            if record.record_name() != first.record_name() || record.fields() != first.fields() {
                return Err(ParseError::InconsistentShape {
                    index,
                    expected: first.record_name(),
                    found: record.record_name(),
                });
            }
        }
        Ok(())
    }

    fn assemble(&self, rows: Vec<Row>) -> ParseResult {
        let mut fields = Vec::new();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut named_values = Vec::with_capacity(rows.len());
        let mut data = Vec::new();

        for row in &rows {
            let mut tokens = Vec::with_capacity(row.len());
            for (name, value) in row.iter() {
                if !seen.contains(name) {
                    seen.insert(name.to_string());
                    fields.push(name.to_string());
                }
                tokens.push(format!("{}{}", self.config.marker, name));
                data.push(value.clone());
            }
            named_values.push(tokens);
        }

        log::debug!(
            "parsed {} field(s), {} value(s) across {} row(s)",
            fields.len(),
            data.len(),
            rows.len()
        );
        ParseResult {
            fields,
            rows,
            named_values,
            data,
        }
    }
}

/// Parse with the default configuration (`:` marker, uniform records).
pub fn parse(source: &Source<'_>, allow_empty: bool) -> Result<ParseResult, ParseError> {
    Parser::default().parse(source, allow_empty)
}
