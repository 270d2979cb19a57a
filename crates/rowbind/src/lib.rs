//! Field extraction for parameterized SQL.
//!
//! `rowbind` turns annotated records, record slices, string-keyed value maps,
//! or map slices into what a statement builder needs to bind parameters:
//!
//! - the ordered, deduplicated set of field names,
//! - one row of `name -> value` pairs per input element,
//! - named-parameter tokens per row (`:id`, `:name`, ...),
//! - every value flattened row-major.
//!
//! Zero values are left out unless the caller asks for them.
//!
//! ```
//! use rowbind::{db_record, parse, Source, Value};
//!
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! db_record! {
//!     impl User {
//!         id => "id",
//!         name => "name",
//!     }
//! }
//!
//! let user = User { id: 1, name: "test".into() };
//! let result = parse(&Source::record(&user), false).unwrap();
//! assert_eq!(result.fields, vec!["id", "name"]);
//! assert_eq!(result.named_values[0], vec![":id", ":name"]);
//! assert_eq!(result.data, vec![Value::Int(1), Value::Text("test".into())]);
//! ```

pub mod conditions;
pub mod config;
pub mod error;
pub mod parser;
pub mod record;
pub mod source;
pub mod value;

pub use conditions::{extract_conditions, Conditions};
pub use config::ParserConfig;
pub use error::ParseError;
pub use parser::{parse, ParseResult, Parser, Row};
pub use record::{FieldMeta, IsZero, Record};
pub use source::Source;
pub use value::{Value, ValueMap};
