//! Annotated records.
//!
//! A record is a struct whose members carry a column-name annotation. Rust
//! has no runtime reflection, so the annotations live in a static name table
//! that the [`db_record!`](crate::db_record) macro generates alongside value
//! accessors. Members left out of the table are unannotated and never take
//! part in parsing.
//!
//! ```
//! use rowbind::db_record;
//!
//! struct User {
//!     id: i64,
//!     name: String,
//!     password_hash: String,
//! }
//!
//! db_record! {
//!     impl User {
//!         id => "id",
//!         name => "name,omitempty",
//!     }
//! }
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use crate::value::{json_is_zero, Value};

/// One annotated member of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// Rust member name.
    pub rust: &'static str,
    /// Raw annotation text, e.g. `"created_at"` or `"name,omitempty"`.
    pub db: &'static str,
}

impl FieldMeta {
    pub const fn new(rust: &'static str, db: &'static str) -> Self {
        Self { rust, db }
    }

    /// The column name the annotation resolves to.
    ///
    /// Anything after the first `,` is option text and does not affect the
    /// name. An empty name or `-` means the member is excluded.
    pub fn column(&self) -> Option<&'static str> {
        let name = self.db.split(',').next().unwrap_or_default().trim();
        if name.is_empty() || name == "-" {
            None
        } else {
            Some(name)
        }
    }
}

/// A struct whose annotated members can be read as named values.
///
/// Usually implemented with [`db_record!`](crate::db_record). The trait is
/// object safe so that a [`Source`](crate::source::Source) can hold records of
/// any type behind `&dyn Record`.
pub trait Record {
    /// Name of the record type, used to check sequences for a uniform shape.
    fn record_name(&self) -> &'static str;

    /// Annotated members in declaration order.
    fn fields(&self) -> &'static [FieldMeta];

    /// Member values, one per entry of [`fields`](Record::fields) and in the
    /// same order. A length mismatch fails parsing with
    /// [`ParseError::FieldCountMismatch`](crate::error::ParseError::FieldCountMismatch).
    fn values(&self) -> Vec<Value>;

    /// Whether a member holds the zero value of its declared type.
    fn is_zero_field(&self, rust_field: &str) -> bool;
}

/// Zero value of a declared type.
///
/// Drives emptiness filtering for record members: numeric zero, empty
/// strings and collections, `false`, `UNIX_EPOCH`, and `None`. An `Option`
/// holding a zero value is not itself zero.
pub trait IsZero {
    fn is_zero(&self) -> bool;
}

macro_rules! zero_num {
    ($($t:ty),+ $(,)?) => {
        $(impl IsZero for $t {
            fn is_zero(&self) -> bool {
                *self == 0 as $t
            }
        })+
    };
}

zero_num!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// Bitwise, so -0.0 and NaN are values rather than zero.
impl IsZero for f32 {
    fn is_zero(&self) -> bool {
        self.to_bits() == 0
    }
}

impl IsZero for f64 {
    fn is_zero(&self) -> bool {
        self.to_bits() == 0
    }
}

impl IsZero for bool {
    fn is_zero(&self) -> bool {
        !*self
    }
}

impl IsZero for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl IsZero for &str {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsZero for Vec<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsZero for Option<T> {
    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

impl IsZero for SystemTime {
    fn is_zero(&self) -> bool {
        *self == UNIX_EPOCH
    }
}

impl IsZero for serde_json::Value {
    fn is_zero(&self) -> bool {
        json_is_zero(self)
    }
}

impl IsZero for Value {
    fn is_zero(&self) -> bool {
        Value::is_zero(self)
    }
}

/// Implement [`Record`] for a struct from a `member => "annotation"` table.
///
/// Every listed member must be `Clone`, convert into [`Value`] and implement
/// [`IsZero`].
#[macro_export]
macro_rules! db_record {
    (
        impl $ty:ty {
            $( $field:ident => $db:literal ),* $(,)?
        }
    ) => {
        impl $crate::record::Record for $ty {
            fn record_name(&self) -> &'static str {
                stringify!($ty)
            }

            fn fields(&self) -> &'static [$crate::record::FieldMeta] {
                const FIELDS: &[$crate::record::FieldMeta] = &[
                    $( $crate::record::FieldMeta::new(stringify!($field), $db) ),*
                ];
                FIELDS
            }

            fn values(&self) -> Vec<$crate::value::Value> {
                vec![
                    $( $crate::value::Value::from(::std::clone::Clone::clone(&self.$field)) ),*
                ]
            }

            fn is_zero_field(&self, rust_field: &str) -> bool {
                match rust_field {
                    $( stringify!($field) => $crate::record::IsZero::is_zero(&self.$field), )*
                    _ => false,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct Account {
        id: i64,
        email: String,
        nickname: Option<String>,
        secret: String,
        legacy: i32,
    }

    crate::db_record! {
        impl Account {
            id => "id",
            email => "email,omitempty",
            nickname => "nick",
            legacy => "-",
        }
    }

    fn account() -> Account {
        Account {
            id: 7,
            email: String::new(),
            nickname: Some(String::new()),
            secret: "hunter2".into(),
            legacy: 1,
        }
    }

    #[test]
    fn test_column_plain_name() {
        assert_eq!(FieldMeta::new("id", "id").column(), Some("id"));
        assert_eq!(FieldMeta::new("id", " id ").column(), Some("id"));
    }

    #[test]
    fn test_column_strips_options() {
        assert_eq!(FieldMeta::new("name", "name,omitempty").column(), Some("name"));
    }

    #[test]
    fn test_column_excluded() {
        assert_eq!(FieldMeta::new("x", "-").column(), None);
        assert_eq!(FieldMeta::new("x", "").column(), None);
        assert_eq!(FieldMeta::new("x", ",omitempty").column(), None);
    }

    #[test]
    fn test_macro_fields_in_declaration_order() {
        let a = account();
        let rust: Vec<&str> = a.fields().iter().map(|f| f.rust).collect();
        assert_eq!(rust, vec!["id", "email", "nickname", "legacy"]);
        assert_eq!(a.record_name(), "Account");
        // Unlisted members are never exposed.
        assert!(!rust.contains(&"secret"));
        assert_eq!(a.secret, "hunter2");
    }

    #[test]
    fn test_macro_values() {
        let a = account();
        assert_eq!(
            a.values(),
            vec![
                Value::Int(7),
                Value::Text(String::new()),
                Value::Text(String::new()),
                Value::Int(1),
            ]
        );
    }

    #[test]
    fn test_macro_zero_fields() {
        let a = account();
        assert!(!a.is_zero_field("id"));
        assert!(a.is_zero_field("email"));
        // Some("") is present, so it is not zero.
        assert!(!a.is_zero_field("nickname"));
        assert!(!a.is_zero_field("secret"));
    }

    #[test]
    fn test_is_zero_declared_types() {
        assert!(0u8.is_zero());
        assert!(0.0f64.is_zero());
        assert!(0.0f32.is_zero());
        assert!(!(-0.0f64).is_zero());
        assert!(!(-0.0f32).is_zero());
        assert!(!1.5f32.is_zero());
        assert!(None::<i64>.is_zero());
        assert!(!Some(0i64).is_zero());
        assert!(Vec::<i32>::new().is_zero());
        assert!(UNIX_EPOCH.is_zero());
        assert!(!(UNIX_EPOCH + Duration::from_secs(60)).is_zero());
        assert!(serde_json::Value::Null.is_zero());
        assert!("".is_zero());
    }
}
