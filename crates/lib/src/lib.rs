//!
//! Lacuna: schema-typed records whose fields may be absent.
//!
//! A [`Record`] sits between a plain struct (every declared field always
//! holds a value) and a dynamic map (any key, any type, no static guarantee):
//! the set of field names and their value types is fixed by a [`Schema`], but
//! each field independently may or may not currently hold a value.
//!
//! ## Core Concepts
//!
//! * **Schemas (`record::Schema`)**: the ordered list of declared fields. The
//!   declaration order is the *canonical order* every structural algorithm
//!   (equality, ordering, rendering, conversions) walks; it is part of the
//!   schema's contract, not an implementation detail.
//! * **Fields (`record::Field`)**: zero-sized typed handles naming one field.
//!   All reads and writes go through a handle, which is how the type-erased
//!   store stays sound without a runtime tag on every value.
//! * **Records (`record::Record`)**: the partial record itself. Pure value
//!   semantics: every mutator borrows the receiver and returns a new record.
//! * **Complete structures (`record::Complete`)**: plain structs whose fields
//!   are all present, bridged to and from records with
//!   [`Record::from_record`] / [`Record::to_record`]. The [`complete!`] macro
//!   derives the bridge.
//!
//! ## Example
//!
//! ```
//! use lacuna::record::Field;
//! use lacuna::Record;
//!
//! const USERNAME: Field<String> = Field::new("username");
//! const AGE: Field<i64> = Field::new("age");
//!
//! let r = Record::new()
//!     .insert(&USERNAME, "ann".to_string())
//!     .insert(&AGE, 31);
//!
//! assert_eq!(r.get(&AGE), Some(31));
//! let quieter = r.delete(&AGE);
//! assert_eq!(quieter.to_string(), r#"(Record::from_record { username: "ann" })"#);
//! ```

pub mod record;

/// Re-export the core types for easier access.
pub use record::{Complete, Field, Record, Schema};

/// Result type used throughout the Lacuna library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Lacuna library.
///
/// The intended-use surface of [`Record`] has no recoverable error paths:
/// violated accessor preconditions are programming errors and panic. The few
/// genuinely fallible definition-time operations (schema construction) report
/// through this type.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Structured record errors from the record module
    #[error(transparent)]
    Record(record::RecordError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Record(_) => "record",
        }
    }

    /// Check if this error was raised while declaring a schema.
    pub fn is_declaration_error(&self) -> bool {
        match self {
            Error::Record(err) => err.is_declaration_error(),
        }
    }

    /// Check if this error is a field type mismatch.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Record(err) => err.is_type_error(),
        }
    }
}
