//! Bridging records to and from fully-present structures.
//!
//! A *complete* structure is a plain struct in which every declared field
//! always holds a value. [`Complete`] is the capability a struct needs for
//! the whole-record conversions on [`Record`](super::Record): a
//! deterministic enumeration of its fields in declaration order, erasure
//! into a record, and extraction into an Option-wrapped projection.
//!
//! Implementations are derived with the [`complete!`](crate::complete)
//! macro, which is the only supported way to keep the three pieces (schema,
//! erasure, extraction) in agreement:
//!
//! ```
//! lacuna::complete! {
//!     /// One row of the user table.
//!     pub struct User optional UserOptional {
//!         pub username: String,
//!         pub age: i64,
//!     }
//! }
//!
//! use lacuna::Record;
//!
//! let r = Record::from_record_exact(User {
//!     username: "ann".to_string(),
//!     age: 31,
//! });
//! let parts: UserOptional = r.to_record::<User>();
//! assert_eq!(parts.username, Some("ann".to_string()));
//! assert_eq!(parts.age, Some(31));
//! ```

use super::{partial::Record, schema::Schema};

/// A fully-present structure that can be taken apart into, and reassembled
/// from, a [`Record`].
///
/// The contract ties three things together, and they must agree:
///
/// - [`schema`](Complete::schema) enumerates the fields in declaration
///   order, which becomes the canonical order of any record built from this
///   structure;
/// - [`into_record`](Complete::into_record) erases the structure by folding
///   [`Record::insert`] over that same order, starting from
///   [`Record::new`];
/// - [`optional_from`](Complete::optional_from) reads each field back with
///   [`Record::get`] into the [`Optional`](Complete::Optional) projection,
///   whose fields are the structure's with every type wrapped in `Option`.
///
/// Derive with [`complete!`](crate::complete) rather than implementing by
/// hand.
pub trait Complete: Sized {
    /// The projection of `Self` with every field type wrapped in `Option`.
    type Optional;

    /// The structure's fields, in declaration order.
    fn schema() -> Schema;

    /// Erases the structure into a record declaring exactly its fields, all
    /// present.
    fn into_record(self) -> Record;

    /// Extracts every field's presence from `record` into the projection.
    ///
    /// # Panics
    ///
    /// Panics if `record` does not declare the structure's fields; use
    /// [`Record::to_record`], which checks the whole schema first.
    fn optional_from(record: &Record) -> Self::Optional;
}

/// Declares a fully-present structure together with its Option-wrapped
/// projection and its [`Complete`] impl.
///
/// The first identifier names the structure; the identifier after
/// `optional` names the projection struct. Field declaration order becomes
/// the canonical order of every record built from the structure. A typed
/// [`Field`](crate::record::Field) handle for each field is generated as an
/// associated function of the structure, named after the field:
///
/// ```
/// lacuna::complete! {
///     pub struct Login optional LoginOptional {
///         pub user: String,
///         pub attempts: i64,
///     }
/// }
///
/// use lacuna::Record;
///
/// let r = Record::new().insert(&Login::user(), "ann".to_string());
/// assert_eq!(r.get(&Login::user()), Some("ann".to_string()));
/// ```
#[macro_export]
macro_rules! complete {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident optional $optional:ident {
            $( $(#[$field_meta:meta])* $field_vis:vis $field:ident : $ty:ty ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        $vis struct $name {
            $( $(#[$field_meta])* $field_vis $field : $ty, )+
        }

        #[doc = concat!("Projection of [`", stringify!($name), "`] with every field optional.")]
        #[derive(Debug, Clone, PartialEq, Eq)]
        $vis struct $optional {
            $( $field_vis $field : ::core::option::Option<$ty>, )+
        }

        impl $name {
            $(
                #[doc = concat!("Typed handle for the `", stringify!($field), "` field.")]
                $field_vis const fn $field() -> $crate::record::Field<$ty> {
                    $crate::record::Field::new(stringify!($field))
                }
            )+
        }

        impl $crate::record::Complete for $name {
            type Optional = $optional;

            fn schema() -> $crate::record::Schema {
                $crate::record::Schema::builder()
                    $( .field::<$ty>(stringify!($field)) )+
                    .build()
                    .expect("struct field names are unique")
            }

            fn into_record(self) -> $crate::record::Record {
                $crate::record::Record::new()
                    $( .insert(&Self::$field(), self.$field) )+
            }

            fn optional_from(record: &$crate::record::Record) -> Self::Optional {
                $optional {
                    $( $field : record.get(&Self::$field()), )+
                }
            }
        }
    };
}
