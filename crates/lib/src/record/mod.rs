//! Partial records: a fixed schema of named, typed fields, each of which may
//! or may not currently hold a value.
//!
//! This module is the whole of the abstraction. Layered leaf-first:
//!
//! - [`Field`] / [`FieldDef`]: typed field handles and the runtime field
//!   descriptors they erase to. A descriptor carries the per-type comparison
//!   and formatting witnesses that let generic algorithms walk erased values.
//! - [`Schema`]: the ordered descriptor list. Declaration order is the
//!   canonical order used by every structural algorithm.
//! - `storage` (internal): the type-erased slot map. The one place a stored
//!   value is recast to its declared type lives here; nothing outside this
//!   module can store a mismatched value, which is what makes the recast
//!   sound.
//! - [`Record`]: the partial record, carrying the accessors, combination,
//!   conversions, and the derived structural operations (`==`, `cmp`,
//!   `Display`).
//! - [`Complete`]: the bridge to fully-present structs, normally derived
//!   with the [`complete!`](crate::complete) macro.
//!
//! # Semantics
//!
//! Records are pure values: every mutator borrows the receiver and returns a
//! new record, so shared records are safe to read and extend from any number
//! of threads. Accessor preconditions (field declared / not yet declared,
//! schemas disjoint) are programming errors, not recoverable conditions, and
//! panic when violated; see [`RecordError`] for the messages.

pub mod complete;
pub mod errors;
pub mod field;
pub mod partial;
pub mod schema;
pub(crate) mod storage;


pub use complete::Complete;
pub use errors::RecordError;
pub use field::{Field, FieldDef, FieldValue};
pub use partial::Record;
pub use schema::{Schema, SchemaBuilder};
