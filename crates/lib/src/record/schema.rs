//! Schemas: the ordered field-descriptor list behind every record.
//!
//! A [`Schema`] is the definition-time half of a record: which field names
//! exist and what value type each holds. Field names are unique within a
//! schema, and the *declaration order* of the descriptor list is the
//! canonical order that every structural algorithm (equality, ordering,
//! rendering, conversions) walks. Two traversals of the same schema always
//! see the same sequence; the order is contract, not accident.
//!
//! Schemas are immutable once built. The record accessors that appear to
//! grow or shrink a schema (`insert`, `delete`, `modify` with a
//! type-changing function) build a new one.

use std::cmp::Ordering;

use tracing::trace;

use super::{
    errors::RecordError,
    field::{FieldDef, FieldValue},
};

/// An ordered set of (field name, field type) declarations.
///
/// Built with [`Schema::builder`], by the [`complete!`](crate::complete)
/// macro, or implicitly by folding [`Record::insert`](super::Record::insert)
/// from an empty record.
///
/// Equality is *shape* equality: same names with the same value types in the
/// same order.
#[derive(Clone, Default)]
pub struct Schema {
    fields: Vec<FieldDef>,
}

impl Schema {
    /// The schema declaring no fields.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Starts declaring a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder { fields: Vec::new() }
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True if the schema declares a field named `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// The descriptor for `name`, if declared.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|def| def.name() == name)
    }

    /// The declared descriptors in canonical (declaration) order.
    ///
    /// Finite, restartable, deterministic: the same schema always yields the
    /// same sequence.
    pub fn fields(&self) -> std::slice::Iter<'_, FieldDef> {
        self.fields.iter()
    }

    /// True if the two schemas share no field names.
    pub fn is_disjoint(&self, other: &Schema) -> bool {
        self.fields.iter().all(|def| !other.contains(def.name()))
    }

    /// Appends a descriptor; the caller has already checked the name is
    /// fresh.
    pub(crate) fn with_field(&self, def: FieldDef) -> Schema {
        debug_assert!(!self.contains(def.name()));
        let mut fields = self.fields.clone();
        fields.push(def);
        Schema { fields }
    }

    /// Removes the descriptor for `name`; the caller has already checked it
    /// is declared.
    pub(crate) fn without(&self, name: &str) -> Schema {
        let fields = self
            .fields
            .iter()
            .filter(|def| def.name() != name)
            .copied()
            .collect();
        Schema { fields }
    }

    /// Replaces the descriptor for `name` in place, keeping its position in
    /// canonical order. Used by `modify` when the update function changes
    /// the field's value type.
    pub(crate) fn retyped<U: FieldValue>(&self, name: &'static str) -> Schema {
        let mut fields = self.fields.clone();
        for def in &mut fields {
            if def.name() == name {
                if !def.is::<U>() {
                    *def = FieldDef::of::<U>(name);
                }
                break;
            }
        }
        Schema { fields }
    }

    /// Same names with the same value types in the same order.
    pub(crate) fn shape_eq(&self, other: &Schema) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(a, b)| a.same_shape(b))
    }

    /// Deterministic total order over schema shapes, lexicographic over the
    /// descriptor lists. `Equal` here implies [`shape_eq`].
    ///
    /// [`shape_eq`]: Schema::shape_eq
    pub(crate) fn shape_cmp(&self, other: &Schema) -> Ordering {
        for (a, b) in self.fields.iter().zip(&other.fields) {
            match a.shape_cmp(b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        self.fields.len().cmp(&other.fields.len())
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.shape_eq(other)
    }
}

impl Eq for Schema {}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for def in &self.fields {
            map.entry(&def.name(), &def.type_name());
        }
        map.finish()
    }
}

/// Incremental schema declaration.
///
/// ```
/// use lacuna::record::Schema;
///
/// let schema = Schema::builder()
///     .field::<String>("username")
///     .field::<i64>("age")
///     .build()?;
/// assert_eq!(schema.len(), 2);
/// # Ok::<(), lacuna::record::RecordError>(())
/// ```
#[derive(Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldDef>,
}

impl SchemaBuilder {
    /// Declares a field of type `T` at the next position in canonical order.
    pub fn field<T: FieldValue>(mut self, name: &'static str) -> Self {
        self.fields.push(FieldDef::of::<T>(name));
        self
    }

    /// Finishes the declaration.
    ///
    /// Fails with [`RecordError::DuplicateField`] if any name was declared
    /// twice. This is the one definition-time condition reported as a
    /// `Result` instead of a panic, since builders are often driven by
    /// generated code.
    pub fn build(self) -> Result<Schema, RecordError> {
        for (i, def) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|d| d.name() == def.name()) {
                return Err(RecordError::DuplicateField {
                    name: def.name().to_string(),
                });
            }
        }
        trace!(fields = self.fields.len(), "schema built");
        Ok(Schema {
            fields: self.fields,
        })
    }
}
