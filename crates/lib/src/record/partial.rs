//! The partial record itself.
//!
//! A [`Record`] pairs a [`Schema`] with the type-erased slot store. All field
//! access is schema-checked through typed [`Field`] handles, every mutator
//! returns a fresh record, and the derived structural operations (`==`,
//! `cmp`, `Display`) fold over the schema's canonical field order.

use std::{cmp::Ordering, fmt};

use tracing::{error, trace};

use super::{
    complete::Complete,
    errors::RecordError,
    field::{Field, FieldDef, FieldValue},
    schema::Schema,
    storage::{ErasedValue, Storage},
};

/// A record over a fixed schema in which each field independently may or may
/// not currently hold a value.
///
/// # Value semantics
///
/// Records are pure values: `insert`, `set`, `modify`, `delete` and
/// `disjoint_union` all borrow the receiver and return a new record. Stored
/// values are reference-counted, so the new record shares them with the old
/// one. Because no record is mutated after construction, concurrent reads of
/// a shared record need no locks, and neither does concurrent construction
/// of new records from a shared parent.
///
/// # Preconditions
///
/// The accessors check their schema preconditions at call time and treat a
/// violation as a programming error: they panic with the corresponding
/// [`RecordError`] message. There is no recoverable "field already declared"
/// result; the data model has no representation for it.
///
/// # Example
///
/// ```
/// use lacuna::record::Field;
/// use lacuna::Record;
///
/// const TITLE: Field<String> = Field::new("title");
/// const YEAR: Field<i64> = Field::new("year");
///
/// let film = Record::new()
///     .insert(&TITLE, "Stalker".to_string())
///     .insert(&YEAR, 1979);
///
/// assert_eq!(film.get(&YEAR), Some(1979));
/// assert_eq!(film.delete(&YEAR).get(&TITLE), Some("Stalker".to_string()));
/// // `film` itself is untouched:
/// assert_eq!(film.present_len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct Record {
    schema: Schema,
    storage: Storage,
}

impl Record {
    /// The record with no declared fields.
    ///
    /// Grow it with [`insert`](Record::insert), which declares and sets one
    /// field at a time.
    pub fn new() -> Self {
        Self::default()
    }

    /// A record declaring `schema`'s fields, all absent.
    pub fn empty(schema: Schema) -> Self {
        Self {
            schema,
            storage: Storage::new(),
        }
    }

    /// The record's schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of fields currently holding a value.
    pub fn present_len(&self) -> usize {
        self.storage.len()
    }

    /// True if no field currently holds a value.
    pub fn is_empty(&self) -> bool {
        self.storage.len() == 0
    }

    /// Names of the fields currently holding a value, in canonical order.
    pub fn present_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.schema
            .fields()
            .filter(|def| self.storage.peek(def.name()).is_some())
            .map(|def| def.name())
    }

    /// True if `field` is declared and currently holds a value.
    pub fn contains<T: FieldValue>(&self, field: &Field<T>) -> bool {
        self.schema.contains(field.name()) && self.storage.peek(field.name()).is_some()
    }

    /// Looks up `field`'s descriptor, checking that it is declared with
    /// type `T`. Every typed accessor funnels through here, which is what
    /// keeps the store's recasts sound.
    fn declared<T: FieldValue>(&self, field: &Field<T>) -> &FieldDef {
        let def = self.schema.field(field.name()).unwrap_or_else(|| {
            panic!(
                "{}",
                RecordError::NotDeclared {
                    name: field.name().to_string(),
                }
            )
        });
        if !def.is::<T>() {
            panic!(
                "{}",
                RecordError::TypeMismatch {
                    name: field.name().to_string(),
                    expected: def.type_name(),
                    actual: std::any::type_name::<T>(),
                }
            );
        }
        def
    }

    /// The field's current value, if present.
    ///
    /// # Panics
    ///
    /// Panics if `field` is not declared in the schema, or is declared with
    /// a different value type.
    pub fn get<T: FieldValue>(&self, field: &Field<T>) -> Option<T> {
        self.declared(field);
        self.storage
            .peek(field.name())
            .map(|v| v.expect_ref::<T>().clone())
    }

    /// The field's current value, or `default` if absent.
    ///
    /// # Panics
    ///
    /// As [`get`](Record::get).
    pub fn get_or<T: FieldValue>(&self, field: &Field<T>, default: T) -> T {
        self.get(field).unwrap_or(default)
    }

    /// Declares `field` and sets it to `value`.
    ///
    /// The new field is appended at the end of canonical order; all existing
    /// fields are unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the schema already declares a field with this name. Use
    /// [`set`](Record::set) to overwrite a declared field.
    pub fn insert<T: FieldValue>(&self, field: &Field<T>, value: T) -> Record {
        if self.schema.contains(field.name()) {
            panic!(
                "{}",
                RecordError::AlreadyDeclared {
                    name: field.name().to_string(),
                }
            );
        }
        let schema = self.schema.with_field(field.def());
        let storage = self
            .storage
            .alter_raw(field.name(), |_| Some(ErasedValue::erase(value)));
        Record { schema, storage }
    }

    /// Sets a declared field to `value`, whether or not it currently holds
    /// one. The schema is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `field` is not declared, or is declared with a different
    /// value type.
    pub fn set<T: FieldValue>(&self, field: &Field<T>, value: T) -> Record {
        self.declared(field);
        let storage = self
            .storage
            .alter_raw(field.name(), |_| Some(ErasedValue::erase(value)));
        Record {
            schema: self.schema.clone(),
            storage,
        }
    }

    /// Applies `f` to the field's value if present; absent fields stay
    /// absent.
    ///
    /// `f` may return a different type, in which case the field's declared
    /// type changes with it (its position in canonical order does not). When
    /// the field is absent and the type is unchanged, the result is the
    /// record itself, unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `field` is not declared, or is declared with a different
    /// value type.
    pub fn modify<T, U, F>(&self, field: &Field<T>, f: F) -> Record
    where
        T: FieldValue,
        U: FieldValue,
        F: FnOnce(&T) -> U,
    {
        self.declared(field);
        let schema = self.schema.retyped::<U>(field.name());
        let storage = self
            .storage
            .alter_raw(field.name(), |previous| {
                previous.map(|v| ErasedValue::erase(f(v.expect_ref::<T>())))
            });
        Record { schema, storage }
    }

    /// Removes `field` from presence *and* from the schema.
    ///
    /// No precondition on prior presence: deleting an absent (but declared)
    /// field just narrows the schema.
    ///
    /// # Panics
    ///
    /// Panics if `field` is not declared, or is declared with a different
    /// value type.
    pub fn delete<T: FieldValue>(&self, field: &Field<T>) -> Record {
        self.take(field).0
    }

    /// [`delete`](Record::delete), additionally returning the value the
    /// field held. The store's read-modify-replace primitive reports the
    /// previous value on every write; this is its public face.
    ///
    /// # Panics
    ///
    /// Panics if `field` is not declared, or is declared with a different
    /// value type.
    pub fn take<T: FieldValue>(&self, field: &Field<T>) -> (Record, Option<T>) {
        self.declared(field);
        let schema = self.schema.without(field.name());
        let (storage, previous) = self.storage.alter(field.name(), |_| None);
        (Record { schema, storage }, previous)
    }

    /// Combines two records with disjoint schemas.
    ///
    /// The result declares `self`'s fields followed by `other`'s, each with
    /// its own side's presence and value.
    ///
    /// # Panics
    ///
    /// Panics if the schemas share any field name. Disjointness is the
    /// caller's precondition; this implementation cannot check it statically,
    /// so it asserts at runtime rather than silently preferring one side.
    pub fn disjoint_union(&self, other: &Record) -> Record {
        for def in other.schema.fields() {
            if self.schema.contains(def.name()) {
                error!(
                    field = def.name(),
                    "disjoint_union called with overlapping schemas"
                );
                panic!(
                    "{}",
                    RecordError::SchemaOverlap {
                        name: def.name().to_string(),
                    }
                );
            }
        }
        let mut schema = self.schema.clone();
        let mut storage = self.storage.clone();
        for def in other.schema.fields() {
            schema = schema.with_field(*def);
            if let Some(value) = other.storage.peek(def.name()) {
                let value = value.clone();
                storage = storage.alter_raw(def.name(), move |_| Some(value));
            }
        }
        Record { schema, storage }
    }

    /// Builds a record over `schema` from a fully-present structure.
    ///
    /// Walks the structure's fields in their declared order: fields also
    /// declared in `schema` become present with the structure's value,
    /// fields outside `schema` are dropped, and `schema` fields missing from
    /// the structure stay absent.
    ///
    /// # Panics
    ///
    /// Panics if a shared field name is declared with different value types
    /// on the two sides.
    pub fn from_record<C: Complete>(schema: &Schema, value: C) -> Record {
        let full = value.into_record();
        let mut out = Record::empty(schema.clone());
        for def in full.schema.fields() {
            match schema.field(def.name()) {
                Some(target) if target.type_id() == def.type_id() => {
                    if let Some(value) = full.storage.peek(def.name()) {
                        let value = value.clone();
                        out.storage = out.storage.alter_raw(def.name(), move |_| Some(value));
                    }
                }
                Some(target) => panic!(
                    "{}",
                    RecordError::TypeMismatch {
                        name: def.name().to_string(),
                        expected: target.type_name(),
                        actual: def.type_name(),
                    }
                ),
                None => {
                    trace!(field = def.name(), "dropping field outside target schema");
                }
            }
        }
        out
    }

    /// [`from_record`](Record::from_record) specialized to the structure's
    /// own schema: every field of the structure becomes a present field of
    /// the record.
    ///
    /// Behaviorally identical to `from_record(&C::schema(), value)`; provided
    /// so call sites need not spell the schema out.
    pub fn from_record_exact<C: Complete>(value: C) -> Record {
        value.into_record()
    }

    /// Converts to the Option-wrapped projection of a fully-present
    /// structure: for every field of the schema, in canonical order,
    /// `Some(value)` if present and `None` if absent.
    ///
    /// # Panics
    ///
    /// Panics if the record's schema differs from `C`'s.
    pub fn to_record<C: Complete>(&self) -> C::Optional {
        let expected = C::schema();
        if !self.schema.shape_eq(&expected) {
            panic!(
                "{}",
                RecordError::SchemaMismatch {
                    expected: format!("{expected:?}"),
                    actual: format!("{:?}", self.schema),
                }
            );
        }
        C::optional_from(self)
    }
}

/// Field-wise equality in canonical order: absent = absent, present values
/// compare under the field type's equality, absent ≠ present. Records with
/// different schema shapes are never equal.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        if !self.schema.shape_eq(&other.schema) {
            return false;
        }
        self.schema.fields().all(|def| {
            match (self.storage.peek(def.name()), other.storage.peek(def.name())) {
                (None, None) => true,
                (Some(a), Some(b)) => (def.ops().eq)(a, b),
                _ => false,
            }
        })
    }
}

impl Eq for Record {}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lexicographic order over the canonical field sequence, short-circuiting
/// on the first non-equal field, with absent < present(_) and present values
/// ordered under the field type's ordering.
///
/// To make the order total across *all* records, schema shape compares
/// first; two records of the same schema compare purely by field contents,
/// and `cmp` returns `Equal` exactly when `==` holds.
impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.schema.shape_cmp(&other.schema) {
            Ordering::Equal => {}
            ord => return ord,
        }
        for def in self.schema.fields() {
            let ord = match (self.storage.peek(def.name()), other.storage.peek(def.name())) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(a), Some(b)) => (def.ops().cmp)(a, b),
            };
            match ord {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

/// Renders the present fields in canonical order, in a shape mirroring how
/// the value could be rebuilt:
///
/// ```
/// use lacuna::record::Field;
/// use lacuna::Record;
///
/// const F1: Field<i64> = Field::new("f1");
/// const F2: Field<String> = Field::new("f2");
///
/// assert_eq!(Record::new().to_string(), "(Record::from_record {})");
///
/// let r = Record::new().insert(&F1, 1).insert(&F2, "x".to_string());
/// assert_eq!(r.to_string(), r#"(Record::from_record { f1: 1, f2: "x" })"#);
/// ```
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(Record::from_record {{")?;
        let mut first = true;
        for def in self.schema.fields() {
            if let Some(value) = self.storage.peek(def.name()) {
                if first {
                    write!(f, " ")?;
                    first = false;
                } else {
                    write!(f, ", ")?;
                }
                write!(f, "{}: ", def.name())?;
                (def.ops().fmt)(value, f)?;
            }
        }
        if !first {
            write!(f, " ")?;
        }
        write!(f, "}})")
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        /// Absent slot marker for debug output.
        struct Absent;
        impl fmt::Debug for Absent {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("<absent>")
            }
        }
        /// Renders one erased slot through its descriptor's formatter.
        struct Slot<'a>(&'a ErasedValue, &'a FieldDef);
        impl fmt::Debug for Slot<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                (self.1.ops().fmt)(self.0, f)
            }
        }

        let mut s = f.debug_struct("Record");
        for def in self.schema.fields() {
            match self.storage.peek(def.name()) {
                Some(value) => s.field(def.name(), &Slot(value, def)),
                None => s.field(def.name(), &Absent),
            };
        }
        s.finish()
    }
}
