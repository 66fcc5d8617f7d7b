//! Typed field handles and their runtime descriptors.
//!
//! A [`Field<T>`] is a zero-sized, const-constructible handle naming one
//! field of one value type. Handles are what callers pass to every accessor;
//! the type parameter is the *type witness* that lets the store erase values
//! on write and recover them on read without a runtime tag.
//!
//! A [`FieldDef`] is what a handle erases to when it enters a
//! [`Schema`](super::Schema): the field name, the value type's identity, and
//! a monomorphized table of comparison and formatting functions over erased
//! values. The table is how the derived structural operations (equality,
//! ordering, rendering) walk fields generically: each descriptor knows how
//! to compare and render its own slot, so the walk never needs the concrete
//! type at the fold site.

use std::{
    any::{self, TypeId},
    cmp::Ordering,
    fmt,
    marker::PhantomData,
};

use super::storage::ErasedValue;

/// Bound on the value types a field may hold.
///
/// `Any + Send + Sync` lets values live in the type-erased store and keeps
/// records freely shareable across threads; `Clone` supports pure value
/// semantics; `Debug` and `Ord` supply the rendering, equality, and total
/// ordering every declared field participates in.
///
/// The impl is blanket: any type meeting the bounds is a field value.
pub trait FieldValue: any::Any + Send + Sync + Clone + fmt::Debug + Ord {}

impl<T> FieldValue for T where T: any::Any + Send + Sync + Clone + fmt::Debug + Ord {}

/// A typed handle naming one field of a record.
///
/// Handles are zero-sized and const-constructible, so the natural shape is a
/// `const` per field next to the schema that declares it:
///
/// ```
/// use lacuna::record::Field;
///
/// const AGE: Field<i64> = Field::new("age");
/// ```
///
/// Two handles with the same name and type are interchangeable; the handle
/// carries no identity beyond the (name, type) pair.
pub struct Field<T> {
    name: &'static str,
    value: PhantomData<fn() -> T>,
}

impl<T: FieldValue> Field<T> {
    /// Creates a handle for the field `name` holding values of type `T`.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            value: PhantomData,
        }
    }

    /// The field's name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The runtime descriptor this handle erases to.
    pub fn def(&self) -> FieldDef {
        FieldDef::of::<T>(self.name)
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Field<T> {}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("type", &any::type_name::<T>())
            .finish()
    }
}

/// Monomorphized operations over one field's erased slot.
///
/// Built once per value type by [`ValueOps::of`]; each function recovers the
/// concrete type from the erased value before delegating to the type's own
/// `Ord`/`Debug` impls.
#[derive(Clone, Copy)]
pub(crate) struct ValueOps {
    pub(crate) eq: fn(&ErasedValue, &ErasedValue) -> bool,
    pub(crate) cmp: fn(&ErasedValue, &ErasedValue) -> Ordering,
    pub(crate) fmt: fn(&ErasedValue, &mut fmt::Formatter<'_>) -> fmt::Result,
}

impl ValueOps {
    fn of<T: FieldValue>() -> Self {
        Self {
            eq: |a, b| a.expect_ref::<T>() == b.expect_ref::<T>(),
            cmp: |a, b| a.expect_ref::<T>().cmp(b.expect_ref::<T>()),
            fmt: |v, f| write!(f, "{:?}", v.expect_ref::<T>()),
        }
    }
}

/// Runtime descriptor of one declared field: name, value-type identity, and
/// the erased-value operations for that type.
///
/// Descriptors only enter a schema through a typed [`Field`] handle (or the
/// [`complete!`](crate::complete) macro), which is the invariant that keeps
/// the store's recasts sound: a slot is only ever written through the handle
/// whose descriptor declared it.
#[derive(Clone, Copy)]
pub struct FieldDef {
    name: &'static str,
    type_id: TypeId,
    type_name: &'static str,
    ops: ValueOps,
}

impl FieldDef {
    /// Creates the descriptor for field `name` holding values of type `T`.
    pub fn of<T: FieldValue>(name: &'static str) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>(),
            type_name: any::type_name::<T>(),
            ops: ValueOps::of::<T>(),
        }
    }

    /// The field's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared value type's name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub(crate) fn ops(&self) -> &ValueOps {
        &self.ops
    }

    /// True if this descriptor declares values of type `T`.
    pub fn is<T: FieldValue>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Name and value type both match.
    pub(crate) fn same_shape(&self, other: &FieldDef) -> bool {
        self.name == other.name && self.type_id == other.type_id
    }

    /// Deterministic ordering over descriptor shapes: by name, then type
    /// name, then type identity. `Equal` here implies [`same_shape`].
    ///
    /// [`same_shape`]: FieldDef::same_shape
    pub(crate) fn shape_cmp(&self, other: &FieldDef) -> Ordering {
        self.name
            .cmp(other.name)
            .then_with(|| self.type_name.cmp(other.type_name))
            .then_with(|| self.type_id.cmp(&other.type_id))
    }
}

impl fmt::Debug for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("type", &self.type_name)
            .finish()
    }
}
