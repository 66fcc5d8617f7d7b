//! The type-erased slot store behind every record.
//!
//! Values are stored with their static type discarded and recast on read.
//! The recast is the one delicate step in the whole crate, and it is kept
//! sound structurally rather than with a runtime tag: every write path runs
//! through a typed accessor that erases a value matching the field's declared
//! descriptor, and [`ErasedValue::expect_ref`], the only recast site, never
//! leaves this module's crate-private boundary.
//!
//! [`Storage::alter`] is the sole write primitive, a read-modify-replace that
//! returns the fresh store together with the previous unboxed value; every
//! mutator on [`Record`](super::Record) is a specialization of it. Reads use
//! [`Storage::peek`]: routing them through `alter` would copy the slot map
//! once per read for a result that is then discarded.

use std::{any::Any, collections::HashMap, sync::Arc};

use super::field::FieldValue;

/// A value whose declared type has been discarded for storage.
///
/// The payload is reference-counted, so cloning a store (or a record) shares
/// the stored values rather than copying them. Never exposed outside the
/// crate.
#[derive(Clone)]
pub(crate) struct ErasedValue {
    value: Arc<dyn Any + Send + Sync>,
    /// Name of the erased type, kept for the mismatch panic message.
    type_name: &'static str,
}

impl ErasedValue {
    /// Discards `value`'s static type.
    pub(crate) fn erase<T: FieldValue>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Recasts back to the declared type.
    ///
    /// # Panics
    ///
    /// Panics if the slot holds a different type. Every write path erases a
    /// value matching the field's descriptor, so a mismatch here means an
    /// internal invariant was broken, not that the caller passed bad data.
    pub(crate) fn expect_ref<T: FieldValue>(&self) -> &T {
        self.value.downcast_ref::<T>().unwrap_or_else(|| {
            panic!(
                "record slot invariant violated: slot holds {}, recast as {}",
                self.type_name,
                std::any::type_name::<T>(),
            )
        })
    }

    #[cfg(test)]
    pub(crate) fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// The slot map: field name to erased value, keyed only by names the owning
/// schema declares.
///
/// Persistent in the value-semantics sense: `alter` returns a fresh store and
/// leaves the receiver untouched. Canonical field order lives in the schema,
/// not here; the map's own iteration order is never observed.
#[derive(Clone, Default)]
pub(crate) struct Storage {
    slots: HashMap<&'static str, ErasedValue>,
}

impl Storage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of slots currently holding a value.
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// The read path: the erased value under `name`, if present.
    pub(crate) fn peek(&self, name: &str) -> Option<&ErasedValue> {
        self.slots.get(name)
    }

    /// Read-modify-replace on one slot, at the erased level.
    ///
    /// `update` receives the current slot contents and decides the new
    /// presence/value; the receiver is untouched and a fresh store is
    /// returned. This is the sole write path into a store.
    pub(crate) fn alter_raw(
        &self,
        name: &'static str,
        update: impl FnOnce(Option<&ErasedValue>) -> Option<ErasedValue>,
    ) -> Storage {
        let mut slots = self.slots.clone();
        match update(self.slots.get(name)) {
            Some(next) => {
                slots.insert(name, next);
            }
            None => {
                slots.remove(name);
            }
        }
        Storage { slots }
    }

    /// Typed read-modify-replace: [`alter_raw`] plus the previous value,
    /// unboxed under the slot's declared type.
    ///
    /// [`alter_raw`]: Storage::alter_raw
    pub(crate) fn alter<T: FieldValue>(
        &self,
        name: &'static str,
        update: impl FnOnce(Option<&ErasedValue>) -> Option<ErasedValue>,
    ) -> (Storage, Option<T>) {
        let previous = self.peek(name).map(|v| v.expect_ref::<T>().clone());
        (self.alter_raw(name, update), previous)
    }
}
