//! Named attribute columns backing a record collection.
//!
//! Columns are held behind `Arc` so cloning a store (duplicating a
//! collection) shares every column until the first write, at which point
//! only the written column is copied.

mod column;


use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub use column::{Column, ValueKey};

use crate::error::{AttributeError, Result};
use crate::value::{AttributeType, AttributeValue};

/// Opaque identity of a row in an attribute store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey(i64);

impl EntryKey {
    pub const fn new(key: i64) -> Self {
        Self(key)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    order: u64,
    column: Arc<Column>,
}

/// Named, typed columns plus the entry key allocator.
#[derive(Debug, Clone, Default)]
pub struct AttributeStore {
    columns: HashMap<Arc<str>, Slot>,
    next_entry: i64,
    next_order: u64,
}

/// Returns true if `name` can name an attribute.
///
/// Names are non-empty and made of alphanumerics, spaces, `_`, `-` and `/`.
/// The `@` and `$` prefixes are reserved for selector syntax.
pub fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-' | '/'))
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&Column> {
        self.columns.get(name).map(|slot| slot.column.as_ref())
    }

    /// Mutable access to a column, copying it first if it is shared.
    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns
            .get_mut(name)
            .map(|slot| Arc::make_mut(&mut slot.column))
    }

    /// Attribute names in creation order.
    pub fn attribute_names(&self) -> Vec<&str> {
        let mut slots: Vec<_> = self.columns.iter().collect();
        slots.sort_by_key(|(_, slot)| slot.order);
        slots.into_iter().map(|(name, _)| name.as_ref()).collect()
    }

    pub fn attribute_count(&self) -> usize {
        self.columns.len()
    }

    /// Most recently created attribute.
    pub fn last_attribute_name(&self) -> Option<&str> {
        self.columns
            .iter()
            .max_by_key(|(_, slot)| slot.order)
            .map(|(name, _)| name.as_ref())
    }

    /// Creates a new attribute with the given default value.
    pub fn create_attribute<T: AttributeType>(
        &mut self,
        name: &str,
        default_value: T,
    ) -> Result<&mut Column> {
        self.insert_column(name, Column::new(default_value.into_value()))
    }

    /// Creates a new attribute whose type is taken from `default_value`.
    pub fn create_attribute_from_value(
        &mut self,
        name: &str,
        default_value: AttributeValue,
    ) -> Result<&mut Column> {
        self.insert_column(name, Column::new(default_value))
    }

    /// Returns an empty attribute of type `T`, reusing the existing
    /// definition when it already has that type and replacing it otherwise.
    pub fn clear_or_create_attribute<T: AttributeType>(
        &mut self,
        name: &str,
        default_value: T,
    ) -> Result<&mut Column> {
        let reusable = self
            .attribute(name)
            .is_some_and(|column| column.value_type() == T::VALUE_TYPE);

        if !reusable {
            self.delete_attribute(name);
            return self.create_attribute(name, default_value);
        }

        let column = self
            .attribute_mut(name)
            .ok_or_else(|| AttributeError::MissingAttribute(name.to_string()))?;
        column.reset(default_value.into_value())?;
        Ok(column)
    }

    /// Removes an attribute; returns whether it existed.
    pub fn delete_attribute(&mut self, name: &str) -> bool {
        self.columns.remove(name).is_some()
    }

    /// Creates `name` as a duplicate of `source`.
    ///
    /// With `copy_entries` the source's entry mappings are kept verbatim and
    /// the entry allocator is advanced past them, so the caller must ensure
    /// the entry keys are meaningful in this store.
    pub fn copy_attribute(
        &mut self,
        source: &Column,
        name: &str,
        copy_entries: bool,
        copy_values: bool,
    ) -> Result<&mut Column> {
        let column = source.duplicate(copy_entries, copy_values);
        if copy_entries {
            if let Some(max) = column.entries().last() {
                self.next_entry = self.next_entry.max(max.get() + 1);
            }
        }
        self.insert_column(name, column)
    }

    /// Allocates a fresh entry key.
    pub fn add_entry(&mut self) -> EntryKey {
        let key = EntryKey::new(self.next_entry);
        self.next_entry += 1;
        key
    }

    /// Ensures `entry` refers to a row of this store, allocating one if unset.
    pub fn initialize_on_set(&mut self, entry: &mut Option<EntryKey>) -> EntryKey {
        match *entry {
            Some(key) => key,
            None => {
                let key = self.add_entry();
                *entry = Some(key);
                key
            }
        }
    }

    /// Number of entries allocated so far.
    pub fn entry_count(&self) -> usize {
        usize::try_from(self.next_entry).unwrap_or(0)
    }

    /// All allocated entry keys, ascending.
    pub fn entry_keys(&self) -> impl Iterator<Item = EntryKey> {
        (0..self.next_entry).map(EntryKey::new)
    }

    fn insert_column(&mut self, name: &str, column: Column) -> Result<&mut Column> {
        if !is_valid_attribute_name(name) {
            return Err(AttributeError::InvalidName(name.to_string()));
        }
        if self.has_attribute(name) {
            return Err(AttributeError::AttributeExists(name.to_string()));
        }

        let order = self.next_order;
        self.next_order += 1;
        let slot = self.columns.entry(Arc::from(name)).or_insert(Slot {
            order,
            column: Arc::new(column),
        });
        Ok(Arc::make_mut(&mut slot.column))
    }
}
