//! A single typed attribute column.

use std::collections::HashMap;

use super::EntryKey;
use crate::error::{AttributeError, Result};
use crate::value::{AttributeValue, ValueType};

/// Index into a column's value array.
pub type ValueKey = usize;

/// Named attribute storage: a typed value array plus the mapping from entry
/// keys to value slots.
///
/// Entries without a mapping read the default value. All stored values,
/// including the default, have the column's value type.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    value_type: ValueType,
    default_value: AttributeValue,
    values: Vec<AttributeValue>,
    entries: HashMap<EntryKey, ValueKey>,
}

impl Column {
    /// Creates an empty column whose type is taken from `default_value`.
    pub fn new(default_value: AttributeValue) -> Self {
        Self {
            value_type: default_value.value_type(),
            default_value,
            values: Vec::new(),
            entries: HashMap::new(),
        }
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn default_value(&self) -> &AttributeValue {
        &self.default_value
    }

    /// Number of stored values, excluding the default.
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// Number of entries that map to a stored value.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Value slot for an entry, or `None` when it reads the default.
    pub fn value_key(&self, entry: Option<EntryKey>) -> Option<ValueKey> {
        entry.and_then(|key| self.entries.get(&key).copied())
    }

    /// Value for an entry; missing entries read the default.
    pub fn value(&self, entry: Option<EntryKey>) -> &AttributeValue {
        self.value_from_value_key(self.value_key(entry))
    }

    pub fn value_from_value_key(&self, value_key: Option<ValueKey>) -> &AttributeValue {
        value_key
            .and_then(|key| self.values.get(key))
            .unwrap_or(&self.default_value)
    }

    pub fn set_default_value(&mut self, value: AttributeValue) -> Result<()> {
        self.check_type(&value)?;
        self.default_value = value;
        Ok(())
    }

    /// Stores `value` for `entry`, replacing any previous mapping.
    pub fn set_value(&mut self, entry: EntryKey, value: AttributeValue) -> Result<()> {
        self.check_type(&value)?;
        let value_key = self.values.len();
        self.values.push(value);
        self.entries.insert(entry, value_key);
        Ok(())
    }

    /// Points `entry` at an existing value slot of this column.
    ///
    /// `None` drops the mapping so the entry reads the default value.
    pub fn set_value_from_value_key(
        &mut self,
        entry: EntryKey,
        value_key: Option<ValueKey>,
    ) -> Result<()> {
        match value_key {
            Some(key) if key >= self.values.len() => Err(AttributeError::InvalidValueKey(key)),
            Some(key) => {
                self.entries.insert(entry, key);
                Ok(())
            }
            None => {
                self.entries.remove(&entry);
                Ok(())
            }
        }
    }

    /// Entry keys mapped to a value, in ascending order.
    pub fn entries(&self) -> Vec<EntryKey> {
        let mut keys: Vec<_> = self.entries.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Returns a column with the same type and default value, optionally
    /// carrying over stored values and entry mappings.
    ///
    /// Entries without values would dangle, so copying entries implies
    /// copying values.
    pub fn duplicate(&self, copy_entries: bool, copy_values: bool) -> Column {
        Column {
            value_type: self.value_type,
            default_value: self.default_value.clone(),
            values: if copy_values || copy_entries {
                self.values.clone()
            } else {
                Vec::new()
            },
            entries: if copy_entries {
                self.entries.clone()
            } else {
                HashMap::new()
            },
        }
    }

    /// Drops every stored value and entry mapping.
    pub fn reset(&mut self, default_value: AttributeValue) -> Result<()> {
        self.check_type(&default_value)?;
        self.default_value = default_value;
        self.values.clear();
        self.entries.clear();
        Ok(())
    }

    fn check_type(&self, value: &AttributeValue) -> Result<()> {
        if value.value_type() == self.value_type {
            Ok(())
        } else {
            Err(AttributeError::TypeMismatch {
                expected: self.value_type,
                found: value.value_type(),
            })
        }
    }
}
