//! Accessors over attribute store columns.

use std::sync::Arc;

use super::{Accessor, AccessorKeys, ConstAccessor};
use crate::data::Point;
use crate::error::{AttributeError, Result};
use crate::metadata::{AttributeStore, Column};
use crate::value::{AttributeValue, ValueType};

/// Reads a column through entry keys.
pub struct AttributeReader<'a> {
    name: Arc<str>,
    column: &'a Column,
}

impl<'a> AttributeReader<'a> {
    /// Returns `None` if the attribute does not exist.
    pub fn new(store: &'a AttributeStore, name: &str) -> Option<Self> {
        store.attribute(name).map(|column| Self {
            name: Arc::from(name),
            column,
        })
    }
}

impl ConstAccessor for AttributeReader<'_> {
    fn underlying_type(&self) -> ValueType {
        self.column.value_type()
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn get_values(&self, out: &mut [AttributeValue], start: usize, keys: &AccessorKeys) -> Result<()> {
        read_column(self.column, &self.name, out, start, keys)
    }
}

/// Reads and writes a column.
///
/// For point collections, points without an entry get one allocated on
/// first write and stamped on both the keys and the point. Writes through
/// a `None` entry of a non-point collection set the default value.
pub struct AttributeWriter<'a> {
    name: Arc<str>,
    value_type: ValueType,
    store: &'a mut AttributeStore,
    points: Option<&'a mut Arc<Vec<Point>>>,
}

impl<'a> AttributeWriter<'a> {
    /// Returns `None` if the attribute does not exist.
    pub fn new(
        store: &'a mut AttributeStore,
        points: Option<&'a mut Arc<Vec<Point>>>,
        name: &str,
    ) -> Option<Self> {
        let value_type = store.attribute(name)?.value_type();
        Some(Self {
            name: Arc::from(name),
            value_type,
            store,
            points,
        })
    }

    fn column_mut(&mut self) -> Result<&mut Column> {
        self.store
            .attribute_mut(&self.name)
            .ok_or_else(|| AttributeError::MissingAttribute(self.name.to_string()))
    }
}

impl ConstAccessor for AttributeWriter<'_> {
    fn underlying_type(&self) -> ValueType {
        self.value_type
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn get_values(&self, out: &mut [AttributeValue], start: usize, keys: &AccessorKeys) -> Result<()> {
        let column = self
            .store
            .attribute(&self.name)
            .ok_or_else(|| AttributeError::MissingAttribute(self.name.to_string()))?;
        read_column(column, &self.name, out, start, keys)
    }
}

impl Accessor for AttributeWriter<'_> {
    fn set_values(
        &mut self,
        values: &[AttributeValue],
        start: usize,
        keys: &mut AccessorKeys,
    ) -> Result<()> {
        keys.check_range(start, values.len())?;
        if let Some(value) = values.iter().find(|v| v.value_type() != self.value_type) {
            return Err(AttributeError::TypeMismatch {
                expected: self.value_type,
                found: value.value_type(),
            });
        }

        match keys {
            AccessorKeys::Points(entries) => {
                for (offset, value) in values.iter().enumerate() {
                    let index = start + offset;
                    let slot = &mut entries[index];
                    let entry = match *slot {
                        Some(entry) => entry,
                        None => {
                            let entry = self.store.initialize_on_set(slot);
                            if let Some(point) = self
                                .points
                                .as_mut()
                                .and_then(|points| Arc::make_mut(points).get_mut(index))
                            {
                                point.metadata_entry = Some(entry);
                            }
                            entry
                        }
                    };
                    self.column_mut()?.set_value(entry, value.clone())?;
                }
                Ok(())
            }
            AccessorKeys::Entries(entries) => {
                for (offset, value) in values.iter().enumerate() {
                    let column = self.column_mut()?;
                    match entries[start + offset] {
                        Some(entry) => column.set_value(entry, value.clone())?,
                        None => column.set_default_value(value.clone())?,
                    }
                }
                Ok(())
            }
            AccessorKeys::Indices(_) => Err(AttributeError::IncompatibleKeys(self.name.to_string())),
        }
    }
}

fn read_column(
    column: &Column,
    name: &str,
    out: &mut [AttributeValue],
    start: usize,
    keys: &AccessorKeys,
) -> Result<()> {
    keys.check_range(start, out.len())?;
    if matches!(keys, AccessorKeys::Indices(_)) {
        return Err(AttributeError::IncompatibleKeys(name.to_string()));
    }

    for (offset, slot) in out.iter_mut().enumerate() {
        let entry = keys.entry(start + offset).flatten();
        *slot = column.value(entry).clone();
    }
    Ok(())
}
