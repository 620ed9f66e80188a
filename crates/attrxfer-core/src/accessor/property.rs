//! Accessors over point properties and derived extra properties.

use std::sync::Arc;

use super::{Accessor, AccessorKeys, ConstAccessor};
use crate::data::{Point, PointProperty};
use crate::error::{AttributeError, Result};
use crate::value::{AttributeValue, ValueType};

/// Point properties are addressed by index; the domain must cover exactly
/// the points.
fn check_indices(points: usize, keys: &AccessorKeys, property: PointProperty) -> Result<()> {
    match keys {
        AccessorKeys::Indices(count) if *count == points => Ok(()),
        _ => Err(AttributeError::IncompatibleKeys(property.name().to_string())),
    }
}

/// Reads a property of every point.
pub struct PointPropertyReader<'a> {
    points: &'a [Point],
    property: PointProperty,
}

impl<'a> PointPropertyReader<'a> {
    pub fn new(points: &'a [Point], property: PointProperty) -> Self {
        Self { points, property }
    }
}

impl ConstAccessor for PointPropertyReader<'_> {
    fn underlying_type(&self) -> ValueType {
        self.property.value_type()
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn get_values(&self, out: &mut [AttributeValue], start: usize, keys: &AccessorKeys) -> Result<()> {
        check_indices(self.points.len(), keys, self.property)?;
        keys.check_range(start, out.len())?;
        for (slot, point) in out.iter_mut().zip(&self.points[start..]) {
            *slot = self.property.get(point);
        }
        Ok(())
    }
}

/// Reads and writes a property of every point. Points are copied on the
/// first write if shared.
pub struct PointPropertyWriter<'a> {
    points: &'a mut Arc<Vec<Point>>,
    property: PointProperty,
}

impl<'a> PointPropertyWriter<'a> {
    pub fn new(points: &'a mut Arc<Vec<Point>>, property: PointProperty) -> Self {
        Self { points, property }
    }
}

impl ConstAccessor for PointPropertyWriter<'_> {
    fn underlying_type(&self) -> ValueType {
        self.property.value_type()
    }

    fn is_read_only(&self) -> bool {
        self.property.is_read_only()
    }

    fn get_values(&self, out: &mut [AttributeValue], start: usize, keys: &AccessorKeys) -> Result<()> {
        PointPropertyReader::new(self.points.as_slice(), self.property).get_values(out, start, keys)
    }
}

impl Accessor for PointPropertyWriter<'_> {
    fn set_values(
        &mut self,
        values: &[AttributeValue],
        start: usize,
        keys: &mut AccessorKeys,
    ) -> Result<()> {
        if self.property.is_read_only() {
            return Err(AttributeError::ReadOnly(format!("${}", self.property)));
        }
        check_indices(self.points.len(), keys, self.property)?;
        keys.check_range(start, values.len())?;

        let expected = self.property.value_type();
        let points = Arc::make_mut(self.points);
        for (point, value) in points[start..].iter_mut().zip(values) {
            if !self.property.set(point, value) {
                return Err(AttributeError::TypeMismatch {
                    expected,
                    found: value.value_type(),
                });
            }
        }
        Ok(())
    }
}

/// Position of each key in its domain. Read-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexAccessor;

impl ConstAccessor for IndexAccessor {
    fn underlying_type(&self) -> ValueType {
        ValueType::I32
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn get_values(&self, out: &mut [AttributeValue], start: usize, keys: &AccessorKeys) -> Result<()> {
        keys.check_range(start, out.len())?;
        let end = start + out.len();
        for (offset, slot) in out.iter_mut().enumerate() {
            let index = i32::try_from(start + offset).map_err(|_| AttributeError::OutOfRange {
                start,
                end,
                len: keys.len(),
            })?;
            *slot = AttributeValue::I32(index);
        }
        Ok(())
    }
}

impl Accessor for IndexAccessor {
    fn set_values(&mut self, _: &[AttributeValue], _: usize, _: &mut AccessorKeys) -> Result<()> {
        Err(AttributeError::ReadOnly("$Index".to_string()))
    }
}
