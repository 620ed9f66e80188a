//! Type-erased read/write access to attributes and properties.
//!
//! An accessor reads and writes values of its underlying type through the
//! object-safe [`ConstAccessor`]/[`Accessor`] traits. The generic
//! [`ConstAccessorExt::get_range`] and [`AccessorExt::set_range`] convert
//! between the underlying type and any [`AttributeType`] according to
//! [`AccessorFlags`].

mod attribute;
mod chained;
mod helpers;
mod keys;
mod property;


use bitflags::bitflags;

pub use attribute::{AttributeReader, AttributeWriter};
pub use chained::ChainedAccessor;
pub use helpers::{create_accessor, create_const_accessor, create_const_keys, create_keys};
pub use keys::AccessorKeys;
pub use property::{IndexAccessor, PointPropertyReader, PointPropertyWriter};

use crate::error::{AttributeError, Result};
use crate::value::{AttributeType, AttributeValue, ValueType};

bitflags! {
    /// Conversions permitted by a ranged get or set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AccessorFlags: u8 {
        /// Lossless widening and replication, e.g. scalar to vector.
        const ALLOW_BROADCAST = 1 << 0;
        /// Explicit construction, e.g. narrowing or quaternion to rotator.
        const ALLOW_CONSTRUCTIBLE = 1 << 1;
    }
}

impl AccessorFlags {
    /// Exact type identity only.
    pub const STRICT_TYPE: Self = Self::empty();
}

/// Read access over a key domain.
pub trait ConstAccessor {
    /// Type of the values this accessor natively reads and writes.
    fn underlying_type(&self) -> ValueType;

    fn is_read_only(&self) -> bool;

    /// Reads `out.len()` values starting at key `start`.
    fn get_values(&self, out: &mut [AttributeValue], start: usize, keys: &AccessorKeys) -> Result<()>;
}

/// Read/write access over a key domain.
pub trait Accessor: ConstAccessor {
    /// Writes `values` starting at key `start`. Values must be of the
    /// underlying type.
    fn set_values(
        &mut self,
        values: &[AttributeValue],
        start: usize,
        keys: &mut AccessorKeys,
    ) -> Result<()>;
}

impl<A: ConstAccessor + ?Sized> ConstAccessor for Box<A> {
    fn underlying_type(&self) -> ValueType {
        (**self).underlying_type()
    }

    fn is_read_only(&self) -> bool {
        (**self).is_read_only()
    }

    fn get_values(&self, out: &mut [AttributeValue], start: usize, keys: &AccessorKeys) -> Result<()> {
        (**self).get_values(out, start, keys)
    }
}

impl<A: Accessor + ?Sized> Accessor for Box<A> {
    fn set_values(
        &mut self,
        values: &[AttributeValue],
        start: usize,
        keys: &mut AccessorKeys,
    ) -> Result<()> {
        (**self).set_values(values, start, keys)
    }
}

/// Typed reads on top of [`ConstAccessor`].
pub trait ConstAccessorExt: ConstAccessor {
    /// Reads `out.len()` values starting at `start`, converted to `T`.
    fn get_range<T: AttributeType>(
        &self,
        out: &mut [T],
        start: usize,
        keys: &AccessorKeys,
        flags: AccessorFlags,
    ) -> Result<()> {
        let from = self.underlying_type();
        let mut raw = vec![from.default_value(); out.len()];
        self.get_values(&mut raw, start, keys)?;

        for (slot, value) in out.iter_mut().zip(&raw) {
            *slot = value
                .convert(T::VALUE_TYPE, flags)
                .and_then(|converted| T::from_value(&converted))
                .ok_or(AttributeError::Conversion {
                    from,
                    to: T::VALUE_TYPE,
                })?;
        }
        Ok(())
    }

    /// Reads the single value at `index`.
    fn get<T: AttributeType>(&self, index: usize, keys: &AccessorKeys, flags: AccessorFlags) -> Result<T> {
        let mut out = [T::default()];
        self.get_range(&mut out, index, keys, flags)?;
        let [value] = out;
        Ok(value)
    }
}

impl<A: ConstAccessor + ?Sized> ConstAccessorExt for A {}

/// Typed writes on top of [`Accessor`].
pub trait AccessorExt: Accessor {
    /// Writes `values` starting at `start`, converted to the underlying type.
    fn set_range<T: AttributeType>(
        &mut self,
        values: &[T],
        start: usize,
        keys: &mut AccessorKeys,
        flags: AccessorFlags,
    ) -> Result<()> {
        let to = self.underlying_type();
        let raw = values
            .iter()
            .map(|value| {
                value
                    .clone()
                    .into_value()
                    .convert(to, flags)
                    .ok_or(AttributeError::Conversion {
                        from: T::VALUE_TYPE,
                        to,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        self.set_values(&raw, start, keys)
    }

    /// Writes a single value at `index`.
    fn set<T: AttributeType>(
        &mut self,
        value: T,
        index: usize,
        keys: &mut AccessorKeys,
        flags: AccessorFlags,
    ) -> Result<()> {
        self.set_range(std::slice::from_ref(&value), index, keys, flags)
    }
}

impl<A: Accessor + ?Sized> AccessorExt for A {}
