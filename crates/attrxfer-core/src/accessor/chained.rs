//! Accessor applying an extra accessor chain on top of another accessor.

use super::{Accessor, AccessorKeys, ConstAccessor};
use crate::error::{AttributeError, Result};
use crate::selector::{chain_output_type, ExtraAccessor};
use crate::value::{AttributeValue, ValueType};

/// Reads (and writes back) a part of the values of an inner accessor,
/// e.g. the `Z` component of `$Position`.
pub struct ChainedAccessor<A> {
    inner: A,
    chain: Vec<ExtraAccessor>,
    output_type: ValueType,
}

impl<A: ConstAccessor> ChainedAccessor<A> {
    /// Returns `None` when the chain does not apply to the inner type.
    pub fn new(inner: A, chain: Vec<ExtraAccessor>) -> Option<Self> {
        let output_type = chain_output_type(inner.underlying_type(), &chain)?;
        Some(Self {
            inner,
            chain,
            output_type,
        })
    }

    fn read_inner(&self, count: usize, start: usize, keys: &AccessorKeys) -> Result<Vec<AttributeValue>> {
        let mut values = vec![self.inner.underlying_type().default_value(); count];
        self.inner.get_values(&mut values, start, keys)?;
        Ok(values)
    }

    fn extract(&self, value: &AttributeValue) -> Result<AttributeValue> {
        self.chain
            .iter()
            .try_fold(value.clone(), |current, extra| extra.extract(&current))
            .ok_or(AttributeError::Conversion {
                from: self.inner.underlying_type(),
                to: self.output_type,
            })
    }

    /// Replaces the chained part of `container` with `part`.
    fn inject(&self, container: &AttributeValue, part: &AttributeValue) -> Result<AttributeValue> {
        let conversion = || AttributeError::Conversion {
            from: self.output_type,
            to: self.inner.underlying_type(),
        };

        // Intermediate values from the container down to the last link's input.
        let mut levels = Vec::with_capacity(self.chain.len());
        let mut current = container.clone();
        for extra in &self.chain[..self.chain.len().saturating_sub(1)] {
            let next = extra.extract(&current).ok_or_else(conversion)?;
            levels.push(current);
            current = next;
        }
        levels.push(current);

        let mut updated = part.clone();
        for (extra, level) in self.chain.iter().zip(levels).rev() {
            updated = extra.inject(&level, &updated).ok_or_else(conversion)?;
        }
        Ok(updated)
    }
}

impl<A: ConstAccessor> ConstAccessor for ChainedAccessor<A> {
    fn underlying_type(&self) -> ValueType {
        self.output_type
    }

    fn is_read_only(&self) -> bool {
        self.inner.is_read_only() || self.chain.iter().any(ExtraAccessor::is_read_only)
    }

    fn get_values(&self, out: &mut [AttributeValue], start: usize, keys: &AccessorKeys) -> Result<()> {
        let values = self.read_inner(out.len(), start, keys)?;
        for (slot, value) in out.iter_mut().zip(&values) {
            *slot = self.extract(value)?;
        }
        Ok(())
    }
}

impl<A: Accessor> Accessor for ChainedAccessor<A> {
    fn set_values(
        &mut self,
        values: &[AttributeValue],
        start: usize,
        keys: &mut AccessorKeys,
    ) -> Result<()> {
        if let Some(extra) = self.chain.iter().find(|extra| extra.is_read_only()) {
            return Err(AttributeError::ReadOnly(extra.name().to_string()));
        }
        if let Some(value) = values.iter().find(|v| v.value_type() != self.output_type) {
            return Err(AttributeError::TypeMismatch {
                expected: self.output_type,
                found: value.value_type(),
            });
        }

        let containers = self.read_inner(values.len(), start, keys)?;
        let updated = containers
            .iter()
            .zip(values)
            .map(|(container, part)| self.inject(container, part))
            .collect::<Result<Vec<_>>>()?;
        self.inner.set_values(&updated, start, keys)
    }
}
