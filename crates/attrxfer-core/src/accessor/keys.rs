//! Iteration domains for accessors.

use crate::error::{AttributeError, Result};
use crate::metadata::EntryKey;

/// Ordered record identities an accessor reads from or writes to.
///
/// The length is fixed at creation; writes may fill in missing entry keys
/// but never add or remove keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessorKeys {
    /// One slot per point, in point order. `None` slots get an entry
    /// allocated on first write.
    Points(Vec<Option<EntryKey>>),
    /// Rows of a store without records. `None` addresses the default value.
    Entries(Vec<Option<EntryKey>>),
    /// Plain record indices `0..n`.
    Indices(usize),
}

impl AccessorKeys {
    pub fn len(&self) -> usize {
        match self {
            AccessorKeys::Points(keys) | AccessorKeys::Entries(keys) => keys.len(),
            AccessorKeys::Indices(count) => *count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry key at `index` for entry-based domains.
    pub fn entry(&self, index: usize) -> Option<Option<EntryKey>> {
        match self {
            AccessorKeys::Points(keys) | AccessorKeys::Entries(keys) => keys.get(index).copied(),
            AccessorKeys::Indices(_) => None,
        }
    }

    /// Fails unless `start..start + count` lies within the domain.
    pub fn check_range(&self, start: usize, count: usize) -> Result<()> {
        let len = self.len();
        match start.checked_add(count) {
            Some(end) if end <= len => Ok(()),
            _ => Err(AttributeError::OutOfRange {
                start,
                end: start.saturating_add(count),
                len,
            }),
        }
    }
}
