//! Match-by-value join between source and target records.

use attrxfer_config::UnmatchedPolicy;
use attrxfer_core::{
    create_const_accessor, create_const_keys, AccessorFlags, AttributeSelector, ConstAccessorExt,
    Data,
};
use tracing::debug;

use crate::error::{CopyAttributeError, Result};

/// Reads one integral match key per record of `data`.
///
/// Keys of other numeric types are converted; values that do not fit are
/// an error, as is a selector that does not resolve on `data`.
pub fn read_match_keys(
    data: &Data,
    selector: &AttributeSelector,
    side: &'static str,
) -> Result<Vec<i64>> {
    let selector = selector.copy_and_fix_last(data);
    let failure = |reason: String| CopyAttributeError::MatchKey {
        side,
        selector: selector.display_text(),
        reason,
    };

    let accessor = create_const_accessor(data, &selector)
        .ok_or_else(|| failure("selector does not resolve".to_string()))?;
    let keys = create_const_keys(data, &selector)
        .ok_or_else(|| failure("selector has no keys".to_string()))?;

    let mut values = vec![0i64; keys.len()];
    accessor
        .get_range(
            &mut values,
            0,
            &keys,
            AccessorFlags::ALLOW_BROADCAST | AccessorFlags::ALLOW_CONSTRUCTIBLE,
        )
        .map_err(|err| failure(err.to_string()))?;
    Ok(values)
}

/// Target record chosen for one source record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedTarget {
    pub index: usize,
    /// False when the target was picked by the sticky fallback rather than
    /// by an equal key.
    pub exact: bool,
}

/// Pairs every source record with a target record holding the same key.
///
/// Entry `i` of the result is the target record paired with source record
/// `i`. Both sides are walked in ascending key order, so equal keys pair up
/// in record order and each target record is consumed at most once by an
/// exact match. A source key with no remaining equal target key gets the
/// most recently matched target under [`UnmatchedPolicy::Sticky`] and
/// `None` under [`UnmatchedPolicy::Skip`]. Before any match, or with no
/// target records, it is always `None`.
///
/// # Examples
///
/// ```
/// use attrxfer_config::UnmatchedPolicy;
/// use attrxfer_engine::match_indices;
///
/// let mapping = match_indices(&[5, 3, 3, 8], &[3, 8, 3, 5], UnmatchedPolicy::Sticky);
/// assert_eq!(mapping, vec![Some(3), Some(0), Some(2), Some(1)]);
/// ```
pub fn match_indices(source_keys: &[i64], target_keys: &[i64], policy: UnmatchedPolicy) -> Vec<Option<usize>> {
    match_targets(source_keys, target_keys, policy)
        .into_iter()
        .map(|matched| matched.map(|m| m.index))
        .collect()
}

/// Same pairing as [`match_indices`], also telling exact matches apart from
/// sticky fallbacks.
pub fn match_targets(
    source_keys: &[i64],
    target_keys: &[i64],
    policy: UnmatchedPolicy,
) -> Vec<Option<MatchedTarget>> {
    let target = sorted_pairs(target_keys);
    let source = sorted_pairs(source_keys);

    let mut mapping = vec![None; source_keys.len()];
    // Next unconsumed position in `target`.
    let mut cursor = 0;
    let mut last_match: Option<usize> = None;
    let mut unmatched = 0usize;

    for &(key, source_index) in &source {
        let found = target[cursor..]
            .iter()
            .take_while(|(target_key, _)| *target_key <= key)
            .position(|(target_key, _)| *target_key == key)
            .map(|offset| cursor + offset);

        mapping[source_index] = match found {
            Some(position) => {
                cursor = position + 1;
                last_match = Some(target[position].1);
                last_match.map(|index| MatchedTarget { index, exact: true })
            }
            None => {
                unmatched += 1;
                match policy {
                    UnmatchedPolicy::Sticky => {
                        last_match.map(|index| MatchedTarget { index, exact: false })
                    }
                    UnmatchedPolicy::Skip => None,
                }
            }
        };
    }

    debug!(
        event = "match_complete",
        source_count = source_keys.len(),
        target_count = target_keys.len(),
        unmatched = unmatched,
    );
    mapping
}

/// `(key, index)` pairs ordered by key; equal keys keep record order.
fn sorted_pairs(keys: &[i64]) -> Vec<(i64, usize)> {
    let mut pairs: Vec<_> = keys.iter().copied().zip(0..).collect();
    pairs.sort_by_key(|&(key, _)| key);
    pairs
}
