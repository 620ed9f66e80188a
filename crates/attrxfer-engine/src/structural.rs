//! Column-level copy between plain attributes.
//!
//! Values are shared by value key instead of being read and written one by
//! one, so no conversion takes place: the target column takes the source
//! column's type and default.

use attrxfer_core::{Column, Data, ValueKey};
use tracing::debug;

use crate::error::{CopyAttributeError, Result};
use crate::matching::{match_targets, read_match_keys, MatchedTarget};
use crate::settings::CopyAttributeSettings;
use crate::validate::ValidatedRequest;

fn source_column<'a>(request: &'a ValidatedRequest<'_>) -> Result<&'a Column> {
    let name = request.source_selector.name();
    request
        .source_data()
        .metadata()
        .ok_or(CopyAttributeError::SourceMissingMetadata)?
        .attribute(name)
        .ok_or_else(|| CopyAttributeError::SourceMissingAttribute(name.to_string()))
}

/// Replaces the target attribute with a copy of the source column, entries
/// included. Used when neither side is point-indexed. Returns the number of
/// entries copied.
pub(crate) fn copy_spatial_attribute(request: &ValidatedRequest<'_>, output: &mut Data) -> Result<usize> {
    let column = source_column(request)?;
    let name = request.target_selector.name();
    let metadata = output
        .metadata_mut()
        .ok_or(CopyAttributeError::TargetMissingMetadata)?;

    metadata.delete_attribute(name);
    metadata
        .copy_attribute(column, name, true, true)
        .map_err(|reason| CopyAttributeError::CreateAttribute {
            name: name.to_string(),
            reason,
        })?;

    debug!(event = "structural_copy", kind = "spatial", attribute = name);
    Ok(column.entry_count())
}

/// Replaces the target attribute with the source column's values and
/// relinks every target point to the value of its paired source point.
///
/// Points pair by index, or through [`match_targets`] when matching is
/// enabled. An exact key match always wins over a sticky fallback aimed at
/// the same target. Target points left unpaired read the default value.
/// Returns the number of points.
pub(crate) fn copy_point_attribute(
    request: &ValidatedRequest<'_>,
    settings: &CopyAttributeSettings,
    output: &mut Data,
) -> Result<usize> {
    let column = source_column(request)?;
    let source_points = request
        .source_data()
        .as_point()
        .ok_or(CopyAttributeError::UnsupportedTypes)?
        .points();

    let mapping: Vec<Option<MatchedTarget>> = if settings.match_by_attribute {
        let source_keys = read_match_keys(request.source_data(), &settings.source_match, "source")?;
        let target_keys = read_match_keys(request.target_data(), &settings.target_match, "target")?;
        match_targets(&source_keys, &target_keys, settings.unmatched)
    } else {
        (0..source_points.len())
            .map(|index| Some(MatchedTarget { index, exact: true }))
            .collect()
    };

    // Exact pairs first; a fallback only fills a target no exact pair claimed.
    let mut value_keys: Vec<Option<ValueKey>> = vec![None; source_points.len()];
    let mut claimed = vec![false; source_points.len()];
    for exact_pass in [true, false] {
        for (point, matched) in source_points.iter().zip(&mapping) {
            let Some(matched) = matched.filter(|m| m.exact == exact_pass) else {
                continue;
            };
            let slots = (value_keys.get_mut(matched.index), claimed.get_mut(matched.index));
            if let (Some(slot), Some(taken)) = slots {
                if exact_pass || !*taken {
                    *slot = column.value_key(point.metadata_entry);
                    *taken = exact_pass;
                }
            }
        }
    }

    let name = request.target_selector.name();
    let create_error = |reason| CopyAttributeError::CreateAttribute {
        name: name.to_string(),
        reason,
    };

    let out_points = output
        .as_point_mut()
        .ok_or(CopyAttributeError::UnsupportedTypes)?;
    let metadata = out_points
        .metadata_mut()
        .ok_or(CopyAttributeError::TargetMissingMetadata)?;
    metadata.delete_attribute(name);
    metadata
        .copy_attribute(column, name, false, true)
        .map_err(create_error)?;

    // Entry keys of the two collections are unrelated; every target point
    // gets its own entry and an explicit link.
    out_points.initialize_entries();
    let entries = out_points.entry_keys();
    let target_column = out_points
        .metadata_mut()
        .and_then(|metadata| metadata.attribute_mut(name))
        .ok_or(CopyAttributeError::TargetMissingMetadata)?;
    for (entry, value_key) in entries.into_iter().zip(value_keys) {
        if let Some(entry) = entry {
            target_column
                .set_value_from_value_key(entry, value_key)
                .map_err(create_error)?;
        }
    }

    debug!(
        event = "structural_copy",
        kind = "point",
        attribute = name,
        points = source_points.len(),
        matched = settings.match_by_attribute,
    );
    Ok(source_points.len())
}
