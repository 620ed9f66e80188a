//! Input checks and selector resolution ahead of any write.

use attrxfer_core::{AttributeSelector, Data, Selection};

use crate::context::{ExecutionContext, TaggedData};
use crate::error::{CopyAttributeError, Result};
use crate::settings::CopyAttributeSettings;

/// Inputs and resolved selectors of a request that passed validation.
#[derive(Debug)]
pub(crate) struct ValidatedRequest<'a> {
    pub source: &'a TaggedData,
    pub target: &'a TaggedData,
    pub is_point: bool,
    pub source_selector: AttributeSelector,
    pub target_selector: AttributeSelector,
}

impl ValidatedRequest<'_> {
    pub fn source_data(&self) -> &Data {
        &self.source.data
    }

    pub fn target_data(&self) -> &Data {
        &self.target.data
    }
}

pub(crate) fn validate<'a>(
    settings: &CopyAttributeSettings,
    context: &'a ExecutionContext,
) -> Result<ValidatedRequest<'a>> {
    let sources = context.inputs_by_pin(&settings.pins.source);
    let targets = context.inputs_by_pin(&settings.pins.target);
    let (source, target) = match (sources.as_slice(), targets.as_slice()) {
        ([source], [target]) => (*source, *target),
        _ => {
            return Err(CopyAttributeError::Arity {
                source_count: sources.len(),
                target_count: targets.len(),
            })
        }
    };

    let source_type = source.data.data_type();
    let target_type = target.data.data_type();
    if !source_type.is_spatial()
        || !target_type.is_spatial()
        || source_type.is_point() != target_type.is_point()
    {
        return Err(CopyAttributeError::UnsupportedTypes);
    }

    let is_point = source_type.is_point();
    if let (Some(source_points), Some(target_points)) = (source.data.as_point(), target.data.as_point()) {
        if source_points.len() != target_points.len() {
            return Err(CopyAttributeError::PointCountMismatch {
                source_count: source_points.len(),
                target_count: target_points.len(),
            });
        }
    }

    let metadata = source
        .data
        .metadata()
        .ok_or(CopyAttributeError::SourceMissingMetadata)?;

    let source_selector = settings.source.copy_and_fix_last(&source.data);
    let target_selector = settings.target.copy_and_fix_source(&settings.source, &source.data);

    if let Selection::Attribute(name) = source_selector.selection() {
        if !metadata.has_attribute(name) {
            return Err(CopyAttributeError::SourceMissingAttribute(name.to_string()));
        }
    }

    Ok(ValidatedRequest {
        source,
        target,
        is_point,
        source_selector,
        target_selector,
    })
}
