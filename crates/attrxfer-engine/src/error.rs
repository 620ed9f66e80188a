//! Errors of a copy request.

use attrxfer_core::AttributeError;
use thiserror::Error;

use crate::context::Severity;

/// Reason a copy request produced no output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CopyAttributeError {
    #[error(
        "Source input contains {source_count} data elements, Target input contains {target_count} data elements, but both should contain precisely 1 data element"
    )]
    Arity {
        source_count: usize,
        target_count: usize,
    },

    #[error("Only supports Spatial to Spatial data or Point to Point data")]
    UnsupportedTypes,

    #[error("Source and target do not have the same number of points ({source_count} vs {target_count})")]
    PointCountMismatch {
        source_count: usize,
        target_count: usize,
    },

    #[error("Source does not have metadata")]
    SourceMissingMetadata,

    #[error("Target does not have metadata")]
    TargetMissingMetadata,

    #[error("Source does not have the attribute '{0}'")]
    SourceMissingAttribute(String),

    #[error("Error while creating target attribute '{name}': {reason}")]
    CreateAttribute { name: String, reason: AttributeError },

    #[error("Failed to read {side} match key '{selector}': {reason}")]
    MatchKey {
        side: &'static str,
        selector: String,
        reason: String,
    },

    #[error("Failed to create input accessor or iterator for '{0}'")]
    InputAccessor(String),

    #[error("Failed to create output accessor or iterator for '{0}'")]
    OutputAccessor(String),

    #[error("Attribute/Property '{0}' is read only")]
    ReadOnlyTarget(String),

    #[error("Source attribute/property cannot be converted to target attribute/property: {0}")]
    Conversion(AttributeError),
}

impl CopyAttributeError {
    /// Wrong input counts only warn; everything else is an error.
    pub fn severity(&self) -> Severity {
        match self {
            CopyAttributeError::Arity { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

pub type Result<T> = std::result::Result<T, CopyAttributeError>;
