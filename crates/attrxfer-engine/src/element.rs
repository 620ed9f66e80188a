//! Entry point of a copy request.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::context::{ExecutionContext, Severity, TaggedData};
use crate::error::Result;
use crate::settings::CopyAttributeSettings;
use crate::validate::validate;
use crate::{structural, transfer};

/// Copies one attribute or property from the source input into a duplicate
/// of the target input.
///
/// Plain attribute to plain attribute copies move whole columns. Any other
/// combination goes through the chunked accessor loop with broadcasting and
/// construction allowed. Matching by value only applies to the column path
/// between point collections.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyAttributeElement;

impl CopyAttributeElement {
    pub fn new() -> Self {
        Self
    }

    /// Runs the request and records its outcome on `context`: the output
    /// collection on success, a diagnostic otherwise.
    ///
    /// Returns whether an output was produced.
    pub fn execute(&self, settings: &CopyAttributeSettings, context: &mut ExecutionContext) -> bool {
        match self.run(settings, context) {
            Ok(output) => {
                context.push_output(output);
                true
            }
            Err(err) => {
                let severity = err.severity();
                match severity {
                    Severity::Warning => warn!(event = "copy_skipped", task = %settings.task_name(), reason = %err),
                    Severity::Error => error!(event = "copy_failed", task = %settings.task_name(), reason = %err),
                }
                context.report(severity, err.to_string());
                false
            }
        }
    }

    /// Runs the request without touching `context`.
    ///
    /// The target input is never modified; all writes land on a duplicate,
    /// which is returned on the output pin with the target's tags.
    pub fn run(&self, settings: &CopyAttributeSettings, context: &ExecutionContext) -> Result<TaggedData> {
        let started = Instant::now();
        let request = validate(settings, context)?;

        info!(
            event = "copy_start",
            task = %settings.task_name(),
            source_selector = %request.source_selector,
            target_selector = %request.target_selector,
            point_data = request.is_point,
            match_by_attribute = settings.match_by_attribute,
        );

        let mut output = request.target_data().duplicate();
        let structural = request.source_selector.is_plain_attribute()
            && request.target_selector.is_plain_attribute();

        if settings.match_by_attribute && !(structural && request.is_point) {
            warn!(
                event = "match_ignored",
                reason = "matching applies to attribute to attribute copies between points only",
            );
        }

        let records = if structural {
            let same_attribute = request.source_selector.name() == request.target_selector.name();
            if request.source.same_data(request.target) && same_attribute {
                debug!(event = "copy_noop", reason = "self_copy");
                0
            } else if request.is_point {
                structural::copy_point_attribute(&request, settings, &mut output)?
            } else {
                structural::copy_spatial_attribute(&request, &mut output)?
            }
        } else {
            transfer::transfer(
                request.source_data(),
                &request.source_selector,
                &mut output,
                &request.target_selector,
                settings.chunk_size,
            )?
        };

        info!(
            event = "copy_end",
            task = %settings.task_name(),
            records = records as u64,
            duration_ms = started.elapsed().as_millis() as u64,
        );

        Ok(TaggedData {
            data: Arc::new(output),
            pin: settings.pins.output.clone(),
            tags: request.target.tags.clone(),
        })
    }
}
