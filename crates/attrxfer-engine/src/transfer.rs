//! Chunked get/set loop for selectors the structural path cannot handle.

use attrxfer_core::{
    create_accessor, create_const_accessor, create_const_keys, create_keys, with_value_type,
    Accessor, AccessorExt, AccessorFlags, AccessorKeys, AttributeSelector, AttributeType,
    ConstAccessor, ConstAccessorExt, Data,
};
use smallvec::SmallVec;
use tracing::debug;

use crate::error::{CopyAttributeError, Result};

/// Values kept inline before a chunk buffer spills to the heap.
const INLINE_VALUES: usize = 16;

/// Conversions permitted between source and target values.
const TRANSFER_FLAGS: AccessorFlags =
    AccessorFlags::ALLOW_BROADCAST.union(AccessorFlags::ALLOW_CONSTRUCTIBLE);

/// Copies `source_selector` on `source` into `target_selector` on `output`.
///
/// A plain target attribute missing on `output` is created with the source's
/// type first. Returns the number of records written; on error `output` may
/// be partially written and must be discarded.
pub(crate) fn transfer(
    source: &Data,
    source_selector: &AttributeSelector,
    output: &mut Data,
    target_selector: &AttributeSelector,
    chunk_size: usize,
) -> Result<usize> {
    let input_error = || CopyAttributeError::InputAccessor(source_selector.display_text());
    let output_error = || CopyAttributeError::OutputAccessor(target_selector.display_text());

    let input = create_const_accessor(source, source_selector).ok_or_else(input_error)?;
    let input_keys = create_const_keys(source, source_selector).ok_or_else(input_error)?;

    if let Some(name) = target_selector
        .attribute_name()
        .filter(|_| target_selector.is_plain_attribute())
    {
        let metadata = output
            .metadata_mut()
            .ok_or(CopyAttributeError::TargetMissingMetadata)?;
        if !metadata.has_attribute(name) {
            let value_type = input.underlying_type();
            with_value_type!(value_type, T => metadata
                .clear_or_create_attribute::<T>(name, T::default())
                .map(|_| ()))
            .map_err(|reason| CopyAttributeError::CreateAttribute {
                name: name.to_string(),
                reason,
            })?;
            debug!(event = "attribute_created", name = name, value_type = %value_type);
        }
    }

    let mut output_keys = create_keys(output, target_selector).ok_or_else(output_error)?;
    let mut accessor = create_accessor(output, target_selector).ok_or_else(output_error)?;
    if accessor.is_read_only() {
        return Err(CopyAttributeError::ReadOnlyTarget(target_selector.display_text()));
    }

    let chunk_size = chunk_size.max(1);
    with_value_type!(accessor.underlying_type(), T => copy_chunks::<T, _, _>(
        &*input,
        &input_keys,
        &mut *accessor,
        &mut output_keys,
        chunk_size,
    ))
}

/// Moves every record of `output_keys` in batches of `chunk_size`.
fn copy_chunks<T, I, O>(
    input: &I,
    input_keys: &AccessorKeys,
    output: &mut O,
    output_keys: &mut AccessorKeys,
    chunk_size: usize,
) -> Result<usize>
where
    T: AttributeType,
    I: ConstAccessor + ?Sized,
    O: Accessor + ?Sized,
{
    let count = output_keys.len();
    let mut buffer: SmallVec<[T; INLINE_VALUES]> = SmallVec::new();

    for start in (0..count).step_by(chunk_size) {
        let len = chunk_size.min(count - start);
        buffer.clear();
        buffer.resize(len, T::default());

        input
            .get_range(&mut buffer, start, input_keys, TRANSFER_FLAGS)
            .map_err(CopyAttributeError::Conversion)?;
        output
            .set_range(&buffer, start, output_keys, TRANSFER_FLAGS)
            .map_err(CopyAttributeError::Conversion)?;
    }

    debug!(event = "transfer_complete", records = count, chunk_size = chunk_size);
    Ok(count)
}
