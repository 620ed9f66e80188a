//! Spatial collection fixtures.

use attrxfer_core::{AttributeType, Data, SpatialData, Vector3};

/// Unit-box spatial collection with attribute `name` whose default value
/// is `value`.
///
/// # Panics
///
/// Panics if `name` is not a valid attribute name.
pub fn spatial_with_attribute<T: AttributeType>(name: &str, value: T) -> Data {
    let mut data = Data::Spatial(SpatialData::new(Vector3::ZERO, Vector3::ONE));
    data.metadata_mut()
        .expect("metadata")
        .create_attribute(name, value)
        .expect("new attribute");
    data
}
