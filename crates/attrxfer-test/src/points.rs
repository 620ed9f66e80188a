//! Point collection fixtures.
//!
//! # Example
//!
//! ```
//! use attrxfer_test::points::{attribute_values, points_with_attribute};
//!
//! let data = points_with_attribute("height", &[1.0f64, 2.0, 3.0]);
//! assert_eq!(attribute_values::<f64>(&data, "height"), vec![1.0, 2.0, 3.0]);
//! ```

use attrxfer_core::{
    create_const_accessor, create_const_keys, AccessorFlags, AttributeSelector, AttributeType,
    ConstAccessorExt, Data, Point, PointData, Vector3,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Points along the X axis, one per value, each with its own entry and
/// `name` set to the matching value. The attribute default is `T::default()`.
pub fn points_with_attribute<T: AttributeType>(name: &str, values: &[T]) -> Data {
    let points = (0..values.len())
        .map(|i| Point::at(Vector3::new(i as f64, 0.0, 0.0)).with_seed(i as i32))
        .collect();
    let mut data = Data::Point(PointData::new(points));
    add_attribute(&mut data, name, values);
    data
}

/// Adds attribute `name` to a point collection, assigning `values` in point
/// order. Points without an entry get one.
///
/// # Panics
///
/// Panics if `data` is not a point collection with metadata, if the
/// attribute exists, or if the value count differs from the point count.
pub fn add_attribute<T: AttributeType>(data: &mut Data, name: &str, values: &[T]) {
    let points = data.as_point_mut().expect("point data");
    assert_eq!(points.len(), values.len(), "one value per point");
    points.initialize_entries();

    let keys = points.entry_keys();
    let column = points
        .metadata_mut()
        .expect("metadata")
        .create_attribute(name, T::default())
        .expect("new attribute");
    for (key, value) in keys.into_iter().zip(values) {
        column
            .set_value(key.expect("entry"), value.clone().into_value())
            .expect("value of the attribute type");
    }
}

/// Values of attribute `name` in point order, read without conversion.
///
/// # Panics
///
/// Panics if the attribute is missing or not of type `T`.
pub fn attribute_values<T: AttributeType>(data: &Data, name: &str) -> Vec<T> {
    let selector = AttributeSelector::attribute(name);
    let accessor = create_const_accessor(data, &selector).expect("attribute accessor");
    let keys = create_const_keys(data, &selector).expect("attribute keys");

    let mut out = vec![T::default(); keys.len()];
    accessor
        .get_range(&mut out, 0, &keys, AccessorFlags::STRICT_TYPE)
        .expect("values of the requested type");
    out
}

/// Reproducible points with random locations, densities and seeds.
pub fn random_points(count: usize, seed: u64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let location = Vector3::new(
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
                rng.random_range(0.0..50.0),
            );
            Point::at(location)
                .with_density(rng.random_range(0.0..1.0))
                .with_seed(rng.random_range(0..10_000))
        })
        .collect()
}
