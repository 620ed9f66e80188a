use super::*;
use crate::accessor::AccessorFlags;
use crate::with_value_type;

const ALL_FLAGS: AccessorFlags =
    AccessorFlags::ALLOW_BROADCAST.union(AccessorFlags::ALLOW_CONSTRUCTIBLE);

#[test]
fn test_value_type_round_trip_through_tag() {
    for value_type in ValueType::ALL {
        let value = value_type.default_value();
        assert_eq!(value.value_type(), value_type);
    }
}

#[test]
fn test_get_is_exact() {
    let value = AttributeValue::I32(7);
    assert_eq!(value.get::<i32>(), Some(7));
    assert_eq!(value.get::<i64>(), None);
}

#[test]
fn test_strict_conversion_only_allows_identity() {
    let value = AttributeValue::F32(1.5);
    assert_eq!(
        value.convert(ValueType::F32, AccessorFlags::STRICT_TYPE),
        Some(AttributeValue::F32(1.5))
    );
    assert_eq!(value.convert(ValueType::F64, AccessorFlags::STRICT_TYPE), None);
}

#[test]
fn test_scalar_broadcasts_to_every_vector_component() {
    let value = AttributeValue::F64(2.5);
    assert_eq!(
        value.convert(ValueType::Vector3, AccessorFlags::ALLOW_BROADCAST),
        Some(AttributeValue::Vector3(Vector3::splat(2.5)))
    );
    assert_eq!(
        AttributeValue::I32(3).convert(ValueType::Vector4, AccessorFlags::ALLOW_BROADCAST),
        Some(AttributeValue::Vector4(Vector4::splat(3.0)))
    );
}

#[test]
fn test_vector_extension_fills_zero() {
    let value = AttributeValue::Vector2(Vector2::new(1.0, 2.0));
    assert_eq!(
        value.convert(ValueType::Vector4, AccessorFlags::ALLOW_BROADCAST),
        Some(AttributeValue::Vector4(Vector4::new(1.0, 2.0, 0.0, 0.0)))
    );
}

#[test]
fn test_vector_does_not_shrink() {
    let value = AttributeValue::Vector3(Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(value.convert(ValueType::Vector2, ALL_FLAGS), None);
    assert_eq!(value.convert(ValueType::F64, ALL_FLAGS), None);
}

#[test]
fn test_narrowing_requires_constructible() {
    let value = AttributeValue::I64(42);
    assert_eq!(value.convert(ValueType::I32, AccessorFlags::ALLOW_BROADCAST), None);
    assert_eq!(
        value.convert(ValueType::I32, AccessorFlags::ALLOW_CONSTRUCTIBLE),
        Some(AttributeValue::I32(42))
    );
}

#[test]
fn test_narrowing_out_of_range_fails() {
    let value = AttributeValue::I64(i64::from(i32::MAX) + 1);
    assert_eq!(value.convert(ValueType::I32, ALL_FLAGS), None);
}

#[test]
fn test_float_to_integer_truncates() {
    assert_eq!(
        AttributeValue::F64(-3.75).convert(ValueType::I64, ALL_FLAGS),
        Some(AttributeValue::I64(-3))
    );
}

#[test]
fn test_bool_broadcasts_to_numbers() {
    assert_eq!(
        AttributeValue::Bool(true).convert(ValueType::F32, AccessorFlags::ALLOW_BROADCAST),
        Some(AttributeValue::F32(1.0))
    );
}

#[test]
fn test_name_and_string_are_constructible() {
    let name = AttributeValue::Name(Name::new("tree"));
    assert_eq!(
        name.convert(ValueType::String, AccessorFlags::ALLOW_CONSTRUCTIBLE),
        Some(AttributeValue::String("tree".to_string()))
    );
    assert_eq!(name.convert(ValueType::String, AccessorFlags::ALLOW_BROADCAST), None);
}

#[test]
fn test_rotator_quat_round_trip() {
    let rotator = Rotator::new(30.0, 45.0, -60.0);
    let back = rotator.quaternion().rotator();
    assert!((back.pitch - rotator.pitch).abs() < 1e-9);
    assert!((back.yaw - rotator.yaw).abs() < 1e-9);
    assert!((back.roll - rotator.roll).abs() < 1e-9);
}

#[test]
fn test_quat_broadcasts_into_transform_rotation() {
    let quat = Rotator::new(0.0, 90.0, 0.0).quaternion();
    let converted = AttributeValue::Quat(quat)
        .convert(ValueType::Transform, AccessorFlags::ALLOW_BROADCAST)
        .and_then(|v| v.get::<Transform>())
        .unwrap();
    assert_eq!(converted.rotation, quat);
    assert_eq!(converted.scale, Vector3::ONE);
}

#[test]
fn test_is_convertible() {
    assert!(AttributeValue::is_convertible(
        ValueType::F32,
        ValueType::Vector3,
        AccessorFlags::ALLOW_BROADCAST
    ));
    assert!(!AttributeValue::is_convertible(
        ValueType::String,
        ValueType::F64,
        ALL_FLAGS
    ));
}

#[test]
fn test_with_value_type_dispatches_each_kind() {
    for value_type in ValueType::ALL {
        let tag = with_value_type!(value_type, T => <T as AttributeType>::VALUE_TYPE);
        assert_eq!(tag, value_type);
    }
}
