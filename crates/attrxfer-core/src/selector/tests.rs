use super::*;
use crate::data::{PointData, Point};
use crate::value::{AttributeValue, Transform, ValueType, Vector3};

#[test]
fn test_parse_attribute() {
    let selector = AttributeSelector::parse("Height").unwrap();
    assert_eq!(selector.selection(), &Selection::Attribute(Arc::from("Height")));
    assert!(selector.is_plain_attribute());
    assert_eq!(selector.attribute_name(), Some("Height"));
}

#[test]
fn test_parse_property_with_extras() {
    let selector = AttributeSelector::parse("$Transform.Location.Z").unwrap();
    assert_eq!(
        selector.selection(),
        &Selection::Property(PointProperty::Transform)
    );
    assert_eq!(
        selector.extra_names(),
        &[ExtraAccessor::Location, ExtraAccessor::Z]
    );
    assert!(!selector.is_plain_attribute());
}

#[test]
fn test_parse_index_and_special_names() {
    assert_eq!(AttributeSelector::parse("$index").unwrap(), AttributeSelector::index());
    assert!(AttributeSelector::parse("@last").unwrap().is_last());
    assert!(AttributeSelector::parse("@Source").unwrap().is_source());
}

#[test]
fn test_parse_color_aliases() {
    let selector = AttributeSelector::parse("$Color.A").unwrap();
    assert_eq!(selector.extra_names(), &[ExtraAccessor::W]);
}

#[test]
fn test_parse_errors() {
    for text in ["", "   ", "$Velocity", "@Other", "Height.Q", "bad*name"] {
        assert!(
            matches!(
                AttributeSelector::parse(text),
                Err(AttributeError::InvalidSelector { .. })
            ),
            "{text:?} should not parse"
        );
    }
}

#[test]
fn test_display_matches_parse_syntax() {
    for text in ["Height", "$Position", "$Index", "Offset.X", "$Transform.Rotation.W"] {
        assert_eq!(AttributeSelector::parse(text).unwrap().to_string(), text);
    }
}

#[test]
fn test_fix_last_resolves_latest_attribute() {
    let mut points = PointData::new(vec![Point::default()]);
    let metadata = points.metadata_mut().unwrap();
    metadata.create_attribute("a", 0i32).unwrap();
    metadata.create_attribute("b", 0i32).unwrap();
    let data = Data::Point(points);

    let fixed = AttributeSelector::last().copy_and_fix_last(&data);
    assert_eq!(fixed.attribute_name(), Some("b"));

    let untouched = AttributeSelector::attribute("a").copy_and_fix_last(&data);
    assert_eq!(untouched.attribute_name(), Some("a"));
}

#[test]
fn test_fix_last_without_attributes_stays_unresolved() {
    let data = Data::Point(PointData::new(vec![]));
    assert!(AttributeSelector::last().copy_and_fix_last(&data).is_last());
}

#[test]
fn test_fix_source_copies_source_selection() {
    let data = Data::Point(PointData::new(vec![]));
    let source = AttributeSelector::property(PointProperty::Position);
    let target = AttributeSelector::source().with_extra(ExtraAccessor::X);

    let fixed = target.copy_and_fix_source(&source, &data);
    assert_eq!(fixed.to_string(), "$Position.X");

    let named = AttributeSelector::attribute("Out").copy_and_fix_source(&source, &data);
    assert_eq!(named.attribute_name(), Some("Out"));
}

#[test]
fn test_chain_output_type() {
    assert_eq!(
        chain_output_type(
            ValueType::Transform,
            &[ExtraAccessor::Location, ExtraAccessor::Y]
        ),
        Some(ValueType::F64)
    );
    assert_eq!(chain_output_type(ValueType::F64, &[ExtraAccessor::X]), None);
    assert_eq!(chain_output_type(ValueType::Vector2, &[ExtraAccessor::Z]), None);
}

#[test]
fn test_extra_inject_replaces_part() {
    let transform = AttributeValue::Transform(Transform::from_location(Vector3::new(1.0, 2.0, 3.0)));
    let updated = ExtraAccessor::Location
        .inject(&transform, &AttributeValue::Vector3(Vector3::ZERO))
        .unwrap();
    assert_eq!(updated, AttributeValue::Transform(Transform::IDENTITY));

    assert_eq!(
        ExtraAccessor::Y.extract(&AttributeValue::Vector3(Vector3::new(1.0, 2.0, 3.0))),
        Some(AttributeValue::F64(2.0))
    );
}
