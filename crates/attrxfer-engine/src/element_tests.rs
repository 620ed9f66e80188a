//! Tests for the copy element.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use super::*;

use attrxfer_core::{
    AttributeSelector, Data, ParamData, Point, PointData, PointProperty, SpatialData, ValueType,
    Vector3,
};
use attrxfer_test::{add_attribute, attribute_values, points_with_attribute, spatial_with_attribute};

fn context(source: impl Into<Arc<Data>>, target: impl Into<Arc<Data>>) -> ExecutionContext {
    ExecutionContext::new()
        .with_input("Source", source)
        .with_input("Target", target)
}

fn attribute(name: &str) -> AttributeSelector {
    AttributeSelector::attribute(name)
}

/// Runs the element expecting an output, and returns it.
fn run_ok(settings: &CopyAttributeSettings, context: &mut ExecutionContext) -> Arc<Data> {
    assert!(
        CopyAttributeElement::new().execute(settings, context),
        "diagnostics: {:?}",
        context.diagnostics()
    );
    assert_eq!(context.outputs().len(), 1);
    Arc::clone(&context.outputs()[0].data)
}

/// Runs the element expecting a single diagnostic and no output.
fn run_err(settings: &CopyAttributeSettings, context: &mut ExecutionContext) -> Diagnostic {
    assert!(!CopyAttributeElement::new().execute(settings, context));
    assert!(context.outputs().is_empty());
    assert_eq!(context.diagnostics().len(), 1);
    context.diagnostics()[0].clone()
}

#[test]
fn test_positional_copy_overwrites_every_point() {
    let source = points_with_attribute("height", &[1.0f64, 2.0, 3.0]);
    let target = Arc::new(points_with_attribute("height", &[9.0f64, 9.0, 9.0]));
    let mut context = context(source, Arc::clone(&target));
    let settings = CopyAttributeSettings::new(attribute("height"), attribute("height"));

    let output = run_ok(&settings, &mut context);

    assert_eq!(attribute_values::<f64>(&output, "height"), vec![1.0, 2.0, 3.0]);
    assert_eq!(attribute_values::<f64>(&target, "height"), vec![9.0, 9.0, 9.0]);
}

#[test]
fn test_positional_copy_allocates_missing_target_entries() {
    let source = points_with_attribute("height", &[4i32, 5]);
    let target = Data::Point(PointData::new(vec![Point::default(); 2]));
    let mut context = context(source, target);
    let settings = CopyAttributeSettings::new(attribute("height"), AttributeSelector::source());

    let output = run_ok(&settings, &mut context);

    let points = output.as_point().unwrap();
    assert!(points.points().iter().all(|p| p.metadata_entry.is_some()));
    assert_eq!(attribute_values::<i32>(&output, "height"), vec![4, 5]);
}

#[test]
fn test_self_copy_is_noop() {
    let data = Arc::new(points_with_attribute("a", &[1i32, 2, 3]));
    let mut context = context(Arc::clone(&data), Arc::clone(&data));
    let settings = CopyAttributeSettings::new(attribute("a"), AttributeSelector::source());

    let output = run_ok(&settings, &mut context);

    assert_eq!(attribute_values::<i32>(&output, "a"), vec![1, 2, 3]);
    let output_points = output.as_point().unwrap();
    let input_points = data.as_point().unwrap();
    assert_eq!(output_points.points(), input_points.points());
    assert_eq!(
        output.metadata().unwrap().attribute("a").unwrap().value_count(),
        data.metadata().unwrap().attribute("a").unwrap().value_count()
    );
}

#[test]
fn test_round_trip_through_new_attributes() {
    let data = Arc::new(points_with_attribute("a", &[1.5f64, -2.0, 7.25]));

    let mut first = context(Arc::clone(&data), Arc::clone(&data));
    let with_b = run_ok(
        &CopyAttributeSettings::new(attribute("a"), attribute("b")),
        &mut first,
    );

    let mut second = context(Arc::clone(&with_b), Arc::clone(&with_b));
    let with_c = run_ok(
        &CopyAttributeSettings::new(attribute("b"), attribute("c")),
        &mut second,
    );

    assert_eq!(
        attribute_values::<f64>(&with_c, "c"),
        attribute_values::<f64>(&data, "a")
    );
    assert!(!data.metadata().unwrap().has_attribute("b"));
}

#[test]
fn test_match_by_attribute_pairs_records() {
    let mut source = points_with_attribute("id", &[5i32, 3, 3, 8]);
    add_attribute(&mut source, "value", &[10i32, 20, 30, 40]);
    let target = points_with_attribute("id", &[3i32, 8, 3, 5]);
    let mut context = context(source, target);
    let settings = CopyAttributeSettings::new(attribute("value"), AttributeSelector::source())
        .with_match(attribute("id"), attribute("id"));

    let output = run_ok(&settings, &mut context);

    assert_eq!(attribute_values::<i32>(&output, "value"), vec![20, 40, 30, 10]);
    assert_eq!(attribute_values::<i32>(&output, "id"), vec![3, 8, 3, 5]);
}

#[test]
fn test_match_sticky_keeps_exact_values() {
    let mut source = points_with_attribute("id", &[1i32, 2]);
    add_attribute(&mut source, "value", &[10i32, 20]);
    let target = points_with_attribute("id", &[1i32, 3]);
    let mut context = context(source, target);
    let settings = CopyAttributeSettings::new(attribute("value"), AttributeSelector::source())
        .with_match(attribute("id"), attribute("id"));
    assert_eq!(settings.unmatched, UnmatchedPolicy::Sticky);

    let output = run_ok(&settings, &mut context);

    assert_eq!(attribute_values::<i32>(&output, "value"), vec![10, 0]);
}

#[test]
fn test_match_sticky_duplicates_keep_first_pairing() {
    let mut source = points_with_attribute("id", &[7i32, 7, 7, 4]);
    add_attribute(&mut source, "value", &[1i32, 2, 3, 4]);
    let target = points_with_attribute("id", &[7i32, 4, 7]);
    let mut context = context(source, target);
    let settings = CopyAttributeSettings::new(attribute("value"), AttributeSelector::source())
        .with_match(attribute("id"), attribute("id"));

    let output = run_ok(&settings, &mut context);

    assert_eq!(attribute_values::<i32>(&output, "value"), vec![1, 4, 2]);
}

#[test]
fn test_match_skip_leaves_default() {
    let mut source = points_with_attribute("id", &[1i32, 2]);
    add_attribute(&mut source, "value", &[10i32, 20]);
    let target = points_with_attribute("id", &[1i32, 3]);
    let mut context = context(source, target);
    let settings = CopyAttributeSettings::new(attribute("value"), AttributeSelector::source())
        .with_match(attribute("id"), attribute("id"))
        .with_unmatched(UnmatchedPolicy::Skip);

    let output = run_ok(&settings, &mut context);

    assert_eq!(attribute_values::<i32>(&output, "value"), vec![10, 0]);
}

#[test]
fn test_match_key_failure_is_error() {
    let source = points_with_attribute("value", &[1i32, 2]);
    let target = points_with_attribute("value", &[0i32, 0]);
    let mut context = context(source, target);
    let settings = CopyAttributeSettings::new(attribute("value"), attribute("value"))
        .with_match(attribute("missing"), AttributeSelector::index());

    let diagnostic = run_err(&settings, &mut context);
    assert_eq!(diagnostic.severity, Severity::Error);
    assert!(diagnostic.message.contains("missing"));
}

#[test]
fn test_point_count_mismatch() {
    let source = points_with_attribute("a", &[1i32; 3]);
    let target = points_with_attribute("a", &[1i32; 5]);
    let mut context = context(source, target);
    let settings = CopyAttributeSettings::new(attribute("a"), attribute("a"));

    let diagnostic = run_err(&settings, &mut context);
    assert_eq!(diagnostic.severity, Severity::Error);
    assert!(diagnostic.message.contains("same number of points"));
}

#[test]
fn test_missing_source_attribute() {
    for match_by_attribute in [false, true] {
        let source = points_with_attribute("a", &[1i32, 2]);
        let target = points_with_attribute("a", &[1i32, 2]);
        let mut context = context(source, target);
        let mut settings = CopyAttributeSettings::new(attribute("nope"), attribute("a"));
        settings.match_by_attribute = match_by_attribute;

        let diagnostic = run_err(&settings, &mut context);
        assert_eq!(diagnostic.severity, Severity::Error);
        assert!(diagnostic.message.contains("'nope'"));
    }
}

#[test]
fn test_wrong_input_count_only_warns() {
    let target = points_with_attribute("a", &[1i32]);
    let mut context = ExecutionContext::new().with_input("Target", target);
    let settings = CopyAttributeSettings::default();

    let diagnostic = run_err(&settings, &mut context);
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert!(!context.has_errors());
}

#[test]
fn test_point_to_spatial_is_unsupported() {
    let source = points_with_attribute("a", &[1i32]);
    let target = spatial_with_attribute("a", 0i32);
    let mut context = context(source, target);

    let diagnostic = run_err(
        &CopyAttributeSettings::new(attribute("a"), attribute("a")),
        &mut context,
    );
    assert_eq!(
        diagnostic.message,
        CopyAttributeError::UnsupportedTypes.to_string()
    );
}

#[test]
fn test_param_data_is_unsupported() {
    let mut context = context(Data::Param(ParamData::new()), Data::Param(ParamData::new()));

    let diagnostic = run_err(
        &CopyAttributeSettings::new(attribute("a"), attribute("a")),
        &mut context,
    );
    assert_eq!(
        diagnostic.message,
        CopyAttributeError::UnsupportedTypes.to_string()
    );
}

#[test]
fn test_source_without_metadata() {
    let source = Data::Point(PointData::without_metadata(vec![Point::default()]));
    let target = points_with_attribute("a", &[1i32]);
    let mut context = context(source, target);

    let diagnostic = run_err(
        &CopyAttributeSettings::new(attribute("a"), attribute("a")),
        &mut context,
    );
    assert_eq!(
        diagnostic.message,
        CopyAttributeError::SourceMissingMetadata.to_string()
    );
}

#[test]
fn test_scalar_broadcasts_into_vector_property() {
    let source = points_with_attribute("size", &[2.0f64, 3.0]);
    let target = points_with_attribute("size", &[0.0f64, 0.0]);
    let mut context = context(source, target);
    let settings = CopyAttributeSettings::new(
        attribute("size"),
        AttributeSelector::property(PointProperty::Scale),
    );

    let output = run_ok(&settings, &mut context);

    let points = output.as_point().unwrap().points();
    assert_eq!(points[0].transform.scale, Vector3::splat(2.0));
    assert_eq!(points[1].transform.scale, Vector3::splat(3.0));
}

#[test]
fn test_chunked_copy_creates_target_attribute() {
    let source = Data::Point(PointData::new(vec![Point::default(); 5]));
    let target = Data::Point(PointData::new(vec![Point::default(); 5]));
    let mut context = context(source, target);
    let settings = CopyAttributeSettings::new(AttributeSelector::index(), attribute("order"))
        .with_chunk_size(2);

    let output = run_ok(&settings, &mut context);

    let column = output.metadata().unwrap().attribute("order").unwrap();
    assert_eq!(column.value_type(), ValueType::I32);
    assert_eq!(attribute_values::<i32>(&output, "order"), vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_chunked_copy_into_component() {
    let source = points_with_attribute("z", &[4.0f32, 5.0, 6.0]);
    let target = Data::Point(PointData::new(vec![Point::at(Vector3::new(1.0, 2.0, 0.0)); 3]));
    let mut context = context(source, target);
    let settings = CopyAttributeSettings::new(
        attribute("z"),
        "$Position.Z".parse::<AttributeSelector>().unwrap(),
    );

    let output = run_ok(&settings, &mut context);

    let locations: Vec<_> = output
        .as_point()
        .unwrap()
        .points()
        .iter()
        .map(|p| p.transform.location)
        .collect();
    assert_eq!(
        locations,
        vec![
            Vector3::new(1.0, 2.0, 4.0),
            Vector3::new(1.0, 2.0, 5.0),
            Vector3::new(1.0, 2.0, 6.0),
        ]
    );
}

#[test]
fn test_read_only_target() {
    let source = points_with_attribute("a", &[Vector3::ONE]);
    let target = points_with_attribute("a", &[Vector3::ONE]);
    let mut context = context(source, target);
    let settings = CopyAttributeSettings::new(
        attribute("a"),
        AttributeSelector::property(PointProperty::Extents),
    );

    let diagnostic = run_err(&settings, &mut context);
    assert!(diagnostic.message.contains("read only"));
}

#[test]
fn test_failed_conversion_produces_no_output() {
    let source = points_with_attribute("label", &[String::from("x"), String::from("y")]);
    let target = points_with_attribute("label", &[String::new(), String::new()]);
    let mut context = context(source, target);
    let settings = CopyAttributeSettings::new(
        attribute("label"),
        AttributeSelector::property(PointProperty::Density),
    );

    let diagnostic = run_err(&settings, &mut context);
    assert!(diagnostic.message.starts_with("Source attribute/property cannot be converted"));
}

#[test]
fn test_spatial_copies_whole_column() {
    let source = spatial_with_attribute("weight", 2.5f32);
    let target = Data::Spatial(SpatialData::new(Vector3::ZERO, Vector3::ONE));
    let mut context = context(source, target);
    let settings = CopyAttributeSettings::new(attribute("weight"), attribute("mass"));

    let output = run_ok(&settings, &mut context);

    let column = output.metadata().unwrap().attribute("mass").unwrap();
    assert_eq!(column.default_value().get::<f32>(), Some(2.5));
}

/// Collects the `event` field of every tracing event.
#[derive(Clone, Default)]
struct EventNames(Arc<Mutex<Vec<String>>>);

impl<S: Subscriber> Layer<S> for EventNames {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        struct Visitor<'a>(&'a mut Vec<String>);

        impl Visit for Visitor<'_> {
            fn record_str(&mut self, field: &Field, value: &str) {
                if field.name() == "event" {
                    self.0.push(value.to_string());
                }
            }

            fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
                if field.name() == "event" {
                    self.0.push(format!("{value:?}").trim_matches('"').to_string());
                }
            }
        }

        if let Ok(mut names) = self.0.lock() {
            event.record(&mut Visitor(&mut names));
        }
    }
}

#[test]
fn test_spatial_copy_warns_that_match_is_ignored() {
    let source = spatial_with_attribute("weight", 2.5f32);
    let target = Data::Spatial(SpatialData::new(Vector3::ZERO, Vector3::ONE));
    let mut context = context(source, target);
    let settings = CopyAttributeSettings::new(attribute("weight"), attribute("mass"))
        .with_match(attribute("missing"), attribute("missing"));

    let events = EventNames::default();
    let subscriber = tracing_subscriber::registry().with(events.clone());
    let output = tracing::subscriber::with_default(subscriber, || run_ok(&settings, &mut context));

    let column = output.metadata().unwrap().attribute("mass").unwrap();
    assert_eq!(column.default_value().get::<f32>(), Some(2.5));
    let names = events.0.lock().unwrap();
    assert!(names.iter().any(|name| name == "match_ignored"), "events: {names:?}");
}

#[test]
fn test_last_attribute_resolves_on_source() {
    let mut source = points_with_attribute("first", &[1i32, 2]);
    add_attribute(&mut source, "second", &[3i32, 4]);
    let target = Data::Point(PointData::new(vec![Point::default(); 2]));
    let mut context = context(source, target);

    let output = run_ok(&CopyAttributeSettings::default(), &mut context);

    assert_eq!(attribute_values::<i32>(&output, "second"), vec![3, 4]);
    assert!(!output.metadata().unwrap().has_attribute("first"));
}

#[test]
fn test_output_keeps_target_tags() {
    let source = points_with_attribute("a", &[1i32]);
    let target = TaggedData::new("Target", points_with_attribute("a", &[0i32])).with_tag("terrain");
    let mut context = ExecutionContext::new().with_input("Source", source);
    context.add_input(target);

    let settings = CopyAttributeSettings::new(attribute("a"), attribute("a"));
    assert!(CopyAttributeElement::new().execute(&settings, &mut context));

    let output = &context.outputs()[0];
    assert_eq!(output.pin, "Out");
    assert!(output.tags.contains("terrain"));
}

#[test]
fn test_custom_pin_labels() {
    let pins = PinLabels {
        source: "From".to_string(),
        target: "Into".to_string(),
        output: "Result".to_string(),
    };
    let mut context = ExecutionContext::new()
        .with_input("From", points_with_attribute("a", &[1i32]))
        .with_input("Into", points_with_attribute("a", &[0i32]));
    let settings = CopyAttributeSettings::new(attribute("a"), attribute("a")).with_pins(pins);

    let output = run_ok(&settings, &mut context);

    assert_eq!(attribute_values::<i32>(&output, "a"), vec![1]);
    assert_eq!(context.outputs()[0].pin, "Result");
}
