//! Tests for copy configuration.

use super::*;

use attrxfer_core::{PointProperty, Selection};

#[test]
fn test_defaults() {
    let config = CopyAttributeConfig::default();
    assert_eq!(config.source, "@Last");
    assert_eq!(config.target, "@Source");
    assert!(config.match_by_attribute);
    assert_eq!(config.unmatched, UnmatchedPolicy::Sticky);
    assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
    assert_eq!(config.pins.output, "Out");
}

#[test]
fn test_toml_parsing() {
    let toml = r#"
        source = "density_copy"
        target = "$Density"
        match_by_attribute = true
        source_match = "id"
        target_match = "$Seed"
        unmatched = "skip"
        chunk_size = 32

        [pins]
        source = "From"
        target = "Into"
    "#;

    let config = CopyAttributeConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.source, "density_copy");
    assert_eq!(config.target_match, "$Seed");
    assert_eq!(config.unmatched, UnmatchedPolicy::Skip);
    assert_eq!(config.chunk_size, 32);
    assert_eq!(config.pins.source, "From");
    assert_eq!(config.pins.target, "Into");
    assert_eq!(config.pins.output, "Out");
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        source: "$Position.Z"
        target: height
        match_by_attribute: false
    "#;

    let config = CopyAttributeConfig::from_yaml_str(yaml).unwrap();
    assert!(!config.match_by_attribute);
    assert_eq!(config.source_match, "@Last");

    let selectors = config.selectors().unwrap();
    assert_eq!(
        selectors.source.selection(),
        &Selection::Property(PointProperty::Position)
    );
    assert_eq!(selectors.source.extra_names().len(), 1);
    assert_eq!(selectors.target.attribute_name(), Some("height"));
}

#[test]
fn test_unknown_policy_is_rejected() {
    assert!(matches!(
        CopyAttributeConfig::from_toml_str(r#"unmatched = "nearest""#),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_invalid_selector_names_field() {
    let config = CopyAttributeConfig::new().with_match("id", "$Nope");
    match config.selectors() {
        Err(ConfigError::Invalid(message)) => assert!(message.starts_with("target_match")),
        other => panic!("expected invalid config, got {other:?}"),
    }
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        CopyAttributeConfig::load("does/not/exist.toml"),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_builder() {
    let config = CopyAttributeConfig::new()
        .with_source("color")
        .with_target("tint")
        .positional()
        .with_unmatched(UnmatchedPolicy::Skip)
        .with_chunk_size(8);

    assert_eq!(config.source, "color");
    assert_eq!(config.target, "tint");
    assert!(!config.match_by_attribute);
    assert_eq!(config.chunk_size, 8);

    let round_trip = CopyAttributeConfig::from_toml_str(&toml::to_string(&config).unwrap()).unwrap();
    assert_eq!(round_trip, config);
}
