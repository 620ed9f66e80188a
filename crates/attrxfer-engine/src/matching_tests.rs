//! Tests for the match-by-value join.

use super::*;

use attrxfer_core::{AttributeSelector, PointProperty};
use attrxfer_test::points_with_attribute;

#[test]
fn test_match_pairs_equal_keys() {
    let mapping = match_indices(&[5, 3, 3, 8], &[3, 8, 3, 5], UnmatchedPolicy::Sticky);
    assert_eq!(mapping, vec![Some(3), Some(0), Some(2), Some(1)]);
}

#[test]
fn test_match_ignores_input_order() {
    let mapping = match_indices(&[9, 1], &[1, 9], UnmatchedPolicy::Sticky);
    assert_eq!(mapping, vec![Some(1), Some(0)]);
}

#[test]
fn test_unmatched_reuses_last_match() {
    let mapping = match_indices(&[1, 2, 3], &[1, 3, 5], UnmatchedPolicy::Sticky);
    assert_eq!(mapping, vec![Some(0), Some(0), Some(1)]);
}

#[test]
fn test_unmatched_skip() {
    let mapping = match_indices(&[1, 2, 3], &[1, 3, 5], UnmatchedPolicy::Skip);
    assert_eq!(mapping, vec![Some(0), None, Some(1)]);
}

#[test]
fn test_unmatched_before_first_match() {
    let mapping = match_indices(&[0, 4], &[4], UnmatchedPolicy::Sticky);
    assert_eq!(mapping, vec![None, Some(0)]);
}

#[test]
fn test_empty_target_matches_nothing() {
    let mapping = match_indices(&[1, 2], &[], UnmatchedPolicy::Sticky);
    assert_eq!(mapping, vec![None, None]);
}

#[test]
fn test_duplicate_keys_consume_targets_once() {
    let mapping = match_indices(&[7, 7, 7], &[7, 7], UnmatchedPolicy::Sticky);
    assert_eq!(mapping, vec![Some(0), Some(1), Some(1)]);

    let mapping = match_indices(&[7, 7, 7], &[7, 7], UnmatchedPolicy::Skip);
    assert_eq!(mapping, vec![Some(0), Some(1), None]);
}

#[test]
fn test_fallbacks_are_marked_inexact() {
    let mapping = match_targets(&[1, 2, 7, 7], &[1, 7], UnmatchedPolicy::Sticky);
    assert_eq!(
        mapping,
        vec![
            Some(MatchedTarget { index: 0, exact: true }),
            Some(MatchedTarget { index: 0, exact: false }),
            Some(MatchedTarget { index: 1, exact: true }),
            Some(MatchedTarget { index: 1, exact: false }),
        ]
    );
}

#[test]
fn test_read_integer_keys() {
    let data = points_with_attribute("id", &[5i32, 3, 3, 8]);
    let keys = read_match_keys(&data, &AttributeSelector::attribute("id"), "source").unwrap();
    assert_eq!(keys, vec![5, 3, 3, 8]);
}

#[test]
fn test_read_float_keys_truncates() {
    let data = points_with_attribute("id", &[1.9f64, -2.5]);
    let keys = read_match_keys(&data, &AttributeSelector::attribute("id"), "source").unwrap();
    assert_eq!(keys, vec![1, -2]);
}

#[test]
fn test_read_index_and_property_keys() {
    let data = points_with_attribute("id", &[0i32; 3]);

    let keys = read_match_keys(&data, &AttributeSelector::index(), "target").unwrap();
    assert_eq!(keys, vec![0, 1, 2]);

    let keys =
        read_match_keys(&data, &AttributeSelector::property(PointProperty::Seed), "target").unwrap();
    assert_eq!(keys, vec![0, 1, 2]);
}

#[test]
fn test_read_keys_last_resolves() {
    let data = points_with_attribute("id", &[4i64, 2]);
    let keys = read_match_keys(&data, &AttributeSelector::last(), "source").unwrap();
    assert_eq!(keys, vec![4, 2]);
}

#[test]
fn test_read_keys_failures() {
    let data = points_with_attribute("label", &[String::from("a")]);

    assert!(matches!(
        read_match_keys(&data, &AttributeSelector::attribute("missing"), "source"),
        Err(CopyAttributeError::MatchKey { side: "source", .. })
    ));
    assert!(matches!(
        read_match_keys(&data, &AttributeSelector::attribute("label"), "target"),
        Err(CopyAttributeError::MatchKey { side: "target", .. })
    ));
}
