//! Shared test fixtures for attrxfer crates.
//!
//! - [`points`] - Point collections carrying attributes, and readers for them
//! - [`spatial`] - Spatial collections without per-point entries
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! attrxfer-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use attrxfer_test::points::{points_with_attribute, attribute_values};
//! ```

pub mod points;
pub mod spatial;

pub use points::{add_attribute, attribute_values, points_with_attribute, random_points};
pub use spatial::spatial_with_attribute;
