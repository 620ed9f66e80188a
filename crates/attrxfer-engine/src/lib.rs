//! Attribute transfer engine for attrxfer.
//!
//! Copies one attribute or property from a source collection into a
//! duplicate of a target collection, pairing records by index or by an
//! equal match key.
//!
//! # Examples
//!
//! ```
//! use attrxfer_core::{AttributeSelector, Data, Point, PointData};
//! use attrxfer_engine::{CopyAttributeElement, CopyAttributeSettings, ExecutionContext};
//!
//! let mut source = PointData::new(vec![Point::default(); 2]);
//! source.metadata_mut().unwrap().create_attribute("height", 4.0f64).unwrap();
//! let target = PointData::new(vec![Point::default(); 2]);
//!
//! let mut context = ExecutionContext::new()
//!     .with_input("Source", Data::Point(source))
//!     .with_input("Target", Data::Point(target));
//! let settings = CopyAttributeSettings::new(
//!     AttributeSelector::attribute("height"),
//!     AttributeSelector::source(),
//! );
//!
//! assert!(CopyAttributeElement::new().execute(&settings, &mut context));
//! let output = &context.outputs()[0].data;
//! assert!(output.metadata().unwrap().has_attribute("height"));
//! ```

pub mod context;
pub mod element;
pub mod error;
pub mod matching;
pub mod settings;

mod structural;
mod transfer;
mod validate;

#[cfg(test)]
mod element_tests;
#[cfg(test)]
mod matching_tests;

pub use attrxfer_config::UnmatchedPolicy;
pub use context::{Diagnostic, ExecutionContext, Severity, TaggedData};
pub use element::CopyAttributeElement;
pub use error::CopyAttributeError;
pub use matching::{match_indices, match_targets, read_match_keys, MatchedTarget};
pub use settings::{CopyAttributeSettings, PinLabels, PinProperties, NODE_NAME};
