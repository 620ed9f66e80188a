//! attrxfer - Per-record attribute transfer in Rust
//!
//! Copy an attribute or point property from one collection into another,
//! by index or by matching a key value on both sides.
//!
//! # Example
//!
//! ```rust
//! use attrxfer::prelude::*;
//!
//! let mut source = PointData::new(vec![Point::default(); 3]);
//! source.initialize_entries();
//! source.metadata_mut().unwrap().create_attribute("height", 1.0f64).unwrap();
//!
//! let mut context = ExecutionContext::new()
//!     .with_input("Source", Data::Point(source))
//!     .with_input("Target", Data::Point(PointData::new(vec![Point::default(); 3])));
//!
//! let config = CopyAttributeConfig::new()
//!     .with_source("height")
//!     .with_target("$Position.Z")
//!     .positional();
//! let settings = CopyAttributeSettings::from_config(&config).unwrap();
//!
//! assert!(CopyAttributeElement::new().execute(&settings, &mut context));
//! let points = context.outputs()[0].data.as_point().unwrap().points().to_vec();
//! assert!(points.iter().all(|p| p.transform.location.z == 1.0));
//! ```

// Data model
pub use attrxfer_core::{
    AttributeError, AttributeSelector, AttributeStore, AttributeType, AttributeValue, Column,
    Data, DataType, EntryKey, ExtraAccessor, Name, ParamData, Point, PointData, PointProperty,
    Quat, Rotator, SpatialData, Transform, ValueType, Vector2, Vector3, Vector4,
};

// Accessors
pub use attrxfer_core::accessor;
pub use attrxfer_core::with_value_type;

// Configuration
pub use attrxfer_config::{ConfigError, CopyAttributeConfig, PinConfig, UnmatchedPolicy};

// Engine
pub use attrxfer_engine::{
    match_indices, CopyAttributeElement, CopyAttributeError, CopyAttributeSettings, Diagnostic,
    ExecutionContext, PinLabels, Severity, TaggedData,
};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{
        AttributeSelector, AttributeType, AttributeValue, Data, Point, PointData, PointProperty,
        SpatialData, ValueType, Vector3,
    };
    pub use super::{CopyAttributeConfig, UnmatchedPolicy};
    pub use super::{
        CopyAttributeElement, CopyAttributeSettings, ExecutionContext, Severity, TaggedData,
    };
}
