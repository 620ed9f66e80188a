//! attrxfer Core - Attribute data model for point and spatial collections
//!
//! This crate provides the fundamental abstractions for attrxfer:
//! - Value types and conversion rules between them
//! - Attribute stores holding typed, entry-keyed columns
//! - Point, spatial and parameter collections
//! - Selectors naming an attribute, a point property or a derived part
//! - Type-erased accessors reading and writing through selectors

pub mod accessor;
pub mod data;
pub mod error;
pub mod metadata;
pub mod selector;
pub mod value;

pub use accessor::{
    create_accessor, create_const_accessor, create_const_keys, create_keys, Accessor, AccessorExt,
    AccessorFlags, AccessorKeys, ConstAccessor, ConstAccessorExt,
};
pub use data::{Data, DataType, ParamData, Point, PointData, PointProperty, SpatialData};
pub use error::{AttributeError, Result};
pub use metadata::{AttributeStore, Column, EntryKey, ValueKey};
pub use selector::{AttributeSelector, ExtraAccessor, ExtraProperty, Selection};
pub use value::{
    AttributeType, AttributeValue, Name, Quat, Rotator, Transform, ValueType, Vector2, Vector3,
    Vector4,
};
