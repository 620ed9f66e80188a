//! Record collections.
//!
//! - [`PointData`]: point-indexed collection, one record per point
//! - [`SpatialData`]: spatial collection without per-record indexing
//! - [`ParamData`]: plain attribute set with no spatial meaning
//!
//! Cloning any of them is cheap: points and attribute columns are shared
//! and copied on first write.

mod point;


use std::fmt;
use std::sync::Arc;

pub use point::{Point, PointProperty};

use crate::metadata::{AttributeStore, EntryKey};
use crate::value::Vector3;

/// Kind of a record collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Point,
    Spatial,
    Param,
}

impl DataType {
    pub fn is_spatial(&self) -> bool {
        matches!(self, DataType::Point | DataType::Spatial)
    }

    pub fn is_point(&self) -> bool {
        matches!(self, DataType::Point)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Point => f.write_str("Point"),
            DataType::Spatial => f.write_str("Spatial"),
            DataType::Param => f.write_str("Param"),
        }
    }
}

/// Point-indexed collection.
#[derive(Debug, Clone, Default)]
pub struct PointData {
    points: Arc<Vec<Point>>,
    metadata: Option<AttributeStore>,
}

impl PointData {
    /// Creates a collection with an empty attribute store.
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points: Arc::new(points),
            metadata: Some(AttributeStore::new()),
        }
    }

    /// Creates a collection with no attribute store at all.
    pub fn without_metadata(points: Vec<Point>) -> Self {
        Self {
            points: Arc::new(points),
            metadata: None,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Mutable points, copying them first if shared.
    pub fn points_mut(&mut self) -> &mut Vec<Point> {
        Arc::make_mut(&mut self.points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn metadata(&self) -> Option<&AttributeStore> {
        self.metadata.as_ref()
    }

    pub fn metadata_mut(&mut self) -> Option<&mut AttributeStore> {
        self.metadata.as_mut()
    }

    /// Entry key of every point, in point order.
    pub fn entry_keys(&self) -> Vec<Option<EntryKey>> {
        self.points.iter().map(|p| p.metadata_entry).collect()
    }

    /// Ensures every point has its own store entry.
    pub fn initialize_entries(&mut self) {
        let Some(metadata) = self.metadata.as_mut() else {
            return;
        };
        if self.points.iter().all(|p| p.metadata_entry.is_some()) {
            return;
        }
        for point in Arc::make_mut(&mut self.points) {
            metadata.initialize_on_set(&mut point.metadata_entry);
        }
    }

    /// Shared points handle and store, borrowed disjointly so a writer can
    /// stamp newly allocated entries on points without copying them up front.
    pub fn split_mut(&mut self) -> (&mut Arc<Vec<Point>>, Option<&mut AttributeStore>) {
        (&mut self.points, self.metadata.as_mut())
    }
}

/// Spatial collection without per-record indexing.
#[derive(Debug, Clone, Default)]
pub struct SpatialData {
    pub bounds_min: Vector3,
    pub bounds_max: Vector3,
    metadata: Option<AttributeStore>,
}

impl SpatialData {
    pub fn new(bounds_min: Vector3, bounds_max: Vector3) -> Self {
        Self {
            bounds_min,
            bounds_max,
            metadata: Some(AttributeStore::new()),
        }
    }

    pub fn without_metadata(bounds_min: Vector3, bounds_max: Vector3) -> Self {
        Self {
            bounds_min,
            bounds_max,
            metadata: None,
        }
    }
}

/// Attribute set without spatial meaning.
#[derive(Debug, Clone, Default)]
pub struct ParamData {
    metadata: Option<AttributeStore>,
}

impl ParamData {
    pub fn new() -> Self {
        Self {
            metadata: Some(AttributeStore::new()),
        }
    }
}

/// Any record collection.
#[derive(Debug, Clone)]
pub enum Data {
    Point(PointData),
    Spatial(SpatialData),
    Param(ParamData),
}

impl Data {
    pub fn data_type(&self) -> DataType {
        match self {
            Data::Point(_) => DataType::Point,
            Data::Spatial(_) => DataType::Spatial,
            Data::Param(_) => DataType::Param,
        }
    }

    pub fn metadata(&self) -> Option<&AttributeStore> {
        match self {
            Data::Point(data) => data.metadata.as_ref(),
            Data::Spatial(data) => data.metadata.as_ref(),
            Data::Param(data) => data.metadata.as_ref(),
        }
    }

    pub fn metadata_mut(&mut self) -> Option<&mut AttributeStore> {
        match self {
            Data::Point(data) => data.metadata.as_mut(),
            Data::Spatial(data) => data.metadata.as_mut(),
            Data::Param(data) => data.metadata.as_mut(),
        }
    }

    pub fn as_point(&self) -> Option<&PointData> {
        match self {
            Data::Point(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_point_mut(&mut self) -> Option<&mut PointData> {
        match self {
            Data::Point(data) => Some(data),
            _ => None,
        }
    }

    /// Copy-on-write duplicate: shares points and columns with `self`
    /// until either side writes.
    pub fn duplicate(&self) -> Data {
        self.clone()
    }
}

impl From<PointData> for Data {
    fn from(data: PointData) -> Self {
        Data::Point(data)
    }
}

impl From<SpatialData> for Data {
    fn from(data: SpatialData) -> Self {
        Data::Spatial(data)
    }
}

impl From<ParamData> for Data {
    fn from(data: ParamData) -> Self {
        Data::Param(data)
    }
}
