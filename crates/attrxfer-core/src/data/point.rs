//! Points and their built-in properties.

use std::fmt;
use std::str::FromStr;

use crate::metadata::EntryKey;
use crate::value::{AttributeValue, Transform, ValueType, Vector3, Vector4};

/// A single record of a point collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub transform: Transform,
    pub density: f32,
    pub bounds_min: Vector3,
    pub bounds_max: Vector3,
    pub color: Vector4,
    pub steepness: f32,
    pub seed: i32,
    /// Row of this point in the owning collection's attribute store.
    pub metadata_entry: Option<EntryKey>,
}

impl Default for Point {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            density: 1.0,
            bounds_min: Vector3::splat(-1.0),
            bounds_max: Vector3::splat(1.0),
            color: Vector4::ONE,
            steepness: 0.5,
            seed: 0,
            metadata_entry: None,
        }
    }
}

impl Point {
    /// Creates a point at `location` with default properties.
    pub fn at(location: Vector3) -> Self {
        Self {
            transform: Transform::from_location(location),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn local_center(&self) -> Vector3 {
        self.bounds_max.add(self.bounds_min).scale(0.5)
    }

    pub fn extents(&self) -> Vector3 {
        self.bounds_max.sub(self.bounds_min).scale(0.5)
    }
}

/// Well-known per-point properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointProperty {
    Position,
    Rotation,
    Scale,
    Transform,
    Density,
    BoundsMin,
    BoundsMax,
    Color,
    Steepness,
    Seed,
    LocalCenter,
    Extents,
}

impl PointProperty {
    pub const ALL: [PointProperty; 12] = [
        PointProperty::Position,
        PointProperty::Rotation,
        PointProperty::Scale,
        PointProperty::Transform,
        PointProperty::Density,
        PointProperty::BoundsMin,
        PointProperty::BoundsMax,
        PointProperty::Color,
        PointProperty::Steepness,
        PointProperty::Seed,
        PointProperty::LocalCenter,
        PointProperty::Extents,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PointProperty::Position => "Position",
            PointProperty::Rotation => "Rotation",
            PointProperty::Scale => "Scale",
            PointProperty::Transform => "Transform",
            PointProperty::Density => "Density",
            PointProperty::BoundsMin => "BoundsMin",
            PointProperty::BoundsMax => "BoundsMax",
            PointProperty::Color => "Color",
            PointProperty::Steepness => "Steepness",
            PointProperty::Seed => "Seed",
            PointProperty::LocalCenter => "LocalCenter",
            PointProperty::Extents => "Extents",
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            PointProperty::Position
            | PointProperty::Scale
            | PointProperty::BoundsMin
            | PointProperty::BoundsMax
            | PointProperty::LocalCenter
            | PointProperty::Extents => ValueType::Vector3,
            PointProperty::Rotation => ValueType::Quat,
            PointProperty::Transform => ValueType::Transform,
            PointProperty::Density | PointProperty::Steepness => ValueType::F32,
            PointProperty::Color => ValueType::Vector4,
            PointProperty::Seed => ValueType::I32,
        }
    }

    /// Derived properties cannot be written.
    pub fn is_read_only(&self) -> bool {
        matches!(self, PointProperty::LocalCenter | PointProperty::Extents)
    }

    pub fn get(&self, point: &Point) -> AttributeValue {
        match self {
            PointProperty::Position => point.transform.location.into(),
            PointProperty::Rotation => point.transform.rotation.into(),
            PointProperty::Scale => point.transform.scale.into(),
            PointProperty::Transform => point.transform.into(),
            PointProperty::Density => point.density.into(),
            PointProperty::BoundsMin => point.bounds_min.into(),
            PointProperty::BoundsMax => point.bounds_max.into(),
            PointProperty::Color => point.color.into(),
            PointProperty::Steepness => point.steepness.into(),
            PointProperty::Seed => point.seed.into(),
            PointProperty::LocalCenter => point.local_center().into(),
            PointProperty::Extents => point.extents().into(),
        }
    }

    /// Writes `value` into the point; returns false on a type mismatch or
    /// for read-only properties.
    pub fn set(&self, point: &mut Point, value: &AttributeValue) -> bool {
        match (self, value) {
            (PointProperty::Position, AttributeValue::Vector3(v)) => point.transform.location = *v,
            (PointProperty::Rotation, AttributeValue::Quat(q)) => point.transform.rotation = *q,
            (PointProperty::Scale, AttributeValue::Vector3(v)) => point.transform.scale = *v,
            (PointProperty::Transform, AttributeValue::Transform(t)) => point.transform = *t,
            (PointProperty::Density, AttributeValue::F32(v)) => point.density = *v,
            (PointProperty::BoundsMin, AttributeValue::Vector3(v)) => point.bounds_min = *v,
            (PointProperty::BoundsMax, AttributeValue::Vector3(v)) => point.bounds_max = *v,
            (PointProperty::Color, AttributeValue::Vector4(v)) => point.color = *v,
            (PointProperty::Steepness, AttributeValue::F32(v)) => point.steepness = *v,
            (PointProperty::Seed, AttributeValue::I32(v)) => point.seed = *v,
            _ => return false,
        }
        true
    }
}

impl fmt::Display for PointProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PointProperty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PointProperty::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

