//! Component/part accessors chained after a selection, such as `.X` or
//! `.Location`.

use std::fmt;
use std::str::FromStr;

use crate::value::{AttributeValue, Quat, Rotator, Transform, ValueType, Vector2, Vector3, Vector4};

/// One link of a selector's extra accessor chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtraAccessor {
    X,
    Y,
    Z,
    W,
    Roll,
    Pitch,
    Yaw,
    Location,
    Rotation,
    Scale,
    Length,
}

impl ExtraAccessor {
    pub fn name(&self) -> &'static str {
        match self {
            ExtraAccessor::X => "X",
            ExtraAccessor::Y => "Y",
            ExtraAccessor::Z => "Z",
            ExtraAccessor::W => "W",
            ExtraAccessor::Roll => "Roll",
            ExtraAccessor::Pitch => "Pitch",
            ExtraAccessor::Yaw => "Yaw",
            ExtraAccessor::Location => "Location",
            ExtraAccessor::Rotation => "Rotation",
            ExtraAccessor::Scale => "Scale",
            ExtraAccessor::Length => "Length",
        }
    }

    /// Type produced when applied to a value of `input`, if applicable.
    pub fn output_type(&self, input: ValueType) -> Option<ValueType> {
        use ValueType as T;

        match (self, input) {
            (ExtraAccessor::X | ExtraAccessor::Y, T::Vector2 | T::Vector3 | T::Vector4 | T::Quat) => {
                Some(T::F64)
            }
            (ExtraAccessor::Z, T::Vector3 | T::Vector4 | T::Quat) => Some(T::F64),
            (ExtraAccessor::W, T::Vector4 | T::Quat) => Some(T::F64),
            (ExtraAccessor::Roll | ExtraAccessor::Pitch | ExtraAccessor::Yaw, T::Rotator) => {
                Some(T::F64)
            }
            (ExtraAccessor::Location | ExtraAccessor::Scale, T::Transform) => Some(T::Vector3),
            (ExtraAccessor::Rotation, T::Transform) => Some(T::Quat),
            (ExtraAccessor::Length, T::Vector2 | T::Vector3 | T::Vector4) => Some(T::F64),
            _ => None,
        }
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, ExtraAccessor::Length)
    }

    /// Reads the part out of `value`.
    pub fn extract(&self, value: &AttributeValue) -> Option<AttributeValue> {
        use AttributeValue as V;

        let part = match (self, value) {
            (ExtraAccessor::X, V::Vector2(v)) => V::F64(v.x),
            (ExtraAccessor::Y, V::Vector2(v)) => V::F64(v.y),
            (ExtraAccessor::X, V::Vector3(v)) => V::F64(v.x),
            (ExtraAccessor::Y, V::Vector3(v)) => V::F64(v.y),
            (ExtraAccessor::Z, V::Vector3(v)) => V::F64(v.z),
            (ExtraAccessor::X, V::Vector4(v)) => V::F64(v.x),
            (ExtraAccessor::Y, V::Vector4(v)) => V::F64(v.y),
            (ExtraAccessor::Z, V::Vector4(v)) => V::F64(v.z),
            (ExtraAccessor::W, V::Vector4(v)) => V::F64(v.w),
            (ExtraAccessor::X, V::Quat(q)) => V::F64(q.x),
            (ExtraAccessor::Y, V::Quat(q)) => V::F64(q.y),
            (ExtraAccessor::Z, V::Quat(q)) => V::F64(q.z),
            (ExtraAccessor::W, V::Quat(q)) => V::F64(q.w),
            (ExtraAccessor::Roll, V::Rotator(r)) => V::F64(r.roll),
            (ExtraAccessor::Pitch, V::Rotator(r)) => V::F64(r.pitch),
            (ExtraAccessor::Yaw, V::Rotator(r)) => V::F64(r.yaw),
            (ExtraAccessor::Location, V::Transform(t)) => V::Vector3(t.location),
            (ExtraAccessor::Rotation, V::Transform(t)) => V::Quat(t.rotation),
            (ExtraAccessor::Scale, V::Transform(t)) => V::Vector3(t.scale),
            (ExtraAccessor::Length, V::Vector2(v)) => V::F64(v.length()),
            (ExtraAccessor::Length, V::Vector3(v)) => V::F64(v.length()),
            (ExtraAccessor::Length, V::Vector4(v)) => V::F64(v.length()),
            _ => return None,
        };
        Some(part)
    }

    /// Returns `container` with this part replaced by `part`.
    pub fn inject(&self, container: &AttributeValue, part: &AttributeValue) -> Option<AttributeValue> {
        use AttributeValue as V;

        let updated = match (self, container, part) {
            (ExtraAccessor::X, V::Vector2(v), V::F64(p)) => V::Vector2(Vector2 { x: *p, ..*v }),
            (ExtraAccessor::Y, V::Vector2(v), V::F64(p)) => V::Vector2(Vector2 { y: *p, ..*v }),
            (ExtraAccessor::X, V::Vector3(v), V::F64(p)) => V::Vector3(Vector3 { x: *p, ..*v }),
            (ExtraAccessor::Y, V::Vector3(v), V::F64(p)) => V::Vector3(Vector3 { y: *p, ..*v }),
            (ExtraAccessor::Z, V::Vector3(v), V::F64(p)) => V::Vector3(Vector3 { z: *p, ..*v }),
            (ExtraAccessor::X, V::Vector4(v), V::F64(p)) => V::Vector4(Vector4 { x: *p, ..*v }),
            (ExtraAccessor::Y, V::Vector4(v), V::F64(p)) => V::Vector4(Vector4 { y: *p, ..*v }),
            (ExtraAccessor::Z, V::Vector4(v), V::F64(p)) => V::Vector4(Vector4 { z: *p, ..*v }),
            (ExtraAccessor::W, V::Vector4(v), V::F64(p)) => V::Vector4(Vector4 { w: *p, ..*v }),
            (ExtraAccessor::X, V::Quat(q), V::F64(p)) => V::Quat(Quat { x: *p, ..*q }),
            (ExtraAccessor::Y, V::Quat(q), V::F64(p)) => V::Quat(Quat { y: *p, ..*q }),
            (ExtraAccessor::Z, V::Quat(q), V::F64(p)) => V::Quat(Quat { z: *p, ..*q }),
            (ExtraAccessor::W, V::Quat(q), V::F64(p)) => V::Quat(Quat { w: *p, ..*q }),
            (ExtraAccessor::Roll, V::Rotator(r), V::F64(p)) => V::Rotator(Rotator { roll: *p, ..*r }),
            (ExtraAccessor::Pitch, V::Rotator(r), V::F64(p)) => {
                V::Rotator(Rotator { pitch: *p, ..*r })
            }
            (ExtraAccessor::Yaw, V::Rotator(r), V::F64(p)) => V::Rotator(Rotator { yaw: *p, ..*r }),
            (ExtraAccessor::Location, V::Transform(t), V::Vector3(p)) => {
                V::Transform(Transform { location: *p, ..*t })
            }
            (ExtraAccessor::Rotation, V::Transform(t), V::Quat(p)) => {
                V::Transform(Transform { rotation: *p, ..*t })
            }
            (ExtraAccessor::Scale, V::Transform(t), V::Vector3(p)) => {
                V::Transform(Transform { scale: *p, ..*t })
            }
            _ => return None,
        };
        Some(updated)
    }
}

impl fmt::Display for ExtraAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExtraAccessor {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let extra = match s.to_ascii_lowercase().as_str() {
            "x" | "r" => ExtraAccessor::X,
            "y" | "g" => ExtraAccessor::Y,
            "z" | "b" => ExtraAccessor::Z,
            "w" | "a" => ExtraAccessor::W,
            "roll" => ExtraAccessor::Roll,
            "pitch" => ExtraAccessor::Pitch,
            "yaw" => ExtraAccessor::Yaw,
            "location" | "position" => ExtraAccessor::Location,
            "rotation" => ExtraAccessor::Rotation,
            "scale" => ExtraAccessor::Scale,
            "length" | "size" => ExtraAccessor::Length,
            _ => return Err(()),
        };
        Ok(extra)
    }
}

/// Type at the end of `chain` applied to `input`.
pub fn chain_output_type(input: ValueType, chain: &[ExtraAccessor]) -> Option<ValueType> {
    chain
        .iter()
        .try_fold(input, |current, extra| extra.output_type(current))
}
