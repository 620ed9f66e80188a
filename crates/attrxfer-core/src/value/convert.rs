//! Conversion between value kinds.
//!
//! Identity always succeeds. Lossless widening and replication across
//! components need [`AccessorFlags::ALLOW_BROADCAST`]; lossy or
//! representation-changing conversions need
//! [`AccessorFlags::ALLOW_CONSTRUCTIBLE`].

use num_traits::{NumCast, ToPrimitive};

use super::{AttributeValue, Transform, ValueType, Vector2, Vector3, Vector4};
use crate::accessor::AccessorFlags;

impl AttributeValue {
    /// Converts this value into `target`, honoring `flags`.
    pub fn convert(&self, target: ValueType, flags: AccessorFlags) -> Option<AttributeValue> {
        if self.value_type() == target {
            return Some(self.clone());
        }

        if flags.contains(AccessorFlags::ALLOW_BROADCAST) {
            if let Some(value) = self.broadcast(target) {
                return Some(value);
            }
        }

        if flags.contains(AccessorFlags::ALLOW_CONSTRUCTIBLE) {
            if let Some(value) = self.construct(target) {
                return Some(value);
            }
        }

        None
    }

    /// Returns true if `from` can be converted into `to` under `flags`.
    ///
    /// Narrowing conversions are reported as possible even though a specific
    /// out-of-range value may still fail.
    pub fn is_convertible(from: ValueType, to: ValueType, flags: AccessorFlags) -> bool {
        from.default_value().convert(to, flags).is_some()
    }

    /// Scalar view of bools and numbers.
    pub fn scalar<N: NumCast>(&self) -> Option<N> {
        match self {
            AttributeValue::Bool(v) => N::from(<u8 as From<bool>>::from(*v)),
            AttributeValue::I32(v) => N::from(*v),
            AttributeValue::I64(v) => N::from(*v),
            AttributeValue::F32(v) => N::from(*v),
            AttributeValue::F64(v) => N::from(*v),
            _ => None,
        }
    }

    fn broadcast(&self, target: ValueType) -> Option<AttributeValue> {
        use AttributeValue as V;

        match (self, target) {
            (V::Bool(_), ValueType::I32) => self.scalar().map(V::I32),
            (V::Bool(_), ValueType::I64) => self.scalar().map(V::I64),
            (V::Bool(_), ValueType::F32) => self.scalar().map(V::F32),
            (V::Bool(_), ValueType::F64) => self.scalar().map(V::F64),
            (V::I32(_), ValueType::I64) => self.scalar().map(V::I64),
            (V::I32(_), ValueType::F32) => self.scalar().map(V::F32),
            (V::I32(_) | V::I64(_) | V::F32(_), ValueType::F64) => self.scalar().map(V::F64),

            (V::Bool(_) | V::I32(_) | V::I64(_) | V::F32(_) | V::F64(_), _) => {
                let v: f64 = self.scalar()?;
                match target {
                    ValueType::Vector2 => Some(V::Vector2(Vector2::splat(v))),
                    ValueType::Vector3 => Some(V::Vector3(Vector3::splat(v))),
                    ValueType::Vector4 => Some(V::Vector4(Vector4::splat(v))),
                    _ => None,
                }
            }

            (V::Vector2(v), ValueType::Vector3) => Some(V::Vector3(Vector3::new(v.x, v.y, 0.0))),
            (V::Vector2(v), ValueType::Vector4) => {
                Some(V::Vector4(Vector4::new(v.x, v.y, 0.0, 0.0)))
            }
            (V::Vector3(v), ValueType::Vector4) => {
                Some(V::Vector4(Vector4::new(v.x, v.y, v.z, 0.0)))
            }
            (V::Vector3(v), ValueType::Transform) => {
                Some(V::Transform(Transform::from_location(*v)))
            }
            (V::Quat(q), ValueType::Transform) => Some(V::Transform(Transform::from_rotation(*q))),
            (V::Rotator(r), ValueType::Transform) => {
                Some(V::Transform(Transform::from_rotation(r.quaternion())))
            }

            _ => None,
        }
    }

    fn construct(&self, target: ValueType) -> Option<AttributeValue> {
        use AttributeValue as V;

        match (self, target) {
            (V::I64(_) | V::F32(_) | V::F64(_), ValueType::I32) => {
                self.truncated().and_then(|v| v.to_i32()).map(V::I32)
            }
            (V::F32(_) | V::F64(_), ValueType::I64) => {
                self.truncated().and_then(|v| v.to_i64()).map(V::I64)
            }
            (V::I64(_) | V::F64(_), ValueType::F32) => self.scalar().map(V::F32),
            (V::Bool(b), ValueType::String) => Some(V::String(b.to_string())),
            (V::I32(v), ValueType::String) => Some(V::String(v.to_string())),
            (V::I64(v), ValueType::String) => Some(V::String(v.to_string())),
            (V::F32(v), ValueType::String) => Some(V::String(v.to_string())),
            (V::F64(v), ValueType::String) => Some(V::String(v.to_string())),
            (V::Name(n), ValueType::String) => Some(V::String(n.as_str().to_owned())),
            (V::String(s), ValueType::Name) => Some(V::Name(s.as_str().into())),
            (V::Quat(q), ValueType::Rotator) => Some(V::Rotator(q.rotator())),
            (V::Rotator(r), ValueType::Quat) => Some(V::Quat(r.quaternion())),
            _ => None,
        }
    }

    fn truncated(&self) -> Option<f64> {
        self.scalar::<f64>().map(f64::trunc)
    }
}
