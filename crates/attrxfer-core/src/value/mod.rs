//! Closed set of attribute value kinds.
//!
//! Every column, property and accessor reports one [`ValueType`]. Values move
//! through type-erased code as [`AttributeValue`] and are recovered as concrete
//! Rust types through [`AttributeType`]. The [`with_value_type!`] macro maps a
//! runtime tag to a block instantiated for the matching concrete type.

mod convert;
mod types;

#[cfg(test)]
mod tests;

use std::fmt;

pub use types::{Name, Quat, Rotator, Transform, Vector2, Vector3, Vector4};

/// Runtime tag for the supported value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueType {
    Bool,
    I32,
    I64,
    F32,
    F64,
    Vector2,
    Vector3,
    Vector4,
    Quat,
    Rotator,
    Transform,
    String,
    Name,
}

impl ValueType {
    /// All supported kinds, in declaration order.
    pub const ALL: [ValueType; 13] = [
        ValueType::Bool,
        ValueType::I32,
        ValueType::I64,
        ValueType::F32,
        ValueType::F64,
        ValueType::Vector2,
        ValueType::Vector3,
        ValueType::Vector4,
        ValueType::Quat,
        ValueType::Rotator,
        ValueType::Transform,
        ValueType::String,
        ValueType::Name,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Bool => "Bool",
            ValueType::I32 => "Integer32",
            ValueType::I64 => "Integer64",
            ValueType::F32 => "Float",
            ValueType::F64 => "Double",
            ValueType::Vector2 => "Vector2",
            ValueType::Vector3 => "Vector",
            ValueType::Vector4 => "Vector4",
            ValueType::Quat => "Quaternion",
            ValueType::Rotator => "Rotator",
            ValueType::Transform => "Transform",
            ValueType::String => "String",
            ValueType::Name => "Name",
        }
    }

    /// Returns true for integer and floating point scalars.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueType::I32 | ValueType::I64 | ValueType::F32 | ValueType::F64
        )
    }

    /// Number of scalar components, or `None` for non-vector kinds.
    pub fn component_count(&self) -> Option<usize> {
        match self {
            ValueType::Bool | ValueType::I32 | ValueType::I64 | ValueType::F32 | ValueType::F64 => {
                Some(1)
            }
            ValueType::Vector2 => Some(2),
            ValueType::Vector3 | ValueType::Rotator => Some(3),
            ValueType::Vector4 | ValueType::Quat => Some(4),
            ValueType::Transform | ValueType::String | ValueType::Name => None,
        }
    }

    /// Zero value of this kind.
    pub fn default_value(&self) -> AttributeValue {
        crate::with_value_type!(*self, T => T::default().into_value())
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value of one of the supported kinds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeValue {
    Bool(bool),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Vector2(Vector2),
    Vector3(Vector3),
    Vector4(Vector4),
    Quat(Quat),
    Rotator(Rotator),
    Transform(Transform),
    String(String),
    Name(Name),
}

impl AttributeValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            AttributeValue::Bool(_) => ValueType::Bool,
            AttributeValue::I32(_) => ValueType::I32,
            AttributeValue::I64(_) => ValueType::I64,
            AttributeValue::F32(_) => ValueType::F32,
            AttributeValue::F64(_) => ValueType::F64,
            AttributeValue::Vector2(_) => ValueType::Vector2,
            AttributeValue::Vector3(_) => ValueType::Vector3,
            AttributeValue::Vector4(_) => ValueType::Vector4,
            AttributeValue::Quat(_) => ValueType::Quat,
            AttributeValue::Rotator(_) => ValueType::Rotator,
            AttributeValue::Transform(_) => ValueType::Transform,
            AttributeValue::String(_) => ValueType::String,
            AttributeValue::Name(_) => ValueType::Name,
        }
    }

    /// Extracts the concrete value if this is exactly of kind `T`.
    pub fn get<T: AttributeType>(&self) -> Option<T> {
        T::from_value(self)
    }
}

/// A Rust type that is one of the supported value kinds.
pub trait AttributeType: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Tag of this type.
    const VALUE_TYPE: ValueType;

    fn into_value(self) -> AttributeValue;

    /// Exact extraction; no conversion is attempted.
    fn from_value(value: &AttributeValue) -> Option<Self>;
}

macro_rules! impl_attribute_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl AttributeType for $ty {
                const VALUE_TYPE: ValueType = ValueType::$variant;

                fn into_value(self) -> AttributeValue {
                    AttributeValue::$variant(self)
                }

                fn from_value(value: &AttributeValue) -> Option<Self> {
                    match value {
                        AttributeValue::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for AttributeValue {
                fn from(value: $ty) -> Self {
                    AttributeValue::$variant(value)
                }
            }
        )*
    };
}

impl_attribute_type! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    Vector2 => Vector2,
    Vector3 => Vector3,
    Vector4 => Vector4,
    Quat => Quat,
    Rotator => Rotator,
    Transform => Transform,
    String => String,
    Name => Name,
}

/// Runs `$body` with `$T` bound to the concrete type for a [`ValueType`] tag.
///
/// ```
/// use attrxfer_core::{with_value_type, AttributeType, ValueType};
///
/// let kind = ValueType::Vector3;
/// let name = with_value_type!(kind, T => std::any::type_name::<T>());
/// assert!(name.ends_with("Vector3"));
/// ```
#[macro_export]
macro_rules! with_value_type {
    ($value_type:expr, $T:ident => $body:expr) => {
        match $value_type {
            $crate::ValueType::Bool => {
                type $T = bool;
                $body
            }
            $crate::ValueType::I32 => {
                type $T = i32;
                $body
            }
            $crate::ValueType::I64 => {
                type $T = i64;
                $body
            }
            $crate::ValueType::F32 => {
                type $T = f32;
                $body
            }
            $crate::ValueType::F64 => {
                type $T = f64;
                $body
            }
            $crate::ValueType::Vector2 => {
                type $T = $crate::Vector2;
                $body
            }
            $crate::ValueType::Vector3 => {
                type $T = $crate::Vector3;
                $body
            }
            $crate::ValueType::Vector4 => {
                type $T = $crate::Vector4;
                $body
            }
            $crate::ValueType::Quat => {
                type $T = $crate::Quat;
                $body
            }
            $crate::ValueType::Rotator => {
                type $T = $crate::Rotator;
                $body
            }
            $crate::ValueType::Transform => {
                type $T = $crate::Transform;
                $body
            }
            $crate::ValueType::String => {
                type $T = ::std::string::String;
                $body
            }
            $crate::ValueType::Name => {
                type $T = $crate::Name;
                $body
            }
        }
    };
}
