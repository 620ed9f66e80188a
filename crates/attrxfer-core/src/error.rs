//! Error types for attribute access

use thiserror::Error;

use crate::value::ValueType;

/// Error raised by attribute stores, selectors and accessors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributeError {
    /// The named attribute is not defined on the store
    #[error("Attribute '{0}' does not exist")]
    MissingAttribute(String),

    /// An attribute with this name is already defined
    #[error("Attribute '{0}' already exists")]
    AttributeExists(String),

    /// Attribute names must be non-empty and use a restricted character set
    #[error("Invalid attribute name '{0}'")]
    InvalidName(String),

    /// A value of the wrong kind was handed to a typed column or accessor
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueType,
        found: ValueType,
    },

    /// No conversion path between the two kinds under the given flags
    #[error("Cannot convert {from} to {to}")]
    Conversion { from: ValueType, to: ValueType },

    /// Write attempted through a read-only accessor
    #[error("'{0}' is read only")]
    ReadOnly(String),

    /// Range exceeds the key domain
    #[error("Range {start}..{end} is out of bounds for {len} keys")]
    OutOfRange {
        start: usize,
        end: usize,
        len: usize,
    },

    /// The keys do not describe the domain this accessor iterates
    #[error("Keys are incompatible with accessor for '{0}'")]
    IncompatibleKeys(String),

    /// Value key does not belong to the column
    #[error("Value key {0} is out of bounds")]
    InvalidValueKey(usize),

    /// Selector text could not be parsed
    #[error("Invalid selector '{text}': {reason}")]
    InvalidSelector { text: String, reason: String },
}

/// Result type alias for attribute operations
pub type Result<T> = std::result::Result<T, AttributeError>;
