//! Selectors: which field of a collection to read or write.
//!
//! Text syntax, as accepted by [`AttributeSelector::parse`]:
//!
//! | Text            | Selection                                  |
//! |-----------------|--------------------------------------------|
//! | `Height`        | attribute `Height`                         |
//! | `@Last`         | most recently created attribute (input)    |
//! | `@Source`       | same as the source selector (output)       |
//! | `$Position`     | point property                             |
//! | `$Index`        | record index (read-only extra property)    |
//! | `$Position.Z`   | property followed by an extra accessor     |

mod extra;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub use extra::{chain_output_type, ExtraAccessor};

use crate::data::{Data, PointProperty};
use crate::error::{AttributeError, Result};
use crate::metadata::is_valid_attribute_name;

/// Attribute name resolved to the most recently created attribute.
pub const LAST_ATTRIBUTE: &str = "@Last";
/// Output attribute name resolved to the source selector.
pub const SOURCE_ATTRIBUTE: &str = "@Source";

/// Derived properties that are not stored anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtraProperty {
    /// Position of the record in its key domain.
    Index,
}

impl ExtraProperty {
    pub fn name(&self) -> &'static str {
        match self {
            ExtraProperty::Index => "Index",
        }
    }
}

/// Kind of field a selector addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selection {
    Attribute(Arc<str>),
    Property(PointProperty),
    ExtraProperty(ExtraProperty),
}

/// A selection plus an optional chain of extra accessors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeSelector {
    selection: Selection,
    extra_names: Vec<ExtraAccessor>,
}

impl Default for AttributeSelector {
    fn default() -> Self {
        Self::last()
    }
}

impl AttributeSelector {
    pub fn attribute(name: impl Into<Arc<str>>) -> Self {
        Self {
            selection: Selection::Attribute(name.into()),
            extra_names: Vec::new(),
        }
    }

    pub fn property(property: PointProperty) -> Self {
        Self {
            selection: Selection::Property(property),
            extra_names: Vec::new(),
        }
    }

    pub fn extra_property(extra: ExtraProperty) -> Self {
        Self {
            selection: Selection::ExtraProperty(extra),
            extra_names: Vec::new(),
        }
    }

    pub fn index() -> Self {
        Self::extra_property(ExtraProperty::Index)
    }

    /// Input selector for the most recently created attribute.
    pub fn last() -> Self {
        Self::attribute(LAST_ATTRIBUTE)
    }

    /// Output selector mirroring the source selector.
    pub fn source() -> Self {
        Self::attribute(SOURCE_ATTRIBUTE)
    }

    /// Appends an extra accessor to the chain.
    pub fn with_extra(mut self, extra: ExtraAccessor) -> Self {
        self.extra_names.push(extra);
        self
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn extra_names(&self) -> &[ExtraAccessor] {
        &self.extra_names
    }

    pub fn has_extra(&self) -> bool {
        !self.extra_names.is_empty()
    }

    /// Attribute name for attribute selections.
    pub fn attribute_name(&self) -> Option<&str> {
        match &self.selection {
            Selection::Attribute(name) => Some(name),
            _ => None,
        }
    }

    /// True for an attribute selection with no extra accessors.
    pub fn is_plain_attribute(&self) -> bool {
        matches!(self.selection, Selection::Attribute(_)) && self.extra_names.is_empty()
    }

    /// Name shown in task names and diagnostics: the attribute, property
    /// or extra property name, without the extra chain.
    pub fn name(&self) -> &str {
        match &self.selection {
            Selection::Attribute(name) => name,
            Selection::Property(property) => property.name(),
            Selection::ExtraProperty(extra) => extra.name(),
        }
    }

    pub fn is_last(&self) -> bool {
        self.attribute_name()
            .is_some_and(|name| name.eq_ignore_ascii_case(LAST_ATTRIBUTE))
    }

    pub fn is_source(&self) -> bool {
        self.attribute_name()
            .is_some_and(|name| name.eq_ignore_ascii_case(SOURCE_ATTRIBUTE))
    }

    /// Resolves `@Last` against `data`'s attribute store.
    ///
    /// Stays unresolved when the collection has no attributes; reads then
    /// fail as a missing attribute.
    pub fn copy_and_fix_last(&self, data: &Data) -> Self {
        if !self.is_last() {
            return self.clone();
        }

        match data.metadata().and_then(|m| m.last_attribute_name()) {
            Some(name) => Self {
                selection: Selection::Attribute(Arc::from(name)),
                extra_names: self.extra_names.clone(),
            },
            None => self.clone(),
        }
    }

    /// Resolves an output `@Source` to the source selector.
    ///
    /// The source's own `@Last` is resolved against `source_data`, and this
    /// selector's extra accessors are appended to the source's chain.
    pub fn copy_and_fix_source(&self, source: &AttributeSelector, source_data: &Data) -> Self {
        if !self.is_source() {
            return self.clone();
        }

        let mut fixed = source.copy_and_fix_last(source_data);
        fixed.extra_names.extend(self.extra_names.iter().copied());
        fixed
    }

    /// Parses selector text.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = |reason: &str| AttributeError::InvalidSelector {
            text: text.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty selector"));
        }

        let mut segments = trimmed.split('.');
        let head = segments.next().unwrap_or_default();

        let selection = if let Some(property) = head.strip_prefix('$') {
            if property.eq_ignore_ascii_case(ExtraProperty::Index.name()) {
                Selection::ExtraProperty(ExtraProperty::Index)
            } else {
                let property = property
                    .parse::<PointProperty>()
                    .map_err(|_| invalid("unknown property"))?;
                Selection::Property(property)
            }
        } else if head.starts_with('@') {
            if head.eq_ignore_ascii_case(LAST_ATTRIBUTE) {
                Selection::Attribute(Arc::from(LAST_ATTRIBUTE))
            } else if head.eq_ignore_ascii_case(SOURCE_ATTRIBUTE) {
                Selection::Attribute(Arc::from(SOURCE_ATTRIBUTE))
            } else {
                return Err(invalid("unknown '@' name"));
            }
        } else if is_valid_attribute_name(head) {
            Selection::Attribute(Arc::from(head))
        } else {
            return Err(invalid("invalid attribute name"));
        };

        let extra_names = segments
            .map(|segment| {
                segment
                    .parse::<ExtraAccessor>()
                    .map_err(|_| invalid("unknown extra accessor"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            selection,
            extra_names,
        })
    }

    /// Selector text, identical to the [`Display`](fmt::Display) output.
    pub fn display_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.selection {
            Selection::Attribute(name) => f.write_str(name)?,
            Selection::Property(property) => write!(f, "${}", property)?,
            Selection::ExtraProperty(extra) => write!(f, "${}", extra.name())?,
        }
        for extra in &self.extra_names {
            write!(f, ".{}", extra)?;
        }
        Ok(())
    }
}

impl FromStr for AttributeSelector {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
