//! Resolving selectors to accessors and keys on a collection.

use super::{
    Accessor, AccessorKeys, AttributeReader, AttributeWriter, ChainedAccessor, ConstAccessor,
    IndexAccessor, PointPropertyReader, PointPropertyWriter,
};
use crate::data::Data;
use crate::selector::{AttributeSelector, ExtraProperty, Selection};

/// Read accessor for `selector` on `data`.
///
/// Returns `None` when the selector does not resolve: unknown or
/// unresolved attribute, a missing attribute store, a point property on a
/// collection without points, or an extra chain that does not apply.
pub fn create_const_accessor<'a>(
    data: &'a Data,
    selector: &AttributeSelector,
) -> Option<Box<dyn ConstAccessor + 'a>> {
    let base: Box<dyn ConstAccessor + 'a> = match selector.selection() {
        Selection::Attribute(name) => Box::new(AttributeReader::new(data.metadata()?, name)?),
        Selection::Property(property) => {
            Box::new(PointPropertyReader::new(data.as_point()?.points(), *property))
        }
        Selection::ExtraProperty(ExtraProperty::Index) => Box::new(IndexAccessor),
    };

    if !selector.has_extra() {
        return Some(base);
    }
    let chained = ChainedAccessor::new(base, selector.extra_names().to_vec())?;
    Some(Box::new(chained))
}

/// Read/write accessor for `selector` on `data`.
///
/// Attributes must already exist. Accessors for derived values are
/// returned but report [`ConstAccessor::is_read_only`].
pub fn create_accessor<'a>(
    data: &'a mut Data,
    selector: &AttributeSelector,
) -> Option<Box<dyn Accessor + 'a>> {
    let base: Box<dyn Accessor + 'a> = match selector.selection() {
        Selection::Attribute(name) => match data {
            Data::Point(points) => {
                let (points, metadata) = points.split_mut();
                Box::new(AttributeWriter::new(metadata?, Some(points), name)?)
            }
            other => Box::new(AttributeWriter::new(other.metadata_mut()?, None, name)?),
        },
        Selection::Property(property) => {
            let (points, _) = data.as_point_mut()?.split_mut();
            Box::new(PointPropertyWriter::new(points, *property))
        }
        Selection::ExtraProperty(ExtraProperty::Index) => Box::new(IndexAccessor),
    };

    if !selector.has_extra() {
        return Some(base);
    }
    let chained = ChainedAccessor::new(base, selector.extra_names().to_vec())?;
    Some(Box::new(chained))
}

/// Key domain for reading `selector` on `data`.
///
/// Attributes on points iterate the points' entry keys; on other
/// collections they iterate every store entry, or the single default slot
/// if the store has none. Point properties iterate point indices.
pub fn create_const_keys(data: &Data, selector: &AttributeSelector) -> Option<AccessorKeys> {
    match (selector.selection(), data) {
        (Selection::Property(_), Data::Point(points)) => Some(AccessorKeys::Indices(points.len())),
        (Selection::Property(_), _) => None,
        (Selection::ExtraProperty(_), Data::Point(points)) => {
            Some(AccessorKeys::Indices(points.len()))
        }
        (Selection::Attribute(_), Data::Point(points)) => {
            points.metadata()?;
            Some(AccessorKeys::Points(points.entry_keys()))
        }
        (Selection::Attribute(_) | Selection::ExtraProperty(_), other) => {
            let metadata = other.metadata()?;
            let entries: Vec<_> = metadata.entry_keys().map(Some).collect();
            if entries.is_empty() {
                Some(AccessorKeys::Entries(vec![None]))
            } else {
                Some(AccessorKeys::Entries(entries))
            }
        }
    }
}

/// Key domain for writing `selector` on `data`.
///
/// Keys are owned snapshots, so the write domain equals the read domain;
/// entries missing at creation are filled in by the writer.
pub fn create_keys(data: &Data, selector: &AttributeSelector) -> Option<AccessorKeys> {
    create_const_keys(data, selector)
}
