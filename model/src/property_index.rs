//! Property index: every property grouped by kind.
//!
//! Maintained incrementally by `EntityGraph::add_property` so validators can
//! walk "all association properties" without a full graph traversal.

use crate::PropertyType;
use metaed_core::PropertyId;
use std::collections::BTreeMap;

/// Properties of each kind, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyIndex {
    by_type: BTreeMap<PropertyType, Vec<PropertyId>>,
    len: usize,
}

impl PropertyIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a property under its kind.
    pub fn add(&mut self, property_type: PropertyType, id: PropertyId) {
        self.by_type.entry(property_type).or_default().push(id);
        self.len += 1;
    }

    /// Properties of one kind, in insertion order.
    pub fn of_type(&self, property_type: PropertyType) -> &[PropertyId] {
        self.by_type
            .get(&property_type)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }

    /// Kinds present in the index, in kind order.
    pub fn property_types(&self) -> impl Iterator<Item = PropertyType> + '_ {
        self.by_type.keys().copied()
    }

    /// Total number of indexed properties.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if nothing has been indexed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
