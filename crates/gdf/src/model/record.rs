//! Decoded section rows.
//!
//! Records are the transient output of row decoding: they live for one
//! decode call and are consumed by topology inference and graph assembly.

use crate::model::Attributes;

/// One row of the node section.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    /// Value of the `name` column.
    pub id: String,
    /// Every other column that had a value in this row.
    pub attributes: Attributes,
}

/// One row of the edge section.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    /// Every column after the two endpoints that had a value in this row.
    pub attributes: Attributes,
}

impl EdgeRecord {
    /// Creates an edge record.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        attributes: Attributes,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            attributes,
        }
    }
}
