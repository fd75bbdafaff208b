//! Data model types for GDF.
//!
//! This module contains the in-memory side of the codec:
//! - Declared column types and attribute values
//! - Decoded node and edge records
//! - The graph store trait and its in-memory implementation
//! - Attribute selection and graph assembly

pub mod builder;
pub mod graph;
pub mod record;
pub mod selection;
pub mod value;

pub use builder::GraphBuilder;
pub use graph::{EdgeRef, Graph, GraphStore, NodeRef};
pub use record::{EdgeRecord, NodeRecord};
pub use selection::Selection;
pub use value::{format_float, AttributeValue, Attributes, DeclaredType};
