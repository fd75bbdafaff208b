//! GDF: reader and writer for the Graph Data Format.
//!
//! GDF is the comma-separated text format used by GUESS and Gephi to
//! exchange graphs. A file holds a node section and an edge section, each
//! opened by a typed header line:
//!
//! ```text
//! nodedef>name VARCHAR,label VARCHAR,age INT
//! a,'Alice',30
//! b,'Bob',
//! edgedef>node1,node2,weight DOUBLE
//! a,b,1.5
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use gdf::{decode, encode, DecodeOptions, EncodeOptions, Graph, GraphStore};
//! use gdf::model::{AttributeValue, Attributes};
//!
//! let mut graph = Graph::new();
//! graph.add_node("a", Attributes::new().text("label", "Alice").integer("age", 30));
//! graph.add_edge("a", "b", Attributes::new().float("weight", 1.5));
//!
//! let text = encode(&graph, &EncodeOptions::default());
//! assert!(text.starts_with("nodedef>name VARCHAR,label VARCHAR,age INT\n"));
//!
//! let decoded = decode(&text, &DecodeOptions::default()).unwrap();
//! assert_eq!(decoded, graph);
//! assert_eq!(
//!     decoded.node("a").unwrap().get("age"),
//!     Some(&AttributeValue::Integer(30))
//! );
//! ```
//!
//! # Modules
//!
//! - [`model`]: Attribute values, records, graph store trait and [`Graph`]
//! - [`codec`]: Header parsing, row splitting, topology inference, writing
//! - [`error`]: Error types
//! - [`limits`]: Size limits applied while decoding
//!
//! # Inference
//!
//! GDF has no header flags for the kind of graph, so decoding infers it:
//! - A boolean `directed` edge column with one value throughout makes the
//!   graph directed or undirected; disagreeing rows are an error
//! - Repeated (source, target) rows make the graph a multigraph
//! - In a simple graph, repeated rows collapse into one edge whose `weight`
//!   is the sum of theirs
//!
//! [`DecodeOptions`] can force either flag instead.
//!
//! # Compression
//!
//! [`decode_bytes`] and [`read_gdf`] recognize zstd-compressed input by its
//! frame magic; [`encode_compressed`] and [`write_gdf_compressed`] produce it.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;

// Re-export commonly used types at crate root
pub use codec::{
    decode, decode_bytes, decode_into, encode, encode_compressed, read_gdf, write_gdf,
    write_gdf_compressed, DecodeOptions, EncodeOptions,
};
pub use error::{ErrorCode, FormatError, GdfError};
pub use model::{AttributeValue, Attributes, DeclaredType, Graph, GraphStore, Selection};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
