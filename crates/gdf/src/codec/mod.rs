//! Text encoding/decoding for GDF.
//!
//! Decoding goes header → rows → records → topology → graph store;
//! encoding infers a type per attribute column and writes both sections.

pub mod gdf;
pub mod infer;
pub mod primitives;
pub mod record;
pub mod schema;
pub mod serialize;
pub mod topology;

pub use gdf::{
    decode, decode_bytes, decode_into, encode, encode_compressed, read_gdf, split_sections,
    write_gdf, write_gdf_compressed, DecodeOptions, EncodeOptions, Sections,
};
pub use infer::{infer_column_type, ColumnFormat};
pub use primitives::{Quote, RowReader, RowWriter};
pub use schema::{parse_header, Column, ColumnSchema, Section};
pub use topology::{infer_topology, Topology};
