//! GDF decoding and encoding entry points.
//!
//! Decoding runs as a linear pipeline: find and parse the node header,
//! split the rest into node rows, the edge header and edge rows (trying
//! `'` then `"` as the quote character), coerce cells, infer the topology,
//! and finally populate the graph store. Every fallible step runs before the
//! store is touched.

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::{debug, instrument};

use crate::codec::record::{decode_edges, decode_nodes, node_id_position, split_rows, SectionBody};
use crate::codec::schema::{header_line, parse_header, Section};
use crate::codec::serialize::serialize;
use crate::codec::topology::infer_topology;
use crate::error::{FormatError, GdfError};
use crate::limits::{MAX_INPUT_SIZE, ZSTD_MAGIC};
use crate::model::{Graph, GraphBuilder, GraphStore, Selection};

// =============================================================================
// OPTIONS
// =============================================================================

/// Options for decoding.
///
/// By default directedness and multiplicity are inferred from the edge rows
/// and every attribute is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeOptions {
    /// Forces the graph to be directed or undirected. When set, a `directed`
    /// edge column is kept as an ordinary attribute.
    pub directed: Option<bool>,
    /// Forces parallel edges to be kept (`true`) or aggregated (`false`).
    pub multigraph: Option<bool>,
    pub node_attrs: Selection,
    pub edge_attrs: Selection,
}

impl DecodeOptions {
    /// Creates default decoding options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = Some(directed);
        self
    }

    pub fn multigraph(mut self, multigraph: bool) -> Self {
        self.multigraph = Some(multigraph);
        self
    }

    pub fn node_attrs(mut self, selection: Selection) -> Self {
        self.node_attrs = selection;
        self
    }

    pub fn edge_attrs(mut self, selection: Selection) -> Self {
        self.edge_attrs = selection;
        self
    }
}

/// Options for encoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodeOptions {
    pub node_attrs: Selection,
    pub edge_attrs: Selection,
}

impl EncodeOptions {
    /// Creates encoding options that write every attribute.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_attrs(mut self, selection: Selection) -> Self {
        self.node_attrs = selection;
        self
    }

    pub fn edge_attrs(mut self, selection: Selection) -> Self {
        self.edge_attrs = selection;
        self
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// A GDF text split at its node header.
#[derive(Debug, Clone, Copy)]
pub struct Sections<'a> {
    pub nodes_header: &'a str,
    /// Everything after the node header. The edge section begins at the
    /// first record of this body that starts with `edgedef>` outside a
    /// quoted cell, which is found while splitting rows.
    pub body: SectionBody<'a>,
}

/// Splits GDF text at its node header.
///
/// Anything before the `nodedef>` marker is ignored. Text with no line
/// starting with `edgedef>` after the node header is rejected here, before
/// any row is read.
pub fn split_sections(text: &str) -> Result<Sections<'_>, FormatError> {
    let nodes_at = text
        .find(Section::Nodes.marker())
        .ok_or(FormatError::MissingSection {
            marker: Section::Nodes.marker(),
        })?;
    let (nodes_header, body_at) = header_line(text, nodes_at);
    if !has_line_start(&text[body_at..], Section::Edges.marker()) {
        return Err(FormatError::MissingSection {
            marker: Section::Edges.marker(),
        });
    }

    Ok(Sections {
        nodes_header,
        body: SectionBody {
            section: Section::Nodes,
            first_line: line_of(text, nodes_at) + 1,
            text: &text[body_at..],
        },
    })
}

fn has_line_start(text: &str, marker: &str) -> bool {
    text.starts_with(marker) || text.contains(&format!("\n{marker}"))
}

/// 1-based line number of byte offset `at`.
fn line_of(text: &str, at: usize) -> usize {
    text.as_bytes()[..at].iter().filter(|&&b| b == b'\n').count() + 1
}

/// Rejects inputs longer than `max` bytes.
fn check_size(field: &'static str, len: usize, max: usize) -> Result<(), FormatError> {
    if len > max {
        return Err(FormatError::LengthExceedsLimit { field, len, max });
    }
    Ok(())
}

/// Decodes GDF text into a new [`Graph`].
pub fn decode(text: &str, options: &DecodeOptions) -> Result<Graph, GdfError> {
    let mut graph = Graph::new();
    decode_into(text, options, &mut graph)?;
    Ok(graph)
}

/// Decodes GDF text into `store`.
///
/// On error the store is left untouched.
#[instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn decode_into<G: GraphStore + ?Sized>(
    text: &str,
    options: &DecodeOptions,
    store: &mut G,
) -> Result<(), GdfError> {
    check_size("input", text.len(), MAX_INPUT_SIZE)?;

    let sections = split_sections(text)?;
    let node_schema = parse_header(sections.nodes_header, Section::Nodes)?;
    node_id_position(&node_schema)?;

    let rows = split_rows(sections.body, node_schema.len())?;
    let nodes = decode_nodes(&node_schema, &rows.nodes)?;
    let edges = decode_edges(&rows.edge_schema, &rows.edges)?;
    debug!(
        quote = %rows.quote.char(),
        nodes = nodes.len(),
        edges = edges.len(),
        "decoded rows"
    );

    let topology = infer_topology(&rows.edge_schema, edges, options.directed, options.multigraph)?;
    GraphBuilder::new()
        .node_attrs(options.node_attrs.clone())
        .edge_attrs(options.edge_attrs.clone())
        .build_into(store, nodes, topology);
    Ok(())
}

/// Decodes GDF from raw bytes, decompressing zstd payloads first.
pub fn decode_bytes(bytes: &[u8], options: &DecodeOptions) -> Result<Graph, GdfError> {
    let decompressed;
    let bytes = if bytes.starts_with(&ZSTD_MAGIC) {
        decompressed = decompress(bytes, MAX_INPUT_SIZE)?;
        decompressed.as_slice()
    } else {
        bytes
    };
    let text = std::str::from_utf8(bytes).map_err(|e| FormatError::InvalidUtf8 {
        offset: e.valid_up_to(),
    })?;
    decode(text, options)
}

/// Decompresses a zstd payload of at most `max` decompressed bytes.
fn decompress(compressed: &[u8], max: usize) -> Result<Vec<u8>, FormatError> {
    let decoder = zstd::Decoder::new(compressed)
        .map_err(|e| FormatError::DecompressionFailed(e.to_string()))?;

    let mut decompressed = Vec::new();
    decoder
        .take(max as u64 + 1)
        .read_to_end(&mut decompressed)
        .map_err(|e| FormatError::DecompressionFailed(e.to_string()))?;

    check_size("decompressed input", decompressed.len(), max)?;
    debug!(
        compressed = compressed.len(),
        decompressed = decompressed.len(),
        "decompressed zstd payload"
    );
    Ok(decompressed)
}

/// Reads and decodes a GDF file, which may be zstd-compressed.
#[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub fn read_gdf(path: impl AsRef<Path>, options: &DecodeOptions) -> Result<Graph, GdfError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| GdfError::File {
        path: path.to_path_buf(),
        source,
    })?;
    decode_bytes(&bytes, options)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a graph as GDF text.
#[instrument(level = "debug", skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn encode<G: GraphStore + ?Sized>(graph: &G, options: &EncodeOptions) -> String {
    serialize(graph, options)
}

/// Encodes a graph as zstd-compressed GDF text.
pub fn encode_compressed<G: GraphStore + ?Sized>(
    graph: &G,
    options: &EncodeOptions,
    level: i32,
) -> Result<Vec<u8>, GdfError> {
    let text = encode(graph, options);
    let compressed = zstd::encode_all(text.as_bytes(), level)?;
    debug!(
        uncompressed = text.len(),
        compressed = compressed.len(),
        level,
        "compressed gdf"
    );
    Ok(compressed)
}

/// Encodes a graph and writes it to `path`.
pub fn write_gdf<G: GraphStore + ?Sized>(
    graph: &G,
    path: impl AsRef<Path>,
    options: &EncodeOptions,
) -> Result<(), GdfError> {
    write_file(path.as_ref(), encode(graph, options).as_bytes())
}

/// Encodes a graph, compresses it with zstd, and writes it to `path`.
pub fn write_gdf_compressed<G: GraphStore + ?Sized>(
    graph: &G,
    path: impl AsRef<Path>,
    options: &EncodeOptions,
    level: i32,
) -> Result<(), GdfError> {
    write_file(path.as_ref(), &encode_compressed(graph, options, level)?)
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), GdfError> {
    fs::write(path, contents).map_err(|source| GdfError::File {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::model::{AttributeValue, Attributes};
    use proptest::prelude::*;

    fn decode_default(text: &str) -> Result<Graph, GdfError> {
        decode(text, &DecodeOptions::default())
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("gdf-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_split_sections() {
        let text = "# exported\nnodedef>name\na\nb\nedgedef>node1,node2\na,b\n";
        let s = split_sections(text).unwrap();
        assert_eq!(s.nodes_header, "nodedef>name");
        assert_eq!(s.body.text, "a\nb\nedgedef>node1,node2\na,b\n");
        assert_eq!(s.body.first_line, 3);

        let rows = split_rows(s.body, 1).unwrap();
        assert_eq!(rows.nodes.len(), 2);
        assert_eq!(rows.edges_header, "edgedef>node1,node2");
        assert_eq!(rows.edges[0].line, 6);
    }

    #[test]
    fn test_split_sections_without_bodies() {
        let s = split_sections("nodedef>name\nedgedef>node1,node2").unwrap();
        assert_eq!(s.body.text, "edgedef>node1,node2");
        let rows = split_rows(s.body, 1).unwrap();
        assert!(rows.nodes.is_empty());
        assert!(rows.edges.is_empty());
    }

    #[test]
    fn test_missing_sections() {
        assert!(matches!(
            split_sections("edgedef>node1,node2\n"),
            Err(FormatError::MissingSection { marker: "nodedef>" })
        ));
        assert!(matches!(
            split_sections("nodedef>name\na\n"),
            Err(FormatError::MissingSection { marker: "edgedef>" })
        ));
        assert!(matches!(
            split_sections("nodedef>name\na,edgedef>b\n"),
            Err(FormatError::MissingSection { marker: "edgedef>" })
        ));
    }

    #[test]
    fn test_section_markers_inside_values_round_trip() {
        let mut g = Graph::new();
        g.add_node("a", Attributes::new().text("note", "line one\nedgedef>oops"));
        g.add_node("x\nedgedef>y", Attributes::new().text("note", "\nnodedef>name"));
        g.add_edge("a", "x\nedgedef>y", Attributes::new().text("kind", "\nedgedef>node1,node2"));
        g.add_edge("x\nedgedef>y", "b", Attributes::new());

        let text = encode(&g, &EncodeOptions::default());
        assert_eq!(decode_default(&text).unwrap(), g);
    }

    #[test]
    fn test_double_quoted_section_marker_in_value() {
        let text = "nodedef>name,note\n\
                    a,\"it's\nedgedef>not a header\"\n\
                    edgedef>node1,node2\n\
                    a,b\n";
        let g = decode_default(text).unwrap();
        assert_eq!(
            g.node("a").unwrap().get("note"),
            Some(&AttributeValue::Text("it's\nedgedef>not a header".into()))
        );
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_input_size_limit() {
        assert!(check_size("input", MAX_INPUT_SIZE, MAX_INPUT_SIZE).is_ok());
        assert!(matches!(
            check_size("input", MAX_INPUT_SIZE + 1, MAX_INPUT_SIZE),
            Err(FormatError::LengthExceedsLimit { field: "input", max: MAX_INPUT_SIZE, .. })
        ));
    }

    #[test]
    fn test_decompressed_size_limit() {
        let text = "nodedef>name\n".repeat(100);
        let compressed = zstd::encode_all(text.as_bytes(), 1).unwrap();

        assert_eq!(decompress(&compressed, text.len()).unwrap(), text.as_bytes());
        match decompress(&compressed, 64) {
            Err(FormatError::LengthExceedsLimit { field, len, max }) => {
                assert_eq!(field, "decompressed input");
                assert_eq!(len, 65);
                assert_eq!(max, 64);
            }
            other => panic!("expected LengthExceedsLimit, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_basic() {
        let text = "nodedef>name VARCHAR,label VARCHAR,age INT\n\
                    a,'Alice',30\n\
                    b,'Bob, Jr.',\n\
                    edgedef>node1 VARCHAR,node2 VARCHAR,kind VARCHAR\n\
                    a,b,'friend'\n";
        let g = decode_default(text).unwrap();
        assert!(!g.is_directed());
        assert!(!g.is_multigraph());
        assert_eq!(g.node_count(), 2);
        assert_eq!(
            g.node("a").unwrap(),
            &Attributes::new().text("label", "Alice").integer("age", 30)
        );
        assert_eq!(g.node("b").unwrap(), &Attributes::new().text("label", "Bob, Jr."));
        assert_eq!(g.edge("a", "b").unwrap(), &Attributes::new().text("kind", "friend"));
    }

    #[test]
    fn test_mixed_directed_rejected() {
        let text = "nodedef>name\nedgedef>node1,node2,directed BOOLEAN\na,b,true\nb,c,false\n";
        let err = decode_default(text).unwrap_err();
        assert!(matches!(err, GdfError::AmbiguousTopology { row: 1, .. }));
        assert_eq!(err.code(), ErrorCode::AmbiguousTopology);
    }

    #[test]
    fn test_directed_override_accepts_mixed_rows() {
        let text = "nodedef>name\nedgedef>node1,node2,directed BOOLEAN\na,b,true\nb,c,false\n";
        let g = decode(text, &DecodeOptions::new().directed(false)).unwrap();
        assert!(!g.is_directed());
        assert_eq!(
            g.edge("b", "c").unwrap().get("directed"),
            Some(&AttributeValue::Boolean(false))
        );
    }

    #[test]
    fn test_directed_from_column() {
        let text = "nodedef>name\nedgedef>node1,node2,directed BOOLEAN\na,b,true\nb,c,\n";
        let g = decode_default(text).unwrap();
        assert!(g.is_directed());
        assert!(g.edge("a", "b").unwrap().is_empty());
    }

    #[test]
    fn test_multigraph_inferred() {
        let g = decode_default("nodedef>name\nedgedef>node1,node2\nA,B\nA,B\n").unwrap();
        assert!(g.is_multigraph());
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_weight_collapse() {
        let options = DecodeOptions::new().multigraph(false);
        let g = decode("nodedef>name\nedgedef>node1,node2\nA,B\nA,B\n", &options).unwrap();
        assert!(!g.is_multigraph());
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge("A", "B").unwrap().get("weight"), Some(&AttributeValue::Integer(2)));
    }

    #[test]
    fn test_uniform_weight_omitted() {
        let g = decode_default("nodedef>name\nedgedef>node1,node2\nA,B\nC,D\n").unwrap();
        assert_eq!(g.edge_count(), 2);
        assert!(g.edges().all(|e| e.attributes.is_empty()));
    }

    #[test]
    fn test_type_narrowing() {
        let mut g = Graph::new();
        g.add_node("a", Attributes::new().integer("small", -100).integer("big", 1));
        g.add_node("b", Attributes::new().integer("small", 100).integer("big", 3_000_000_000));
        let text = encode(&g, &EncodeOptions::default());
        assert!(text.starts_with("nodedef>name VARCHAR,small INT,big LONG\n"));
    }

    #[test]
    fn test_quote_fallback() {
        let text = "nodedef>name VARCHAR,label VARCHAR\n\
                    \"a\",\"it's\"\n\
                    \"b\",\"say \"\"hi\"\"\"\n\
                    edgedef>node1,node2\n\
                    \"a\",\"b\"\n";
        let g = decode_default(text).unwrap();
        assert_eq!(g.node("a").unwrap().get("label"), Some(&AttributeValue::Text("it's".into())));
        assert_eq!(
            g.node("b").unwrap().get("label"),
            Some(&AttributeValue::Text("say \"hi\"".into()))
        );
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_unquotable_is_format_error() {
        let err = decode_default("nodedef>name\n'a\"\nedgedef>node1,node2\n").unwrap_err();
        assert_eq!(err.code(), ErrorCode::Format);
        assert!(matches!(err.as_format(), Some(FormatError::Unquotable { .. })));
    }

    #[test]
    fn test_isolated_nodes_preserved() {
        let g = decode_default("nodedef>name\nlonely\na\nb\nedgedef>node1,node2\na,b\n").unwrap();
        assert_eq!(g.node_count(), 3);
        assert!(g.contains_node("lonely"));
        assert_eq!(g.degree("lonely"), 0);
    }

    #[test]
    fn test_edge_endpoints_created() {
        let g = decode_default("nodedef>name\nedgedef>node1,node2\nx,y\n").unwrap();
        let ids: Vec<_> = g.nodes().map(|n| n.id).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn test_duplicate_node_rows_merge() {
        let text = "nodedef>name,color,size INT\na,red,1\na,,2\nedgedef>node1,node2\n";
        let g = decode_default(text).unwrap();
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.node("a").unwrap(), &Attributes::new().text("color", "red").integer("size", 2));
    }

    #[test]
    fn test_attribute_selection_on_decode() {
        let text = "nodedef>name,x INT,y INT\na,1,2\nedgedef>node1,node2,w INT\na,a,5\n";
        let options = DecodeOptions::new()
            .node_attrs(Selection::names(["y"]))
            .edge_attrs(Selection::None);
        let g = decode(text, &options).unwrap();
        assert_eq!(g.node("a").unwrap(), &Attributes::new().integer("y", 2));
        assert!(g.edge("a", "a").unwrap().is_empty());
    }

    #[test]
    fn test_coercion_error_reports_file_line() {
        let text = "# comment\nnodedef>name,age INT\na,1\nb,old\nedgedef>node1,node2\n";
        match decode_default(text).unwrap_err().as_format() {
            Some(FormatError::Coercion { row, line, column, .. }) => {
                assert_eq!(*row, 1);
                assert_eq!(*line, 4);
                assert_eq!(column, "age");
            }
            other => panic!("expected Coercion, got {:?}", other),
        }
    }

    #[test]
    fn test_identifier_columns_checked_before_rows() {
        let err = decode_default("nodedef>id\n'unterminated\nedgedef>node1,node2\n").unwrap_err();
        assert!(matches!(err.as_format(), Some(FormatError::MissingIdentifierColumn)));
    }

    #[test]
    fn test_decode_into_leaves_store_on_error() {
        let mut g = Graph::new();
        g.add_node("keep", Attributes::new());
        let text = "nodedef>name\nedgedef>node1,node2,directed BOOLEAN\na,b,true\nb,c,false\n";
        assert!(decode_into(text, &DecodeOptions::default(), &mut g).is_err());
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn test_decode_bytes_plain_and_compressed() {
        let mut g = Graph::with_flags(true, false);
        g.add_edge("a", "b", Attributes::new().text("label", "x"));
        let options = EncodeOptions::default();

        let plain = encode(&g, &options);
        assert_eq!(decode_bytes(plain.as_bytes(), &DecodeOptions::default()).unwrap(), g);

        let compressed = encode_compressed(&g, &options, 3).unwrap();
        assert!(compressed.starts_with(&ZSTD_MAGIC));
        assert_eq!(decode_bytes(&compressed, &DecodeOptions::default()).unwrap(), g);
    }

    #[test]
    fn test_decode_bytes_invalid_utf8() {
        let err = decode_bytes(b"nodedef>name\n\xff\n", &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err.as_format(), Some(FormatError::InvalidUtf8 { offset: 13 })));
    }

    #[test]
    fn test_decode_bytes_corrupt_zstd() {
        let mut bytes = ZSTD_MAGIC.to_vec();
        bytes.extend_from_slice(&[0xFF; 8]);
        let err = decode_bytes(&bytes, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err.as_format(), Some(FormatError::DecompressionFailed(_))));
    }

    #[test]
    fn test_file_round_trip() {
        let mut g = Graph::new();
        g.add_node("a", Attributes::new().float("score", 0.25));
        g.add_edge("a", "b", Attributes::new());

        let path = temp_path("plain.gdf");
        write_gdf(&g, &path, &EncodeOptions::default()).unwrap();
        assert_eq!(read_gdf(&path, &DecodeOptions::default()).unwrap(), g);

        let zpath = temp_path("compressed.gdf.zst");
        write_gdf_compressed(&g, &zpath, &EncodeOptions::default(), 1).unwrap();
        assert_eq!(read_gdf(&zpath, &DecodeOptions::default()).unwrap(), g);

        let _ = fs::remove_file(path);
        let _ = fs::remove_file(zpath);
    }

    #[test]
    fn test_missing_file() {
        let err = read_gdf(temp_path("does-not-exist.gdf"), &DecodeOptions::default()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::File);
        assert!(matches!(err, GdfError::File { .. }));
    }

    #[test]
    fn test_unwritable_destination() {
        let path = temp_path("no-such-dir").join("out.gdf");
        let err = write_gdf(&Graph::new(), &path, &EncodeOptions::default()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::File);
    }

    // =========================================================================
    // Property tests
    // =========================================================================

    /// Text that may hold quotes, line breaks and section markers.
    fn text_value() -> impl Strategy<Value = String> {
        prop_oneof![
            3 => "[a-zA-Z0-9 ,'\"\n]{0,8}",
            1 => "[a-z']{0,3}\n(edgedef|nodedef)>[a-z ,']{0,4}",
        ]
    }

    fn node_id() -> impl Strategy<Value = String> {
        prop_oneof![
            3 => "[a-zA-Z0-9 ,'\"]{1,6}",
            1 => "[a-z]{0,2}\n(edgedef|nodedef)>[a-z']{0,2}",
        ]
    }

    fn node_attributes() -> impl Strategy<Value = Attributes> {
        (
            proptest::option::of(text_value()),
            proptest::option::of(any::<i64>()),
            proptest::option::of(-1.0e9f64..1.0e9),
            proptest::option::of(any::<bool>()),
        )
            .prop_map(|(label, count, score, flag)| {
                let mut attributes = Attributes::new();
                if let Some(v) = label {
                    attributes.insert("label", v);
                }
                if let Some(v) = count {
                    attributes.insert("count", v);
                }
                if let Some(v) = score {
                    attributes.insert("score", v);
                }
                if let Some(v) = flag {
                    attributes.insert("flag", v);
                }
                attributes
            })
    }

    fn edge_attributes() -> impl Strategy<Value = Attributes> {
        (
            proptest::option::of(text_value()),
            proptest::option::of(-1000i64..1000),
        )
            .prop_map(|(kind, rank)| {
                let mut attributes = Attributes::new();
                if let Some(v) = kind {
                    attributes.insert("kind", v);
                }
                if let Some(v) = rank {
                    attributes.insert("rank", v);
                }
                attributes
            })
    }

    /// Simple graphs with distinct endpoint pairs and one value type per
    /// column, which GDF represents without loss.
    fn graph() -> impl Strategy<Value = Graph> {
        (
            prop::collection::btree_set(node_id(), 1..8),
            any::<bool>(),
        )
            .prop_flat_map(|(ids, directed)| {
                let ids: Vec<String> = ids.into_iter().collect();
                let n = ids.len();
                (
                    Just(ids),
                    Just(directed),
                    prop::collection::vec(node_attributes(), n),
                    prop::collection::btree_map((0..n, 0..n), edge_attributes(), 0..12),
                )
            })
            .prop_map(|(ids, directed, node_attrs, edges)| {
                // An edgeless graph has nowhere to record directedness.
                let mut g = Graph::with_flags(directed && !edges.is_empty(), false);
                for (id, attributes) in ids.iter().zip(node_attrs) {
                    g.add_node(id, attributes);
                }
                for ((s, t), attributes) in edges {
                    g.add_edge(&ids[s], &ids[t], attributes);
                }
                g
            })
    }

    proptest! {
        #[test]
        fn prop_round_trip(g in graph()) {
            let text = encode(&g, &EncodeOptions::default());
            let decoded = decode_default(&text).unwrap();
            prop_assert_eq!(decoded, g);
        }

        #[test]
        fn prop_decode_idempotent(g in graph()) {
            let text = encode(&g, &EncodeOptions::default());
            let first = decode_default(&text).unwrap();
            let second = decode_default(&text).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(encode(&first, &EncodeOptions::default()), text);
        }

        #[test]
        fn prop_compressed_round_trip(g in graph()) {
            let bytes = encode_compressed(&g, &EncodeOptions::default(), 1).unwrap();
            prop_assert_eq!(decode_bytes(&bytes, &DecodeOptions::default()).unwrap(), g);
        }

        #[test]
        fn prop_decode_never_panics(text in "[a-z,'\"\n>]{0,64}") {
            let _ = decode_default(&format!("nodedef>name\n{text}\nedgedef>node1,node2\n{text}"));
        }
    }
}
