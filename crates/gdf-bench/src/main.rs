//! Benchmark for GDF encoding and decoding.
//!
//! Loads a graph from a JSON file, or synthesizes one when no path is
//! given, then times encoding, decoding and compression.
//!
//! JSON input shape:
//!
//! ```text
//! {
//!   "directed": false,
//!   "nodes": [{ "id": "a", "attributes": { "label": "Alice", "age": 30 } }],
//!   "edges": [{ "source": "a", "target": "b", "attributes": { "weight": 1.5 } }]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use gdf::{AttributeValue, Attributes, DecodeOptions, EncodeOptions, Graph, GraphStore};
use serde::Deserialize;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

// =============================================================================
// JSON DATA STRUCTURES
// =============================================================================

#[derive(Debug, Deserialize)]
struct JsonGraph {
    #[serde(default)]
    directed: bool,
    #[serde(default)]
    nodes: Vec<JsonNode>,
    #[serde(default)]
    edges: Vec<JsonEdge>,
}

#[derive(Debug, Deserialize)]
struct JsonNode {
    id: String,
    #[serde(default)]
    attributes: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct JsonEdge {
    source: String,
    target: String,
    #[serde(default)]
    attributes: BTreeMap<String, serde_json::Value>,
}

fn convert_attributes(raw: BTreeMap<String, serde_json::Value>) -> Attributes {
    let mut attributes = Attributes::with_capacity(raw.len());
    for (name, value) in raw {
        let value = match value {
            serde_json::Value::Bool(b) => AttributeValue::Boolean(b),
            serde_json::Value::String(s) => AttributeValue::Text(s),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => AttributeValue::Integer(i),
                None => AttributeValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::Null => continue,
            other => {
                warn!(attribute = %name, "storing nested JSON value as text");
                AttributeValue::Text(other.to_string())
            }
        };
        attributes.insert(name, value);
    }
    attributes
}

fn convert_json_graph(json: JsonGraph) -> Graph {
    let mut graph = Graph::with_flags(json.directed, false);
    for node in json.nodes {
        graph.add_node(&node.id, convert_attributes(node.attributes));
    }
    for edge in json.edges {
        graph.add_edge(&edge.source, &edge.target, convert_attributes(edge.attributes));
    }
    graph
}

// =============================================================================
// SYNTHETIC DATA
// =============================================================================

const SYNTHETIC_NODES: usize = 50_000;
const SYNTHETIC_EDGES_PER_NODE: usize = 4;

/// Deterministic xorshift generator, so runs are comparable.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

fn synthesize_graph() -> Graph {
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
    let mut graph = Graph::new();
    for i in 0..SYNTHETIC_NODES {
        let mut attributes = Attributes::new()
            .text("label", format!("Node {i}, group {}", i % 97))
            .integer("population", (rng.next() % 10_000_000) as i64)
            .float("score", (rng.next() % 10_000) as f64 / 100.0);
        if i % 3 == 0 {
            attributes = attributes.boolean("capital", i % 2 == 0);
        }
        graph.add_node(&format!("n{i}"), attributes);
    }
    for i in 0..SYNTHETIC_NODES {
        for _ in 0..SYNTHETIC_EDGES_PER_NODE {
            let j = rng.below(SYNTHETIC_NODES);
            let weight = 1.0 + (rng.next() % 400) as f64 / 4.0;
            graph.add_edge(&format!("n{i}"), &format!("n{j}"), Attributes::new().float("weight", weight));
        }
    }
    graph
}

// =============================================================================
// BENCHMARK
// =============================================================================

const DECODE_ITERS: u32 = 10;

fn throughput(bytes: usize, elapsed: Duration) -> f64 {
    (bytes as f64 / 1_000_000.0) / elapsed.as_secs_f64()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_target(false)
        .init();

    let input = std::env::args().nth(1);
    let build_start = Instant::now();
    let (graph, source_len) = match &input {
        Some(path) => {
            println!("Loading graph from: {}", path);
            let json_data = fs::read_to_string(path).expect("Failed to read JSON graph");
            let json: JsonGraph = serde_json::from_str(&json_data).expect("Failed to parse JSON");
            (convert_json_graph(json), Some(json_data.len()))
        }
        None => {
            println!("No input given, synthesizing {} nodes", SYNTHETIC_NODES);
            (synthesize_graph(), None)
        }
    };
    let build_time = build_start.elapsed();

    println!(
        "Built graph with {} nodes, {} edges in {:?}",
        graph.node_count(),
        graph.edge_count(),
        build_time
    );
    info!(directed = graph.is_directed(), "graph ready");

    // Encoding
    let encode_start = Instant::now();
    let encoded = gdf::encode(&graph, &EncodeOptions::default());
    let encode_time = encode_start.elapsed();

    println!("\nEncode: {} bytes in {:?}", encoded.len(), encode_time);
    println!("  Throughput: {:.2} MB/s", throughput(encoded.len(), encode_time));

    // Compressed encoding
    let compress_start = Instant::now();
    let compressed = gdf::encode_compressed(&graph, &EncodeOptions::default(), 3)
        .expect("Failed to compress");
    let compress_time = compress_start.elapsed();

    println!(
        "\nCompressed (level 3): {} bytes in {:?}",
        compressed.len(),
        compress_time
    );
    println!(
        "  Compression ratio: {:.1}x",
        encoded.len() as f64 / compressed.len() as f64
    );

    // Decoding
    for _ in 0..3 {
        let _ = gdf::decode(&encoded, &DecodeOptions::default()).expect("Failed to decode");
    }

    let decode_start = Instant::now();
    let mut decoded = None;
    for _ in 0..DECODE_ITERS {
        decoded = Some(gdf::decode(&encoded, &DecodeOptions::default()).expect("Failed to decode"));
    }
    let decode_time = decode_start.elapsed() / DECODE_ITERS;
    let decoded = decoded.expect("at least one decode iteration");

    println!(
        "\nDecode: {:?} (avg of {} iterations)",
        decode_time, DECODE_ITERS
    );
    println!("  Throughput: {:.2} MB/s", throughput(encoded.len(), decode_time));
    assert_eq!(decoded.node_count(), graph.node_count());

    // Decoding compressed input
    let decode_compressed_start = Instant::now();
    for _ in 0..DECODE_ITERS {
        let decoded = gdf::decode_bytes(&compressed, &DecodeOptions::default())
            .expect("Failed to decode compressed");
        assert_eq!(decoded.node_count(), graph.node_count());
    }
    let decode_compressed_time = decode_compressed_start.elapsed() / DECODE_ITERS;

    println!(
        "\nDecode (compressed): {:?} (avg of {} iterations)",
        decode_compressed_time, DECODE_ITERS
    );
    println!(
        "  Throughput: {:.2} MB/s (uncompressed equivalent)",
        throughput(encoded.len(), decode_compressed_time)
    );

    // Write output files next to the input
    if let Some(path) = &input {
        let input_path = Path::new(path);
        let stem = input_path.file_stem().unwrap_or_default().to_string_lossy();
        let parent = input_path.parent().unwrap_or(Path::new("."));

        let output_plain = parent.join(format!("{}.gdf", stem));
        let output_compressed = parent.join(format!("{}.gdf.zst", stem));
        fs::write(&output_plain, &encoded).expect("Failed to write .gdf file");
        fs::write(&output_compressed, &compressed).expect("Failed to write .gdf.zst file");

        println!("\n=== Output Files ===");
        println!("Plain:      {}", output_plain.display());
        println!("Compressed: {}", output_compressed.display());
    }

    // Summary
    println!("\n=== Summary ===");
    println!("Nodes: {}", graph.node_count());
    println!("Edges: {}", graph.edge_count());
    println!(
        "GDF: {} bytes ({:.1} MB)",
        encoded.len(),
        encoded.len() as f64 / 1_000_000.0
    );
    println!(
        "GDF compressed: {} bytes ({:.1} MB)",
        compressed.len(),
        compressed.len() as f64 / 1_000_000.0
    );
    if let Some(json_len) = source_len {
        println!(
            "Size vs JSON: {:.1}% (plain), {:.1}% (compressed)",
            100.0 * encoded.len() as f64 / json_len as f64,
            100.0 * compressed.len() as f64 / json_len as f64
        );
    }
}
