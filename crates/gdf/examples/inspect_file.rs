//! Simple reader to inspect GDF files.

use gdf::{read_gdf, AttributeValue, DecodeOptions, GraphStore};

fn format_value(v: &AttributeValue) -> String {
    match v {
        AttributeValue::Text(value) => {
            let preview: String = value.chars().take(80).collect();
            if value.chars().count() > 80 {
                format!("\"{}...\"", preview)
            } else {
                format!("\"{}\"", preview)
            }
        }
        AttributeValue::Integer(value) => format!("{}", value),
        AttributeValue::Float(value) => format!("{:.6}", value),
        AttributeValue::Boolean(b) => format!("{}", b),
    }
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "graph.gdf".to_string());

    println!("Reading: {}", path);

    let graph = read_gdf(&path, &DecodeOptions::default()).expect("Failed to decode");

    println!("\n=== Graph Info ===");
    println!("Directed: {}", graph.is_directed());
    println!("Multigraph: {}", graph.is_multigraph());
    println!("Nodes: {}", graph.node_count());
    println!("Edges: {}", graph.edge_count());
    println!("Node attributes: {:?}", graph.node_attribute_names());
    println!("Edge attributes: {:?}", graph.edge_attribute_names());

    println!("\n=== First Nodes ===");
    for node in graph.nodes().take(10) {
        println!("{}", node.id);
        for (name, value) in node.attributes.iter() {
            println!("  {} = {}", name, format_value(value));
        }
    }

    println!("\n=== First Edges ===");
    let arrow = if graph.is_directed() { "->" } else { "--" };
    for edge in graph.edges().take(10) {
        println!("{} {} {}", edge.source, arrow, edge.target);
        for (name, value) in edge.attributes.iter() {
            println!("  {} = {}", name, format_value(value));
        }
    }
}
