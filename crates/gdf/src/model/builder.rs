//! Assembly of decoded rows into a graph store.
//!
//! ```rust
//! use gdf::model::{Attributes, EdgeRecord, Graph, GraphBuilder, GraphStore, NodeRecord, Selection};
//! use gdf::codec::Topology;
//!
//! let nodes = vec![NodeRecord { id: "a".to_string(), attributes: Attributes::new().text("label", "A") }];
//! let topology = Topology {
//!     directed: true,
//!     multigraph: false,
//!     edges: vec![EdgeRecord::new("a", "b", Attributes::new())],
//! };
//!
//! let mut graph = Graph::new();
//! GraphBuilder::new()
//!     .node_attrs(Selection::None)
//!     .build_into(&mut graph, nodes, topology);
//!
//! assert!(graph.is_directed());
//! assert_eq!(graph.node_count(), 2);
//! assert!(graph.node("a").unwrap().is_empty());
//! ```

use crate::codec::topology::Topology;
use crate::model::{Attributes, GraphStore, NodeRecord, Selection};

/// Builds a graph from node records and resolved edges.
///
/// Every step that can fail runs before the builder, so building never
/// fails and never leaves a store half-populated.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    node_attrs: Selection,
    edge_attrs: Selection,
}

impl GraphBuilder {
    /// Creates a builder that keeps every attribute.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets which node attributes are kept.
    pub fn node_attrs(mut self, selection: Selection) -> Self {
        self.node_attrs = selection;
        self
    }

    /// Sets which edge attributes are kept.
    pub fn edge_attrs(mut self, selection: Selection) -> Self {
        self.edge_attrs = selection;
        self
    }

    /// Populates `store` with the nodes and edges.
    ///
    /// Nodes are added in record order, then edges in topology order.
    /// Endpoints missing from the node records are added with no
    /// attributes; nodes without edges are kept.
    pub fn build_into<G: GraphStore + ?Sized>(
        &self,
        store: &mut G,
        nodes: Vec<NodeRecord>,
        topology: Topology,
    ) {
        store.set_directed(topology.directed);
        store.set_multigraph(topology.multigraph);

        for node in nodes {
            store.add_node(&node.id, select(node.attributes, &self.node_attrs));
        }

        for edge in topology.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !store.contains_node(endpoint) {
                    store.add_node(endpoint, Attributes::new());
                }
            }
            store.add_edge(
                &edge.source,
                &edge.target,
                select(edge.attributes, &self.edge_attrs),
            );
        }
    }
}

fn select(mut attributes: Attributes, selection: &Selection) -> Attributes {
    match selection {
        Selection::All => attributes,
        Selection::None => Attributes::new(),
        Selection::Names(_) => {
            attributes.retain(|name, _| selection.includes(name));
            attributes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttributeValue, EdgeRecord, Graph};

    fn topology(edges: Vec<EdgeRecord>) -> Topology {
        Topology {
            directed: false,
            multigraph: false,
            edges,
        }
    }

    #[test]
    fn test_isolated_nodes_survive() {
        let nodes = vec![
            NodeRecord {
                id: "lonely".to_string(),
                attributes: Attributes::new().integer("age", 40),
            },
            NodeRecord {
                id: "a".to_string(),
                attributes: Attributes::new(),
            },
        ];
        let mut g = Graph::new();
        GraphBuilder::new().build_into(
            &mut g,
            nodes,
            topology(vec![EdgeRecord::new("a", "b", Attributes::new())]),
        );

        assert_eq!(g.node_count(), 3);
        assert_eq!(g.degree("lonely"), 0);
        assert_eq!(g.node("lonely").unwrap().get("age"), Some(&AttributeValue::Integer(40)));
        let ids: Vec<_> = g.nodes().map(|n| n.id).collect();
        assert_eq!(ids, vec!["lonely", "a", "b"]);
    }

    #[test]
    fn test_named_selection() {
        let nodes = vec![NodeRecord {
            id: "a".to_string(),
            attributes: Attributes::new().integer("x", 1).integer("y", 2).integer("z", 3),
        }];
        let edges = vec![EdgeRecord::new(
            "a",
            "a",
            Attributes::new().float("weight", 2.5).text("kind", "loop"),
        )];
        let mut g = Graph::new();
        GraphBuilder::new()
            .node_attrs(Selection::names(["z", "x", "unknown"]))
            .edge_attrs(Selection::None)
            .build_into(&mut g, nodes, topology(edges));

        let attrs = g.node("a").unwrap();
        assert_eq!(attrs.names().collect::<Vec<_>>(), vec!["x", "z"]);
        assert!(g.edge("a", "a").unwrap().is_empty());
    }

    #[test]
    fn test_flags_applied() {
        let mut g = Graph::new();
        GraphBuilder::new().build_into(
            &mut g,
            Vec::new(),
            Topology {
                directed: true,
                multigraph: true,
                edges: Vec::new(),
            },
        );
        assert!(g.is_directed());
        assert!(g.is_multigraph());
        assert_eq!(g.node_count(), 0);
    }
}
