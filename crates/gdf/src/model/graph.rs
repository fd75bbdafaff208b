//! Graph storage.
//!
//! The codec reads and writes graphs through the [`GraphStore`] trait, so
//! any graph container can be plugged in. [`Graph`] is the in-memory
//! implementation returned by [`crate::decode`].

use rustc_hash::FxHashMap;

use crate::model::Attributes;

/// Borrowed view of one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRef<'a> {
    pub id: &'a str,
    pub attributes: &'a Attributes,
}

/// Borrowed view of one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRef<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub attributes: &'a Attributes,
}

/// Capabilities the codec needs from a graph container.
///
/// Nodes and edges must iterate in insertion order so that encoding is
/// deterministic.
pub trait GraphStore {
    fn is_directed(&self) -> bool;

    fn set_directed(&mut self, directed: bool);

    /// Returns true if parallel edges between the same ordered pair are kept.
    fn is_multigraph(&self) -> bool;

    fn set_multigraph(&mut self, multigraph: bool);

    fn contains_node(&self, id: &str) -> bool;

    /// Adds a node, or merges `attributes` into an existing one.
    fn add_node(&mut self, id: &str, attributes: Attributes);

    /// Adds an edge, creating missing endpoints with no attributes.
    ///
    /// Unless the store is a multigraph, an edge between an existing ordered
    /// pair merges `attributes` into the existing edge.
    fn add_edge(&mut self, source: &str, target: &str, attributes: Attributes);

    /// Iterates over nodes in insertion order.
    fn nodes(&self) -> Box<dyn Iterator<Item = NodeRef<'_>> + '_>;

    /// Iterates over edges in insertion order.
    fn edges(&self) -> Box<dyn Iterator<Item = EdgeRef<'_>> + '_>;

    fn node_count(&self) -> usize {
        self.nodes().count()
    }

    fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Names of all node attributes, in order of first appearance.
    fn node_attribute_names(&self) -> Vec<String> {
        collect_names(self.nodes().map(|n| n.attributes))
    }

    /// Names of all edge attributes, in order of first appearance.
    fn edge_attribute_names(&self) -> Vec<String> {
        collect_names(self.edges().map(|e| e.attributes))
    }
}

fn collect_names<'a>(tables: impl Iterator<Item = &'a Attributes>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for attributes in tables {
        for name in attributes.names() {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

#[derive(Debug, Clone, PartialEq)]
struct Node {
    id: String,
    attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq)]
struct Edge {
    source: String,
    target: String,
    attributes: Attributes,
}

/// In-memory graph with insertion-ordered nodes and edges.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    directed: bool,
    multigraph: bool,
    nodes: Vec<Node>,
    node_index: FxHashMap<String, usize>,
    edges: Vec<Edge>,
    /// First edge for each ordered (source, target) pair.
    edge_index: FxHashMap<(String, String), usize>,
}

impl Graph {
    /// Creates an empty undirected simple graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with the given flags.
    pub fn with_flags(directed: bool, multigraph: bool) -> Self {
        Self {
            directed,
            multigraph,
            ..Self::default()
        }
    }

    /// Returns the attributes of node `id`.
    pub fn node(&self, id: &str) -> Option<&Attributes> {
        self.node_index.get(id).map(|&i| &self.nodes[i].attributes)
    }

    /// Returns the attributes of the first edge from `source` to `target`.
    pub fn edge(&self, source: &str, target: &str) -> Option<&Attributes> {
        self.edge_index
            .get(&(source.to_string(), target.to_string()))
            .map(|&i| &self.edges[i].attributes)
    }

    /// Iterates over the attributes of every edge from `source` to `target`.
    pub fn edges_between<'a>(
        &'a self,
        source: &'a str,
        target: &'a str,
    ) -> impl Iterator<Item = &'a Attributes> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.source == source && e.target == target)
            .map(|e| &e.attributes)
    }

    /// Number of edges incident to `id`, counting self-loops twice.
    pub fn degree(&self, id: &str) -> usize {
        self.edges
            .iter()
            .map(|e| usize::from(e.source == id) + usize::from(e.target == id))
            .sum()
    }
}

impl GraphStore for Graph {
    fn is_directed(&self) -> bool {
        self.directed
    }

    fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    fn is_multigraph(&self) -> bool {
        self.multigraph
    }

    fn set_multigraph(&mut self, multigraph: bool) {
        self.multigraph = multigraph;
    }

    fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    fn add_node(&mut self, id: &str, attributes: Attributes) {
        match self.node_index.get(id) {
            Some(&i) => self.nodes[i].attributes.merge(attributes),
            None => {
                self.node_index.insert(id.to_string(), self.nodes.len());
                self.nodes.push(Node {
                    id: id.to_string(),
                    attributes,
                });
            }
        }
    }

    fn add_edge(&mut self, source: &str, target: &str, attributes: Attributes) {
        for endpoint in [source, target] {
            if !self.contains_node(endpoint) {
                self.add_node(endpoint, Attributes::new());
            }
        }

        let key = (source.to_string(), target.to_string());
        if !self.multigraph {
            if let Some(&i) = self.edge_index.get(&key) {
                self.edges[i].attributes.merge(attributes);
                return;
            }
        }
        self.edge_index.entry(key).or_insert(self.edges.len());
        self.edges.push(Edge {
            source: source.to_string(),
            target: target.to_string(),
            attributes,
        });
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = NodeRef<'_>> + '_> {
        Box::new(self.nodes.iter().map(|n| NodeRef {
            id: &n.id,
            attributes: &n.attributes,
        }))
    }

    fn edges(&self) -> Box<dyn Iterator<Item = EdgeRef<'_>> + '_> {
        Box::new(self.edges.iter().map(|e| EdgeRef {
            source: &e.source,
            target: &e.target,
            attributes: &e.attributes,
        }))
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.directed == other.directed
            && self.multigraph == other.multigraph
            && self.nodes == other.nodes
            && self.edges == other.edges
    }
}
