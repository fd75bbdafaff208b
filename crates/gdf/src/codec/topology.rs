//! Edge topology inference.
//!
//! GDF has no header flags for graph kind. Directedness comes from a
//! boolean `directed` column, multiplicity from repeated endpoint pairs,
//! and weights from repeated pairs in simple graphs. Callers can override
//! directedness and multiplicity.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::codec::schema::{ColumnSchema, DIRECTED_COLUMN, WEIGHT_COLUMN};
use crate::error::GdfError;
use crate::model::{AttributeValue, DeclaredType, EdgeRecord};

/// Graph kind and the edges to build it from.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    pub directed: bool,
    pub multigraph: bool,
    /// Edges in first-occurrence order; aggregated unless `multigraph`.
    pub edges: Vec<EdgeRecord>,
}

/// Resolves directedness, multiplicity, and weights from decoded edge rows.
///
/// - A boolean `directed` column must hold one value across all rows; it
///   sets the graph kind and is dropped from the edges. Without one the
///   graph is undirected. A `directed` override leaves the column alone.
/// - Without a `multigraph` override, any repeated (source, target) pair
///   makes the graph a multigraph. Pairs are taken as written.
/// - In a simple graph, rows of the same pair collapse into the first one,
///   with `weight` set to the sum of their weights (1 for rows without a
///   weight). When no row carries a weight and every pair occurs once, no
///   weight is attached.
pub fn infer_topology(
    schema: &ColumnSchema,
    mut rows: Vec<EdgeRecord>,
    directed: Option<bool>,
    multigraph: Option<bool>,
) -> Result<Topology, GdfError> {
    let directed = match directed {
        Some(directed) => directed,
        None if has_column(schema, DIRECTED_COLUMN, |t| t == DeclaredType::Boolean) => {
            take_directed(&mut rows)?.unwrap_or(false)
        }
        None => false,
    };

    let groups = PairGroups::new(&rows);
    let multigraph = multigraph.unwrap_or_else(|| groups.has_parallel());

    let edges = if multigraph {
        rows
    } else {
        let weighted = has_column(schema, WEIGHT_COLUMN, DeclaredType::is_numeric);
        aggregate(rows, &groups, weighted)
    };

    debug!(directed, multigraph, edges = edges.len(), "inferred edge topology");
    Ok(Topology {
        directed,
        multigraph,
        edges,
    })
}

fn has_column(schema: &ColumnSchema, name: &str, accepts: impl Fn(DeclaredType) -> bool) -> bool {
    schema.column(name).is_some_and(|c| accepts(c.declared))
}

/// Removes the `directed` value from every row and returns the shared value.
fn take_directed(rows: &mut [EdgeRecord]) -> Result<Option<bool>, GdfError> {
    let mut seen: Option<bool> = None;
    for (row, edge) in rows.iter_mut().enumerate() {
        let Some(AttributeValue::Boolean(value)) = edge.attributes.remove(DIRECTED_COLUMN) else {
            continue;
        };
        match seen {
            None => seen = Some(value),
            Some(expected) if expected != value => {
                return Err(GdfError::AmbiguousTopology {
                    row,
                    expected,
                    found: value,
                });
            }
            Some(_) => {}
        }
    }
    Ok(seen)
}

/// Rows grouped by ordered (source, target) pair.
///
/// Group ids are assigned in order of first occurrence.
struct PairGroups {
    group_of_row: Vec<usize>,
    sizes: Vec<usize>,
}

impl PairGroups {
    fn new(rows: &[EdgeRecord]) -> Self {
        let mut ids: FxHashMap<(&str, &str), usize> = FxHashMap::default();
        let mut group_of_row = Vec::with_capacity(rows.len());
        let mut sizes: Vec<usize> = Vec::new();
        for edge in rows {
            let next = sizes.len();
            let group = *ids
                .entry((edge.source.as_str(), edge.target.as_str()))
                .or_insert(next);
            if group == next {
                sizes.push(0);
            }
            sizes[group] += 1;
            group_of_row.push(group);
        }
        Self {
            group_of_row,
            sizes,
        }
    }

    fn len(&self) -> usize {
        self.sizes.len()
    }

    fn has_parallel(&self) -> bool {
        self.sizes.iter().any(|&n| n > 1)
    }
}

/// Sum of the weights of one endpoint pair.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Weight {
    Integer(i64),
    Float(f64),
}

impl Weight {
    fn add(self, other: Weight) -> Weight {
        match (self, other) {
            (Weight::Integer(a), Weight::Integer(b)) => match a.checked_add(b) {
                Some(sum) => Weight::Integer(sum),
                None => Weight::Float(a as f64 + b as f64),
            },
            (a, b) => Weight::Float(a.as_f64() + b.as_f64()),
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Weight::Integer(v) => v as f64,
            Weight::Float(v) => v,
        }
    }

    fn is_one(self) -> bool {
        match self {
            Weight::Integer(v) => v == 1,
            Weight::Float(v) => v == 1.0,
        }
    }

    fn into_value(self) -> AttributeValue {
        match self {
            Weight::Integer(v) => AttributeValue::Integer(v),
            Weight::Float(v) => AttributeValue::Float(v),
        }
    }
}

fn aggregate(rows: Vec<EdgeRecord>, groups: &PairGroups, weighted: bool) -> Vec<EdgeRecord> {
    let mut sums = vec![Weight::Integer(0); groups.len()];
    let mut explicit = false;
    for (edge, &group) in rows.iter().zip(&groups.group_of_row) {
        let weight = match edge.attributes.get(WEIGHT_COLUMN) {
            Some(AttributeValue::Integer(v)) if weighted => Some(Weight::Integer(*v)),
            Some(AttributeValue::Float(v)) if weighted => Some(Weight::Float(*v)),
            _ => None,
        };
        explicit |= weight.is_some();
        sums[group] = sums[group].add(weight.unwrap_or(Weight::Integer(1)));
    }

    let attach = explicit || !sums.iter().all(|s| s.is_one());
    let mut edges: Vec<EdgeRecord> = Vec::with_capacity(groups.len());
    for (mut edge, &group) in rows.into_iter().zip(&groups.group_of_row) {
        // Groups are numbered by first occurrence, so a group id below
        // edges.len() has already been emitted.
        if group < edges.len() {
            continue;
        }
        if attach {
            edge.attributes.insert(WEIGHT_COLUMN, sums[group].into_value());
        }
        edges.push(edge);
    }
    edges
}
