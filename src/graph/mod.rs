//! Weighted graph representation shared by all analysis passes.

pub mod builder;
pub mod palette;

pub use builder::{build_network, EdgeSpec, NetworkBuilder, NodeSpec};

use std::collections::HashMap;

use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction, EdgeType, Undirected};
use serde::Serialize;

/// Display attributes attached to every node.
#[derive(Debug, Clone, Serialize)]
pub struct NodeAttrs {
    /// Stable identifier the node was declared under.
    pub id: String,
    /// Human-readable name shown in reports and visualizations.
    pub label: String,
    /// Node size hint, typically an aggregate count from the source data.
    pub weight: f64,
    /// Hex color, either pinned by the caller or assigned from the palette.
    pub color: String,
}

/// A weighted network over string-identified nodes.
///
/// `Ty` selects directed or undirected edge semantics and every analysis
/// pass accepts both. Node indices are dense and stable: nodes are never
/// removed, so `NodeIndex::index()` ranges over `0..node_count()` in
/// insertion order and algorithms use it as a direct array offset.
pub struct Network<Ty: EdgeType = Directed> {
    pub(crate) graph: Graph<NodeAttrs, f64, Ty>,
    pub(crate) index: HashMap<String, NodeIndex>,
}

pub type DirectedNetwork = Network<Directed>;
pub type UndirectedNetwork = Network<Undirected>;

impl<Ty: EdgeType> Network<Ty> {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_directed(&self) -> bool {
        self.graph.is_directed()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    /// Looks up a node by its declared id.
    pub fn find(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn attrs(&self, node: NodeIndex) -> &NodeAttrs {
        &self.graph[node]
    }

    pub fn node_id(&self, node: NodeIndex) -> &str {
        &self.graph[node].id
    }

    /// Edges leaving `node` as `(neighbor, weight)` pairs. For undirected
    /// networks this is every incident edge.
    pub fn out_edges(&self, node: NodeIndex) -> Vec<(NodeIndex, f64)> {
        self.incident(node, Direction::Outgoing)
    }

    /// Edges entering `node` as `(neighbor, weight)` pairs. Identical to
    /// [`out_edges`](Self::out_edges) for undirected networks.
    pub fn in_edges(&self, node: NodeIndex) -> Vec<(NodeIndex, f64)> {
        if self.graph.is_directed() {
            self.incident(node, Direction::Incoming)
        } else {
            self.incident(node, Direction::Outgoing)
        }
    }

    // petgraph edge references keep their stored endpoint order, so the
    // neighbor is whichever endpoint is not `node`.
    fn incident(&self, node: NodeIndex, dir: Direction) -> Vec<(NodeIndex, f64)> {
        self.graph
            .edges_directed(node, dir)
            .map(|e| {
                let other = if e.source() == node {
                    e.target()
                } else {
                    e.source()
                };
                (other, *e.weight())
            })
            .collect()
    }

    /// Neighbors of `node` ignoring edge direction, deduplicated, sorted by
    /// index, and excluding `node` itself.
    pub fn undirected_neighbors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut all: Vec<NodeIndex> = self
            .out_edges(node)
            .into_iter()
            .chain(self.in_edges(node))
            .map(|(other, _)| other)
            .filter(|&other| other != node)
            .collect();
        all.sort_unstable();
        all.dedup();
        all
    }

    /// All edges as `(source, target, weight)` triples in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, f64)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source(), e.target(), *e.weight()))
    }

    pub fn total_edge_weight(&self) -> f64 {
        self.graph.edge_references().map(|e| *e.weight()).sum()
    }
}
