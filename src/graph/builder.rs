//! Graph construction from node and edge declarations.

use std::collections::HashMap;

use petgraph::graph::{Graph, NodeIndex};
use petgraph::EdgeType;

use crate::error::{AnalysisError, Result};
use crate::graph::{palette, Network, NodeAttrs};

/// Declares a node ahead of construction.
#[derive(Debug, Clone)]
pub struct NodeSpec {
    /// Identifier edges refer to. Must be unique within one build.
    pub id: String,
    /// Display name. Defaults to the id.
    pub label: String,
    /// Node size hint.
    pub weight: f64,
    /// Explicit color. Nodes without one draw from the shared palette by
    /// declaration position.
    pub color: Option<String>,
}

impl NodeSpec {
    pub fn new(id: impl Into<String>, weight: f64) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            weight,
            color: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Declares a weighted edge between two node ids.
#[derive(Debug, Clone)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

impl EdgeSpec {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }
}

/// Builder for assembling a validated [`Network`].
///
/// Unlike ad-hoc construction, the builder is strict: every edge endpoint
/// must name a declared node, node ids may not repeat, and a (from, to)
/// pair may appear at most once. For undirected networks the pair is
/// orientation-free, so declaring (a, b) and later (b, a) is a duplicate.
pub struct NetworkBuilder<Ty: EdgeType> {
    graph: Graph<NodeAttrs, f64, Ty>,
    index: HashMap<String, NodeIndex>,
    palette: Vec<&'static str>,
}

impl<Ty: EdgeType> NetworkBuilder<Ty> {
    pub fn new() -> Self {
        Self {
            graph: Graph::default(),
            index: HashMap::new(),
            palette: palette::shuffled_palette(),
        }
    }

    /// Adds a node, assigning a palette color when none is pinned.
    pub fn add_node(&mut self, spec: NodeSpec) -> Result<NodeIndex> {
        if self.index.contains_key(&spec.id) {
            return Err(AnalysisError::DuplicateNode { name: spec.id });
        }

        // Palette position follows declaration order even when the color is
        // pinned, so later nodes land on the same slots either way.
        let slot = self.graph.node_count() % self.palette.len();
        let color = spec
            .color
            .unwrap_or_else(|| self.palette[slot].to_string());

        let ix = self.graph.add_node(NodeAttrs {
            id: spec.id.clone(),
            label: spec.label,
            weight: spec.weight,
            color,
        });
        self.index.insert(spec.id, ix);
        Ok(ix)
    }

    /// Adds an edge between two declared nodes.
    pub fn add_edge(&mut self, spec: EdgeSpec) -> Result<()> {
        let from = self.resolve(&spec.from)?;
        let to = self.resolve(&spec.to)?;
        if self.graph.find_edge(from, to).is_some() {
            return Err(AnalysisError::DuplicateEdge {
                from: spec.from,
                to: spec.to,
            });
        }
        self.graph.add_edge(from, to, spec.weight);
        Ok(())
    }

    fn resolve(&self, id: &str) -> Result<NodeIndex> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| AnalysisError::UnknownNode {
                name: id.to_string(),
            })
    }

    pub fn build(self) -> Network<Ty> {
        Network {
            graph: self.graph,
            index: self.index,
        }
    }
}

impl<Ty: EdgeType> Default for NetworkBuilder<Ty> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a network from complete node and edge lists in one call.
pub fn build_network<Ty: EdgeType>(
    nodes: Vec<NodeSpec>,
    edges: Vec<EdgeSpec>,
) -> Result<Network<Ty>> {
    let mut builder = NetworkBuilder::new();
    for node in nodes {
        builder.add_node(node)?;
    }
    for edge in edges {
        builder.add_edge(edge)?;
    }
    Ok(builder.build())
}
