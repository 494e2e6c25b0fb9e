//! Network analysis passes: centrality rankings, community detection, and
//! clique enumeration.

pub mod centrality;
pub mod cliques;
pub mod community;

pub use centrality::{rank_nodes, CentralityKind};
pub use cliques::find_cliques;
pub use community::detect_communities;

use serde::{Deserialize, Serialize};

use crate::format::join_list;

/// One row of a centrality ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedNode {
    /// Node id.
    pub id: String,

    /// Display label.
    pub label: String,

    /// Raw measure score.
    pub score: f64,
}

/// Top-K ranking produced by a single centrality measure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingColumn {
    /// The measure that produced this column.
    pub kind: CentralityKind,

    /// Nodes in descending score order, ties by declaration order.
    pub entries: Vec<RankedNode>,
}

/// A measure that could not produce a ranking, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasureFailure {
    pub kind: CentralityKind,
    pub reason: String,
}

/// Combined output of the centrality pass. A failing measure lands in
/// `failures` and never aborts the others.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CentralityReport {
    pub columns: Vec<RankingColumn>,
    pub failures: Vec<MeasureFailure>,
}

impl CentralityReport {
    pub fn column(&self, kind: CentralityKind) -> Option<&RankingColumn> {
        self.columns.iter().find(|c| c.kind == kind)
    }
}

/// A detected community: member labels sorted lexicographically, the total
/// edge weight inside the community, and its contribution to the partition
/// modularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Community {
    pub members: Vec<String>,
    pub weight_inside: f64,
    pub contribution: f64,
}

impl Community {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members joined for display, e.g. `"a, b & c"`.
    pub fn summary(&self) -> String {
        join_list(&self.members)
    }
}

/// A maximal clique, member labels sorted lexicographically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clique {
    pub members: Vec<String>,
}

impl Clique {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn summary(&self) -> String {
        join_list(&self.members)
    }
}
