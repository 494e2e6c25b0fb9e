//! Error types shared across graph construction and analysis.

use thiserror::Error;

/// Errors surfaced by graph construction and the analysis passes.
///
/// Construction errors ([`UnknownNode`](AnalysisError::UnknownNode),
/// [`DuplicateNode`](AnalysisError::DuplicateNode),
/// [`DuplicateEdge`](AnalysisError::DuplicateEdge)) are fatal: the graph is
/// rejected rather than silently repaired. Analysis errors describe why a
/// single measure could not produce a ranking and are reported per measure,
/// leaving the others unaffected.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// An edge referenced a node id that was never declared.
    #[error("edge references unknown node '{name}'")]
    UnknownNode { name: String },

    /// The same node id was declared twice.
    #[error("node '{name}' declared more than once")]
    DuplicateNode { name: String },

    /// The same (from, to) pair was declared twice.
    #[error("edge '{from}' -> '{to}' declared more than once")]
    DuplicateEdge { from: String, to: String },

    /// An operation that needs at least one node was given none.
    #[error("graph has no nodes")]
    EmptyGraph,

    /// The graph does not satisfy a structural precondition of a measure.
    #[error("{algorithm} requires {requirement}")]
    Degenerate {
        algorithm: &'static str,
        requirement: &'static str,
    },

    /// An iterative measure exhausted its iteration budget.
    #[error("{algorithm} failed to converge within {iterations} iterations")]
    NonConvergence {
        algorithm: &'static str,
        iterations: usize,
    },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
