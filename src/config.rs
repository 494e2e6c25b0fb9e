//! Configuration for the network analysis passes.

/// Tunable parameters shared by the analysis passes.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ranking length per centrality measure.
    pub top_k: usize,

    /// Minimum community size kept by community detection.
    pub community_cutoff: usize,

    /// Maximum number of communities reported.
    pub max_communities: usize,

    /// Maximum number of cliques reported.
    pub max_cliques: usize,

    /// Iteration budget for the iterative centrality measures.
    pub max_iterations: usize,

    /// Convergence tolerance for the iterative centrality measures.
    pub tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_k: 10,
            community_cutoff: 3,
            max_communities: 5,
            max_cliques: 5,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

impl Config {
    /// Create a configuration with custom report limits.
    pub fn new(
        top_k: usize,
        community_cutoff: usize,
        max_communities: usize,
        max_cliques: usize,
    ) -> Self {
        Self {
            top_k,
            community_cutoff,
            max_communities,
            max_cliques,
            ..Self::default()
        }
    }
}
