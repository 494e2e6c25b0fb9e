//! Centrality measures and top-K ranking.
//!
//! All six measures read the stored edge weight literally: the walk-based
//! measures (eigenvector, page rank, second order) treat it as transition
//! mass, the path-based measures (betweenness, closeness) treat it as
//! distance. A heavily weighted edge is therefore attractive to a random
//! walk but expensive as a path. Callers wanting inverse-distance semantics
//! must invert weights before building the graph.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use ndarray::{Array1, Array2};
use petgraph::graph::NodeIndex;
use petgraph::EdgeType;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AnalysisError, Result};
use crate::graph::Network;

use super::{CentralityReport, MeasureFailure, RankedNode, RankingColumn};

const DAMPING: f64 = 0.85;

/// The supported centrality measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CentralityKind {
    Eigenvector,
    PageRank,
    Betweenness,
    Closeness,
    Degree,
    SecondOrder,
}

impl CentralityKind {
    pub const ALL: [CentralityKind; 6] = [
        CentralityKind::Eigenvector,
        CentralityKind::PageRank,
        CentralityKind::Betweenness,
        CentralityKind::Closeness,
        CentralityKind::Degree,
        CentralityKind::SecondOrder,
    ];

    /// Short name used in logs and failure messages.
    pub fn name(self) -> &'static str {
        match self {
            CentralityKind::Eigenvector => "eigenvector centrality",
            CentralityKind::PageRank => "page rank",
            CentralityKind::Betweenness => "betweenness centrality",
            CentralityKind::Closeness => "closeness centrality",
            CentralityKind::Degree => "degree centrality",
            CentralityKind::SecondOrder => "second order centrality",
        }
    }

    fn compute<Ty: EdgeType + Sync>(self, net: &Network<Ty>, cfg: &Config) -> Result<Vec<f64>> {
        if net.node_count() == 0 {
            return Err(AnalysisError::EmptyGraph);
        }
        match self {
            CentralityKind::Eigenvector => eigenvector(net, cfg),
            CentralityKind::PageRank => pagerank(net, cfg),
            CentralityKind::Betweenness => betweenness(net),
            CentralityKind::Closeness => closeness(net),
            CentralityKind::Degree => degree(net),
            CentralityKind::SecondOrder => second_order(net),
        }
    }
}

impl std::fmt::Display for CentralityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs the requested measures and ranks the top `top_k` nodes per measure.
///
/// Scores sort descending with ties broken by node declaration order. A
/// measure that cannot run on this graph is recorded in the report's
/// `failures` and the remaining measures still complete.
pub fn rank_nodes<Ty: EdgeType + Sync>(
    net: &Network<Ty>,
    kinds: &[CentralityKind],
    top_k: usize,
    cfg: &Config,
) -> CentralityReport {
    let mut report = CentralityReport::default();

    for &kind in kinds {
        log::info!("Computing {}", kind.name());
        match kind.compute(net, cfg) {
            Ok(scores) => report.columns.push(RankingColumn {
                kind,
                entries: top_entries(net, &scores, top_k),
            }),
            Err(err) => {
                log::warn!("Skipping {}: {}", kind.name(), err);
                report.failures.push(MeasureFailure {
                    kind,
                    reason: err.to_string(),
                });
            }
        }
    }

    report
}

fn top_entries<Ty: EdgeType>(net: &Network<Ty>, scores: &[f64], top_k: usize) -> Vec<RankedNode> {
    let mut order: Vec<NodeIndex> = net.node_indices().collect();
    // Stable sort keeps declaration order among equal scores.
    order.sort_by(|&a, &b| {
        scores[b.index()]
            .partial_cmp(&scores[a.index()])
            .unwrap_or(Ordering::Equal)
    });
    order.truncate(top_k);

    order
        .into_iter()
        .map(|ix| {
            let attrs = net.attrs(ix);
            RankedNode {
                id: attrs.id.clone(),
                label: attrs.label.clone(),
                score: scores[ix.index()],
            }
        })
        .collect()
}

/// Incident-edge count (in plus out for directed graphs) over `n - 1`.
fn degree<Ty: EdgeType>(net: &Network<Ty>) -> Result<Vec<f64>> {
    let n = net.node_count();
    if n <= 1 {
        return Ok(vec![1.0; n]);
    }

    let denom = (n - 1) as f64;
    Ok(net
        .node_indices()
        .map(|v| {
            let mut count = net.out_edges(v).len();
            if net.is_directed() {
                count += net.in_edges(v).len();
            }
            count as f64 / denom
        })
        .collect())
}

/// Power iteration on the weighted adjacency, dampened by keeping the
/// previous vector as a baseline each step so bipartite structures cannot
/// oscillate. L2-normalized per step, converged when the L1 delta drops
/// below `n * tolerance`.
fn eigenvector<Ty: EdgeType>(net: &Network<Ty>, cfg: &Config) -> Result<Vec<f64>> {
    const NAME: &str = "eigenvector centrality";
    let n = net.node_count();
    if net.edge_count() == 0 {
        return Err(AnalysisError::Degenerate {
            algorithm: NAME,
            requirement: "at least one edge",
        });
    }

    let mut x = vec![1.0 / n as f64; n];
    for _ in 0..cfg.max_iterations {
        let mut next = x.clone();
        for u in net.node_indices() {
            for (v, w) in net.out_edges(u) {
                next[v.index()] += x[u.index()] * w;
            }
        }

        let norm: f64 = next.iter().map(|s| s * s).sum::<f64>().sqrt();
        let norm = if norm == 0.0 { 1.0 } else { norm };
        for s in &mut next {
            *s /= norm;
        }

        let delta: f64 = next.iter().zip(&x).map(|(a, b)| (a - b).abs()).sum();
        x = next;
        if delta < n as f64 * cfg.tolerance {
            return Ok(x);
        }
    }

    Err(AnalysisError::NonConvergence {
        algorithm: NAME,
        iterations: cfg.max_iterations,
    })
}

/// Weighted damped walk. Each node splits its damped mass across outgoing
/// edges in proportion to weight; dangling mass is redistributed uniformly.
fn pagerank<Ty: EdgeType>(net: &Network<Ty>, cfg: &Config) -> Result<Vec<f64>> {
    let n = net.node_count();
    let nf = n as f64;

    let out: Vec<Vec<(usize, f64)>> = net
        .node_indices()
        .map(|u| {
            net.out_edges(u)
                .into_iter()
                .filter(|&(_, w)| w > 0.0)
                .map(|(v, w)| (v.index(), w))
                .collect()
        })
        .collect();
    let out_weight: Vec<f64> = out
        .iter()
        .map(|edges| edges.iter().map(|&(_, w)| w).sum())
        .collect();

    let mut scores = vec![1.0 / nf; n];
    let mut next = vec![0.0; n];
    for _ in 0..cfg.max_iterations {
        let dangling: f64 = scores
            .iter()
            .zip(&out_weight)
            .filter(|&(_, &ow)| ow == 0.0)
            .map(|(s, _)| *s)
            .sum();
        let base = (1.0 - DAMPING) / nf + DAMPING * dangling / nf;

        for slot in next.iter_mut() {
            *slot = base;
        }
        for (u, edges) in out.iter().enumerate() {
            if out_weight[u] == 0.0 {
                continue;
            }
            let share = DAMPING * scores[u] / out_weight[u];
            for &(v, w) in edges {
                next[v] += share * w;
            }
        }

        let delta: f64 = next.iter().zip(&scores).map(|(a, b)| (a - b).abs()).sum();
        std::mem::swap(&mut scores, &mut next);
        if delta < nf * cfg.tolerance {
            return Ok(scores);
        }
    }

    Err(AnalysisError::NonConvergence {
        algorithm: "page rank",
        iterations: cfg.max_iterations,
    })
}

/// Brandes betweenness over weighted shortest paths, edge weight read as
/// distance. Per-source dependency passes run in parallel and reduce in
/// index order, so results are deterministic.
fn betweenness<Ty: EdgeType + Sync>(net: &Network<Ty>) -> Result<Vec<f64>> {
    validate_non_negative(net, "betweenness centrality")?;

    let n = net.node_count();
    if n <= 2 {
        return Ok(vec![0.0; n]);
    }

    let adjacency = out_adjacency(net);
    let partials: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|s| single_source_dependencies(&adjacency, s))
        .collect();

    let mut totals = vec![0.0; n];
    for partial in partials {
        for (slot, value) in totals.iter_mut().zip(partial) {
            *slot += value;
        }
    }

    // Undirected accumulation counts each pair from both endpoints, which
    // is exactly the doubled convention this scale expects.
    let scale = 1.0 / ((n - 1) as f64 * (n - 2) as f64);
    Ok(totals.into_iter().map(|t| t * scale).collect())
}

/// Inverse average shortest-path distance over incoming paths, scaled by
/// the reachable share so disconnected graphs stay comparable.
fn closeness<Ty: EdgeType>(net: &Network<Ty>) -> Result<Vec<f64>> {
    validate_non_negative(net, "closeness centrality")?;

    let n = net.node_count();
    let reversed: Vec<Vec<(usize, f64)>> = net
        .node_indices()
        .map(|v| {
            net.in_edges(v)
                .into_iter()
                .map(|(u, w)| (u.index(), w))
                .collect()
        })
        .collect();

    Ok((0..n)
        .map(|v| {
            let dist = dijkstra_distances(&reversed, v);
            let mut reachable = 0usize;
            let mut total = 0.0;
            for d in &dist {
                if d.is_finite() {
                    reachable += 1;
                    total += d;
                }
            }
            if reachable > 1 && total > 0.0 {
                let r = (reachable - 1) as f64;
                (r / total) * (r / (n - 1) as f64)
            } else {
                0.0
            }
        })
        .collect())
}

/// Standard deviation of random-walk return times.
///
/// The walk is balanced with self-loops that lift every node's in-weight to
/// the maximum, making the stationary distribution uniform, then each
/// node's return-time moments come from one linear solve over the
/// transition matrix. Lower scores mean more central nodes; the ranking
/// sort stays descending like every other measure, which reproduces the
/// upstream dashboard's column as-is.
fn second_order<Ty: EdgeType + Sync>(net: &Network<Ty>) -> Result<Vec<f64>> {
    const NAME: &str = "second order centrality";
    let n = net.node_count();
    if n < 2 {
        return Err(AnalysisError::Degenerate {
            algorithm: NAME,
            requirement: "at least 2 nodes",
        });
    }
    validate_non_negative(net, NAME)?;
    if !is_connected(net) {
        return Err(AnalysisError::Degenerate {
            algorithm: NAME,
            requirement: "a connected graph",
        });
    }

    let mut in_weight = vec![0.0; n];
    for v in net.node_indices() {
        in_weight[v.index()] = net.in_edges(v).iter().map(|&(_, w)| w).sum();
    }
    let d_max = in_weight.iter().cloned().fold(0.0, f64::max);

    let mut transition = Array2::<f64>::zeros((n, n));
    for u in net.node_indices() {
        for (v, w) in net.out_edges(u) {
            transition[[u.index(), v.index()]] += w;
        }
    }
    for i in 0..n {
        transition[[i, i]] += d_max - in_weight[i];
    }

    for i in 0..n {
        let row_sum: f64 = transition.row(i).sum();
        if row_sum <= 0.0 {
            return Err(AnalysisError::Degenerate {
                algorithm: NAME,
                requirement: "positive outgoing weight at every node",
            });
        }
        transition.row_mut(i).mapv_inplace(|p| p / row_sum);
    }

    let column_sums: Vec<f64> = (0..n)
        .into_par_iter()
        .map(|j| hitting_time_sum(&transition, j))
        .collect::<Result<Vec<f64>>>()?;

    let expected = (n * (n + 1)) as f64;
    Ok(column_sums
        .into_iter()
        .map(|m| (2.0 * m - expected).max(0.0).sqrt())
        .collect())
}

fn validate_non_negative<Ty: EdgeType>(net: &Network<Ty>, algorithm: &'static str) -> Result<()> {
    let mut edges = net.edges();
    if edges.any(|(_, _, w)| w < 0.0) {
        return Err(AnalysisError::Degenerate {
            algorithm,
            requirement: "non-negative edge weights",
        });
    }
    Ok(())
}

fn out_adjacency<Ty: EdgeType>(net: &Network<Ty>) -> Vec<Vec<(usize, f64)>> {
    net.node_indices()
        .map(|u| {
            net.out_edges(u)
                .into_iter()
                .map(|(v, w)| (v.index(), w))
                .collect()
        })
        .collect()
}

fn is_connected<Ty: EdgeType>(net: &Network<Ty>) -> bool {
    let n = net.node_count();
    let start = match net.node_indices().next() {
        Some(start) => start,
        None => return true,
    };

    let mut seen = vec![false; n];
    let mut queue = VecDeque::new();
    seen[start.index()] = true;
    queue.push_back(start);
    let mut visited = 1;

    while let Some(v) = queue.pop_front() {
        for u in net.undirected_neighbors(v) {
            if !seen[u.index()] {
                seen[u.index()] = true;
                visited += 1;
                queue.push_back(u);
            }
        }
    }

    visited == n
}

struct HeapEntry {
    dist: f64,
    node: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    // Reversed so the max-heap pops the smallest distance first; node index
    // breaks distance ties deterministically.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .partial_cmp(&self.dist)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One Brandes source pass: Dijkstra with path counting, then dependency
/// accumulation in reverse settlement order.
fn single_source_dependencies(adjacency: &[Vec<(usize, f64)>], source: usize) -> Vec<f64> {
    let n = adjacency.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut sigma = vec![0.0; n];
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut done = vec![false; n];
    let mut settled = Vec::with_capacity(n);
    let mut heap = BinaryHeap::new();

    dist[source] = 0.0;
    sigma[source] = 1.0;
    heap.push(HeapEntry {
        dist: 0.0,
        node: source,
    });

    while let Some(HeapEntry { dist: d, node: v }) = heap.pop() {
        if done[v] {
            continue;
        }
        done[v] = true;
        settled.push(v);

        for &(w, weight) in &adjacency[v] {
            let alt = d + weight;
            if alt < dist[w] {
                dist[w] = alt;
                sigma[w] = sigma[v];
                preds[w].clear();
                preds[w].push(v);
                heap.push(HeapEntry { dist: alt, node: w });
            } else if alt == dist[w] && !done[w] {
                sigma[w] += sigma[v];
                preds[w].push(v);
            }
        }
    }

    let mut delta = vec![0.0; n];
    let mut partial = vec![0.0; n];
    for &w in settled.iter().rev() {
        for &v in &preds[w] {
            if sigma[w] > 0.0 {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
        }
        if w != source {
            partial[w] += delta[w];
        }
    }
    partial
}

fn dijkstra_distances(adjacency: &[Vec<(usize, f64)>], source: usize) -> Vec<f64> {
    let n = adjacency.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut done = vec![false; n];
    let mut heap = BinaryHeap::new();

    dist[source] = 0.0;
    heap.push(HeapEntry {
        dist: 0.0,
        node: source,
    });

    while let Some(HeapEntry { dist: d, node: v }) = heap.pop() {
        if done[v] {
            continue;
        }
        done[v] = true;

        for &(w, weight) in &adjacency[v] {
            let alt = d + weight;
            if alt < dist[w] {
                dist[w] = alt;
                heap.push(HeapEntry { dist: alt, node: w });
            }
        }
    }

    dist
}

/// Sum of mean first-passage times into `target`, including its own mean
/// return time, via one linear solve of `(I - Q) x = 1` where `Q` is the
/// transition matrix with the target column zeroed.
fn hitting_time_sum(transition: &Array2<f64>, target: usize) -> Result<f64> {
    let n = transition.nrows();
    let mut a = Array2::<f64>::zeros((n, n));
    for r in 0..n {
        for c in 0..n {
            let p = if c == target { 0.0 } else { transition[[r, c]] };
            a[[r, c]] = if r == c { 1.0 - p } else { -p };
        }
    }

    let b = Array1::<f64>::ones(n);
    let x = solve_linear(a, b).ok_or(AnalysisError::Degenerate {
        algorithm: "second order centrality",
        requirement: "an ergodic random walk",
    })?;
    Ok(x.sum())
}

/// Gaussian elimination with partial pivoting. Returns `None` when the
/// system is singular to working precision.
fn solve_linear(mut a: Array2<f64>, mut b: Array1<f64>) -> Option<Array1<f64>> {
    let n = b.len();

    for col in 0..n {
        let mut pivot = col;
        let mut best = a[[col, col]].abs();
        for row in col + 1..n {
            let candidate = a[[row, col]].abs();
            if candidate > best {
                best = candidate;
                pivot = row;
            }
        }
        if best < 1e-12 {
            return None;
        }
        if pivot != col {
            for c in col..n {
                let tmp = a[[col, c]];
                a[[col, c]] = a[[pivot, c]];
                a[[pivot, c]] = tmp;
            }
            b.swap(pivot, col);
        }

        for row in col + 1..n {
            let factor = a[[row, col]] / a[[col, col]];
            if factor == 0.0 {
                continue;
            }
            for c in col..n {
                a[[row, c]] -= factor * a[[col, c]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = Array1::<f64>::zeros(n);
    for row in (0..n).rev() {
        let mut acc = b[row];
        for c in row + 1..n {
            acc -= a[[row, c]] * x[c];
        }
        x[row] = acc / a[[row, row]];
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_network, DirectedNetwork, EdgeSpec, NodeSpec, UndirectedNetwork};
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn directed(nodes: &[&str], edges: &[(&str, &str, f64)]) -> DirectedNetwork {
        build(nodes, edges)
    }

    fn undirected(nodes: &[&str], edges: &[(&str, &str, f64)]) -> UndirectedNetwork {
        build(nodes, edges)
    }

    fn build<Ty: EdgeType>(nodes: &[&str], edges: &[(&str, &str, f64)]) -> Network<Ty> {
        build_network(
            nodes.iter().map(|id| NodeSpec::new(*id, 1.0)).collect(),
            edges
                .iter()
                .map(|(from, to, w)| EdgeSpec::new(*from, *to, *w))
                .collect(),
        )
        .unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn degree_counts_both_directions() {
        let net = directed(&["a", "b", "c"], &[("a", "b", 1.0), ("b", "a", 1.0)]);
        let scores = degree(&net).unwrap();
        assert!(close(scores[0], 1.0));
        assert!(close(scores[1], 1.0));
        assert!(close(scores[2], 0.0));
    }

    #[test]
    fn degree_of_complete_graph_is_one() {
        let net = undirected(
            &["a", "b", "c"],
            &[("a", "b", 1.0), ("a", "c", 1.0), ("b", "c", 1.0)],
        );
        let scores = degree(&net).unwrap();
        assert!(scores.iter().all(|&s| close(s, 1.0)));
    }

    #[test]
    fn degree_of_singleton_is_one() {
        let net = directed(&["only"], &[]);
        assert_eq!(degree(&net).unwrap(), vec![1.0]);
    }

    #[test]
    fn eigenvector_is_uniform_on_symmetric_triangle() {
        let net = undirected(
            &["a", "b", "c"],
            &[("a", "b", 1.0), ("a", "c", 1.0), ("b", "c", 1.0)],
        );
        let scores = eigenvector(&net, &Config::default()).unwrap();
        let expected = 1.0 / 3f64.sqrt();
        for s in scores {
            assert!((s - expected).abs() < 1e-5, "{s} vs {expected}");
        }
    }

    #[test]
    fn eigenvector_favors_heavy_edges() {
        let net = undirected(&["a", "b", "c"], &[("a", "b", 1.0), ("b", "c", 10.0)]);
        let scores = eigenvector(&net, &Config::default()).unwrap();
        assert!(scores[1] > scores[2]);
        assert!(scores[2] > scores[0]);
    }

    #[test]
    fn eigenvector_needs_an_edge() {
        let net = directed(&["a", "b"], &[]);
        let err = eigenvector(&net, &Config::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Degenerate { .. }));
    }

    #[test]
    fn eigenvector_reports_exhausted_budget() {
        let net = directed(&["a", "b", "c"], &[("a", "b", 1.0), ("b", "c", 1.0)]);
        let cfg = Config {
            max_iterations: 1,
            ..Config::default()
        };
        let err = eigenvector(&net, &cfg).unwrap_err();
        assert!(
            matches!(err, AnalysisError::NonConvergence { iterations: 1, .. }),
            "{err}"
        );
    }

    #[test]
    fn pagerank_is_a_distribution_with_dangling_node() {
        let net = directed(&["a", "b"], &[("a", "b", 1.0)]);
        let scores = pagerank(&net, &Config::default()).unwrap();
        let sum: f64 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        // Fixed point of the damped walk with b's mass recycled uniformly.
        assert!((scores[0] - 0.350877).abs() < 1e-4, "{}", scores[0]);
        assert!((scores[1] - 0.649123).abs() < 1e-4, "{}", scores[1]);
    }

    #[test]
    fn pagerank_splits_mass_by_weight() {
        // c receives 3x the weight b does; its score must be higher.
        let net = directed(
            &["a", "b", "c"],
            &[("a", "b", 1.0), ("a", "c", 3.0), ("b", "a", 1.0), ("c", "a", 1.0)],
        );
        let scores = pagerank(&net, &Config::default()).unwrap();
        assert!(scores[2] > scores[1]);
        let sum: f64 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn betweenness_peaks_at_path_center() {
        let net = undirected(&["a", "b", "c"], &[("a", "b", 1.0), ("b", "c", 1.0)]);
        let scores = betweenness(&net).unwrap();
        assert!(close(scores[0], 0.0));
        assert!(close(scores[1], 1.0));
        assert!(close(scores[2], 0.0));
    }

    #[test]
    fn betweenness_on_directed_path_is_halved() {
        let net = directed(&["a", "b", "c"], &[("a", "b", 1.0), ("b", "c", 1.0)]);
        let scores = betweenness(&net).unwrap();
        assert!(close(scores[1], 0.5));
    }

    #[test]
    fn betweenness_reads_weight_as_distance() {
        // The heavy direct edge is the long way around, so shortest paths
        // between a and b run through c.
        let net = undirected(
            &["a", "b", "c"],
            &[("a", "b", 10.0), ("a", "c", 1.0), ("c", "b", 1.0)],
        );
        let scores = betweenness(&net).unwrap();
        assert!(close(scores[2], 1.0));
        assert!(close(scores[0], 0.0));
        assert!(close(scores[1], 0.0));
    }

    #[test]
    fn betweenness_rejects_negative_weights() {
        let net = directed(&["a", "b", "c"], &[("a", "b", -1.0), ("b", "c", 1.0)]);
        let err = betweenness(&net).unwrap_err();
        assert!(matches!(err, AnalysisError::Degenerate { .. }));
    }

    #[test]
    fn betweenness_is_zero_for_tiny_graphs() {
        let net = directed(&["a", "b"], &[("a", "b", 1.0)]);
        assert_eq!(betweenness(&net).unwrap(), vec![0.0, 0.0]);
    }

    #[test]
    fn closeness_follows_incoming_paths() {
        let net = directed(&["a", "b"], &[("a", "b", 4.0)]);
        let scores = closeness(&net).unwrap();
        // Nothing reaches a; b is reached from a at distance 4.
        assert!(close(scores[0], 0.0));
        assert!(close(scores[1], 0.25));
    }

    #[test]
    fn closeness_scales_by_reachable_share() {
        // d is isolated, so b's score carries the (r-1)/(n-1) factor.
        let net = directed(
            &["a", "b", "d"],
            &[("a", "b", 1.0)],
        );
        let scores = closeness(&net).unwrap();
        assert!(close(scores[1], 0.5));
        assert!(close(scores[2], 0.0));
    }

    #[test]
    fn second_order_is_zero_on_a_pair() {
        // A two-node walk returns in exactly two steps, so the return time
        // has no variance at all.
        let net = undirected(&["a", "b"], &[("a", "b", 1.0)]);
        let scores = second_order(&net).unwrap();
        assert!(close(scores[0], 0.0));
        assert!(close(scores[1], 0.0));
    }

    #[test]
    fn second_order_path_matches_hand_solve() {
        let net = undirected(&["a", "b", "c"], &[("a", "b", 1.0), ("b", "c", 1.0)]);
        let scores = second_order(&net).unwrap();
        assert!(close(scores[0], 14f64.sqrt()));
        assert!(close(scores[1], 2f64.sqrt()));
        assert!(close(scores[2], 14f64.sqrt()));
    }

    #[test]
    fn second_order_is_uniform_on_a_cycle() {
        let net = undirected(
            &["a", "b", "c", "d"],
            &[
                ("a", "b", 1.0),
                ("b", "c", 1.0),
                ("c", "d", 1.0),
                ("d", "a", 1.0),
            ],
        );
        let scores = second_order(&net).unwrap();
        let expected = 8f64.sqrt();
        for s in scores {
            assert!(close(s, expected), "{s}");
        }
    }

    #[test]
    fn second_order_requires_connectivity() {
        let net = undirected(&["a", "b", "c"], &[("a", "b", 1.0)]);
        let err = second_order(&net).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Degenerate {
                requirement: "a connected graph",
                ..
            }
        ));
    }

    #[test]
    fn second_order_requires_two_nodes() {
        let net = undirected(&["a"], &[]);
        let err = second_order(&net).unwrap_err();
        assert!(matches!(err, AnalysisError::Degenerate { .. }));
    }

    #[test]
    fn rank_nodes_sorts_and_truncates() {
        let net = directed(&["a", "b", "c"], &[("a", "c", 1.0), ("b", "c", 1.0)]);
        let report = rank_nodes(&net, &[CentralityKind::Degree], 2, &Config::default());

        assert!(report.failures.is_empty());
        let column = report.column(CentralityKind::Degree).unwrap();
        assert_eq!(column.entries.len(), 2);
        assert_eq!(column.entries[0].id, "c");
        // a and b tie; declaration order breaks it.
        assert_eq!(column.entries[1].id, "a");
    }

    #[test]
    fn rank_nodes_isolates_failing_measures() {
        let net = directed(&["a", "b"], &[]);
        let report = rank_nodes(
            &net,
            &[CentralityKind::Eigenvector, CentralityKind::Degree],
            10,
            &Config::default(),
        );

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].kind, CentralityKind::Eigenvector);
        assert!(report.failures[0].reason.contains("at least one edge"));

        let column = report.column(CentralityKind::Degree).unwrap();
        assert_eq!(column.entries.len(), 2);
    }

    #[test]
    fn rank_nodes_on_empty_graph_fails_every_measure() {
        let net: DirectedNetwork = build_network(vec![], vec![]).unwrap();
        let report = rank_nodes(&net, &CentralityKind::ALL, 10, &Config::default());
        assert!(report.columns.is_empty());
        assert_eq!(report.failures.len(), CentralityKind::ALL.len());
        for failure in &report.failures {
            assert!(failure.reason.contains("no nodes"));
        }
    }

    #[test]
    fn ranking_keeps_all_nodes_when_k_exceeds_n() {
        let net = undirected(&["a", "b"], &[("a", "b", 1.0)]);
        let report = rank_nodes(&net, &[CentralityKind::Degree], 50, &Config::default());
        assert_eq!(report.column(CentralityKind::Degree).unwrap().entries.len(), 2);
    }

    proptest! {
        #[test]
        fn pagerank_always_sums_to_one(
            raw_edges in proptest::collection::vec((0usize..5, 0usize..5, 1u32..9), 0..12),
        ) {
            let mut weights: HashMap<(usize, usize), f64> = HashMap::new();
            for (u, v, w) in raw_edges {
                *weights.entry((u, v)).or_insert(0.0) += w as f64;
            }

            let nodes: Vec<NodeSpec> =
                (0..5).map(|i| NodeSpec::new(format!("n{i}"), 1.0)).collect();
            let edges: Vec<EdgeSpec> = weights
                .into_iter()
                .map(|((u, v), w)| EdgeSpec::new(format!("n{u}"), format!("n{v}"), w))
                .collect();
            let net: DirectedNetwork = build_network(nodes, edges).unwrap();

            let scores = pagerank(&net, &Config::default()).unwrap();
            let sum: f64 = scores.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-6, "sum {sum}");
            prop_assert!(scores.iter().all(|&s| s >= 0.0));
        }

        #[test]
        fn betweenness_is_finite_and_non_negative(
            raw_edges in proptest::collection::vec((0usize..5, 0usize..5, 1u32..9), 0..12),
        ) {
            let mut weights: HashMap<(usize, usize), f64> = HashMap::new();
            for (u, v, w) in raw_edges {
                if u != v {
                    *weights.entry((u, v)).or_insert(0.0) += w as f64;
                }
            }

            let nodes: Vec<NodeSpec> =
                (0..5).map(|i| NodeSpec::new(format!("n{i}"), 1.0)).collect();
            let edges: Vec<EdgeSpec> = weights
                .into_iter()
                .map(|((u, v), w)| EdgeSpec::new(format!("n{u}"), format!("n{v}"), w))
                .collect();
            let net: DirectedNetwork = build_network(nodes, edges).unwrap();

            let scores = betweenness(&net).unwrap();
            prop_assert!(scores.iter().all(|s| s.is_finite() && *s >= 0.0));
        }
    }
}
