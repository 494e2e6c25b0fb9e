//! Maximal clique enumeration.
//!
//! Bron-Kerbosch with pivoting over the undirected topology; directed edges
//! are read as symmetric adjacency. Candidate sets are iterated in ascending
//! node order, so discovery order is a pure function of the input. Runtime
//! is exponential in the worst case, which is acceptable at the node counts
//! this crate targets.

use std::collections::HashSet;

use petgraph::graph::NodeIndex;
use petgraph::EdgeType;

use crate::config::Config;
use crate::graph::Network;

use super::Clique;

/// Enumerates maximal cliques (singletons included) and keeps the
/// `cfg.max_cliques` largest, ties resolved by discovery order.
pub fn find_cliques<Ty: EdgeType>(net: &Network<Ty>, cfg: &Config) -> Vec<Clique> {
    log::info!("Enumerating maximal cliques (keeping {})", cfg.max_cliques);

    let n = net.node_count();
    let neighbors: Vec<HashSet<usize>> = net
        .node_indices()
        .map(|v| {
            net.undirected_neighbors(v)
                .into_iter()
                .map(NodeIndex::index)
                .collect()
        })
        .collect();

    let mut found: Vec<Vec<usize>> = Vec::new();
    let mut current = Vec::new();
    expand(
        &neighbors,
        &mut current,
        (0..n).collect(),
        Vec::new(),
        &mut found,
    );
    log::info!("Found {} maximal cliques", found.len());

    let mut cliques: Vec<Clique> = found
        .into_iter()
        .map(|members| {
            let mut members: Vec<String> = members
                .into_iter()
                .map(|i| net.attrs(NodeIndex::new(i)).label.clone())
                .collect();
            members.sort();
            Clique { members }
        })
        .collect();
    // Stable sort, so equal sizes stay in discovery order.
    cliques.sort_by(|a, b| b.len().cmp(&a.len()));
    cliques.truncate(cfg.max_cliques);
    cliques
}

fn expand(
    neighbors: &[HashSet<usize>],
    current: &mut Vec<usize>,
    mut candidates: Vec<usize>,
    mut excluded: Vec<usize>,
    found: &mut Vec<Vec<usize>>,
) {
    if candidates.is_empty() && excluded.is_empty() {
        found.push(current.clone());
        return;
    }

    // Branch only on candidates outside the pivot's neighborhood; the pivot
    // is the node covering the most candidates.
    let pivot = candidates
        .iter()
        .chain(excluded.iter())
        .copied()
        .max_by_key(|&u| {
            candidates
                .iter()
                .filter(|&&v| neighbors[u].contains(&v))
                .count()
        });
    let branch: Vec<usize> = match pivot {
        Some(p) => candidates
            .iter()
            .copied()
            .filter(|v| !neighbors[p].contains(v))
            .collect(),
        None => Vec::new(),
    };

    for v in branch {
        let next_candidates = candidates
            .iter()
            .copied()
            .filter(|u| neighbors[v].contains(u))
            .collect();
        let next_excluded = excluded
            .iter()
            .copied()
            .filter(|u| neighbors[v].contains(u))
            .collect();

        current.push(v);
        expand(neighbors, current, next_candidates, next_excluded, found);
        current.pop();

        candidates.retain(|&u| u != v);
        excluded.push(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_network, DirectedNetwork, EdgeSpec, NodeSpec, UndirectedNetwork};

    fn cfg(max: usize) -> Config {
        Config {
            max_cliques: max,
            ..Config::default()
        }
    }

    fn nodes(names: &[&str]) -> Vec<NodeSpec> {
        names.iter().map(|id| NodeSpec::new(*id, 1.0)).collect()
    }

    #[test]
    fn finds_the_complete_subgraph() {
        let names = ["a", "b", "c", "d", "e", "f"];
        let mut edges = Vec::new();
        for i in 0..4 {
            for j in i + 1..4 {
                edges.push(EdgeSpec::new(names[i], names[j], 1.0));
            }
        }
        edges.push(EdgeSpec::new("d", "e", 1.0));
        let net: UndirectedNetwork = build_network(nodes(&names), edges).unwrap();

        let cliques = find_cliques(&net, &cfg(5));
        assert_eq!(cliques.len(), 3);
        assert_eq!(cliques[0].members, vec!["a", "b", "c", "d"]);
        assert_eq!(cliques[1].members, vec!["d", "e"]);
        assert_eq!(cliques[2].members, vec!["f"]);
    }

    #[test]
    fn directed_edges_are_symmetrized() {
        let edges = vec![
            EdgeSpec::new("a", "b", 1.0),
            EdgeSpec::new("b", "c", 1.0),
            EdgeSpec::new("a", "c", 1.0),
        ];
        let net: DirectedNetwork = build_network(nodes(&["a", "b", "c"]), edges).unwrap();

        let cliques = find_cliques(&net, &cfg(5));
        assert_eq!(cliques.len(), 1);
        assert_eq!(cliques[0].members, vec!["a", "b", "c"]);
    }

    #[test]
    fn equal_sizes_keep_discovery_order() {
        let edges = vec![
            EdgeSpec::new("a", "b", 1.0),
            EdgeSpec::new("a", "c", 1.0),
            EdgeSpec::new("b", "c", 1.0),
            EdgeSpec::new("d", "e", 1.0),
            EdgeSpec::new("d", "f", 1.0),
            EdgeSpec::new("e", "f", 1.0),
        ];
        let net: UndirectedNetwork =
            build_network(nodes(&["a", "b", "c", "d", "e", "f"]), edges).unwrap();

        let cliques = find_cliques(&net, &cfg(5));
        assert_eq!(cliques.len(), 2);
        assert_eq!(cliques[0].members, vec!["a", "b", "c"]);
        assert_eq!(cliques[1].members, vec!["d", "e", "f"]);
    }

    #[test]
    fn keeps_only_the_largest() {
        let names = ["a0", "b0", "a1", "b1", "a2", "b2", "a3", "b3", "a4", "b4", "a5", "b5"];
        let edges: Vec<EdgeSpec> = (0..6)
            .map(|i| EdgeSpec::new(format!("a{i}"), format!("b{i}"), 1.0))
            .collect();
        let net: UndirectedNetwork = build_network(nodes(&names), edges).unwrap();

        let cliques = find_cliques(&net, &cfg(5));
        assert_eq!(cliques.len(), 5);
        assert_eq!(cliques[0].members, vec!["a0", "b0"]);
        assert_eq!(cliques[4].members, vec!["a4", "b4"]);
    }

    #[test]
    fn isolated_nodes_are_singletons() {
        let net: UndirectedNetwork = build_network(nodes(&["x", "y"]), vec![]).unwrap();
        let cliques = find_cliques(&net, &cfg(5));
        assert_eq!(cliques.len(), 2);
        assert_eq!(cliques[0].members, vec!["x"]);
        assert_eq!(cliques[1].members, vec!["y"]);
    }

    #[test]
    fn empty_graph_has_no_cliques() {
        let net: DirectedNetwork = build_network(vec![], vec![]).unwrap();
        assert!(find_cliques(&net, &cfg(5)).is_empty());
    }
}
