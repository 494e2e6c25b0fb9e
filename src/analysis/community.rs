//! Greedy modularity community detection.
//!
//! Clauset-Newman-Moore agglomeration over a directed arc view: a directed
//! edge is one arc, an undirected edge counts as an arc in each direction.
//! Every node starts in its own community and the connected pair with the
//! largest modularity gain merges, repeatedly, until no merge improves the
//! partition. The gain for communities `a` and `b` is
//!
//! ```text
//! dQ = (w_ab + w_ba) / m2 - (Kout_a * Kin_b + Kout_b * Kin_a) / m2^2
//! ```
//!
//! with `m2` the total arc weight. Ties go to the smallest community
//! indices, so the partition is deterministic for a given node order.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use petgraph::graph::NodeIndex;
use petgraph::EdgeType;

use crate::config::Config;
use crate::graph::Network;

use super::Community;

struct Group {
    members: Vec<usize>,
    kout: f64,
    kin: f64,
    inside: f64,
    /// Arc weight from this community to each connected community.
    out: HashMap<usize, f64>,
    /// Arc weight from each connected community into this one.
    inc: HashMap<usize, f64>,
}

/// Partitions the network into communities of at least
/// `cfg.community_cutoff` nodes, keeping at most `cfg.max_communities`.
///
/// Communities are ordered by their modularity contribution, largest first,
/// ties by size then by member labels. Graphs with no positive edge weight
/// yield an empty collection.
pub fn detect_communities<Ty: EdgeType>(net: &Network<Ty>, cfg: &Config) -> Vec<Community> {
    log::info!(
        "Detecting communities (size cutoff {}, max {})",
        cfg.community_cutoff,
        cfg.max_communities
    );

    let n = net.node_count();
    let mut groups: Vec<Option<Group>> = (0..n)
        .map(|i| {
            Some(Group {
                members: vec![i],
                kout: 0.0,
                kin: 0.0,
                inside: 0.0,
                out: HashMap::new(),
                inc: HashMap::new(),
            })
        })
        .collect();

    let mut m2 = 0.0;
    for (u, v, w) in net.edges() {
        let mirror = if net.is_directed() { 1.0 } else { 2.0 };
        m2 += w * mirror;
        add_arc(&mut groups, u.index(), v.index(), w);
        if !net.is_directed() {
            add_arc(&mut groups, v.index(), u.index(), w);
        }
    }
    if n == 0 || m2 <= 0.0 {
        return Vec::new();
    }

    loop {
        let mut best: Option<(f64, usize, usize)> = None;
        for a in 0..n {
            let ga = match groups[a].as_ref() {
                Some(g) => g,
                None => continue,
            };
            let neighbors: BTreeSet<usize> = ga
                .out
                .keys()
                .chain(ga.inc.keys())
                .copied()
                .filter(|&b| b > a)
                .collect();
            for b in neighbors {
                let gb = match groups[b].as_ref() {
                    Some(g) => g,
                    None => continue,
                };
                let between = ga.out.get(&b).copied().unwrap_or(0.0)
                    + ga.inc.get(&b).copied().unwrap_or(0.0);
                let dq = between / m2 - (ga.kout * gb.kin + gb.kout * ga.kin) / (m2 * m2);
                // Strictly-greater keeps the first (smallest) pair on ties.
                if best.map_or(true, |(score, _, _)| dq > score) {
                    best = Some((dq, a, b));
                }
            }
        }

        match best {
            Some((dq, a, b)) if dq > 0.0 => merge(&mut groups, a, b),
            _ => break,
        }
    }

    let survivors = groups.iter().flatten().count();
    // Undirected internal arcs are mirrored; halve them back to edge weight.
    let inside_scale = if net.is_directed() { 1.0 } else { 0.5 };
    let mut communities: Vec<Community> = groups
        .into_iter()
        .flatten()
        .filter(|g| g.members.len() >= cfg.community_cutoff)
        .map(|g| {
            let mut members: Vec<String> = g
                .members
                .iter()
                .map(|&i| net.attrs(NodeIndex::new(i)).label.clone())
                .collect();
            members.sort();
            Community {
                members,
                weight_inside: g.inside * inside_scale,
                contribution: g.inside / m2 - g.kout * g.kin / (m2 * m2),
            }
        })
        .collect();
    log::info!(
        "Merged into {} communities, {} at or above the cutoff",
        survivors,
        communities.len()
    );

    communities.sort_by(|a, b| {
        b.contribution
            .partial_cmp(&a.contribution)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.members.len().cmp(&a.members.len()))
            .then_with(|| a.members.cmp(&b.members))
    });
    communities.truncate(cfg.max_communities);
    communities
}

fn add_arc(groups: &mut [Option<Group>], from: usize, to: usize, weight: f64) {
    if from == to {
        if let Some(g) = groups[from].as_mut() {
            g.inside += weight;
            g.kout += weight;
            g.kin += weight;
        }
        return;
    }
    if let Some(g) = groups[from].as_mut() {
        g.kout += weight;
        *g.out.entry(to).or_insert(0.0) += weight;
    }
    if let Some(g) = groups[to].as_mut() {
        g.kin += weight;
        *g.inc.entry(from).or_insert(0.0) += weight;
    }
}

/// Folds community `b` into community `a` and renames `b` in every
/// neighbor's arc maps. `a < b` always holds, so a community's index stays
/// the smallest node index it contains.
fn merge(groups: &mut [Option<Group>], a: usize, b: usize) {
    let gb = match groups[b].take() {
        Some(g) => g,
        None => return,
    };

    let mut affected: BTreeSet<usize> = gb.out.keys().chain(gb.inc.keys()).copied().collect();
    affected.remove(&a);
    for c in affected {
        if let Some(gc) = groups[c].as_mut() {
            if let Some(w) = gc.out.remove(&b) {
                *gc.out.entry(a).or_insert(0.0) += w;
            }
            if let Some(w) = gc.inc.remove(&b) {
                *gc.inc.entry(a).or_insert(0.0) += w;
            }
        }
    }

    if let Some(ga) = groups[a].as_mut() {
        let ab = ga.out.remove(&b).unwrap_or(0.0);
        let ba = ga.inc.remove(&b).unwrap_or(0.0);
        ga.inside += gb.inside + ab + ba;
        ga.kout += gb.kout;
        ga.kin += gb.kin;
        ga.members.extend(gb.members);
        for (c, w) in gb.out {
            if c != a {
                *ga.out.entry(c).or_insert(0.0) += w;
            }
        }
        for (c, w) in gb.inc {
            if c != a {
                *ga.inc.entry(c).or_insert(0.0) += w;
            }
        }
    }
}
