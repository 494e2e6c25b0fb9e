//! Co-occurrence aggregation over grouped names.
//!
//! Input is a collection of groups, each a list of names that appeared
//! together (for example the focus areas of a single grant). The output
//! counts, per name, how many groups it appeared in, and per unordered name
//! pair, how many groups contained both.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use itertools::Itertools;

use crate::graph::{EdgeSpec, NodeSpec};

/// Aggregated co-occurrence totals.
///
/// Keys are lower-cased names; `labels` keeps the first spelling seen so
/// display output matches the source data. Both weight maps iterate in
/// lexicographic key order, and pair keys are stored with the smaller name
/// first.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CooccurrenceTotals {
    pub node_weights: BTreeMap<String, u64>,
    pub pair_weights: BTreeMap<(String, String), u64>,
    pub labels: HashMap<String, String>,
}

impl CooccurrenceTotals {
    pub fn is_empty(&self) -> bool {
        self.node_weights.is_empty()
    }

    /// Converts the totals into builder declarations, nodes in key order.
    /// Pair keys are unique and normalized, so the resulting edge list never
    /// trips the builder's duplicate check.
    pub fn into_specs(self) -> (Vec<NodeSpec>, Vec<EdgeSpec>) {
        let CooccurrenceTotals {
            node_weights,
            pair_weights,
            labels,
        } = self;

        let nodes = node_weights
            .into_iter()
            .map(|(key, count)| {
                let label = labels.get(&key).cloned().unwrap_or_else(|| key.clone());
                NodeSpec::new(key, count as f64).with_label(label)
            })
            .collect();

        let edges = pair_weights
            .into_iter()
            .map(|((a, b), count)| EdgeSpec::new(a, b, count as f64))
            .collect();

        (nodes, edges)
    }
}

/// Folds groups of names into co-occurrence totals.
///
/// Members are lower-cased and de-duplicated within each group, so a name
/// repeated inside one group counts once there. Every pair of distinct
/// members adds one to that pair's total; groups with fewer than two
/// distinct members contribute node weight only.
pub fn aggregate_groups<S: AsRef<str>>(groups: &[Vec<S>]) -> CooccurrenceTotals {
    let mut totals = CooccurrenceTotals::default();

    for group in groups {
        let mut members = BTreeSet::new();
        for raw in group {
            let raw = raw.as_ref();
            let key = raw.to_lowercase();
            totals
                .labels
                .entry(key.clone())
                .or_insert_with(|| raw.to_string());
            members.insert(key);
        }

        let members: Vec<String> = members.into_iter().collect();
        for name in &members {
            *totals.node_weights.entry(name.clone()).or_insert(0) += 1;
        }
        // BTreeSet iteration is sorted, so combinations are already in
        // normalized (smaller, larger) order.
        for pair in members.iter().combinations(2) {
            let key = (pair[0].clone(), pair[1].clone());
            *totals.pair_weights.entry(key).or_insert(0) += 1;
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn pair(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn overlapping_groups_accumulate_pair_weight() {
        let totals = aggregate_groups(&[vec!["A", "B", "C"], vec!["B", "C"]]);

        assert_eq!(totals.node_weights["a"], 1);
        assert_eq!(totals.node_weights["b"], 2);
        assert_eq!(totals.node_weights["c"], 2);

        assert_eq!(totals.pair_weights[&pair("a", "b")], 1);
        assert_eq!(totals.pair_weights[&pair("a", "c")], 1);
        assert_eq!(totals.pair_weights[&pair("b", "c")], 2);
        assert_eq!(totals.pair_weights.len(), 3);
    }

    #[test]
    fn empty_input_yields_empty_totals() {
        let groups: Vec<Vec<&str>> = Vec::new();
        let totals = aggregate_groups(&groups);
        assert!(totals.is_empty());
        assert!(totals.pair_weights.is_empty());
    }

    #[test]
    fn singleton_group_contributes_node_weight_only() {
        let totals = aggregate_groups(&[vec!["solo"]]);
        assert_eq!(totals.node_weights["solo"], 1);
        assert!(totals.pair_weights.is_empty());
    }

    #[test]
    fn duplicate_members_in_one_group_count_once() {
        let totals = aggregate_groups(&[vec!["x", "X", "y", "x"]]);
        assert_eq!(totals.node_weights["x"], 1);
        assert_eq!(totals.node_weights["y"], 1);
        assert_eq!(totals.pair_weights[&pair("x", "y")], 1);
    }

    #[test]
    fn labels_keep_first_seen_spelling() {
        let totals = aggregate_groups(&[vec!["Health Care"], vec!["health care"]]);
        assert_eq!(totals.node_weights["health care"], 2);
        assert_eq!(totals.labels["health care"], "Health Care");
    }

    #[test]
    fn specs_preserve_lexicographic_order() {
        let totals = aggregate_groups(&[vec!["c", "a"], vec!["b"]]);
        let (nodes, edges) = totals.into_specs();

        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(edges.len(), 1);
        assert_eq!((edges[0].from.as_str(), edges[0].to.as_str()), ("a", "c"));
        assert_eq!(edges[0].weight, 1.0);
    }

    proptest! {
        #[test]
        fn totals_ignore_group_and_member_order(
            groups in proptest::collection::vec(
                proptest::collection::vec("[a-e]", 0..5),
                0..8,
            ),
            seed in any::<u64>(),
        ) {
            let mut shuffled = groups.clone();
            let mut rng = StdRng::seed_from_u64(seed);
            shuffled.shuffle(&mut rng);
            for group in &mut shuffled {
                group.shuffle(&mut rng);
            }

            let original = aggregate_groups(&groups);
            let reordered = aggregate_groups(&shuffled);
            prop_assert_eq!(original.node_weights, reordered.node_weights);
            prop_assert_eq!(original.pair_weights, reordered.pair_weights);
        }

        #[test]
        fn pair_weight_is_bounded_by_member_weights(
            groups in proptest::collection::vec(
                proptest::collection::vec("[a-e]", 0..5),
                0..8,
            ),
        ) {
            let totals = aggregate_groups(&groups);
            for ((a, b), &w) in &totals.pair_weights {
                prop_assert!(a < b, "pair ({a}, {b}) not normalized");
                prop_assert!(w <= totals.node_weights[a]);
                prop_assert!(w <= totals.node_weights[b]);
            }
        }

        #[test]
        fn node_weight_total_counts_distinct_memberships(
            groups in proptest::collection::vec(
                proptest::collection::vec("[a-e]", 0..5),
                0..8,
            ),
        ) {
            let totals = aggregate_groups(&groups);
            let expected: u64 = groups
                .iter()
                .map(|g| {
                    g.iter()
                        .map(|s| s.to_lowercase())
                        .collect::<BTreeSet<_>>()
                        .len() as u64
                })
                .sum();
            let total: u64 = totals.node_weights.values().sum();
            prop_assert_eq!(total, expected);
        }
    }
}
