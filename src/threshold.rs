//! Result Filter: turning a finished trie into the caller-facing list of
//! (pattern, support) pairs, given either a single scalar threshold or a
//! per-length threshold map.

use std::collections::BTreeMap;

use crate::trie::Trie;

/// Support threshold supplied to a mining run: either one value applied at
/// every length, or a per-length map (typically produced by
/// `significance::thresholds`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Threshold {
    Scalar(u64),
    PerLength(BTreeMap<usize, u64>),
}

impl Threshold {
    /// The minimum support a pattern of `len` must have. Lengths absent
    /// from a `PerLength` map have no threshold defined, i.e. nothing at
    /// that length can ever pass.
    pub fn at(&self, len: usize) -> Option<u64> {
        match self {
            Threshold::Scalar(t) => Some(*t),
            Threshold::PerLength(map) => map.get(&len).copied(),
        }
    }
}

/// Number of frequent occurrences (sum of supports) at `len` under
/// `threshold`. Used by the Hybrid Controller to decide whether a Position
/// queue at this length would fit the memory budget.
pub fn count_frequent_occurrences(trie: &Trie, len: usize, threshold: u64) -> u64 {
    trie.nodes_at_level(len)
        .into_iter()
        .filter(|n| n.has_count_at_least(threshold))
        .map(|n| n.count().unwrap())
        .sum()
}

/// All (pattern, support) pairs in `trie` whose support meets the
/// length-specific threshold. A node at a length the threshold has no
/// entry for (gap in a `PerLength` map) is never emitted.
pub fn filter_patterns(trie: &Trie, threshold: &Threshold) -> Vec<(String, u64)> {
    trie.all_nodes()
        .into_iter()
        .filter_map(|n| {
            let count = n.count()?;
            let min = threshold.at(n.seq().len())?;
            (count >= min).then(|| (n.pattern_string(), count))
        })
        .collect()
}
