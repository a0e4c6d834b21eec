//! Shared machinery between the Apriori and Position-Queue engines: both
//! grow the trie from level m to m+1 using the same candidate join, differ
//! only in how they measure the new level's support.

pub mod apriori;
pub mod hybrid;
pub mod position;

use crate::alphabet::Symbol;
use crate::trie::Trie;

/// One (prefix, suffix) join candidate at level `m+1`: a frequent length-m
/// prefix `P` and a frequent length-m suffix `S` of the node `P.seq[1..]`,
/// joined into a length-(m+1) pattern `P.seq ++ S.seq[m-1..]`.
///
/// Any frequent length-(m+1) pattern must have both a frequent length-m
/// prefix and a frequent length-m suffix (support is monotone under
/// substring), so this enumeration prunes infeasible candidates without
/// false negatives.
pub struct Candidate {
    pub pattern: Vec<Symbol>,
    pub prefix_idx: Option<u32>,
    pub suffix_idx: Option<u32>,
}

/// Enumerate join candidates for level `m + 1` from a trie whose level-`m`
/// counts are finalized. Deterministic order: prefixes in
/// `nodes_at_level(m)` order, suffixes in alphabet order -- this ordering
/// is what makes `idx` assignment reproducible across runs.
pub fn join_candidates(trie: &Trie, m: usize, threshold: u64) -> Vec<Candidate> {
    let mut out = Vec::new();
    for prefix_node in trie.nodes_at_level(m) {
        if !prefix_node.has_count_at_least(threshold) {
            continue;
        }
        let prefix = prefix_node.seq();
        // The intersection node represents prefix.seq[1..], i.e. the
        // length-(m-1) overlap shared by the prefix and every candidate
        // suffix.
        let intersection = match trie.lookup(&prefix[1..]) {
            Ok(node) => node,
            Err(_) => continue,
        };
        for suffix_node in intersection.children() {
            if !suffix_node.has_count_at_least(threshold) {
                continue;
            }
            let suffix = suffix_node.seq();
            let mut pattern = prefix.to_vec();
            pattern.push(*suffix.last().unwrap());
            out.push(Candidate {
                pattern,
                prefix_idx: prefix_node.idx(),
                suffix_idx: suffix_node.idx(),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::pattern_to_string;
    use crate::corpus::subsequences;

    fn build_level_two_tree() -> Trie {
        let mut tree = Trie::new();
        let seq = "ACGATTCGATCG";
        for _ in 0..2 {
            for window in subsequences(seq, 2) {
                tree.insert_suffix(&window, Some(1), None);
            }
        }
        tree
    }

    #[test]
    fn join_candidates_match_source_fixture() {
        let tree = build_level_two_tree();
        let mut cands: Vec<String> = join_candidates(&tree, 2, 4)
            .into_iter()
            .map(|c| pattern_to_string(&c.pattern))
            .collect();
        cands.sort();
        let mut expected: Vec<String> =
            ["ATC", "CGA", "GAT", "TCG"].iter().map(|s| s.to_string()).collect();
        expected.sort();
        assert_eq!(cands, expected);
    }
}
