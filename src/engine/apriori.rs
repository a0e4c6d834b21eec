//! Apriori Engine: generate length-(m+1) candidates from length-m frequent
//! nodes, then rescan the corpus once to count them.

use log::debug;

use crate::corpus::subsequences;
use crate::engine::join_candidates;
use crate::pass_counter::PassCounter;
use crate::provider::SequenceProvider;
use crate::trie::Trie;

/// First pass: populate the trie with every length-`len` window and its
/// support, counted from scratch.
pub fn initialize(
    provider: &dyn SequenceProvider,
    len: usize,
    counter: &mut dyn PassCounter,
) -> Trie {
    let mut trie = Trie::new();
    for seq in provider.iter() {
        for window in subsequences(&seq, len) {
            trie.insert_suffix(&window, Some(1), None);
        }
    }
    counter.increment();
    debug!("apriori: initialized level {len}");
    trie
}

/// Grow `trie` from level `next_len - 1` to `next_len`: generate candidates
/// from the previous level's frequent nodes, insert them structurally, then
/// rescan the corpus once to measure their support.
pub fn extend(
    provider: &dyn SequenceProvider,
    trie: &mut Trie,
    next_len: usize,
    threshold: u64,
    counter: &mut dyn PassCounter,
) {
    let candidates = join_candidates(trie, next_len - 1, threshold);
    debug!(
        "apriori: generated {} candidates for level {next_len}",
        candidates.len()
    );
    for candidate in &candidates {
        trie.insert_suffix(&candidate.pattern, None, None);
    }
    for seq in provider.iter() {
        for window in subsequences(&seq, next_len) {
            trie.increment_if_present(&window, 1);
        }
    }
    counter.increment();
}
