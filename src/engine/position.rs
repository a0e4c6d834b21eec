//! Position Queue Engine: maintain a flat queue of occurrences of the
//! current-length frequent patterns, and extend it to the next length by a
//! linear adjacency join -- no corpus rescan required.

use log::debug;
use rustc_hash::FxHashMap;

use crate::corpus::subsequences_with_offset;
use crate::engine::join_candidates;
use crate::pass_counter::PassCounter;
use crate::provider::SequenceProvider;
use crate::queue::{Queue, QueueRecord};
use crate::trie::Trie;

/// Assign a dense `idx` to every frequent node at `level`, in
/// `nodes_at_level` order. Indices are only ever valid for the level they
/// were assigned at; the engine never reads a stale assignment.
pub fn assign_pattern_index(trie: &mut Trie, level: usize, threshold: u64) {
    let mut idx = 0u32;
    let patterns: Vec<Vec<crate::alphabet::Symbol>> = trie
        .nodes_at_level(level)
        .into_iter()
        .filter(|n| n.has_count_at_least(threshold))
        .map(|n| n.seq().to_vec())
        .collect();
    for pattern in patterns {
        trie.insert_suffix(&pattern, None, Some(idx));
        idx += 1;
    }
}

/// Build the initial queue for `level`: one rescan of the corpus, emitting
/// a record for every window whose trie node is frequent. Document order
/// of the queue matches iteration order of the corpus.
pub fn build_queue(
    provider: &dyn SequenceProvider,
    trie: &Trie,
    level: usize,
    counter: &mut dyn PassCounter,
) -> Queue {
    let mut queue = Queue::new();
    for (seq_id, seq) in provider.iter().enumerate() {
        for (offset, window) in subsequences_with_offset(&seq, level) {
            if let Ok(node) = trie.lookup(&window) {
                if let Some(idx) = node.idx() {
                    queue.push(QueueRecord::new(seq_id as u32, offset as u32, idx));
                }
            }
        }
    }
    counter.increment();
    debug!("position: built queue of {} records at level {level}", queue.len());
    queue
}

/// Extend `queue` (at level `m`) and `trie` to level `m + 1`: generate join
/// candidates, assign each a fresh dense index, then walk the queue with an
/// adjacent-pair pointer to find which consecutive records form a
/// candidate occurrence. No corpus rescan.
pub fn extend(trie: &mut Trie, queue: &mut Queue, next_len: usize, threshold: u64) {
    if queue.is_empty() {
        return;
    }

    let candidates = join_candidates(trie, next_len - 1, threshold);
    let mut join_map: FxHashMap<(u32, u32), u32> = FxHashMap::default();
    let mut reverse: Vec<Vec<crate::alphabet::Symbol>> =
        Vec::with_capacity(candidates.len());
    for (cand_idx, candidate) in candidates.iter().enumerate() {
        let cand_idx = cand_idx as u32;
        trie.insert_suffix(&candidate.pattern, None, Some(cand_idx));
        if let (Some(p), Some(s)) = (candidate.prefix_idx, candidate.suffix_idx) {
            join_map.insert((p, s), cand_idx);
        }
        reverse.push(candidate.pattern.clone());
    }
    debug!(
        "position: {} join candidates at level {next_len}",
        candidates.len()
    );

    let mut new_queue = Queue::with_capacity(queue.len());
    for window in queue.windows(2) {
        let prev = window[0];
        curr_step(trie, &join_map, &reverse, prev, window[1], &mut new_queue);
    }
    *queue = new_queue;
}

#[allow(clippy::too_many_arguments)]
fn curr_step(
    trie: &mut Trie,
    join_map: &FxHashMap<(u32, u32), u32>,
    reverse: &[Vec<crate::alphabet::Symbol>],
    prev: QueueRecord,
    curr: QueueRecord,
    new_queue: &mut Queue,
) {
    if prev.sequence_id == curr.sequence_id && curr.offset.wrapping_sub(prev.offset) == 1 {
        if let Some(&cand_idx) =
            join_map.get(&(prev.pattern_index, curr.pattern_index))
        {
            new_queue.push(QueueRecord::new(
                prev.sequence_id,
                prev.offset,
                cand_idx,
            ));
            trie.increment_if_present(&reverse[cand_idx as usize], 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::apriori;
    use crate::pass_counter::CountingPassCounter;
    use crate::provider::VecProvider;

    fn sample_provider() -> VecProvider {
        VecProvider::new(vec![
            "ACGATTCGATCG".to_string(),
            "ACGATTCGATCG".to_string(),
        ])
    }

    #[test]
    fn assign_pattern_index_skips_infrequent_nodes() {
        let provider = sample_provider();
        let mut counter = CountingPassCounter::default();
        let mut trie = apriori::initialize(&provider, 2, &mut counter);
        assign_pattern_index(&mut trie, 2, 4);
        let mut has_idx: Vec<(String, bool)> = trie
            .nodes_at_level(2)
            .iter()
            .map(|n| (n.pattern_string(), n.idx().is_some()))
            .collect();
        has_idx.sort();
        let mut expected = vec![
            ("AC".to_string(), false),
            ("AT".to_string(), true),
            ("CG".to_string(), true),
            ("GA".to_string(), true),
            ("TC".to_string(), true),
            ("TT".to_string(), false),
        ];
        expected.sort();
        assert_eq!(has_idx, expected);
    }

    #[test]
    fn initial_queue_matches_source_fixture() {
        let provider = sample_provider();
        let mut counter = CountingPassCounter::default();
        let mut trie = apriori::initialize(&provider, 2, &mut counter);
        assign_pattern_index(&mut trie, 2, 4);
        let idx_of = |s: &str| {
            trie.lookup(&crate::alphabet::parse_pattern(s).unwrap())
                .unwrap()
                .idx()
                .unwrap()
        };
        let (at, cg, ga, tc) = (idx_of("AT"), idx_of("CG"), idx_of("GA"), idx_of("TC"));
        let queue = build_queue(&provider, &trie, 2, &mut counter);
        let expected_one_seq = vec![
            (1u32, cg),
            (2, ga),
            (3, at),
            (5, tc),
            (6, cg),
            (7, ga),
            (8, at),
            (9, tc),
            (10, cg),
        ];
        let mut expected = Vec::new();
        for seq_id in 0..2u32 {
            for &(offset, idx) in &expected_one_seq {
                expected.push(QueueRecord::new(seq_id, offset, idx));
            }
        }
        assert_eq!(queue, expected);
        assert_eq!(counter.count(), 2);
    }

    #[test]
    fn extend_matches_apriori_counts() {
        let provider = sample_provider();
        let mut counter = CountingPassCounter::default();
        let mut trie = apriori::initialize(&provider, 2, &mut counter);
        assign_pattern_index(&mut trie, 2, 4);
        let mut queue = build_queue(&provider, &trie, 2, &mut counter);
        extend(&mut trie, &mut queue, 3, 4);

        let mut counts: Vec<(String, u64)> = trie
            .nodes_at_level(3)
            .iter()
            .map(|n| (n.pattern_string(), n.count().unwrap()))
            .collect();
        counts.sort();
        let mut expected = vec![
            ("ATC".to_string(), 2),
            ("CGA".to_string(), 4),
            ("GAT".to_string(), 4),
            ("TCG".to_string(), 4),
        ];
        expected.sort();
        assert_eq!(counts, expected);
        // only 2 passes total: initialization + queue build, no rescan here
        assert_eq!(counter.count(), 2);
    }
}
