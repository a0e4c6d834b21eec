//! The position queue: a flat, document-ordered list of occurrences of the
//! current-length frequent patterns, used by the Position engine to extend
//! the trie one level without rescanning the corpus.

/// `(sequence_id, offset, pattern_index)`. Twelve bytes when packed as
/// three `u32`s -- the dense fixed-width record size this implementation's
/// `MAX_QUEUE_SIZE` derivation is based on (see `MinerConfig`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueRecord {
    pub sequence_id: u32,
    pub offset: u32,
    pub pattern_index: u32,
}

impl QueueRecord {
    pub fn new(sequence_id: u32, offset: u32, pattern_index: u32) -> Self {
        Self { sequence_id, offset, pattern_index }
    }
}

pub type Queue = Vec<QueueRecord>;
