//! The pattern trie: an ordered 4-ary trie keyed by the DNA alphabet,
//! storing per-node support counts and an optional dense pattern index.
//!
//! Re-architected from the source's object-graph (attributes added to plain
//! objects at runtime) into a closed struct with explicit optional fields
//! and a fixed-size array of child handles, each node owning its children.

use crate::alphabet::{pattern_to_string, Symbol, NUCLEOTIDES};
use crate::errs::{MinerError, MinerResult};

#[derive(Debug)]
pub struct TrieNode {
    seq: Vec<Symbol>,
    children: [Option<Box<TrieNode>>; 4],
    count: Option<u64>,
    idx: Option<u32>,
}

impl TrieNode {
    fn new(seq: Vec<Symbol>) -> Self {
        Self { seq, children: [None, None, None, None], count: None, idx: None }
    }

    pub fn seq(&self) -> &[Symbol] {
        &self.seq
    }

    pub fn pattern_string(&self) -> String {
        pattern_to_string(&self.seq)
    }

    pub fn count(&self) -> Option<u64> {
        self.count
    }

    pub fn idx(&self) -> Option<u32> {
        self.idx
    }

    /// A node is "frequent at T" only when it has been witnessed at least
    /// once (`count` is `Some`) and that count is `>= threshold`. A
    /// structurally-present-but-never-counted node is never frequent,
    /// regardless of `threshold` (including `threshold == 0`).
    pub fn has_count_at_least(&self, threshold: u64) -> bool {
        matches!(self.count, Some(c) if c >= threshold)
    }

    pub fn child(&self, symbol: Symbol) -> Option<&TrieNode> {
        self.children[symbol.index()].as_deref()
    }

    /// Iterate existing children in fixed alphabet order.
    pub fn children(&self) -> impl Iterator<Item = &TrieNode> {
        NUCLEOTIDES.iter().filter_map(move |s| self.child(*s))
    }
}

/// Root of the pattern trie. The root owns the entire tree.
#[derive(Debug)]
pub struct Trie {
    root: TrieNode,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self { root: TrieNode::new(Vec::new()) }
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Walk the path spelled by `suffix` from the root, creating missing
    /// nodes along the way. At the destination: if `delta` is given, add it
    /// to `count` (initializing at 0 first); if `idx` is given, set it.
    pub fn insert_suffix(
        &mut self,
        suffix: &[Symbol],
        delta: Option<i64>,
        idx: Option<u32>,
    ) {
        let mut node = &mut self.root;
        for &symbol in suffix {
            let slot = &mut node.children[symbol.index()];
            if slot.is_none() {
                let mut child_seq = node.seq.clone();
                child_seq.push(symbol);
                *slot = Some(Box::new(TrieNode::new(child_seq)));
            }
            node = slot.as_mut().unwrap();
        }
        if let Some(d) = delta {
            let base = node.count.unwrap_or(0) as i64;
            node.count = Some((base + d).max(0) as u64);
        }
        if let Some(i) = idx {
            node.idx = Some(i);
        }
    }

    /// Return the node whose path spells `suffix`, or `PatternNotFound`.
    pub fn lookup(&self, suffix: &[Symbol]) -> MinerResult<&TrieNode> {
        let mut node = &self.root;
        for &symbol in suffix {
            node = node.child(symbol).ok_or(MinerError::PatternNotFound)?;
        }
        Ok(node)
    }

    /// If the path exists, add `delta` to its count; otherwise do nothing.
    /// `PatternNotFound` is never observed by callers of this method.
    pub fn increment_if_present(&mut self, suffix: &[Symbol], delta: i64) {
        let mut node = &mut self.root;
        for &symbol in suffix {
            match node.children[symbol.index()].as_mut() {
                Some(child) => node = child,
                None => return,
            }
        }
        let base = node.count.unwrap_or(0) as i64;
        node.count = Some((base + delta).max(0) as u64);
    }

    /// All nodes at depth `level`, in deterministic DFS pre-order.
    pub fn nodes_at_level(&self, level: usize) -> Vec<&TrieNode> {
        let mut out = Vec::new();
        Self::collect_at_level(&self.root, level, &mut out);
        out
    }

    fn collect_at_level<'a>(
        node: &'a TrieNode,
        remaining: usize,
        out: &mut Vec<&'a TrieNode>,
    ) {
        if remaining == 0 {
            out.push(node);
        } else {
            for child in node.children() {
                Self::collect_at_level(child, remaining - 1, out);
            }
        }
    }

    /// Subset of `nodes_at_level(m)` whose count exists and is `>= T`.
    pub fn frequent_at(&self, level: usize, threshold: u64) -> Vec<&TrieNode> {
        self.nodes_at_level(level)
            .into_iter()
            .filter(|n| n.has_count_at_least(threshold))
            .collect()
    }

    /// All nodes, any level, deterministic DFS pre-order (root first).
    pub fn all_nodes(&self) -> Vec<&TrieNode> {
        let mut out = Vec::new();
        Self::collect_all(&self.root, &mut out);
        out
    }

    fn collect_all<'a>(node: &'a TrieNode, out: &mut Vec<&'a TrieNode>) {
        out.push(node);
        for child in node.children() {
            Self::collect_all(child, out);
        }
    }

    /// (seq, count) for every node (any level) with `count >= threshold`.
    pub fn all_patterns_at_least(
        &self,
        threshold: u64,
    ) -> Vec<(String, u64)> {
        self.all_nodes()
            .into_iter()
            .filter(|n| n.has_count_at_least(threshold))
            .map(|n| (n.pattern_string(), n.count().unwrap()))
            .collect()
    }
}
