//! Compressed trie with per-word usage counters.
//!
//! Chains of single-child nodes are folded into one multi-letter edge. Each
//! node keeps its outgoing edges in an [`EdgeTable`] keyed by first letter, so
//! no two edges leaving a node share a first letter.
//!
//! Words are counted, not stored twice: `insert` only marks a node terminal,
//! and each successful `search` bumps that node's importance. Prefix queries
//! locate the subtree under a prefix and stream its terminal words into a
//! [`PriorityCollector`].
//!
//! Deletion compacts as it unwinds: an edge whose child is no longer needed is
//! removed, and a non-terminal child with a single edge is merged into its
//! parent edge. The trie is therefore always fully compressed.

pub mod edge_table;
#[cfg(test)]
mod tests;

use std::mem;

use serde::Serialize;
use tracing::{debug, debug_span, trace};

use crate::collector::{CollectorBound, PriorityCollector};
use crate::word::{is_indexable, WordImportance};

pub use edge_table::{Edge, EdgeTable};

#[derive(Debug, Default)]
pub struct TrieNode {
    edges: EdgeTable,
    terminal: bool,
    importance: u32,
}

impl TrieNode {
    fn terminal() -> Self {
        Self {
            terminal: true,
            ..Self::default()
        }
    }

    /// True if a word ends at this node.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn importance(&self) -> u32 {
        self.importance
    }

    pub fn edges(&self) -> &EdgeTable {
        &self.edges
    }
}

/// Where a prefix ends: the node reached and the part of the last edge label
/// the prefix did not consume.
///
/// For a prefix `"app"` against an edge labeled `"appl"` the node is the
/// child of that edge and `remainder` is `"l"`. The word spelled out at
/// `node` is always `prefix + remainder`.
#[derive(Debug, Clone, Copy)]
pub struct PrefixMatch<'a> {
    pub node: &'a TrieNode,
    pub remainder: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TrieStats {
    pub words: usize,
    pub nodes: usize,
    pub edges: usize,
    /// Largest `max_probe_length` over all edge tables.
    pub max_probe_length: usize,
    pub approx_heap_bytes: usize,
}

#[derive(Debug, Default)]
pub struct CompressedTrie {
    root: TrieNode,
    len: usize,
}

impl CompressedTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of words stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Add `word`. Returns `true` if it was not already present.
    ///
    /// Importance is left untouched; only [`search`](Self::search) counts.
    /// Words outside `[a-z]+` (including `""`) are ignored.
    pub fn insert(&mut self, word: &str) -> bool {
        if !is_indexable(word) {
            trace!(word, "insert ignored: not indexable");
            return false;
        }
        let added = insert_rec(&mut self.root, word);
        if added {
            self.len += 1;
        }
        added
    }

    /// Look up `word`, counting one use of it if present.
    ///
    /// A word that only exists as the prefix of longer words is not found.
    pub fn search(&mut self, word: &str) -> bool {
        if !is_indexable(word) {
            return false;
        }
        match find_node_mut(&mut self.root, word) {
            Some(node) if node.terminal => {
                node.importance = node.importance.saturating_add(1);
                true
            }
            _ => false,
        }
    }

    /// Membership test without counting a use.
    pub fn contains(&self, word: &str) -> bool {
        self.importance(word).is_some()
    }

    /// Current importance of `word`, if stored.
    pub fn importance(&self, word: &str) -> Option<u32> {
        if !is_indexable(word) {
            return None;
        }
        find_node(&self.root, word)
            .filter(|node| node.terminal)
            .map(|node| node.importance)
    }

    /// Remove `word`. Returns `false` if it was not stored.
    ///
    /// Its importance is discarded; re-inserting starts again from zero.
    pub fn delete(&mut self, word: &str) -> bool {
        if !is_indexable(word) {
            return false;
        }
        let removed = delete_rec(&mut self.root, word);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Find the node a prefix leads to.
    ///
    /// The empty prefix locates the root. Returns `None` when no stored word
    /// starts with `prefix`.
    pub fn locate_prefix<'a>(&'a self, prefix: &str) -> Option<PrefixMatch<'a>> {
        if !prefix.bytes().all(|b| b.is_ascii_lowercase()) {
            return None;
        }
        let mut node = &self.root;
        let mut rest = prefix;
        while !rest.is_empty() {
            let edge = node.edges.get(rest.as_bytes()[0])?;
            let common = common_prefix_len(&edge.label, rest);
            if common == rest.len() {
                return Some(PrefixMatch {
                    node: &edge.child,
                    remainder: &edge.label[common..],
                });
            }
            if common < edge.label.len() {
                return None;
            }
            node = &edge.child;
            rest = &rest[common..];
        }
        Some(PrefixMatch {
            node,
            remainder: "",
        })
    }

    /// Collect the words starting with `prefix`.
    ///
    /// With `CollectorBound::Top(k)` the collector ends up holding the `k`
    /// best-ranked words; with `CollectorBound::All` it holds every match.
    pub fn top_k(&self, prefix: &str, bound: CollectorBound) -> PriorityCollector {
        let _span = debug_span!("top_k", prefix, ?bound).entered();
        let mut collector = PriorityCollector::new(bound);
        if let Some(m) = self.locate_prefix(prefix) {
            let mut word = String::with_capacity(prefix.len() + m.remainder.len() + 16);
            word.push_str(prefix);
            word.push_str(m.remainder);
            collect_words(m.node, &mut word, &mut collector);
        }
        debug!(held = collector.len(), "top_k done");
        collector
    }

    /// Mean importance of every word starting with `prefix`; `0.0` if none.
    pub fn average_importance(&self, prefix: &str) -> f64 {
        self.top_k(prefix, CollectorBound::All).average()
    }

    /// Guess the letter that follows `prefix`.
    ///
    /// If the prefix ends inside an edge the next letter of that edge is the
    /// only possibility. Otherwise each outgoing edge is scored by the average
    /// importance of the words below it and the best edge's first letter is
    /// returned, ties going to the alphabetically first letter. `None` means
    /// no stored word extends `prefix`.
    pub fn predict_next_letter(&self, prefix: &str) -> Option<char> {
        let _span = debug_span!("predict_next_letter", prefix).entered();
        let m = self.locate_prefix(prefix)?;
        if let Some(c) = m.remainder.chars().next() {
            return Some(c);
        }

        let mut best: Option<(f64, u8)> = None;
        for edge in m.node.edges.iter() {
            let mut collector = PriorityCollector::new(CollectorBound::All);
            let mut word = format!("{prefix}{}", edge.label);
            collect_words(&edge.child, &mut word, &mut collector);
            let avg = collector.average();
            let key = edge.key();
            trace!(letter = %(key as char), avg, "branch average");
            best = match best {
                Some((b, k)) if b > avg || (b == avg && k < key) => Some((b, k)),
                _ => Some((avg, key)),
            };
        }
        best.map(|(_, key)| key as char)
    }

    /// Every stored word with its importance, best first.
    pub fn words(&self) -> Vec<WordImportance> {
        self.top_k("", CollectorBound::All).into_sorted_desc()
    }

    pub fn stats(&self) -> TrieStats {
        let mut stats = TrieStats::default();
        stats_rec(&self.root, &mut stats);
        stats
    }

    /// Panic with a description of the first broken structural invariant.
    ///
    /// Checks every edge table, that each non-root node is terminal or
    /// branches, and that the word count matches the terminal nodes.
    pub fn check_invariants(&self) {
        let terminals = check_rec(&self.root, true);
        assert_eq!(
            terminals, self.len,
            "len {} but {terminals} terminal nodes",
            self.len
        );
    }
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}

fn insert_rec(node: &mut TrieNode, word: &str) -> bool {
    let Some(edge) = node.edges.get_mut(word.as_bytes()[0]) else {
        node.edges.insert(Edge::new(word, TrieNode::terminal()));
        return true;
    };

    if edge.label == word {
        return !mem::replace(&mut edge.child.terminal, true);
    }

    let common = common_prefix_len(&edge.label, word);
    if common == edge.label.len() {
        return insert_rec(&mut edge.child, &word[common..]);
    }

    // Split the edge at the shared prefix: the old subtree moves one level
    // down under an intermediate node.
    trace!(label = %edge.label, word, common, "split edge");
    let tail = edge.label.split_off(common);
    let old_child = mem::take(&mut edge.child);
    edge.child.edges.insert(Edge::new(tail, old_child));
    if common == word.len() {
        edge.child.terminal = true;
    } else {
        edge.child
            .edges
            .insert(Edge::new(&word[common..], TrieNode::terminal()));
    }
    true
}

fn find_node<'a>(mut node: &'a TrieNode, mut rest: &str) -> Option<&'a TrieNode> {
    loop {
        let edge = node.edges.get(rest.as_bytes()[0])?;
        if edge.label == rest {
            return Some(&edge.child);
        }
        rest = rest.strip_prefix(edge.label.as_str())?;
        node = &edge.child;
    }
}

fn find_node_mut<'a>(mut node: &'a mut TrieNode, mut rest: &str) -> Option<&'a mut TrieNode> {
    loop {
        let edge = node.edges.get_mut(rest.as_bytes()[0])?;
        if edge.label == rest {
            return Some(&mut edge.child);
        }
        rest = rest.strip_prefix(edge.label.as_str())?;
        node = &mut edge.child;
    }
}

fn delete_rec(node: &mut TrieNode, word: &str) -> bool {
    let key = word.as_bytes()[0];
    let Some(edge) = node.edges.get_mut(key) else {
        return false;
    };

    let removed = if edge.label == word {
        if !edge.child.terminal {
            return false;
        }
        edge.child.terminal = false;
        edge.child.importance = 0;
        true
    } else {
        match word.strip_prefix(edge.label.as_str()) {
            Some(rest) => delete_rec(&mut edge.child, rest),
            None => false,
        }
    };

    if removed {
        compact_edge(node, key);
    }
    removed
}

/// Restore compression on the edge `key` of `node` after a deletion below it.
fn compact_edge(node: &mut TrieNode, key: u8) {
    let Some(edge) = node.edges.get_mut(key) else {
        return;
    };
    if edge.child.terminal {
        return;
    }
    match edge.child.edges.len() {
        0 => {
            trace!(letter = %(key as char), "remove dead edge");
            node.edges.remove(key);
        }
        1 => {
            if let Some(only) = edge.child.edges.take_only() {
                trace!(label = %edge.label, tail = %only.label, "merge edge");
                edge.label.push_str(&only.label);
                edge.child = only.child;
            }
        }
        _ => {}
    }
}

fn collect_words(node: &TrieNode, word: &mut String, out: &mut PriorityCollector) {
    if node.terminal {
        out.insert(WordImportance::new(word.as_str(), node.importance));
    }
    for edge in node.edges.iter() {
        let len = word.len();
        word.push_str(&edge.label);
        collect_words(&edge.child, word, out);
        word.truncate(len);
    }
}

fn stats_rec(node: &TrieNode, stats: &mut TrieStats) {
    stats.nodes += 1;
    stats.edges += node.edges.len();
    if node.terminal {
        stats.words += 1;
    }
    stats.max_probe_length = stats.max_probe_length.max(node.edges.max_probe_length());
    stats.approx_heap_bytes += node.edges.heap_bytes();
    for edge in node.edges.iter() {
        stats_rec(&edge.child, stats);
    }
}

fn check_rec(node: &TrieNode, is_root: bool) -> usize {
    if let Err(e) = node.edges.check_invariants() {
        panic!("edge table invariant violated: {e}");
    }
    if !is_root && !node.terminal && node.edges.len() < 2 {
        panic!(
            "non-terminal node with {} edge(s) is not compressed",
            node.edges.len()
        );
    }
    let mut terminals = usize::from(node.terminal);
    for edge in node.edges.iter() {
        terminals += check_rec(&edge.child, false);
    }
    terminals
}
