mod delete;

use super::CompressedTrie;

/// Build a trie from `words`, then search each `(word, n)` pair `n` times.
pub(super) fn make_trie(words: &[&str], uses: &[(&str, u32)]) -> CompressedTrie {
    let mut trie = CompressedTrie::new();
    for w in words {
        trie.insert(w);
    }
    for &(w, n) in uses {
        for _ in 0..n {
            assert!(trie.search(w), "search({w}) should succeed");
        }
    }
    trie.check_invariants();
    trie
}

/// Sorted list of every stored word.
pub(super) fn all_words(trie: &CompressedTrie) -> Vec<String> {
    let mut v: Vec<String> = trie.words().into_iter().map(|w| w.word).collect();
    v.sort();
    v
}
