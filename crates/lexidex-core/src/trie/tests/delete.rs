use super::{all_words, make_trie};

#[test]
fn test_delete_leaf_keeps_siblings() {
    let mut trie = make_trie(&["bear", "bell", "bid", "be", "bull"], &[("be", 2)]);
    assert!(trie.delete("bell"));
    trie.check_invariants();
    assert!(!trie.search("bell"));
    assert!(trie.search("be"));
    assert_eq!(trie.importance("be"), Some(3));
    assert_eq!(all_words(&trie), vec!["be", "bear", "bid", "bull"]);
    assert_eq!(trie.len(), 4);
}

#[test]
fn test_delete_word_with_descendants() {
    let mut trie = make_trie(&["be", "bear", "bell"], &[]);
    assert!(trie.delete("be"));
    trie.check_invariants();
    assert!(!trie.contains("be"));
    assert!(trie.search("bear"));
    assert!(trie.search("bell"));
}

#[test]
fn test_delete_missing_or_prefix_only() {
    let mut trie = make_trie(&["bear", "bell"], &[]);
    assert!(!trie.delete("be"));
    assert!(!trie.delete("b"));
    assert!(!trie.delete("bears"));
    assert!(!trie.delete("zebra"));
    assert_eq!(trie.len(), 2);
    trie.check_invariants();
}

#[test]
fn test_delete_twice() {
    let mut trie = make_trie(&["cat", "car"], &[]);
    assert!(trie.delete("cat"));
    assert!(!trie.delete("cat"));
    assert_eq!(trie.len(), 1);
}

#[test]
fn test_delete_merges_single_child_back() {
    let mut trie = make_trie(&["stock", "stop"], &[]);
    assert!(trie.delete("stop"));
    trie.check_invariants();
    let labels: Vec<&str> = trie.root().edges().iter().map(|e| e.label()).collect();
    assert_eq!(labels, vec!["stock"]);
    assert_eq!(trie.stats().nodes, 2);
}

#[test]
fn test_delete_terminal_with_one_child_merges() {
    let mut trie = make_trie(&["be", "bear"], &[("bear", 3)]);
    assert!(trie.delete("be"));
    trie.check_invariants();
    let labels: Vec<&str> = trie.root().edges().iter().map(|e| e.label()).collect();
    assert_eq!(labels, vec!["bear"]);
    assert_eq!(trie.importance("bear"), Some(3));
}

#[test]
fn test_delete_cascades_up() {
    // root -> "st" -> {"o" -> {"ck", "p"}, "ab"}
    let mut trie = make_trie(&["stock", "stop", "stab"], &[]);
    assert!(trie.delete("stab"));
    trie.check_invariants();
    let labels: Vec<&str> = trie.root().edges().iter().map(|e| e.label()).collect();
    assert_eq!(labels, vec!["sto"]);
    assert!(trie.delete("stock"));
    trie.check_invariants();
    let labels: Vec<&str> = trie.root().edges().iter().map(|e| e.label()).collect();
    assert_eq!(labels, vec!["stop"]);
}

#[test]
fn test_delete_everything_leaves_empty_root() {
    let words = ["a", "ab", "abc", "b", "ba"];
    let mut trie = make_trie(&words, &[]);
    for w in words {
        assert!(trie.delete(w));
        trie.check_invariants();
    }
    assert!(trie.is_empty());
    assert!(trie.root().edges().is_empty());
    assert_eq!(trie.predict_next_letter(""), None);
}

#[test]
fn test_reinsert_after_delete_resets_importance() {
    let mut trie = make_trie(&["bell", "bear"], &[("bell", 5)]);
    assert!(trie.delete("bell"));
    assert!(trie.insert("bell"));
    assert_eq!(trie.importance("bell"), Some(0));
    trie.check_invariants();
}

#[test]
fn test_delete_and_reinsert_cycles_keep_tables_sound() {
    let mut trie = make_trie(&[], &[]);
    for round in 0..20 {
        for c in b'a'..=b'z' {
            let w = format!("{}{}", c as char, "x".repeat(round % 3 + 1));
            trie.insert(&w);
        }
        trie.check_invariants();
        for c in (b'a'..=b'z').step_by(2) {
            let w = format!("{}{}", c as char, "x".repeat(round % 3 + 1));
            assert!(trie.delete(&w));
        }
        trie.check_invariants();
    }
    assert!(trie.stats().max_probe_length < trie.root().edges().capacity());
}
