//! Prefix-indexed word dictionary with usage counts.
//!
//! [`CompressedTrie`] stores words in a radix tree whose per-node edges live in
//! a Robin Hood hash table. Searching a word counts one use of it, and prefix
//! queries rank the words below a prefix through a [`PriorityCollector`]:
//!
//! ```
//! use lexidex_core::{CollectorBound, CompressedTrie};
//!
//! let mut trie = CompressedTrie::new();
//! for w in ["stock", "stab", "stop"] {
//!     trie.insert(w);
//! }
//! for _ in 0..3 {
//!     trie.search("stock");
//! }
//! trie.search("stab");
//!
//! let top = trie.top_k("st", CollectorBound::Top(1)).into_sorted_desc();
//! assert_eq!(top[0].word, "stock");
//! assert_eq!(trie.predict_next_letter("st"), Some('o'));
//! ```

pub mod collector;
pub mod ingest;
pub mod settings;
pub mod trie;
pub mod word;

pub use collector::{CollectorBound, PriorityCollector};
pub use trie::{CompressedTrie, PrefixMatch, TrieStats};
pub use word::WordImportance;
