//! Feeding the trie from text.
//!
//! A lexicon is one word per line; lines are trimmed and lowercased, and
//! anything that is still not a plain `a-z` word is skipped. A corpus is free
//! text: it is split on every run of non-letters, each token is lowercased and
//! searched, which is how usage counts are accumulated.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, trace};

use crate::settings::settings;
use crate::trie::CompressedTrie;
use crate::word::{self, WordError};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of a bulk load.
///
/// For a lexicon, `accepted` counts valid lines (including duplicates) and
/// `skipped` counts rejected lines. For a corpus, `accepted` counts tokens
/// found in the trie and `skipped` the rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub accepted: usize,
    pub skipped: usize,
}

/// Normalized lexicon entries, one per non-blank line.
pub fn lexicon_words(text: &str) -> impl Iterator<Item = Result<String, WordError>> + '_ {
    let max_len = settings().ingest.max_word_len;
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(move |line| {
            let word = line.to_lowercase();
            word::validate(&word, max_len).map(|()| word)
        })
}

/// Lowercased letter runs of `text`.
pub fn corpus_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|token| !token.is_empty())
        .map(str::to_ascii_lowercase)
}

pub fn insert_lexicon(trie: &mut CompressedTrie, text: &str) -> IngestReport {
    let mut report = IngestReport::default();
    for entry in lexicon_words(text) {
        match entry {
            Ok(word) => {
                trie.insert(&word);
                report.accepted += 1;
            }
            Err(e) => {
                trace!(error = %e, "lexicon line skipped");
                report.skipped += 1;
            }
        }
    }
    report
}

pub fn search_corpus(trie: &mut CompressedTrie, text: &str) -> IngestReport {
    let max_len = settings().ingest.max_word_len;
    let mut report = IngestReport::default();
    for token in corpus_tokens(text) {
        if token.len() <= max_len && trie.search(&token) {
            report.accepted += 1;
        } else {
            report.skipped += 1;
        }
    }
    report
}

/// Insert every word of the lexicon file at `path`.
pub fn load_lexicon(trie: &mut CompressedTrie, path: &Path) -> Result<IngestReport, IngestError> {
    let text = read(path)?;
    let report = insert_lexicon(trie, &text);
    info!(
        path = %path.display(),
        accepted = report.accepted,
        skipped = report.skipped,
        words = trie.len(),
        "lexicon loaded"
    );
    Ok(report)
}

/// Count word usage from the corpus file at `path`.
pub fn apply_corpus(trie: &mut CompressedTrie, path: &Path) -> Result<IngestReport, IngestError> {
    let text = read(path)?;
    let report = search_corpus(trie, &text);
    info!(
        path = %path.display(),
        matched = report.accepted,
        unmatched = report.skipped,
        "corpus applied"
    );
    Ok(report)
}

fn read(path: &Path) -> Result<String, IngestError> {
    fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })
}
