use std::path::Path;
use std::process;

use serde::Serialize;
use tracing::debug;

use lexidex_core::ingest;
use lexidex_core::settings::settings;
use lexidex_core::{CollectorBound, CompressedTrie, WordImportance};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Build a trie from a lexicon file, then count uses from an optional corpus.
pub fn load(lexicon: &str, corpus: Option<&str>) -> CompressedTrie {
    let mut trie = CompressedTrie::new();
    let report = die!(
        ingest::load_lexicon(&mut trie, Path::new(lexicon)),
        "Error loading lexicon: {}"
    );
    if report.skipped > 0 {
        eprintln!("Skipped {} invalid lexicon lines", report.skipped);
    }
    if let Some(corpus) = corpus {
        die!(
            ingest::apply_corpus(&mut trie, Path::new(corpus)),
            "Error reading corpus: {}"
        );
    }
    debug!(lexicon, corpus, words = trie.len(), "trie ready");
    trie
}

#[derive(Debug, Serialize)]
struct TopKOutput<'a> {
    prefix: &'a str,
    /// `None` when every match was requested.
    k: Option<usize>,
    results: Vec<WordImportance>,
}

#[derive(Debug, Serialize)]
struct AverageOutput<'a> {
    prefix: &'a str,
    words: usize,
    average: f64,
}

#[derive(Debug, Serialize)]
struct PredictOutput<'a> {
    prefix: &'a str,
    next: Option<char>,
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).expect("JSON serialization failed")
    );
}

/// `k` of `None` uses `query.default_top_k`; a negative `k` lists every match.
pub fn top_k_cmd(trie: &CompressedTrie, prefix: &str, k: Option<i64>, json: bool) {
    let k = k.unwrap_or(settings().query.default_top_k as i64);
    let bound = CollectorBound::from_k(k);
    let results = trie.top_k(prefix, bound).into_sorted_desc();

    if json {
        let k = match bound {
            CollectorBound::Top(k) => Some(k),
            CollectorBound::All => None,
        };
        print_json(&TopKOutput { prefix, k, results });
        return;
    }
    if results.is_empty() {
        println!("No words start with {prefix:?}");
        return;
    }
    for w in &results {
        println!("{}\t{}", w.word, w.importance);
    }
}

pub fn average_cmd(trie: &CompressedTrie, prefix: &str, json: bool) {
    let collector = trie.top_k(prefix, CollectorBound::All);
    let average = collector.average();
    if json {
        print_json(&AverageOutput {
            prefix,
            words: collector.len(),
            average,
        });
    } else {
        println!(
            "Average importance of {} word(s) under {prefix:?}: {average:.3}",
            collector.len()
        );
    }
}

pub fn predict_cmd(trie: &CompressedTrie, prefix: &str, json: bool) {
    let next = trie.predict_next_letter(prefix);
    if json {
        print_json(&PredictOutput { prefix, next });
        return;
    }
    match next {
        Some(c) => println!("Predicted next letter: {c}"),
        None => println!("No longer words start with {prefix:?}"),
    }
}

pub fn dump_cmd(trie: &CompressedTrie, json: bool) {
    let words = trie.words();
    if json {
        print_json(&words);
        return;
    }
    for w in &words {
        println!("{}:{}", w.word, w.importance);
    }
}

pub fn stats_cmd(trie: &CompressedTrie, json: bool) {
    let stats = trie.stats();
    if json {
        print_json(&stats);
        return;
    }
    println!("words:            {}", stats.words);
    println!("nodes:            {}", stats.nodes);
    println!("edges:            {}", stats.edges);
    println!("max probe length: {}", stats.max_probe_length);
    println!(
        "approx heap:      {:.1} KB",
        stats.approx_heap_bytes as f64 / 1024.0
    );
}
