use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lexidex_core::{CollectorBound, CompressedTrie};

/// Deterministic pseudo-random words (xorshift), 3 to 10 letters.
fn bench_words(n: usize) -> Vec<String> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    (0..n)
        .map(|_| {
            let len = 3 + (next() % 8) as usize;
            (0..len).map(|_| (b'a' + (next() % 26) as u8) as char).collect()
        })
        .collect()
}

fn bench_trie(words: &[String]) -> CompressedTrie {
    let mut trie = CompressedTrie::new();
    for w in words {
        trie.insert(w);
    }
    for (i, w) in words.iter().enumerate() {
        for _ in 0..i % 7 {
            trie.search(w);
        }
    }
    trie
}

static PREFIXES: &[&str] = &["", "a", "st", "pre", "qu"];

fn bench_insert(c: &mut Criterion) {
    let words = bench_words(20_000);
    c.bench_function("trie/insert_20k", |b| {
        b.iter(|| {
            let mut trie = CompressedTrie::new();
            for w in &words {
                trie.insert(w);
            }
            trie
        });
    });
}

fn bench_search(c: &mut Criterion) {
    let words = bench_words(20_000);
    let mut trie = bench_trie(&words);
    c.bench_function("trie/search_20k", |b| {
        b.iter(|| words.iter().filter(|w| trie.search(w)).count());
    });
}

fn bench_top_k(c: &mut Criterion) {
    let trie = bench_trie(&bench_words(20_000));
    let mut group = c.benchmark_group("trie/top_k");
    for &prefix in PREFIXES {
        group.bench_with_input(BenchmarkId::new("k10", prefix), &prefix, |b, &prefix| {
            b.iter(|| trie.top_k(prefix, CollectorBound::Top(10)).into_sorted_desc());
        });
    }
    group.finish();
}

fn bench_predict(c: &mut Criterion) {
    let trie = bench_trie(&bench_words(20_000));
    let mut group = c.benchmark_group("trie/predict_next_letter");
    for &prefix in PREFIXES {
        group.bench_with_input(BenchmarkId::from_parameter(prefix), &prefix, |b, &prefix| {
            b.iter(|| trie.predict_next_letter(prefix));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_search, bench_top_k, bench_predict);
criterion_main!(benches);
