//! Benchmarks for automaton construction and matching.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use libaho::Automaton;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ALPHABET: &[u8] = b"abcdefghij";

fn random_word(rng: &mut StdRng, min: usize, max: usize) -> Vec<u8> {
    let len = rng.gen_range(min..=max);
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

fn patterns(count: usize) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count).map(|_| random_word(&mut rng, 3, 8)).collect()
}

fn haystack(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(7);
    random_word(&mut rng, len, len)
}

fn build(words: &[Vec<u8>]) -> Automaton<u8, usize> {
    let mut ac = Automaton::with_capacity(words.len() * 4);
    for (i, word) in words.iter().enumerate() {
        ac.insert(word, i);
    }
    ac.ensure_failure_links_built();
    ac
}

fn bench_build(c: &mut Criterion) {
    let words = patterns(1_000);
    c.bench_function("build_1000_patterns", |b| b.iter(|| build(black_box(&words))));
}

fn bench_find_all(c: &mut Criterion) {
    let ac = build(&patterns(1_000));
    let text = haystack(64 * 1024);
    let searcher = ac.searcher().expect("failure links built");

    c.bench_function("find_all_64k", |b| {
        b.iter(|| searcher.find_all(black_box(&text)).len())
    });
}

fn bench_count_streaming(c: &mut Criterion) {
    let ac = build(&patterns(1_000));
    let text = haystack(64 * 1024);
    let searcher = ac.searcher().expect("failure links built");

    c.bench_function("for_each_count_64k", |b| {
        b.iter(|| {
            let mut count = 0usize;
            searcher.for_each(black_box(&text), |_, _, _| {
                count += 1;
                true
            });
            count
        })
    });
}

fn bench_first_match(c: &mut Criterion) {
    let mut ac: Automaton<u8, usize> = Automaton::new();
    ac.insert(b"needle".as_slice(), 0);
    ac.ensure_failure_links_built();
    let mut text = haystack(64 * 1024);
    text.extend_from_slice(b"needle");
    let searcher = ac.searcher().expect("failure links built");

    c.bench_function("find_first_at_end_64k", |b| {
        b.iter(|| searcher.find_first(black_box(&text)))
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_find_all,
    bench_count_streaming,
    bench_first_match
);
criterion_main!(benches);
