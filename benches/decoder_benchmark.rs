//! Decoder benchmark: bytes-to-events throughput.
//!
//! Target: > 100 MB/s on plain text

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gridloom::input::{Automaton, Decoder};
use std::sync::Arc;

fn automaton() -> Arc<Automaton> {
    Arc::new(Automaton::standard().expect("standard table builds"))
}

/// Typed text with the occasional arrow key and mouse click.
fn mixed_input(len: usize) -> Vec<u8> {
    let chunks: [&[u8]; 6] = [
        b"hello world ",
        b"\x1b[A",
        b"\x1b[1;5C",
        "héllo ".as_bytes(),
        b"\x1b[M #!",
        b"\x1bx",
    ];
    chunks.iter().copied().cycle().flatten().copied().take(len).collect()
}

fn build_automaton(c: &mut Criterion) {
    c.bench_function("automaton_build_standard", |b| {
        b.iter(|| black_box(Automaton::standard()));
    });
}

fn decode_plain_text(c: &mut Criterion) {
    let input: Vec<u8> = b"the quick brown fox ".iter().copied().cycle().take(64 * 1024).collect();
    let automaton = automaton();
    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("plain_64k", |b| {
        b.iter(|| {
            let mut decoder = Decoder::new(Arc::clone(&automaton));
            black_box(decoder.feed(black_box(&input)))
        });
    });
    group.finish();
}

fn decode_mixed_chunked(c: &mut Criterion) {
    let input = mixed_input(64 * 1024);
    let automaton = automaton();
    let mut group = c.benchmark_group("decode_mixed_64k");
    group.throughput(Throughput::Bytes(input.len() as u64));

    for chunk in [1usize, 7, 64, 4096] {
        group.bench_with_input(BenchmarkId::new("chunk", chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                let mut decoder = Decoder::new(Arc::clone(&automaton));
                let mut events = 0usize;
                for piece in input.chunks(chunk) {
                    events += decoder.feed(black_box(piece)).len();
                }
                black_box(events)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, build_automaton, decode_plain_text, decode_mixed_chunked);
criterion_main!(benches);
