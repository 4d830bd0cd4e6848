use std::hint::black_box;

use chain_consensus::{Engine, ProofOfWork};
use chain_core::{Block, BlockHash, Transaction};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn candidate(tx_count: usize) -> Block {
    let transactions = (0..tx_count)
        .map(|i| {
            Transaction::new()
                .with_field("author", format!("author-{i}"))
                .with_field("content", "benchmark payload")
        })
        .collect();
    Block::candidate(1, transactions, 1_700_000_000_000, BlockHash::from("00"))
}

/// Benchmark a single canonical hash computation
fn bench_compute_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_hash");

    for &tx_count in &[0, 10, 100] {
        let block = candidate(tx_count);
        group.bench_with_input(BenchmarkId::new("txs", tx_count), &block, |b, block| {
            b.iter(|| black_box(block.compute_hash()));
        });
    }
    group.finish();
}

/// Benchmark the full nonce search
fn bench_seal(c: &mut Criterion) {
    let mut group = c.benchmark_group("seal");
    group.sample_size(20);

    for &difficulty in &[1, 2, 3] {
        let engine = ProofOfWork::with_difficulty(difficulty).expect("valid difficulty");
        group.bench_with_input(
            BenchmarkId::new("difficulty", difficulty),
            &engine,
            |b, engine| {
                b.iter(|| {
                    let mut block = candidate(10);
                    black_box(engine.seal(&mut block))
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_compute_hash, bench_seal);
criterion_main!(benches);
