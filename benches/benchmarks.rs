use criterion::{black_box, criterion_group, criterion_main, Criterion};

use blockcodec::align::pairwise_to_blocks;
use blockcodec::block::{codec, sites, Block, Indexing};
use blockcodec::exon::merge_exon_blocks;

fn make_sequence(len: usize, seed: u32) -> String {
    let bases = ['A', 'C', 'G', 'T'];
    let mut x: u32 = seed;
    (0..len)
        .map(|_| {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            bases[(x >> 16) as usize % 4]
        })
        .collect()
}

/// Punches gap runs into a copy of `seq` every `period` columns.
fn with_gaps(seq: &str, period: usize, run: usize) -> String {
    seq.chars()
        .enumerate()
        .map(|(i, c)| if i % period < run { '-' } else { c })
        .collect()
}

fn make_positions(len: usize) -> Vec<i64> {
    // runs of 50 real positions separated by jumps, with sentinel runs between
    let mut out = Vec::with_capacity(len);
    let mut pos = 0i64;
    while out.len() < len {
        for _ in 0..50 {
            out.push(pos);
            pos += 1;
        }
        pos += 7;
        out.extend([-1, -2, -3]);
    }
    out.truncate(len);
    out
}

fn bench_encode(c: &mut Criterion) {
    let positions = make_positions(100_000);
    c.bench_function("encode_100k", |b| {
        b.iter(|| black_box(codec::encode(black_box(&positions))));
    });
}

fn bench_decode(c: &mut Criterion) {
    let blocks = codec::encode(&make_positions(100_000));
    c.bench_function("decode_100k", |b| {
        b.iter(|| black_box(codec::decode(black_box(&blocks))));
    });
}

fn bench_pairwise(c: &mut Criterion) {
    let base = make_sequence(10_000, 42);
    let reference = with_gaps(&base, 97, 3);
    let other = with_gaps(&base, 61, 5);
    c.bench_function("pairwise_10k", |b| {
        b.iter(|| black_box(pairwise_to_blocks(black_box(&reference), black_box(&other), '-')));
    });
}

fn bench_remove_sites(c: &mut Criterion) {
    let seq = make_sequence(10_000, 7);
    let blocks = vec![Block::forward(0, 10_000)];
    let removed: Vec<usize> = (0..10_000).step_by(13).collect();
    c.bench_function("remove_sites_10k", |b| {
        b.iter(|| black_box(sites::remove_sites(&seq, &blocks, black_box(&removed), Indexing::ZeroBased)));
    });
}

fn bench_merge_exons(c: &mut Criterion) {
    let transcript: Vec<Block> = (0..1_000).map(|i| Block::forward(i * 100, i * 100 + 60)).collect();
    let cds: Vec<Block> = (0..1_000).map(|i| Block::forward(i * 100 + 20, i * 100 + 60)).collect();
    c.bench_function("merge_exons_1k", |b| {
        b.iter(|| black_box(merge_exon_blocks(black_box(&transcript), black_box(&cds))));
    });
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_pairwise,
    bench_remove_sites,
    bench_merge_exons
);
criterion_main!(benches);
