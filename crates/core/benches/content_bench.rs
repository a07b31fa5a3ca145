//! Benchmarks for content stream parsing.
//!
//! Benchmark groups:
//! - `content_tokenize`: raw `ContentLexer` throughput at various scales
//! - `content_group`: tokenizer, object assembly and operand grouping
//! - `content_inline_image`: streams dominated by inline images

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use quire_core::ParseOptions;
use quire_core::parser::{ContentLexer, parse_content_bytes};

// =============================================================================
// Data Generation
// =============================================================================

/// Synthetic page content with roughly `n` operator/operand groups.
fn generate_page_content(n: usize) -> Vec<u8> {
    let templates: &[&[u8]] = &[
        b"q ",
        b"1 0 0 1 72 720 cm ",
        b"BT ",
        b"/F1 12 Tf ",
        b"100 700 Td ",
        b"(Hello World) Tj ",
        b"[(Kern) -120 (ed)] TJ ",
        b"ET ",
        b"0.5 0.25 0.125 rg ",
        b"<48454C4C4F> Tj ",
        b"/P << /MCID 3 >> BDC ",
        b"EMC ",
        b"0 0 612 792 re f ",
        b"Q\n",
    ];

    let mut data = Vec::with_capacity(n * 12);
    for i in 0..n {
        data.extend_from_slice(templates[i % templates.len()]);
    }
    data
}

fn generate_inline_images(n: usize) -> Vec<u8> {
    let mut data = Vec::new();
    for i in 0..n {
        data.extend_from_slice(b"q 8 0 0 8 0 0 cm BI /W 8 /H 8 /BPC 8 /CS /G ID ");
        data.extend((0..64u8).map(|b| b.wrapping_mul(i as u8 | 1)));
        data.extend_from_slice(b"\nEI Q\n");
    }
    data
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("content_tokenize");
    for size in [1_000, 10_000, 100_000] {
        let data = generate_page_content(size);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let count = ContentLexer::new(black_box(data))
                    .filter_map(Result::ok)
                    .count();
                black_box(count)
            });
        });
    }
    group.finish();
}

fn bench_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("content_group");
    let all = ParseOptions::default();
    let text_only = ParseOptions::default().with_operator_list("BT ET Tf Td Tj TJ");

    for size in [1_000, 10_000, 100_000] {
        let data = generate_page_content(size);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("all", size), &data, |b, data| {
            b.iter(|| parse_content_bytes(black_box(data), &all).map(|p| p.instructions.len()));
        });
        group.bench_with_input(BenchmarkId::new("whitelist", size), &data, |b, data| {
            b.iter(|| {
                parse_content_bytes(black_box(data), &text_only).map(|p| p.instructions.len())
            });
        });
    }
    group.finish();
}

fn bench_inline_images(c: &mut Criterion) {
    let data = generate_inline_images(1_000);
    let options = ParseOptions::default();
    let mut group = c.benchmark_group("content_inline_image");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("1000_images", |b| {
        b.iter(|| parse_content_bytes(black_box(&data), &options).map(|p| p.instructions.len()));
    });
    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_group, bench_inline_images);
criterion_main!(benches);
