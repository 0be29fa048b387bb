//! Criterion benchmarks for scan-code resolution.
//!
//! Covers each resolution path (key name, base character, Shift layer,
//! AltGr layer, case-folded fallback) plus a full sentence, which is what
//! `print_text` resolves once per character.
//!
//! Run with:
//! ```bash
//! cargo bench --package stroke-core --bench resolver_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stroke_core::keymap::{resolve, resolve_char, KeyToken};

const SENTENCE: &str = "Árvíztűrő tükörfúrógép: 12 @ 3,5€!";

// ── Benchmarks: single characters per layer ──────────────────────────────────

fn bench_resolve_char_layers(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver_char");

    for (label, ch) in [
        ("base", 'a'),
        ("shift_letter", 'Ő'),
        ("shift_symbol", '!'),
        ("alt_gr", '€'),
        ("case_fold", '\u{212A}'),
    ] {
        group.bench_with_input(BenchmarkId::new("resolve_char", label), &ch, |b, &ch| {
            b.iter(|| resolve_char(black_box(ch)))
        });
    }

    group.finish();
}

// ── Benchmarks: tokens ───────────────────────────────────────────────────────

fn bench_resolve_tokens(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver_token");

    group.bench_function("parse_and_resolve_named", |b| {
        b.iter(|| resolve(&KeyToken::parse(black_box("rightArrow"))))
    });

    group.bench_function("resolve_sentence_as_text", |b| {
        let token = KeyToken::Text(SENTENCE.to_string());
        b.iter(|| resolve(black_box(&token)))
    });

    group.bench_function("resolve_sentence_per_char", |b| {
        b.iter(|| {
            SENTENCE
                .chars()
                .map(|ch| resolve_char(black_box(ch)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_resolve_char_layers, bench_resolve_tokens);
criterion_main!(benches);
