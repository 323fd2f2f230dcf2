use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use kbml_engine::compile;

/// Synthetic article exercising every recognizer.
fn article(sections: usize) -> String {
    let section = "## Section heading\n\nSome paragraph text with **bold**, *italic*, \
                   `code` and [a link](https://example.com).\n\n\
                   - bullet one\n- bullet two\n\n\
                   :::steps\n1. First\n2. Second\n:::\n\n\
                   | A | B |\n| - | - |\n| 1 | 2 |\n\n\
                   ```rust\nlet x = 1;\n```\n\n";
    section.repeat(sections)
}

fn bench_compile(c: &mut Criterion) {
    let small = article(5);
    let large = article(100);

    c.bench_function("compile_small_article", |b| {
        b.iter(|| compile(black_box(&small)))
    });
    c.bench_function("compile_large_article", |b| {
        b.iter(|| compile(black_box(&large)))
    });
}

criterion_group!(benches, bench_compile);
criterion_main!(benches);
