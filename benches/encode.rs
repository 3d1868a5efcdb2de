//! Benchmarks for the Markdown → RTF pipeline.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use mdrtf::markdown_to_rtf;

const NOTE: &str = "# Meeting notes\n\n\
Some **bold**, *italic* and `inline code`, plus a [link](https://example.com/s1(2)).\n\n\
- first point\n- second point\n\n\
1. step one\n2. step two\n\n\
```rust\nfn main() {\n    println!(\"hello\");\n}\n```\n\n---\n";

fn bench_encode_note(c: &mut Criterion) {
    c.bench_function("encode_note", |b| {
        b.iter(|| markdown_to_rtf(black_box(NOTE)));
    });
}

fn bench_encode_large_document(c: &mut Criterion) {
    let doc = NOTE.repeat(200);
    c.bench_function("encode_large_document", |b| {
        b.iter(|| markdown_to_rtf(black_box(&doc)));
    });
}

criterion_group!(benches, bench_encode_note, bench_encode_large_document);
criterion_main!(benches);
