use criterion::{Criterion, criterion_group, criterion_main};
use htmlweave_engine::{Document, decode};
mod common;

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    group.sample_size(10);

    let html = common::generate_post(50);
    let doc = Document::decode(&html).unwrap();

    group.bench_function("decode", |b| {
        b.iter(|| {
            let doc = decode(std::hint::black_box(&html));
            std::hint::black_box(doc)
        });
    });

    group.bench_function("encode", |b| {
        b.iter(|| std::hint::black_box(doc.encode()));
    });

    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
