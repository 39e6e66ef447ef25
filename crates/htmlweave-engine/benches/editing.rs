use criterion::{Criterion, criterion_group, criterion_main};
use htmlweave_engine::{Cmd, Document};
mod common;

fn bench_edits(c: &mut Criterion) {
    let mut group = c.benchmark_group("editing");
    group.sample_size(10);

    let doc = Document::decode(&common::generate_post(50)).unwrap();

    group.bench_function("insert_text", |b| {
        let mut d = doc.clone();
        b.iter(|| {
            let patch = d.apply(Cmd::insert(std::hint::black_box(40), "test"));
            std::hint::black_box(patch)
        });
    });

    group.bench_function("split_list_item", |b| {
        b.iter_batched(
            || doc.clone(),
            |mut d| {
                let at = d.text().find("first").map_or(0, |i| i + 2);
                std::hint::black_box(d.apply(Cmd::insert(at, "\n")))
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function("delete_block", |b| {
        b.iter_batched(
            || doc.clone(),
            |mut d| std::hint::black_box(d.apply(Cmd::delete(0..60))),
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_edits);
criterion_main!(benches);
