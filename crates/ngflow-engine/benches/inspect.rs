use criterion::{Criterion, criterion_group, criterion_main};
use ngflow_config::BlockDefinitionTable;
use ngflow_engine::inspect;
use ngflow_syntax::{AstNode, Root, parse};
mod common;

fn bench_inspect(c: &mut Criterion) {
    let mut group = c.benchmark_group("inspect");
    group.sample_size(10);

    let content = common::generate_template_content(100);
    let table = BlockDefinitionTable::angular();

    group.bench_function("parse", |b| {
        b.iter(|| {
            std::hint::black_box(parse(std::hint::black_box(&content)));
        });
    });

    let root = Root::cast(parse(&content)).unwrap();
    group.bench_function("inspect_document", |b| {
        b.iter(|| {
            let diagnostics = inspect(std::hint::black_box(&root), &table);
            std::hint::black_box(diagnostics);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_inspect);
criterion_main!(benches);
