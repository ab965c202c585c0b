use criterion::{Criterion, criterion_group, criterion_main};
use ngflow_config::BlockDefinitionTable;
use ngflow_engine::ChainResolver;
use ngflow_syntax::{AstNode, Root, parse};
mod common;

fn bench_chain_walks(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain");
    group.sample_size(10);

    let root = Root::cast(parse(&common::generate_flat_chain(1000))).unwrap();
    let blocks: Vec<_> = root.blocks().collect();
    let table = BlockDefinitionTable::angular();
    let resolver = ChainResolver::new(&table);

    group.bench_function("forward_from_primary", |b| {
        b.iter(|| {
            let walk = resolver.forward_chain(std::hint::black_box(&blocks[0])).unwrap();
            std::hint::black_box(walk.count());
        });
    });

    group.bench_function("primary_from_last", |b| {
        let last = blocks.last().unwrap();
        b.iter(|| {
            let head = resolver.primary_block(std::hint::black_box(last)).unwrap();
            std::hint::black_box(head);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_chain_walks);
criterion_main!(benches);
