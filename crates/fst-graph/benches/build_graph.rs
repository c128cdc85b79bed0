use fst_core::rng::RngHandle;
use fst_graph::gen_random_instance;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn build_graph_bench(c: &mut Criterion) {
    c.bench_function("build_instance_2k", |b| {
        b.iter(|| {
            let mut rng = RngHandle::from_seed(42);
            let graph = gen_random_instance(500, 2_000, 5, &mut rng).unwrap();
            black_box(graph);
        });
    });
}

criterion_group!(benches, build_graph_bench);
criterion_main!(benches);
