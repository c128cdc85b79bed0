use fst_core::rng::RngHandle;
use fst_core::{BitSet, SeparationParams};
use fst_cutset::{BranchNode, CutsetFormulation, NodeContext};
use fst_graph::{gen_lp_weights, gen_random_instance};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn separation_bench(c: &mut Criterion) {
    let mut rng = RngHandle::substream(42, 0);
    let graph = gen_random_instance(200, 800, 4, &mut rng).unwrap();
    let mut weights = RngHandle::substream(42, 1);
    let x = gen_lp_weights(800, 0.8, &mut weights);

    c.bench_function("build_formulation_800", |b| {
        let edge_mask = BitSet::full(800);
        b.iter(|| {
            let formulation = CutsetFormulation::build(&graph, &edge_mask).unwrap();
            black_box(formulation);
        });
    });

    c.bench_function("zero_weight_800", |b| {
        let ctx = NodeContext::all_valid(&graph, SeparationParams::default()).unwrap();
        let node = BranchNode::new(ctx);
        b.iter(|| {
            let list = node.find_zero_weight_cutsets(black_box(&x)).unwrap();
            black_box(list);
        });
    });

    c.bench_function("fractional_800", |b| {
        let ctx = NodeContext::all_valid(&graph, SeparationParams::default()).unwrap();
        let mut node = BranchNode::new(ctx);
        node.build_cutset_separation_formulation().unwrap();
        b.iter(|| {
            let list = node.find_fractional_cutsets(black_box(&x)).unwrap();
            black_box(list);
        });
    });
}

criterion_group!(benches, separation_bench);
criterion_main!(benches);
