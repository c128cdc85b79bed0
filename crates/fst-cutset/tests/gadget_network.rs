use fst_core::rng::RngHandle;
use fst_core::{BitSet, FstHypergraph, SeparationParams};
use fst_cutset::{
    build_gadget_network, BranchNode, CutStrategy, CutsetFormulation, NodeContext,
};
use fst_graph::{gen_lp_weights, gen_random_instance, HypergraphImpl};
use proptest::prelude::*;

/// Total weight of valid full sets with members on both sides of `cut`.
fn spanning_weight(graph: &HypergraphImpl, edge_mask: &BitSet, cut: &BitSet, x: &[f64]) -> f64 {
    edge_mask
        .iter()
        .filter(|&edge| {
            let members = graph.edge_members(edge);
            members.iter().any(|&v| cut.test(v)) && members.iter().any(|&v| !cut.test(v))
        })
        .map(|edge| x[edge])
        .sum()
}

#[test]
fn gadget_layout_and_numbering() {
    let graph = HypergraphImpl::new(4, &[vec![0, 1, 2], vec![2, 3], vec![0, 3]]).unwrap();
    let edge_mask = BitSet::from_indices(3, [0, 1]);
    let gadget = build_gadget_network(&graph, &edge_mask).unwrap();
    let network = &gadget.network;

    assert_eq!(network.num_nodes(), 4 + 2 * 3);
    assert_eq!(network.num_arcs(), 3 + 2 * (3 + 2));
    assert_eq!(gadget.valid_full_sets, 2);

    for edge in 0..3 {
        assert_eq!(network.arc_src(edge), 4 + edge);
        assert_eq!(network.arc_dst(edge), 7 + edge);
        assert_eq!(gadget.arc_to_fset[edge], edge);
    }
    // Masked full set 2 keeps its gadget nodes but no terminal arcs.
    assert_eq!(network.degree(6), 1);
    assert_eq!(network.degree(9), 1);
    // Terminal 2 is in full sets 0 and 1.
    assert_eq!(network.outgoing(2).len(), 2);
    assert_eq!(network.incoming(2).len(), 2);
    for &arc in network.outgoing(2) {
        let fset = gadget.arc_to_fset[arc];
        assert_eq!(network.arc_dst(arc), 4 + fset);
    }
}

#[test]
fn full_set_weight_bounds_flow_between_any_members() {
    let graph = HypergraphImpl::new(5, &[vec![0, 1, 2, 3, 4]]).unwrap();
    let mut formulation = CutsetFormulation::build(&graph, &BitSet::full(1)).unwrap();
    formulation.refresh_capacities(&[0.35]).unwrap();
    for source in 1..5 {
        let solution = formulation.max_flow(source, 0).unwrap();
        assert!((solution.z - 0.35).abs() < 1e-12);
    }
}

#[test]
fn refresh_copies_owner_weights() {
    let graph = HypergraphImpl::new(3, &[vec![0, 1], vec![1, 2]]).unwrap();
    let mut formulation = CutsetFormulation::build(&graph, &BitSet::full(2)).unwrap();
    formulation.refresh_capacities(&[0.25, 0.75]).unwrap();
    let capacity = formulation.network().capacity();
    for (arc, &fset) in formulation.arc_to_fset().iter().enumerate() {
        assert_eq!(capacity[arc], [0.25, 0.75][fset]);
    }
    assert!(formulation.refresh_capacities(&[1.0]).is_err());
}

proptest! {
    #[test]
    fn min_cut_spanning_weight_matches_flow(
        seed in any::<u64>(),
        verts in 3usize..10,
        edges in 1usize..14,
    ) {
        let mut rng = RngHandle::substream(seed, 0);
        let graph = gen_random_instance(verts, edges, 4, &mut rng).unwrap();
        let mut weights = RngHandle::substream(seed, 1);
        let x = gen_lp_weights(edges, 0.3, &mut weights);
        let edge_mask = BitSet::full(edges);

        let mut formulation = CutsetFormulation::build(&graph, &edge_mask).unwrap();
        formulation.refresh_capacities(&x).unwrap();
        for source in 1..verts {
            let solution = formulation.max_flow(source, 0).unwrap();
            let z = solution.z;
            let cut = solution.cut.resized(verts);
            prop_assert!(cut.test(source));
            prop_assert!(!cut.test(0));
            let weight = spanning_weight(&graph, &edge_mask, &cut, &x);
            prop_assert!((weight - z).abs() < 1e-6, "weight {} flow {}", weight, z);
        }
    }

    #[test]
    fn zero_weight_candidates_cross_no_support(
        seed in any::<u64>(),
        verts in 4usize..16,
        edges in 1usize..12,
    ) {
        let mut rng = RngHandle::substream(seed, 0);
        let graph = gen_random_instance(verts, edges, 3, &mut rng).unwrap();
        let mut weights = RngHandle::substream(seed, 1);
        let mut x = gen_lp_weights(edges, 0.5, &mut weights);
        x[0] = 1.0;

        let params = SeparationParams::default();
        let fuzz = params.fuzz;
        let ctx = NodeContext::all_valid(&graph, params).unwrap();
        let node = BranchNode::new(ctx);
        let mut raw: Vec<BitSet> = Vec::new();
        let report = node.find_zero_weight_cutsets_into(&x, &mut raw).unwrap();

        let ncomps = report.components.len();
        match report.strategy {
            CutStrategy::Connected => {
                prop_assert!(raw.is_empty());
            }
            CutStrategy::Enumerated => {
                prop_assert_eq!(raw.len(), (1usize << (ncomps - 1)) - 1);
            }
            CutStrategy::Simple => {
                prop_assert_eq!(raw.len(), ncomps);
            }
        }

        let support = BitSet::from_indices(edges, (0..edges).filter(|&e| x[e] > fuzz));
        for cut in &raw {
            prop_assert!(spanning_weight(&graph, &support, cut, &x) == 0.0);
        }

        let mut covered: Vec<usize> = report.components.vertices().to_vec();
        covered.sort_unstable();
        let before = covered.len();
        covered.dedup();
        prop_assert_eq!(before, covered.len());
    }
}
