use fst_core::{BitSet, SeparationParams};
use fst_cutset::{BranchNode, CutsetCollector, CutsetConstraint, CutsetList, NodeContext};
use fst_graph::HypergraphImpl;

fn pairs(ncomps: usize) -> HypergraphImpl {
    let full_sets: Vec<Vec<usize>> = (0..ncomps).map(|c| vec![2 * c, 2 * c + 1]).collect();
    HypergraphImpl::new(2 * ncomps, &full_sets).unwrap()
}

#[test]
fn component_of_invalid_terminals_is_trivial() {
    let graph = pairs(3);
    let vert_mask = BitSet::from_indices(6, [0, 1, 2, 3]);
    let params = SeparationParams::default().with_max_enumerate_comps(2);
    let ctx = NodeContext::new(&graph, vert_mask, BitSet::full(3), params).unwrap();
    let node = BranchNode::new(ctx);

    let list = node.find_zero_weight_cutsets(&[1.0, 1.0, 1.0]).unwrap();
    assert_eq!(list.stats().submitted, 3);
    assert_eq!(list.stats().trivial, 1);
    // Neither valid component is crossed by any full set.
    assert_eq!(list.stats().duplicates, 1);
    assert_eq!(list.len(), 1);
}

#[test]
fn heavily_spanned_cut_is_not_violated() {
    let graph = HypergraphImpl::new(3, &[vec![0, 1], vec![1, 2]]).unwrap();
    let ctx = NodeContext::all_valid(&graph, SeparationParams::default()).unwrap();
    let x = [1.0 - 1e-7, 0.4];

    let mut list = CutsetList::new();
    list.add_cutset(&BitSet::from_indices(3, [0]), &x, &ctx)
        .unwrap();
    assert_eq!(list.stats().submitted, 1);
    assert_eq!(list.stats().not_violated, 1);
    assert!(list.is_empty());

    // {0,1} is crossed only by full set 1.
    list.add_cutset(&BitSet::from_indices(3, [0, 1]), &x, &ctx)
        .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list.stats().not_violated, 1);
}

#[test]
fn constraints_export_to_json() {
    let graph = HypergraphImpl::new(4, &[vec![0, 1], vec![2, 3], vec![1, 2]]).unwrap();
    let ctx = NodeContext::all_valid(&graph, SeparationParams::default()).unwrap();
    let node = BranchNode::new(ctx);

    let list = node.find_zero_weight_cutsets(&[1.0, 1.0, 0.0]).unwrap();
    let json = list.to_json().unwrap();
    let restored: Vec<CutsetConstraint> = serde_json::from_str(&json).unwrap();

    let constraints = list.into_constraints();
    assert_eq!(restored, constraints);
    assert_eq!(constraints.len(), 1);
    assert_eq!(constraints[0].edges, vec![2]);
    assert_eq!(constraints[0].cut_terms.iter().collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(constraints[0].violation(), 1.0);
}
