use fst_core::errors::FstError;
use fst_core::FstHypergraph;
use fst_graph::HypergraphImpl;

#[test]
fn incidence_lists_follow_edge_order() {
    let graph = HypergraphImpl::new(5, &[vec![3, 1], vec![0, 1, 2], vec![4, 2, 2]]).unwrap();

    assert_eq!(graph.num_verts(), 5);
    assert_eq!(graph.num_edges(), 3);
    assert_eq!(graph.edge_members(0), &[1, 3]);
    assert_eq!(graph.edge_members(2), &[2, 4]);
    assert_eq!(graph.edge_size(1), 3);
    assert_eq!(graph.total_size(), 7);

    assert_eq!(graph.incident_edges(0), &[1]);
    assert_eq!(graph.incident_edges(1), &[0, 1]);
    assert_eq!(graph.incident_edges(2), &[1, 2]);
    assert_eq!(graph.incident_edges(3), &[0]);
    assert_eq!(graph.incident_edges(4), &[2]);
}

#[test]
fn isolated_terminals_have_no_incidence() {
    let graph = HypergraphImpl::new(4, &[vec![0, 1]]).unwrap();
    assert!(graph.incident_edges(2).is_empty());
    assert!(graph.incident_edges(3).is_empty());
}

#[test]
fn rejects_unknown_terminal() {
    let err = HypergraphImpl::new(3, &[vec![0, 1], vec![1, 3]]).unwrap_err();
    match err {
        FstError::Graph(info) => {
            assert_eq!(info.code, "unknown-terminal");
            assert_eq!(info.context.get("edge"), Some(&"1".to_string()));
            assert_eq!(info.context.get("terminal"), Some(&"3".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_degenerate_full_set() {
    let err = HypergraphImpl::new(3, &[vec![2, 2]]).unwrap_err();
    assert!(matches!(err, FstError::Graph(info) if info.code == "degenerate-full-set"));
}

#[test]
fn costs_must_match_edge_count() {
    let graph = HypergraphImpl::new(3, &[vec![0, 1], vec![1, 2]]).unwrap();
    let err = graph.clone().with_costs(vec![1.0]).unwrap_err();
    assert!(matches!(err, FstError::Graph(info) if info.code == "cost-length-mismatch"));

    let graph = graph.with_costs(vec![1.5, 2.5]).unwrap();
    assert_eq!(graph.cost(1), Some(2.5));
    assert_eq!(graph.cost(2), None);
}
