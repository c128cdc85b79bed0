use fst_core::errors::{ErrorInfo, FstError};
use fst_core::rng::RngHandle;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::hypergraph::HypergraphImpl;

/// Generates a random full-set hypergraph.
///
/// Each of the `n_edges` full sets spans between two and `max_size`
/// distinct terminals chosen uniformly. Costs are drawn from `[1, 10)`.
pub fn gen_random_instance(
    n_verts: usize,
    n_edges: usize,
    max_size: usize,
    rng: &mut RngHandle,
) -> Result<HypergraphImpl, FstError> {
    if n_verts < 2 {
        return Err(FstError::Graph(
            ErrorInfo::new(
                "too-few-terminals",
                "random instances need at least two terminals",
            )
            .with_context("n_verts", n_verts),
        ));
    }
    let max_size = max_size.clamp(2, n_verts);
    let terminals: Vec<usize> = (0..n_verts).collect();
    let mut full_sets = Vec::with_capacity(n_edges);
    let mut costs = Vec::with_capacity(n_edges);
    for _ in 0..n_edges {
        let size = rng.gen_range(2..=max_size);
        let mut members: Vec<usize> = terminals
            .choose_multiple(rng, size)
            .copied()
            .collect();
        members.sort_unstable();
        full_sets.push(members);
        costs.push(rng.gen_range(1.0..10.0));
    }
    HypergraphImpl::new(n_verts, &full_sets)?.with_costs(costs)
}

/// Draws a random LP weight vector with one entry per full set.
///
/// Roughly `zero_fraction` of the entries are exactly zero and the rest lie in
/// `(0, 1]`.
pub fn gen_lp_weights(n_edges: usize, zero_fraction: f64, rng: &mut RngHandle) -> Vec<f64> {
    (0..n_edges)
        .map(|_| {
            if rng.gen_bool(zero_fraction.clamp(0.0, 1.0)) {
                0.0
            } else {
                1.0 - rng.gen_range(0.0..1.0)
            }
        })
        .collect()
}
