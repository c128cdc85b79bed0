//! Violated cutsets of fractional weight, found by max-flow / min-cut.

use fst_core::FstError;
use log::{trace, warn};

use crate::cutlist::CutsetCollector;
use crate::formulation::CutsetFormulation;
use crate::node::NodeContext;

/// Outcome of one fractional separation round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FractionalReport {
    /// Terminal used as the sink of every query.
    pub sink: usize,
    /// Max-flow queries run.
    pub max_flows: usize,
    /// Candidates offered to the collector.
    pub candidates: usize,
}

/// Finds terminals separated from the lowest valid terminal by less than
/// unit flow and offers each minimum cut to `collector`.
///
/// Capacities are refreshed from `x` first. Each valid terminal `J` above the
/// sink `I` is then a source; a flow `z` with `1 - z >= fuzz` yields the
/// source side of the cut, restricted to valid terminals.
pub fn find_fractional_cutsets<C: CutsetCollector + ?Sized>(
    x: &[f64],
    ctx: &NodeContext<'_>,
    formulation: &mut CutsetFormulation,
    collector: &mut C,
) -> Result<FractionalReport, FstError> {
    let hypergraph = ctx.hypergraph();
    let nverts = hypergraph.num_verts();
    if formulation.num_verts() != nverts || formulation.num_edges() != hypergraph.num_edges() {
        return Err(FstError::separation(
            "formulation-shape-mismatch",
            "formulation was built for a different hypergraph",
        )
        .with_context("formulation_verts", formulation.num_verts())
        .with_context("formulation_edges", formulation.num_edges())
        .with_context("num_verts", nverts)
        .with_context("num_edges", hypergraph.num_edges()));
    }
    ctx.check_solution(x)?;

    let fuzz = ctx.params().fuzz;
    let vert_mask = ctx.vert_mask();
    let sink = vert_mask.next_set(0).ok_or_else(|| {
        FstError::separation("no-valid-terminal", "vertex mask is empty")
            .with_context("nverts", nverts)
    })?;

    let masked_weighted = x
        .iter()
        .enumerate()
        .filter(|&(edge, &weight)| weight > fuzz && !formulation.edge_mask().test(edge))
        .count();
    if masked_weighted > 0 {
        warn!(
            "@cutset: {} masked-out full sets have positive weight and carry no flow",
            masked_weighted
        );
    }

    formulation.refresh_capacities(x)?;

    let mut report = FractionalReport {
        sink,
        max_flows: 0,
        candidates: 0,
    };
    for source in vert_mask.iter().filter(|&v| v > sink) {
        let solution = formulation.max_flow(source, sink)?;
        report.max_flows += 1;
        let z = solution.z;
        if 1.0 - z < fuzz {
            continue;
        }
        trace!("@cutset: flow {} -> {} is {}", source, sink, z);
        let mut cut_terms = solution.cut.resized(nverts);
        cut_terms.and_with(vert_mask);
        collector.add_cutset(&cut_terms, x, ctx)?;
        report.candidates += 1;
    }
    Ok(report)
}
