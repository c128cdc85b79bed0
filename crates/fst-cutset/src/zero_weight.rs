//! Cutsets crossed by no full set of positive weight.
//!
//! When the support hypergraph splits into several components, any
//! bipartition that keeps each component whole has zero spanning weight and
//! is violated. Few components are enumerated exhaustively; many are cut one
//! at a time.

use fst_core::{BitSet, FstError};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::components::{find_components, Components};
use crate::cutlist::CutsetCollector;
use crate::node::NodeContext;

/// How the zero-weight finder produced its candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutStrategy {
    /// The support was connected; nothing was offered.
    Connected,
    /// Every nontrivial union of components was offered.
    Enumerated,
    /// Each component was offered on its own.
    Simple,
}

/// Outcome of one zero-weight separation round.
#[derive(Debug, Clone)]
pub struct ZeroWeightReport {
    /// Components of the support hypergraph.
    pub components: Components,
    /// Strategy chosen from the component count.
    pub strategy: CutStrategy,
    /// Candidates offered to the collector.
    pub candidates: usize,
}

/// Finds cutsets of zero weight under `x` and offers them to `collector`.
///
/// The support is every full set valid in the node's edge mask with weight
/// above the fuzz tolerance.
pub fn find_zero_weight_cutsets<C: CutsetCollector + ?Sized>(
    x: &[f64],
    ctx: &NodeContext<'_>,
    collector: &mut C,
) -> Result<ZeroWeightReport, FstError> {
    ctx.check_solution(x)?;
    let hypergraph = ctx.hypergraph();
    let fuzz = ctx.params().fuzz;

    let mut support = BitSet::new(hypergraph.num_edges());
    for edge in ctx.edge_mask().iter() {
        if x[edge] > fuzz {
            support.set(edge);
        }
    }

    let components = find_components(hypergraph, support);
    let ncomps = components.len();
    if ncomps == 0 {
        return Err(FstError::separation(
            "no-components",
            "support hypergraph has no connected component",
        )
        .with_context("num_edges", hypergraph.num_edges())
        .with_context("valid_edges", ctx.edge_mask().count()));
    }
    if ncomps == 1 {
        return Ok(ZeroWeightReport {
            components,
            strategy: CutStrategy::Connected,
            candidates: 0,
        });
    }

    debug!("@cutset: {} connected components.", ncomps);

    let (strategy, candidates) = if ncomps > ctx.params().max_cutset_enumerate_comps {
        let offered = cut_each_component(&components, x, ctx, collector)?;
        (CutStrategy::Simple, offered)
    } else {
        let offered = enumerate_partitions(&components, x, ctx, collector)?;
        (CutStrategy::Enumerated, offered)
    };

    Ok(ZeroWeightReport {
        components,
        strategy,
        candidates,
    })
}

/// Offers the union of every subset of components that holds the first
/// component but not all of them.
fn enumerate_partitions<C: CutsetCollector + ?Sized>(
    components: &Components,
    x: &[f64],
    ctx: &NodeContext<'_>,
    collector: &mut C,
) -> Result<usize, FstError> {
    let mut taken = vec![false; components.len()];
    taken[0] = true;
    let mut walk = PartitionWalk {
        components,
        x,
        ctx,
        collector,
        taken,
        cut_terms: BitSet::new(ctx.hypergraph().num_verts()),
        offered: 0,
    };
    walk.descend(1)?;
    Ok(walk.offered)
}

struct PartitionWalk<'a, 'g, C: ?Sized> {
    components: &'a Components,
    x: &'a [f64],
    ctx: &'a NodeContext<'g>,
    collector: &'a mut C,
    taken: Vec<bool>,
    cut_terms: BitSet,
    offered: usize,
}

impl<C: CutsetCollector + ?Sized> PartitionWalk<'_, '_, C> {
    // Depth is bounded by the component count, itself capped by the
    // enumeration threshold.
    fn descend(&mut self, index: usize) -> Result<(), FstError> {
        if index < self.taken.len() {
            self.taken[index] = true;
            self.descend(index + 1)?;
            self.taken[index] = false;
            return self.descend(index + 1);
        }

        let count = self.taken.iter().filter(|taken| **taken).count();
        if count == 0 || count == self.taken.len() {
            return Ok(());
        }
        self.cut_terms.clear_all();
        for (comp, verts) in self.components.iter().enumerate() {
            if self.taken[comp] {
                for &v in verts {
                    self.cut_terms.set(v);
                }
            }
        }
        self.collector.add_cutset(&self.cut_terms, self.x, self.ctx)?;
        self.offered += 1;
        Ok(())
    }
}

/// Offers each component, restricted to the valid terminals, as its own cut.
fn cut_each_component<C: CutsetCollector + ?Sized>(
    components: &Components,
    x: &[f64],
    ctx: &NodeContext<'_>,
    collector: &mut C,
) -> Result<usize, FstError> {
    let vert_mask = ctx.vert_mask();
    let mut cut_terms = BitSet::new(ctx.hypergraph().num_verts());
    let mut offered = 0;
    for verts in components.iter() {
        for &v in verts.iter().filter(|&&v| vert_mask.test(v)) {
            cut_terms.set(v);
        }
        collector.add_cutset(&cut_terms, x, ctx)?;
        offered += 1;
        for &v in verts {
            cut_terms.clear(v);
        }
    }
    Ok(offered)
}
