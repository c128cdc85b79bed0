//! Per branch-and-bound node separation state.

use fst_core::{BitSet, ErrorInfo, FstError, FstHypergraph, SeparationParams};

use crate::cutlist::{CutsetCollector, CutsetList};
use crate::formulation::CutsetFormulation;
use crate::fractional::{find_fractional_cutsets, FractionalReport};
use crate::zero_weight::{find_zero_weight_cutsets, ZeroWeightReport};

/// Read-only view of a branch node: the hypergraph, its validity masks and
/// the separation parameters.
#[derive(Clone)]
pub struct NodeContext<'g> {
    hypergraph: &'g dyn FstHypergraph,
    vert_mask: BitSet,
    edge_mask: BitSet,
    params: SeparationParams,
}

impl<'g> NodeContext<'g> {
    /// Creates a context, checking that the masks match the hypergraph.
    pub fn new(
        hypergraph: &'g dyn FstHypergraph,
        vert_mask: BitSet,
        edge_mask: BitSet,
        params: SeparationParams,
    ) -> Result<Self, FstError> {
        if vert_mask.capacity() != hypergraph.num_verts()
            || edge_mask.capacity() != hypergraph.num_edges()
        {
            return Err(FstError::separation(
                "mask-size-mismatch",
                "validity masks must cover exactly the hypergraph's domains",
            )
            .with_context("vert_mask", vert_mask.capacity())
            .with_context("num_verts", hypergraph.num_verts())
            .with_context("edge_mask", edge_mask.capacity())
            .with_context("num_edges", hypergraph.num_edges()));
        }
        params.validate()?;
        Ok(Self {
            hypergraph,
            vert_mask,
            edge_mask,
            params,
        })
    }

    /// Creates a context where every terminal and full set is valid.
    pub fn all_valid(
        hypergraph: &'g dyn FstHypergraph,
        params: SeparationParams,
    ) -> Result<Self, FstError> {
        let vert_mask = BitSet::full(hypergraph.num_verts());
        let edge_mask = BitSet::full(hypergraph.num_edges());
        Self::new(hypergraph, vert_mask, edge_mask, params)
    }

    /// Returns the hypergraph.
    pub fn hypergraph(&self) -> &'g dyn FstHypergraph {
        self.hypergraph
    }

    /// Returns the valid terminals.
    pub fn vert_mask(&self) -> &BitSet {
        &self.vert_mask
    }

    /// Returns the valid full sets.
    pub fn edge_mask(&self) -> &BitSet {
        &self.edge_mask
    }

    /// Returns the separation parameters.
    pub fn params(&self) -> &SeparationParams {
        &self.params
    }

    /// Fails unless `x` holds exactly one weight per full set.
    pub fn check_solution(&self, x: &[f64]) -> Result<(), FstError> {
        if x.len() != self.hypergraph.num_edges() {
            return Err(FstError::separation(
                "solution-length-mismatch",
                "LP solution must hold one weight per full set",
            )
            .with_context("len", x.len())
            .with_context("num_edges", self.hypergraph.num_edges()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for NodeContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeContext")
            .field("num_verts", &self.hypergraph.num_verts())
            .field("num_edges", &self.hypergraph.num_edges())
            .field("valid_verts", &self.vert_mask.count())
            .field("valid_edges", &self.edge_mask.count())
            .field("params", &self.params)
            .finish()
    }
}

/// A branch node together with its cutset separation formulation.
///
/// The formulation is built once per node, reused by every fractional
/// separation round and released by
/// [`free_cutset_separation_formulation`](Self::free_cutset_separation_formulation)
/// or when the node is dropped. It is never shared with other nodes.
#[derive(Debug)]
pub struct BranchNode<'g> {
    ctx: NodeContext<'g>,
    formulation: Option<CutsetFormulation>,
}

impl<'g> BranchNode<'g> {
    /// Wraps a node context with no formulation built yet.
    pub fn new(ctx: NodeContext<'g>) -> Self {
        Self {
            ctx,
            formulation: None,
        }
    }

    /// Returns the node context.
    pub fn context(&self) -> &NodeContext<'g> {
        &self.ctx
    }

    /// Returns the formulation, when built.
    pub fn formulation(&self) -> Option<&CutsetFormulation> {
        self.formulation.as_ref()
    }

    /// Finds cutsets of zero weight, returning the violated constraints.
    pub fn find_zero_weight_cutsets(&self, x: &[f64]) -> Result<CutsetList, FstError> {
        let mut list = CutsetList::new();
        self.find_zero_weight_cutsets_into(x, &mut list)?;
        Ok(list)
    }

    /// Finds cutsets of zero weight, offering each candidate to `collector`.
    pub fn find_zero_weight_cutsets_into<C: CutsetCollector + ?Sized>(
        &self,
        x: &[f64],
        collector: &mut C,
    ) -> Result<ZeroWeightReport, FstError> {
        find_zero_weight_cutsets(x, &self.ctx, collector)
    }

    /// Builds the flow network used by fractional separation from the node's
    /// masks, replacing any previous formulation.
    pub fn build_cutset_separation_formulation(&mut self) -> Result<(), FstError> {
        let formulation = CutsetFormulation::build(self.ctx.hypergraph(), self.ctx.edge_mask())?;
        self.formulation = Some(formulation);
        Ok(())
    }

    /// Installs an externally built formulation, e.g. one with another solver.
    pub fn install_formulation(&mut self, formulation: CutsetFormulation) {
        self.formulation = Some(formulation);
    }

    /// Finds violated fractional cutsets, returning the violated constraints.
    pub fn find_fractional_cutsets(&mut self, x: &[f64]) -> Result<CutsetList, FstError> {
        let mut list = CutsetList::new();
        self.find_fractional_cutsets_into(x, &mut list)?;
        Ok(list)
    }

    /// Finds violated fractional cutsets, offering each candidate to `collector`.
    ///
    /// Fails with `formulation-missing` unless the formulation was built first.
    pub fn find_fractional_cutsets_into<C: CutsetCollector + ?Sized>(
        &mut self,
        x: &[f64],
        collector: &mut C,
    ) -> Result<FractionalReport, FstError> {
        let formulation = self.formulation.as_mut().ok_or_else(|| {
            FstError::Separation(
                ErrorInfo::new(
                    "formulation-missing",
                    "cutset separation formulation has not been built for this node",
                )
                .with_hint("call build_cutset_separation_formulation before fractional queries"),
            )
        })?;
        find_fractional_cutsets(x, &self.ctx, formulation, collector)
    }

    /// Releases the formulation. Safe to call when none is built.
    pub fn free_cutset_separation_formulation(&mut self) {
        self.formulation = None;
    }

    /// Runs zero-weight separation and, only when it finds nothing, fractional
    /// separation. The formulation is built on demand.
    pub fn separate_cutsets(&mut self, x: &[f64]) -> Result<CutsetList, FstError> {
        let mut list = CutsetList::new();
        self.find_zero_weight_cutsets_into(x, &mut list)?;
        if !list.is_empty() {
            return Ok(list);
        }
        if self.formulation.is_none() {
            self.build_cutset_separation_formulation()?;
        }
        self.find_fractional_cutsets_into(x, &mut list)?;
        Ok(list)
    }
}
