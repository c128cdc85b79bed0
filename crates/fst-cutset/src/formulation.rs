//! The per-node cutset separation formulation.

use fst_core::{BitSet, FstError, FstHypergraph};
use log::debug;

use crate::maxflow::{DinicSolver, FlowSolution, MaxFlowSolver};
use crate::network::{build_gadget_network, FlowNetwork, GadgetNetwork};

/// Gadget network plus the max-flow solver state reused across queries.
///
/// Topology is fixed once built; [`refresh_capacities`](Self::refresh_capacities)
/// is the only mutation between queries.
#[derive(Debug)]
pub struct CutsetFormulation {
    network: FlowNetwork,
    arc_to_fset: Vec<usize>,
    valid_full_sets: usize,
    edge_mask: BitSet,
    solver: Box<dyn MaxFlowSolver>,
    solution: FlowSolution,
    num_verts: usize,
    num_edges: usize,
}

impl CutsetFormulation {
    /// Builds the formulation with a [`DinicSolver`].
    pub fn build(hypergraph: &dyn FstHypergraph, edge_mask: &BitSet) -> Result<Self, FstError> {
        let gadget = build_gadget_network(hypergraph, edge_mask)?;
        let solver = DinicSolver::for_network(&gadget.network);
        Ok(Self::assemble(hypergraph, edge_mask, gadget, Box::new(solver)))
    }

    /// Builds the formulation around a caller-supplied solver.
    pub fn build_with_solver(
        hypergraph: &dyn FstHypergraph,
        edge_mask: &BitSet,
        solver: Box<dyn MaxFlowSolver>,
    ) -> Result<Self, FstError> {
        let gadget = build_gadget_network(hypergraph, edge_mask)?;
        Ok(Self::assemble(hypergraph, edge_mask, gadget, solver))
    }

    fn assemble(
        hypergraph: &dyn FstHypergraph,
        edge_mask: &BitSet,
        gadget: GadgetNetwork,
        solver: Box<dyn MaxFlowSolver>,
    ) -> Self {
        let GadgetNetwork {
            network,
            arc_to_fset,
            valid_full_sets,
        } = gadget;
        debug!(
            "cutset formulation: {} nodes, {} arcs, {} of {} full sets valid",
            network.num_nodes(),
            network.num_arcs(),
            valid_full_sets,
            hypergraph.num_edges()
        );
        let solution = FlowSolution::for_network(&network);
        Self {
            network,
            arc_to_fset,
            valid_full_sets,
            edge_mask: edge_mask.clone(),
            solver,
            solution,
            num_verts: hypergraph.num_verts(),
            num_edges: hypergraph.num_edges(),
        }
    }

    /// Returns the flow network.
    pub fn network(&self) -> &FlowNetwork {
        &self.network
    }

    /// Returns the full set owning each arc.
    pub fn arc_to_fset(&self) -> &[usize] {
        &self.arc_to_fset
    }

    /// Returns the number of full sets that were valid at build time.
    pub fn valid_full_sets(&self) -> usize {
        self.valid_full_sets
    }

    /// Returns the edge mask the network was built from.
    pub fn edge_mask(&self) -> &BitSet {
        &self.edge_mask
    }

    /// Returns the number of terminals the network was built for.
    pub fn num_verts(&self) -> usize {
        self.num_verts
    }

    /// Returns the number of full sets the network was built for.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Returns the result of the most recent max-flow query.
    pub fn last_solution(&self) -> &FlowSolution {
        &self.solution
    }

    /// Sets every arc's capacity to the weight of its owning full set.
    pub fn refresh_capacities(&mut self, x: &[f64]) -> Result<(), FstError> {
        if x.len() != self.num_edges {
            return Err(FstError::separation(
                "solution-length-mismatch",
                "LP solution must hold one weight per full set",
            )
            .with_context("len", x.len())
            .with_context("num_edges", self.num_edges));
        }
        let capacity = self.network.capacity_mut();
        for (cap, &fset) in capacity.iter_mut().zip(&self.arc_to_fset) {
            *cap = x[fset];
        }
        Ok(())
    }

    /// Runs one max-flow query from terminal `source` to terminal `sink`
    /// over the current capacities.
    pub fn max_flow(&mut self, source: usize, sink: usize) -> Result<&FlowSolution, FstError> {
        self.solver
            .solve(&self.network, source, sink, &mut self.solution)?;
        Ok(&self.solution)
    }
}
