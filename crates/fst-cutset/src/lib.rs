#![deny(missing_docs)]

//! Cutset constraint separation for branch-and-cut over full-set hypergraphs.
//!
//! Two separators are provided per branch node. The zero-weight finder
//! splits the support hypergraph into connected components and offers cuts
//! between them. The fractional finder runs max-flow queries over a gadget
//! network whose minimum cuts bound each full set's crossing weight by its
//! LP value. Both hand candidates to a [`CutsetCollector`], by default a
//! deduplicating [`CutsetList`].

pub mod components;
pub mod cutlist;
pub mod formulation;
pub mod fractional;
pub mod maxflow;
pub mod network;
pub mod node;
pub mod zero_weight;

pub use components::{find_components, Components};
pub use cutlist::{CutsetCollector, CutsetConstraint, CutsetList, CutsetListStats};
pub use formulation::CutsetFormulation;
pub use fractional::{find_fractional_cutsets, FractionalReport};
pub use maxflow::{DinicSolver, FlowSolution, MaxFlowSolver};
pub use network::{build_gadget_network, FlowNetwork, GadgetNetwork};
pub use node::{BranchNode, NodeContext};
pub use zero_weight::{find_zero_weight_cutsets, CutStrategy, ZeroWeightReport};
