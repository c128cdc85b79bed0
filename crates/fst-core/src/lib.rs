#![deny(missing_docs)]

//! Core contracts for cutset separation over full-set hypergraphs.
//!
//! Terminals are indexed `0..num_verts()` and full sets `0..num_edges()`.
//! Every crate in the workspace speaks in these plain indices so bit sets,
//! LP solution vectors and flow network node numbers line up directly.

pub mod bitset;
pub mod errors;
pub mod params;
pub mod rng;

pub use bitset::BitSet;
pub use errors::{ErrorInfo, FstError};
pub use params::{SeparationParams, DEFAULT_MAX_CUTSET_ENUMERATE_COMPS, FUZZ};
pub use rng::{derive_substream_seed, RngHandle};

/// Read-only access to a hypergraph of terminals and full sets.
///
/// The structure must not change while a branch node holds a separation
/// formulation built over it.
pub trait FstHypergraph {
    /// Returns the number of terminals.
    fn num_verts(&self) -> usize;

    /// Returns the number of full sets.
    fn num_edges(&self) -> usize;

    /// Returns the member terminals of full set `edge` in ascending order.
    fn edge_members(&self, edge: usize) -> &[usize];

    /// Returns the full sets containing terminal `vert` in ascending order.
    fn incident_edges(&self, vert: usize) -> &[usize];

    /// Returns the number of terminals spanned by full set `edge`.
    fn edge_size(&self, edge: usize) -> usize {
        self.edge_members(edge).len()
    }
}
