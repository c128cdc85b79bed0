#![deny(missing_docs)]

//! Compressed full-set hypergraph implementing the `fst-core` contracts.

mod generators;
mod hypergraph;
mod serialization;

pub use generators::{gen_lp_weights, gen_random_instance};
pub use hypergraph::HypergraphImpl;

/// Re-export serialization helpers for downstream crates.
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json};
