use std::collections::BTreeSet;

use fst_core::errors::FstError;
use fst_core::FstHypergraph;

/// Immutable hypergraph of terminals and full sets in compressed form.
///
/// Member lists of all full sets are stored back to back, as are the
/// incidence lists of all terminals, each indexed by an offset array with one
/// trailing sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct HypergraphImpl {
    num_verts: usize,
    edge_start: Vec<usize>,
    edge_verts: Vec<usize>,
    term_start: Vec<usize>,
    term_edges: Vec<usize>,
    costs: Option<Vec<f64>>,
}

impl HypergraphImpl {
    /// Builds a hypergraph over `num_verts` terminals from full-set member lists.
    ///
    /// Members are sorted and deduplicated. Every full set must span at least
    /// two distinct terminals.
    pub fn new(num_verts: usize, full_sets: &[Vec<usize>]) -> Result<Self, FstError> {
        let mut edge_start = Vec::with_capacity(full_sets.len() + 1);
        let mut edge_verts = Vec::new();
        edge_start.push(0);
        for (edge, members) in full_sets.iter().enumerate() {
            let members = canonicalize_members(members);
            if let Some(&bad) = members.iter().find(|&&v| v >= num_verts) {
                return Err(FstError::graph("unknown-terminal", "full set names a missing terminal")
                    .with_context("edge", edge)
                    .with_context("terminal", bad)
                    .with_context("num_verts", num_verts));
            }
            if members.len() < 2 {
                return Err(FstError::graph(
                    "degenerate-full-set",
                    "full sets must span at least two terminals",
                )
                .with_context("edge", edge)
                .with_context("size", members.len()));
            }
            edge_verts.extend(members);
            edge_start.push(edge_verts.len());
        }

        // Incidence lists: count per terminal, then fill buckets in edge order.
        let mut term_start = vec![0usize; num_verts + 1];
        for &v in &edge_verts {
            term_start[v + 1] += 1;
        }
        for v in 0..num_verts {
            term_start[v + 1] += term_start[v];
        }
        let mut cursor = term_start.clone();
        let mut term_edges = vec![0usize; edge_verts.len()];
        for edge in 0..full_sets.len() {
            for &v in &edge_verts[edge_start[edge]..edge_start[edge + 1]] {
                term_edges[cursor[v]] = edge;
                cursor[v] += 1;
            }
        }

        Ok(Self {
            num_verts,
            edge_start,
            edge_verts,
            term_start,
            term_edges,
            costs: None,
        })
    }

    /// Attaches one cost per full set.
    pub fn with_costs(mut self, costs: Vec<f64>) -> Result<Self, FstError> {
        if costs.len() != self.num_edges() {
            return Err(FstError::graph("cost-length-mismatch", "one cost per full set required")
                .with_context("costs", costs.len())
                .with_context("edges", self.num_edges()));
        }
        self.costs = Some(costs);
        Ok(self)
    }

    /// Returns the cost of full set `edge` when costs are attached.
    pub fn cost(&self, edge: usize) -> Option<f64> {
        self.costs.as_ref().and_then(|costs| costs.get(edge).copied())
    }

    /// Returns the attached cost vector.
    pub fn costs(&self) -> Option<&[f64]> {
        self.costs.as_deref()
    }

    /// Returns the sum of all full-set sizes.
    pub fn total_size(&self) -> usize {
        self.edge_verts.len()
    }

    /// Returns the member lists of all full sets.
    pub fn full_sets(&self) -> Vec<Vec<usize>> {
        (0..self.num_edges())
            .map(|edge| self.edge_members(edge).to_vec())
            .collect()
    }
}

impl FstHypergraph for HypergraphImpl {
    fn num_verts(&self) -> usize {
        self.num_verts
    }

    fn num_edges(&self) -> usize {
        self.edge_start.len() - 1
    }

    fn edge_members(&self, edge: usize) -> &[usize] {
        &self.edge_verts[self.edge_start[edge]..self.edge_start[edge + 1]]
    }

    fn incident_edges(&self, vert: usize) -> &[usize] {
        &self.term_edges[self.term_start[vert]..self.term_start[vert + 1]]
    }

    fn edge_size(&self, edge: usize) -> usize {
        self.edge_start[edge + 1] - self.edge_start[edge]
    }
}

fn canonicalize_members(members: &[usize]) -> Vec<usize> {
    members
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
