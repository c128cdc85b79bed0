//! Connected components of the support hypergraph.

use fst_core::{BitSet, FstHypergraph};

/// Partition of terminals into connected components.
///
/// Components are stored as contiguous runs of one vertex list, in the order
/// they were discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Components {
    verts: Vec<usize>,
    starts: Vec<usize>,
}

impl Components {
    /// Returns the number of components.
    pub fn len(&self) -> usize {
        self.starts.len() - 1
    }

    /// Returns whether no component was found.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the vertices of component `index` in discovery order.
    pub fn component(&self, index: usize) -> &[usize] {
        &self.verts[self.starts[index]..self.starts[index + 1]]
    }

    /// Iterates over the components.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        (0..self.len()).map(move |index| self.component(index))
    }

    /// Returns every covered vertex, component by component.
    pub fn vertices(&self) -> &[usize] {
        &self.verts
    }
}

/// Partitions the terminals touched by the full sets in `support`.
///
/// Each component is grown from the lowest-indexed full set still present,
/// walking terminal to incident present full set to member terminal with an
/// explicit stack. Consumed full sets are cleared from `support`, which is
/// empty on return. Terminals touched by no present full set belong to no
/// component.
pub fn find_components(hypergraph: &dyn FstHypergraph, mut support: BitSet) -> Components {
    let nverts = hypergraph.num_verts();
    let mut visited = BitSet::new(nverts);
    let mut stack: Vec<usize> = Vec::with_capacity(nverts);
    let mut verts = Vec::with_capacity(nverts);
    let mut starts = vec![0];

    let mut next_edge = 0;
    while let Some(seed) = support.next_set(next_edge) {
        next_edge = seed + 1;
        support.clear(seed);
        push_members(hypergraph, seed, &mut visited, &mut verts, &mut stack);

        while let Some(v) = stack.pop() {
            for &edge in hypergraph.incident_edges(v) {
                if !support.test(edge) {
                    continue;
                }
                support.clear(edge);
                push_members(hypergraph, edge, &mut visited, &mut verts, &mut stack);
            }
        }
        starts.push(verts.len());
    }

    Components { verts, starts }
}

fn push_members(
    hypergraph: &dyn FstHypergraph,
    edge: usize,
    visited: &mut BitSet,
    verts: &mut Vec<usize>,
    stack: &mut Vec<usize>,
) {
    for &v in hypergraph.edge_members(edge) {
        if visited.test(v) {
            continue;
        }
        visited.set(v);
        verts.push(v);
        stack.push(v);
    }
}
