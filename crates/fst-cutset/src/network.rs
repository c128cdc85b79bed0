//! Directed flow networks with arc-index adjacency, and the full-set gadget
//! network whose minimum cuts are candidate cutsets.

use fst_core::{BitSet, FstError, FstHypergraph};

/// Directed network stored as parallel arc arrays.
///
/// Each node owns a contiguous run of outgoing arc indices and one of
/// incoming arc indices. Topology is fixed at construction; only the
/// capacities change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowNetwork {
    num_nodes: usize,
    arc_src: Vec<usize>,
    arc_dst: Vec<usize>,
    capacity: Vec<f64>,
    out_start: Vec<usize>,
    out_arcs: Vec<usize>,
    in_start: Vec<usize>,
    in_arcs: Vec<usize>,
}

impl FlowNetwork {
    /// Builds the adjacency lists for the given arcs. Capacities start at zero.
    pub fn from_arcs(
        num_nodes: usize,
        arc_src: Vec<usize>,
        arc_dst: Vec<usize>,
    ) -> Result<Self, FstError> {
        if arc_src.len() != arc_dst.len() {
            return Err(FstError::flow(
                "arc-count-mismatch",
                "arc endpoint arrays differ in length",
            )
            .with_context("sources", arc_src.len())
            .with_context("destinations", arc_dst.len()));
        }
        let stray = (0..arc_src.len())
            .find(|&arc| arc_src[arc] >= num_nodes || arc_dst[arc] >= num_nodes);
        if let Some(arc) = stray {
            return Err(FstError::flow("unknown-node", "arc endpoint outside the network")
                .with_context("arc", arc)
                .with_context("num_nodes", num_nodes));
        }
        let (out_start, out_arcs) = bucket_arcs(num_nodes, &arc_src);
        let (in_start, in_arcs) = bucket_arcs(num_nodes, &arc_dst);
        let num_arcs = arc_src.len();
        Ok(Self {
            num_nodes,
            arc_src,
            arc_dst,
            capacity: vec![0.0; num_arcs],
            out_start,
            out_arcs,
            in_start,
            in_arcs,
        })
    }

    /// Returns the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns the number of arcs.
    pub fn num_arcs(&self) -> usize {
        self.arc_src.len()
    }

    /// Returns the tail node of `arc`.
    #[inline]
    pub fn arc_src(&self, arc: usize) -> usize {
        self.arc_src[arc]
    }

    /// Returns the head node of `arc`.
    #[inline]
    pub fn arc_dst(&self, arc: usize) -> usize {
        self.arc_dst[arc]
    }

    /// Returns the arc capacities.
    #[inline]
    pub fn capacity(&self) -> &[f64] {
        &self.capacity
    }

    /// Returns the arc capacities for refreshing.
    pub fn capacity_mut(&mut self) -> &mut [f64] {
        &mut self.capacity
    }

    /// Returns the arcs leaving `node` in ascending arc order.
    #[inline]
    pub fn outgoing(&self, node: usize) -> &[usize] {
        &self.out_arcs[self.out_start[node]..self.out_start[node + 1]]
    }

    /// Returns the arcs entering `node` in ascending arc order.
    #[inline]
    pub fn incoming(&self, node: usize) -> &[usize] {
        &self.in_arcs[self.in_start[node]..self.in_start[node + 1]]
    }

    /// Returns the number of arcs touching `node` in either direction.
    #[inline]
    pub fn degree(&self, node: usize) -> usize {
        self.out_start[node + 1] - self.out_start[node] + self.in_start[node + 1]
            - self.in_start[node]
    }
}

/// Groups arc indices by `endpoint[arc]`: one counting pass, then a bucket fill.
fn bucket_arcs(num_nodes: usize, endpoint: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let mut start = vec![0usize; num_nodes + 1];
    for &node in endpoint {
        start[node + 1] += 1;
    }
    for node in 0..num_nodes {
        start[node + 1] += start[node];
    }
    let mut next = start.clone();
    let mut arcs = vec![0usize; endpoint.len()];
    for (arc, &node) in endpoint.iter().enumerate() {
        arcs[next[node]] = arc;
        next[node] += 1;
    }
    (start, arcs)
}

/// The gadget network of a hypergraph together with the owner of each arc.
#[derive(Debug, Clone)]
pub struct GadgetNetwork {
    /// Terminals are nodes `0..nverts`, `P_i` is `nverts + i` and `Q_i` is
    /// `nverts + nedges + i`.
    pub network: FlowNetwork,
    /// Full set whose LP weight becomes each arc's capacity.
    pub arc_to_fset: Vec<usize>,
    /// Number of full sets that received terminal arcs.
    pub valid_full_sets: usize,
}

/// Builds the full-set gadget network.
///
/// Every full set `i` gets nodes `P_i`, `Q_i` and the arc `P_i -> Q_i`
/// (arcs `0..nedges`), whether or not it is valid, so node numbers never
/// depend on the mask. Full sets valid in `edge_mask` also get `T_j -> P_i`
/// and `Q_i -> T_j` for each member terminal `T_j`. Any flow through full set
/// `i` therefore crosses `P_i -> Q_i`, whose capacity is the weight of `i`.
pub fn build_gadget_network(
    hypergraph: &dyn FstHypergraph,
    edge_mask: &BitSet,
) -> Result<GadgetNetwork, FstError> {
    let nverts = hypergraph.num_verts();
    let nedges = hypergraph.num_edges();

    let mut sum_sizes = 0;
    let mut valid_full_sets = 0;
    for edge in (0..nedges).filter(|&e| edge_mask.test(e)) {
        sum_sizes += hypergraph.edge_size(edge);
        valid_full_sets += 1;
    }

    let num_nodes = nverts + 2 * nedges;
    let num_arcs = nedges + 2 * sum_sizes;
    let p0 = nverts;
    let q0 = p0 + nedges;

    let mut arc_src = Vec::with_capacity(num_arcs);
    let mut arc_dst = Vec::with_capacity(num_arcs);
    let mut arc_to_fset = Vec::with_capacity(num_arcs);

    for edge in 0..nedges {
        arc_src.push(p0 + edge);
        arc_dst.push(q0 + edge);
        arc_to_fset.push(edge);
    }
    for edge in (0..nedges).filter(|&e| edge_mask.test(e)) {
        for &term in hypergraph.edge_members(edge) {
            arc_src.push(term);
            arc_dst.push(p0 + edge);
            arc_to_fset.push(edge);

            arc_src.push(q0 + edge);
            arc_dst.push(term);
            arc_to_fset.push(edge);
        }
    }

    if arc_src.len() != num_arcs {
        return Err(FstError::flow(
            "arc-count-mismatch",
            "gadget network arc count is inconsistent",
        )
        .with_context("expected", num_arcs)
        .with_context("built", arc_src.len()));
    }

    let network = FlowNetwork::from_arcs(num_nodes, arc_src, arc_dst)?;
    Ok(GadgetNetwork {
        network,
        arc_to_fset,
        valid_full_sets,
    })
}
