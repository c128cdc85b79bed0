//! Maximum flow over a [`FlowNetwork`] and the minimum cut it certifies.

use std::collections::VecDeque;

use fst_core::{BitSet, FstError};

use crate::network::FlowNetwork;

/// Residual capacities at or below this value count as saturated.
const RESIDUAL_EPS: f64 = 1e-12;

const UNREACHED: usize = usize::MAX;

/// Output buffers of a max-flow computation, reused across queries.
#[derive(Debug, Clone, Default)]
pub struct FlowSolution {
    /// Value of the maximum flow.
    pub z: f64,
    /// Flow carried by each arc.
    pub flow: Vec<f64>,
    /// Network nodes on the source side of a minimum cut.
    pub cut: BitSet,
}

impl FlowSolution {
    /// Allocates buffers sized for `network`.
    pub fn for_network(network: &FlowNetwork) -> Self {
        Self {
            z: 0.0,
            flow: vec![0.0; network.num_arcs()],
            cut: BitSet::new(network.num_nodes()),
        }
    }

    fn reset(&mut self, network: &FlowNetwork) {
        self.z = 0.0;
        self.flow.clear();
        self.flow.resize(network.num_arcs(), 0.0);
        if self.cut.capacity() == network.num_nodes() {
            self.cut.clear_all();
        } else {
            self.cut = BitSet::new(network.num_nodes());
        }
    }
}

/// Computes a maximum flow and the source side of a minimum cut.
pub trait MaxFlowSolver: std::fmt::Debug {
    /// Solves the `source` to `sink` problem over the current capacities of
    /// `network`, overwriting `solution`.
    fn solve(
        &mut self,
        network: &FlowNetwork,
        source: usize,
        sink: usize,
        solution: &mut FlowSolution,
    ) -> Result<(), FstError>;
}

/// Dinic's algorithm over arc-index adjacency lists.
///
/// Residual capacities are derived from the capacity and flow arrays: an
/// outgoing arc has `capacity - flow` left, an incoming arc can return its
/// `flow`. Blocking flows are found with an explicit path stack, so no
/// recursion depth depends on the network size.
#[derive(Debug, Clone, Default)]
pub struct DinicSolver {
    level: Vec<usize>,
    cursor: Vec<usize>,
    queue: VecDeque<usize>,
    path: Vec<Step>,
}

#[derive(Debug, Clone, Copy)]
struct Step {
    arc: usize,
    forward: bool,
}

impl DinicSolver {
    /// Creates a solver with scratch space for `network`.
    pub fn for_network(network: &FlowNetwork) -> Self {
        let mut solver = Self::default();
        solver.ensure_capacity(network.num_nodes());
        solver
    }

    fn ensure_capacity(&mut self, num_nodes: usize) {
        self.level.resize(num_nodes, UNREACHED);
        self.cursor.resize(num_nodes, 0);
    }

    /// Labels nodes by BFS distance from `source` in the residual network.
    /// Returns whether `sink` was reached.
    fn build_levels(
        &mut self,
        network: &FlowNetwork,
        flow: &[f64],
        source: usize,
        sink: usize,
    ) -> bool {
        self.level.fill(UNREACHED);
        self.queue.clear();
        self.level[source] = 0;
        self.queue.push_back(source);
        while let Some(v) = self.queue.pop_front() {
            for k in 0..network.degree(v) {
                let (step, head) = neighbour(network, v, k);
                if self.level[head] == UNREACHED && residual(network, flow, step) > RESIDUAL_EPS {
                    self.level[head] = self.level[v] + 1;
                    self.queue.push_back(head);
                }
            }
        }
        self.level[sink] != UNREACHED
    }

    /// Finds the next admissible residual step out of `v`, advancing its cursor
    /// past steps that are saturated or leave the level graph.
    fn advance(&mut self, network: &FlowNetwork, flow: &[f64], v: usize) -> Option<(Step, usize)> {
        let degree = network.degree(v);
        while self.cursor[v] < degree {
            let (step, head) = neighbour(network, v, self.cursor[v]);
            if self.level[head] != UNREACHED
                && self.level[head] == self.level[v] + 1
                && residual(network, flow, step) > RESIDUAL_EPS
            {
                return Some((step, head));
            }
            self.cursor[v] += 1;
        }
        None
    }

    fn blocking_flow(
        &mut self,
        network: &FlowNetwork,
        flow: &mut [f64],
        source: usize,
        sink: usize,
    ) -> f64 {
        let mut pushed = 0.0;
        let mut v = source;
        self.path.clear();
        loop {
            if v == sink {
                let bottleneck = self
                    .path
                    .iter()
                    .map(|step| residual(network, flow, *step))
                    .fold(f64::INFINITY, f64::min);
                for step in &self.path {
                    if step.forward {
                        flow[step.arc] += bottleneck;
                    } else {
                        flow[step.arc] -= bottleneck;
                    }
                }
                pushed += bottleneck;
                self.path.clear();
                v = source;
                continue;
            }
            match self.advance(network, flow, v) {
                Some((step, head)) => {
                    self.path.push(step);
                    v = head;
                }
                None => {
                    // Dead end: nothing reaches the sink through v this phase.
                    self.level[v] = UNREACHED;
                    match self.path.pop() {
                        Some(step) => v = tail(network, step),
                        None => break,
                    }
                }
            }
        }
        pushed
    }
}

impl MaxFlowSolver for DinicSolver {
    fn solve(
        &mut self,
        network: &FlowNetwork,
        source: usize,
        sink: usize,
        solution: &mut FlowSolution,
    ) -> Result<(), FstError> {
        let num_nodes = network.num_nodes();
        if source >= num_nodes || sink >= num_nodes || source == sink {
            return Err(FstError::flow(
                "invalid-endpoints",
                "source and sink must be distinct network nodes",
            )
            .with_context("source", source)
            .with_context("sink", sink)
            .with_context("num_nodes", num_nodes));
        }
        self.ensure_capacity(num_nodes);
        solution.reset(network);

        while self.build_levels(network, &solution.flow, source, sink) {
            self.cursor.fill(0);
            solution.z += self.blocking_flow(network, &mut solution.flow, source, sink);
        }

        // The last labelling is exactly the residual reachability from source.
        for (node, level) in self.level.iter().enumerate().take(num_nodes) {
            if *level != UNREACHED {
                solution.cut.set(node);
            }
        }
        Ok(())
    }
}

#[inline]
fn neighbour(network: &FlowNetwork, v: usize, k: usize) -> (Step, usize) {
    let outgoing = network.outgoing(v);
    if k < outgoing.len() {
        let arc = outgoing[k];
        (Step { arc, forward: true }, network.arc_dst(arc))
    } else {
        let arc = network.incoming(v)[k - outgoing.len()];
        (
            Step {
                arc,
                forward: false,
            },
            network.arc_src(arc),
        )
    }
}

#[inline]
fn residual(network: &FlowNetwork, flow: &[f64], step: Step) -> f64 {
    if step.forward {
        network.capacity()[step.arc] - flow[step.arc]
    } else {
        flow[step.arc]
    }
}

#[inline]
fn tail(network: &FlowNetwork, step: Step) -> usize {
    if step.forward {
        network.arc_src(step.arc)
    } else {
        network.arc_dst(step.arc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(num_nodes: usize, arcs: &[(usize, usize, f64)]) -> FlowNetwork {
        let src = arcs.iter().map(|a| a.0).collect();
        let dst = arcs.iter().map(|a| a.1).collect();
        let mut network = FlowNetwork::from_arcs(num_nodes, src, dst).unwrap();
        for (idx, arc) in arcs.iter().enumerate() {
            network.capacity_mut()[idx] = arc.2;
        }
        network
    }

    #[test]
    fn classic_instance_value_and_cut() {
        // 0 -> {1, 2} -> 3 with a cross arc 1 -> 2.
        let net = network(
            4,
            &[
                (0, 1, 3.0),
                (0, 2, 2.0),
                (1, 2, 1.0),
                (1, 3, 2.0),
                (2, 3, 3.0),
            ],
        );
        let mut solver = DinicSolver::for_network(&net);
        let mut solution = FlowSolution::for_network(&net);
        solver.solve(&net, 0, 3, &mut solution).unwrap();
        assert!((solution.z - 5.0).abs() < 1e-12);
        assert_eq!(solution.cut.iter().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn flow_is_conserved_and_bounded() {
        let net = network(
            5,
            &[
                (0, 1, 0.5),
                (0, 2, 0.7),
                (1, 3, 0.4),
                (2, 1, 0.3),
                (2, 3, 0.2),
                (3, 4, 1.0),
                (1, 4, 0.25),
            ],
        );
        let mut solver = DinicSolver::default();
        let mut solution = FlowSolution::default();
        solver.solve(&net, 0, 4, &mut solution).unwrap();
        for arc in 0..net.num_arcs() {
            assert!(solution.flow[arc] >= -1e-12);
            assert!(solution.flow[arc] <= net.capacity()[arc] + 1e-12);
        }
        for node in 1..4 {
            let inflow: f64 = net.incoming(node).iter().map(|&a| solution.flow[a]).sum();
            let outflow: f64 = net.outgoing(node).iter().map(|&a| solution.flow[a]).sum();
            assert!((inflow - outflow).abs() < 1e-12);
        }
        let cut_capacity: f64 = (0..net.num_arcs())
            .filter(|&a| solution.cut.test(net.arc_src(a)) && !solution.cut.test(net.arc_dst(a)))
            .map(|a| net.capacity()[a])
            .sum();
        assert!((cut_capacity - solution.z).abs() < 1e-12);
        assert!((solution.z - 0.85).abs() < 1e-12);
    }

    #[test]
    fn disconnected_sink_gives_zero_flow() {
        let net = network(3, &[(0, 1, 1.0)]);
        let mut solver = DinicSolver::default();
        let mut solution = FlowSolution::default();
        solver.solve(&net, 0, 2, &mut solution).unwrap();
        assert_eq!(solution.z, 0.0);
        assert_eq!(solution.cut.iter().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn rejects_equal_endpoints() {
        let net = network(2, &[(0, 1, 1.0)]);
        let mut solution = FlowSolution::default();
        let err = DinicSolver::default()
            .solve(&net, 1, 1, &mut solution)
            .unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.info().code, "invalid-endpoints");
    }
}
