//! Collection of cutset constraints found during separation.

use std::collections::BTreeSet;

use fst_core::errors::{ErrorInfo, FstError};
use fst_core::BitSet;
use serde::{Deserialize, Serialize};

use crate::node::NodeContext;

/// Receives candidate cuts from the separation routines.
///
/// A candidate is the terminal side of a bipartition. The collector decides
/// whether it yields a new violated constraint.
pub trait CutsetCollector {
    /// Offers the cut whose inside is `cut_terms` under LP solution `x`.
    fn add_cutset(
        &mut self,
        cut_terms: &BitSet,
        x: &[f64],
        ctx: &NodeContext<'_>,
    ) -> Result<(), FstError>;
}

/// Records every candidate as offered, without filtering.
impl CutsetCollector for Vec<BitSet> {
    fn add_cutset(
        &mut self,
        cut_terms: &BitSet,
        _x: &[f64],
        _ctx: &NodeContext<'_>,
    ) -> Result<(), FstError> {
        self.push(cut_terms.clone());
        Ok(())
    }
}

/// Constraint `sum(x[e] for e in edges) >= 1` over the full sets spanning a cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutsetConstraint {
    /// Terminals inside the cut.
    pub cut_terms: BitSet,
    /// Valid full sets with members on both sides of the cut, ascending.
    pub edges: Vec<usize>,
    /// Total LP weight of `edges` when the constraint was found.
    pub weight: f64,
}

impl CutsetConstraint {
    /// Returns how far the constraint is violated by its recorded weight.
    pub fn violation(&self) -> f64 {
        1.0 - self.weight
    }
}

/// Counters describing what happened to offered candidates.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutsetListStats {
    /// Candidates offered.
    pub submitted: usize,
    /// Candidates with an empty side among valid terminals.
    pub trivial: usize,
    /// Candidates whose spanning weight already reaches one.
    pub not_violated: usize,
    /// Candidates whose spanning full sets match a kept constraint.
    pub duplicates: usize,
}

/// Deduplicating list of violated cutset constraints for one LP solution.
#[derive(Debug, Default, Clone)]
pub struct CutsetList {
    constraints: Vec<CutsetConstraint>,
    seen: BTreeSet<Vec<usize>>,
    stats: CutsetListStats,
}

impl CutsetList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the kept constraints in discovery order.
    pub fn constraints(&self) -> &[CutsetConstraint] {
        &self.constraints
    }

    /// Consumes the list, returning its constraints.
    pub fn into_constraints(self) -> Vec<CutsetConstraint> {
        self.constraints
    }

    /// Returns the number of kept constraints.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns whether no constraint was kept.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Returns the candidate counters.
    pub fn stats(&self) -> &CutsetListStats {
        &self.stats
    }

    /// Serializes the kept constraints to JSON.
    pub fn to_json(&self) -> Result<String, FstError> {
        serde_json::to_string_pretty(&self.constraints)
            .map_err(|err| FstError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
    }
}

impl CutsetCollector for CutsetList {
    fn add_cutset(
        &mut self,
        cut_terms: &BitSet,
        x: &[f64],
        ctx: &NodeContext<'_>,
    ) -> Result<(), FstError> {
        ctx.check_solution(x)?;
        self.stats.submitted += 1;
        let hypergraph = ctx.hypergraph();
        let vert_mask = ctx.vert_mask();

        let valid_total = vert_mask.count();
        let valid_inside = cut_terms.iter().filter(|&v| vert_mask.test(v)).count();
        if valid_inside == 0 || valid_inside == valid_total {
            self.stats.trivial += 1;
            return Ok(());
        }

        let mut edges = Vec::new();
        let mut weight = 0.0;
        for edge in ctx.edge_mask().iter() {
            let members = hypergraph.edge_members(edge);
            let inside = members.iter().any(|&v| cut_terms.test(v));
            let outside = members.iter().any(|&v| !cut_terms.test(v));
            if inside && outside {
                edges.push(edge);
                weight += x[edge];
            }
        }

        if weight >= 1.0 - ctx.params().fuzz {
            self.stats.not_violated += 1;
            return Ok(());
        }
        if !self.seen.insert(edges.clone()) {
            self.stats.duplicates += 1;
            return Ok(());
        }
        self.constraints.push(CutsetConstraint {
            cut_terms: cut_terms.clone(),
            edges,
            weight,
        });
        Ok(())
    }
}
