use fst_core::errors::{ErrorInfo, FstError};
use fst_core::FstHypergraph;
use serde::{Deserialize, Serialize};

use crate::hypergraph::HypergraphImpl;

/// Serializes the instance to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &HypergraphImpl) -> Result<Vec<u8>, FstError> {
    let serializable = SerializableInstance::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| FstError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores an instance from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<HypergraphImpl, FstError> {
    let serializable: SerializableInstance = bincode::deserialize(bytes)
        .map_err(|err| FstError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_graph()
}

/// Serializes the instance to a JSON string.
pub fn graph_to_json(graph: &HypergraphImpl) -> Result<String, FstError> {
    let serializable = SerializableInstance::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| FstError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores an instance from a JSON string.
pub fn graph_from_json(json: &str) -> Result<HypergraphImpl, FstError> {
    let serializable: SerializableInstance = serde_json::from_str(json)
        .map_err(|err| FstError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableInstance {
    num_verts: usize,
    full_sets: Vec<Vec<usize>>,
    #[serde(default)]
    costs: Option<Vec<f64>>,
}

impl SerializableInstance {
    fn from_graph(graph: &HypergraphImpl) -> Self {
        Self {
            num_verts: graph.num_verts(),
            full_sets: graph.full_sets(),
            costs: graph.costs().map(<[f64]>::to_vec),
        }
    }

    fn into_graph(self) -> Result<HypergraphImpl, FstError> {
        let graph = HypergraphImpl::new(self.num_verts, &self.full_sets)?;
        match self.costs {
            Some(costs) => graph.with_costs(costs),
            None => Ok(graph),
        }
    }
}
