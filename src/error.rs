use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("vertex {vertex} is out of range (network has {num_nodes} vertices)")]
    VertexOutOfRange { vertex: usize, num_nodes: usize },

    #[error("edge {edge_id} is out of range (network has {num_edges} edges)")]
    EdgeOutOfRange { edge_id: usize, num_edges: usize },

    #[error("edge {from} -> {to} has a negative capacity")]
    NegativeCapacity { from: usize, to: usize },

    #[error("pushing flow on edge {edge_id} would exceed its residual capacity")]
    CapacityExceeded { edge_id: usize },

    #[error("negative-cost cycle reachable from the source (detected at vertex {vertex})")]
    NegativeCycle { vertex: usize },
}

pub type Result<T> = std::result::Result<T, FlowError>;
