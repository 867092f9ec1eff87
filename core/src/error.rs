use thiserror::Error;

use crate::graph::NodeId;

/// Failures an engine operation can report.
///
/// Every operation is fail-fast: when one of these is returned, no partial
/// order or path was produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A start, source or destination id is not in the graph's node set.
    #[error("node not found: {id}")]
    NodeNotFound { id: NodeId },

    /// An edge references an id outside the node set.
    #[error("malformed graph: edge {from} -> {to} references unknown node {missing}")]
    MalformedGraph {
        from: NodeId,
        to: NodeId,
        missing: NodeId,
    },

    /// An edge weight is negative, NaN or infinite.
    #[error("invalid weight {weight} on edge {from} -> {to} (weights must be finite and non-negative)")]
    InvalidWeight { from: NodeId, to: NodeId, weight: f64 },

    /// The caller's cancel token tripped or its deadline passed.
    #[error("operation cancelled")]
    Cancelled,
}

impl GraphError {
    pub fn node_not_found(id: &str) -> Self {
        GraphError::NodeNotFound { id: id.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
