use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::graph::NodeId;

/// One traversed edge, oriented along the path (predecessor to successor).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathEdge {
    pub from: NodeId,
    pub to: NodeId,
}

impl PathEdge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Walk `predecessor` back from `dest` into an ordered node path and the
/// edges between consecutive nodes.
///
/// The walk stops at the first node without a predecessor entry, which for a
/// map produced by a search rooted at `src` is `src` itself. It takes at most
/// `predecessor.len()` steps, so a map containing a cycle still terminates.
pub fn reconstruct(
    predecessor: &HashMap<&str, &str>,
    src: &str,
    dest: &str,
) -> (Vec<NodeId>, Vec<PathEdge>) {
    let mut path = vec![dest.to_string()];
    let mut edges = Vec::new();
    let mut current = dest;

    while let Some(&prev) = predecessor.get(current) {
        if edges.len() >= predecessor.len() {
            tracing::warn!(dest, "predecessor map contains a cycle; path truncated");
            break;
        }
        edges.push(PathEdge::new(prev, current));
        path.push(prev.to_string());
        current = prev;
    }

    if current != src {
        tracing::warn!(src, reached = current, "path walk ended away from source");
    }

    path.reverse();
    edges.reverse();
    (path, edges)
}
