use std::collections::{HashSet, VecDeque};
use std::time::Instant;

use crate::adjacency::AdjacencyMap;
use crate::cancel::{self, CancelToken};
use crate::error::{GraphError, Result};
use crate::graph::{Graph, NodeId};

/// Check that `start` exists, then build a fresh adjacency map.
///
/// Endpoint existence is checked before the map is built so a missing start
/// reports `NodeNotFound` even on a graph that would also fail validation.
fn prepare<'g>(graph: &'g Graph, start: &str) -> Result<AdjacencyMap<'g>> {
    if !graph.contains_node(start) {
        return Err(GraphError::node_not_found(start));
    }
    AdjacencyMap::build(graph)
}

/// Breadth-first visitation order from `start`.
///
/// FIFO frontier, neighbors taken in stored (edge input) order. Nodes are
/// marked when first enqueued, which yields the same order as marking on
/// dequeue while keeping the queue bounded by the node count. Only nodes in
/// `start`'s connected component appear, each once.
#[tracing::instrument(level = "debug", skip(graph, cancel))]
pub fn breadth_first(
    graph: &Graph,
    start: &str,
    cancel: Option<&CancelToken>,
) -> Result<Vec<NodeId>> {
    let t = Instant::now();
    let adj = prepare(graph, start)?;

    let mut visited: HashSet<&str> = HashSet::with_capacity(adj.node_count());
    let mut order: Vec<NodeId> = Vec::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        cancel::check(cancel)?;
        order.push(current.to_string());

        for neighbor in adj.neighbors(current) {
            if visited.insert(neighbor.target) {
                queue.push_back(neighbor.target);
            }
        }
    }

    tracing::debug!(visited = order.len(), elapsed = ?t.elapsed(), "breadth_first");
    Ok(order)
}

/// Depth-first preorder from `start`.
///
/// Same order as the recursive form (visit, then recurse into each unvisited
/// neighbor in stored order) but driven by an explicit stack of
/// `(node, next neighbor index)` frames, so deep graphs cannot exhaust the
/// call stack.
#[tracing::instrument(level = "debug", skip(graph, cancel))]
pub fn depth_first(
    graph: &Graph,
    start: &str,
    cancel: Option<&CancelToken>,
) -> Result<Vec<NodeId>> {
    let t = Instant::now();
    let adj = prepare(graph, start)?;

    let mut visited: HashSet<&str> = HashSet::with_capacity(adj.node_count());
    let mut order: Vec<NodeId> = vec![start.to_string()];
    let mut stack: Vec<(&str, usize)> = vec![(start, 0)];
    visited.insert(start);

    while let Some(frame) = stack.last_mut() {
        cancel::check(cancel)?;
        let (node, next) = *frame;
        let neighbors = adj.neighbors(node);

        match neighbors[next..]
            .iter()
            .position(|n| !visited.contains(n.target))
        {
            Some(offset) => {
                let child = neighbors[next + offset].target;
                frame.1 = next + offset + 1;
                visited.insert(child);
                order.push(child.to_string());
                stack.push((child, 0));
            }
            None => {
                stack.pop();
            }
        }
    }

    tracing::debug!(visited = order.len(), elapsed = ?t.elapsed(), "depth_first");
    Ok(order)
}
