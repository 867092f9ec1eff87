use std::collections::HashMap;

use crate::error::{GraphError, Result};
use crate::graph::Graph;

/// One entry in a node's neighbor list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'g> {
    pub target: &'g str,
    pub weight: f64,
}

/// Symmetric neighbor lists borrowed from a [`Graph`] snapshot.
///
/// Built fresh per operation and dropped with it. For every edge `(s, t, w)`,
/// in input order, `(t, w)` is appended to `s`'s list and then `(s, w)` to
/// `t`'s list.
#[derive(Debug)]
pub struct AdjacencyMap<'g> {
    lists: HashMap<&'g str, Vec<Neighbor<'g>>>,
}

impl<'g> AdjacencyMap<'g> {
    /// Build the adjacency map for `graph`.
    ///
    /// Every node in the node set gets an entry (possibly empty) before any
    /// edge is processed. Fails with [`GraphError::MalformedGraph`] when an
    /// edge names an id outside the node set, and with
    /// [`GraphError::InvalidWeight`] for a negative, NaN or infinite weight.
    pub fn build(graph: &'g Graph) -> Result<Self> {
        let mut lists: HashMap<&'g str, Vec<Neighbor<'g>>> =
            HashMap::with_capacity(graph.node_count());
        for id in graph.nodes() {
            lists.entry(id.as_str()).or_default();
        }

        for edge in graph.edges() {
            if !edge.weight.is_finite() || edge.weight < 0.0 {
                return Err(GraphError::InvalidWeight {
                    from: edge.source.clone(),
                    to: edge.target.clone(),
                    weight: edge.weight,
                });
            }
            for endpoint in [&edge.source, &edge.target] {
                if !lists.contains_key(endpoint.as_str()) {
                    return Err(GraphError::MalformedGraph {
                        from: edge.source.clone(),
                        to: edge.target.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }

            let (source, target) = (edge.source.as_str(), edge.target.as_str());
            if let Some(list) = lists.get_mut(source) {
                list.push(Neighbor { target, weight: edge.weight });
            }
            if let Some(list) = lists.get_mut(target) {
                list.push(Neighbor { target: source, weight: edge.weight });
            }
        }

        Ok(Self { lists })
    }

    /// Neighbors of `id` in stored order. Empty for unknown ids.
    pub fn neighbors(&self, id: &str) -> &[Neighbor<'g>] {
        self.lists.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Node ids with an entry, in no particular order.
    pub fn node_ids(&self) -> impl Iterator<Item = &'g str> + '_ {
        self.lists.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.lists.len()
    }
}
