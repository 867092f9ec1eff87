use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::adjacency::AdjacencyMap;
use crate::cancel::{self, CancelToken};
use crate::error::{GraphError, Result};
use crate::graph::{Graph, NodeId};
use crate::path::{self, PathEdge};

/// Bottleneck capacity of a path.
///
/// `Unbounded` is what a node reports for the path to itself: no edge has
/// been crossed, so nothing limits it. It orders above every finite value and
/// serializes as the string `"unbounded"` so it survives a JSON round trip
/// (a bare float infinity would not).
#[derive(Debug, Clone, Copy)]
pub enum Capacity {
    Finite(f64),
    Unbounded,
}

impl Capacity {
    pub const ZERO: Capacity = Capacity::Finite(0.0);

    pub const UNBOUNDED_MARKER: &'static str = "unbounded";

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Capacity::Unbounded)
    }

    /// Bottleneck after crossing an edge of `weight`.
    pub fn through(self, weight: f64) -> Capacity {
        match self {
            Capacity::Unbounded => Capacity::Finite(weight),
            Capacity::Finite(v) => Capacity::Finite(v.min(weight)),
        }
    }
}

impl Ord for Capacity {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Capacity::Unbounded, Capacity::Unbounded) => Ordering::Equal,
            (Capacity::Unbounded, Capacity::Finite(_)) => Ordering::Greater,
            (Capacity::Finite(_), Capacity::Unbounded) => Ordering::Less,
            // Weights are validated finite before any search runs.
            (Capacity::Finite(a), Capacity::Finite(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
        }
    }
}

impl PartialOrd for Capacity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Capacity {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Capacity {}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Finite(v) => write!(f, "{}", v),
            Capacity::Unbounded => f.write_str(Self::UNBOUNDED_MARKER),
        }
    }
}

impl Serialize for Capacity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Capacity::Finite(v) => serializer.serialize_f64(*v),
            Capacity::Unbounded => serializer.serialize_str(Self::UNBOUNDED_MARKER),
        }
    }
}

impl<'de> Deserialize<'de> for Capacity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Marker(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(Capacity::Finite(v)),
            Repr::Marker(s) if s == Capacity::UNBOUNDED_MARKER => Ok(Capacity::Unbounded),
            Repr::Marker(s) => Err(serde::de::Error::custom(format!(
                "invalid capacity {:?}: expected a number or \"{}\"",
                s,
                Capacity::UNBOUNDED_MARKER
            ))),
        }
    }
}

/// Result of a widest-path query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidestPath {
    /// Nodes from source to destination inclusive; empty when unreachable.
    pub path: Vec<NodeId>,
    /// Edges between consecutive path nodes, oriented along the path.
    pub edges: Vec<PathEdge>,
    pub capacity: Capacity,
}

impl WidestPath {
    /// The result reported when no positive-capacity path exists.
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            edges: Vec::new(),
            capacity: Capacity::ZERO,
        }
    }

    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn hops(&self) -> usize {
        self.edges.len()
    }
}

/// Frontier entry. The heap is a max-heap on capacity; among equal
/// capacities the earlier push (lower `seq`) pops first.
#[derive(Debug, PartialEq, Eq)]
struct FrontierEntry<'g> {
    capacity: Capacity,
    seq: u64,
    node: &'g str,
}

impl Ord for FrontierEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.capacity
            .cmp(&other.capacity)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-call search state: best known capacity per node and the predecessor
/// that achieved it.
struct Search<'g> {
    capacity: HashMap<&'g str, Capacity>,
    predecessor: HashMap<&'g str, &'g str>,
    frontier: BinaryHeap<FrontierEntry<'g>>,
    next_seq: u64,
    stale: usize,
}

impl<'g> Search<'g> {
    fn new(adj: &AdjacencyMap<'g>, src: &'g str) -> Self {
        let mut capacity: HashMap<&'g str, Capacity> = adj
            .node_ids()
            .map(|id| (id, Capacity::ZERO))
            .collect();
        capacity.insert(src, Capacity::Unbounded);

        let mut search = Self {
            capacity,
            predecessor: HashMap::new(),
            frontier: BinaryHeap::new(),
            next_seq: 0,
            stale: 0,
        };
        search.push(Capacity::Unbounded, src);
        search
    }

    fn push(&mut self, capacity: Capacity, node: &'g str) {
        self.frontier.push(FrontierEntry {
            capacity,
            seq: self.next_seq,
            node,
        });
        self.next_seq += 1;
    }

    fn capacity_of(&self, node: &str) -> Capacity {
        self.capacity.get(node).copied().unwrap_or(Capacity::ZERO)
    }

    /// Run until the frontier drains or `dest` is settled.
    ///
    /// Once `dest` is popped with a current entry its capacity cannot rise
    /// (every remaining entry is no wider) and its predecessor chain is
    /// already settled, so stopping there gives the same answer as draining.
    fn run(
        &mut self,
        adj: &AdjacencyMap<'g>,
        dest: &str,
        cancel: Option<&CancelToken>,
    ) -> Result<()> {
        while let Some(FrontierEntry { capacity: cap, node, .. }) = self.frontier.pop() {
            cancel::check(cancel)?;

            if cap < self.capacity_of(node) {
                self.stale += 1;
                tracing::trace!(node, capacity = %cap, "skipping stale frontier entry");
                continue;
            }
            if node == dest {
                break;
            }

            for neighbor in adj.neighbors(node) {
                let candidate = cap.through(neighbor.weight);
                if candidate > self.capacity_of(neighbor.target) {
                    self.capacity.insert(neighbor.target, candidate);
                    self.predecessor.insert(neighbor.target, node);
                    self.push(candidate, neighbor.target);
                }
            }
        }
        Ok(())
    }
}

/// Maximum-bottleneck path from `src` to `dest`.
///
/// Modified Dijkstra: a max-heap frontier of `(capacity, node)` seeded with
/// `(Unbounded, src)`; relaxing an edge of weight `w` from a node popped at
/// capacity `c` offers `min(c, w)` to the neighbor, accepted only when
/// strictly wider than what the neighbor already has. Superseded entries stay
/// in the heap and are skipped when popped.
///
/// `src == dest` yields a one-node path with [`Capacity::Unbounded`]. When
/// `dest` cannot be reached through positive-weight edges the result is
/// [`WidestPath::unreachable`].
#[tracing::instrument(level = "debug", skip(graph, cancel))]
pub fn widest_path(
    graph: &Graph,
    src: &str,
    dest: &str,
    cancel: Option<&CancelToken>,
) -> Result<WidestPath> {
    let t = Instant::now();
    for id in [src, dest] {
        if !graph.contains_node(id) {
            return Err(GraphError::node_not_found(id));
        }
    }
    let adj = AdjacencyMap::build(graph)?;

    let mut search = Search::new(&adj, src);
    search.run(&adj, dest, cancel)?;

    let capacity = search.capacity_of(dest);
    if dest != src && capacity == Capacity::ZERO {
        tracing::debug!(stale = search.stale, elapsed = ?t.elapsed(), "widest_path: unreachable");
        return Ok(WidestPath::unreachable());
    }

    let (path, edges) = path::reconstruct(&search.predecessor, src, dest);
    tracing::debug!(
        %capacity,
        hops = edges.len(),
        stale = search.stale,
        elapsed = ?t.elapsed(),
        "widest_path"
    );
    Ok(WidestPath {
        path,
        edges,
        capacity,
    })
}
