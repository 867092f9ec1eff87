use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Opaque node identifier.
pub type NodeId = String;

/// An undirected weighted edge, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EdgeEntry")]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f64,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

/// Read-only snapshot of a graph: a node set plus an ordered edge list.
///
/// Edge order matters. It fixes the order neighbors are stored in the
/// adjacency map, which is the only tie-break the traversals use.
///
/// Deserializes from either the flat document shape
/// (`{"nodes": ["A"], "edges": [{"source": "A", "target": "B", "weight": 1}]}`)
/// or the element-wrapped shape the graph store persists
/// (`{"nodes": [{"data": {"id": "A"}}], "edges": [{"data": {...}}]}`).
/// Always serializes flat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "GraphDocument")]
pub struct Graph {
    nodes: Vec<NodeId>,
    edges: Vec<Edge>,
    #[serde(skip)]
    index: HashSet<NodeId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(node_count),
            edges: Vec::with_capacity(edge_count),
            index: HashSet::with_capacity(node_count),
        }
    }

    /// Build a graph from already-collected parts. Node ids are taken as-is,
    /// repeats included.
    pub fn from_parts(nodes: Vec<NodeId>, edges: Vec<Edge>) -> Self {
        let index = nodes.iter().cloned().collect();
        Self { nodes, edges, index }
    }

    /// Register a node. Returns false (and changes nothing) if the id is
    /// already present.
    pub fn add_node(&mut self, id: impl Into<NodeId>) -> bool {
        let id = id.into();
        if !self.index.insert(id.clone()) {
            return false;
        }
        self.nodes.push(id);
        true
    }

    /// Append an edge. Endpoints and weight are validated when the
    /// adjacency map is built, not here.
    pub fn add_edge(&mut self, source: impl Into<NodeId>, target: impl Into<NodeId>, weight: f64) {
        self.edges.push(Edge::new(source, target, weight));
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Ids that appear more than once in the node list, in first-repeat order.
    pub fn duplicate_nodes(&self) -> Vec<&str> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        let mut dups = Vec::new();
        for id in &self.nodes {
            if !seen.insert(id.as_str()) && !dups.contains(&id.as_str()) {
                dups.push(id.as_str());
            }
        }
        dups
    }
}

// --- Document shapes accepted on input ---

#[derive(Deserialize)]
struct GraphDocument {
    nodes: Vec<NodeEntry>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl From<GraphDocument> for Graph {
    fn from(doc: GraphDocument) -> Self {
        let nodes = doc.nodes.into_iter().map(NodeId::from).collect();
        Graph::from_parts(nodes, doc.edges)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NodeEntry {
    Bare(NodeId),
    Flat { id: NodeId },
    Wrapped { data: NodeData },
}

#[derive(Deserialize)]
struct NodeData {
    id: NodeId,
}

impl From<NodeEntry> for NodeId {
    fn from(entry: NodeEntry) -> Self {
        match entry {
            NodeEntry::Bare(id) | NodeEntry::Flat { id } => id,
            NodeEntry::Wrapped { data } => data.id,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EdgeEntry {
    Flat(EdgeData),
    Wrapped { data: EdgeData },
}

#[derive(Deserialize)]
struct EdgeData {
    source: NodeId,
    target: NodeId,
    weight: f64,
}

impl From<EdgeEntry> for Edge {
    fn from(entry: EdgeEntry) -> Self {
        let data = match entry {
            EdgeEntry::Flat(data) | EdgeEntry::Wrapped { data } => data,
        };
        Edge {
            source: data.source,
            target: data.target,
            weight: data.weight,
        }
    }
}
