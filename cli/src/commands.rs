use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use graph_engine_core::{
    breadth_first, depth_first, widest_path, CancelToken, Capacity, Graph, NodeId, PathEdge,
};
use serde::Serialize;

use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::error::CliError;

/// Result document written for one query. Field names match the results
/// file the graph store's front end already consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultDocument {
    Bfs {
        bfs_order: Vec<NodeId>,
    },
    Dfs {
        dfs_order: Vec<NodeId>,
    },
    Widest {
        widest_path: Vec<NodeId>,
        widest_path_edges: Vec<PathEdge>,
        widest_path_capacity: Capacity,
    },
}

/// Load the graph, run the requested query, and emit the result document.
pub fn run(cli: &Cli, settings: &Settings, cancel: &CancelToken) -> Result<(), CliError> {
    let graph = load_graph(&cli.graph)?;
    let doc = execute(&cli.command, &graph, cancel)?;
    write_output(&doc, cli.output.as_deref(), settings.pretty)
}

pub fn execute(
    command: &Command,
    graph: &Graph,
    cancel: &CancelToken,
) -> Result<ResultDocument, CliError> {
    let doc = match command {
        Command::Bfs { start } => ResultDocument::Bfs {
            bfs_order: breadth_first(graph, start, Some(cancel))?,
        },
        Command::Dfs { start } => ResultDocument::Dfs {
            dfs_order: depth_first(graph, start, Some(cancel))?,
        },
        Command::Widest { src, dest } => {
            let result = widest_path(graph, src, dest, Some(cancel))?;
            ResultDocument::Widest {
                widest_path: result.path,
                widest_path_edges: result.edges,
                widest_path_capacity: result.capacity,
            }
        }
    };
    Ok(doc)
}

/// Read a graph document from `path`, or stdin when `path` is `-`.
pub fn load_graph(path: &Path) -> Result<Graph, CliError> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::io("read graph from", Path::new("stdin"), e))?;
        buf
    } else {
        fs::read_to_string(path).map_err(|e| CliError::io("read graph", path, e))?
    };

    let graph: Graph = serde_json::from_str(&text).map_err(CliError::InvalidGraph)?;
    let dups = graph.duplicate_nodes();
    if !dups.is_empty() {
        tracing::warn!(duplicates = ?dups, "graph document repeats node ids; keeping one of each");
    }
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded graph"
    );
    Ok(graph)
}

fn write_output(doc: &ResultDocument, output: Option<&Path>, pretty: bool) -> Result<(), CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(doc)
    } else {
        serde_json::to_string(doc)
    }
    .map_err(CliError::Encode)?;
    text.push('\n');

    match output {
        Some(path) => {
            fs::write(path, text).map_err(|e| CliError::io("write results to", path, e))?;
            tracing::debug!(path = %path.display(), "wrote results");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| CliError::io("write results to", Path::new("stdout"), e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_engine_core::GraphError;
    use serde_json::json;

    fn sample() -> Graph {
        let mut g = Graph::new();
        for n in ["A", "B", "C", "D", "E"] {
            g.add_node(n);
        }
        g.add_edge("A", "B", 4.0);
        g.add_edge("B", "C", 2.0);
        g.add_edge("A", "C", 3.0);
        g.add_edge("C", "D", 5.0);
        g
    }

    #[test]
    fn test_bfs_document_shape() {
        let doc = execute(&Command::Bfs { start: "A".into() }, &sample(), &CancelToken::new())
            .unwrap();
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({"bfs_order": ["A", "B", "C", "D"]})
        );
    }

    #[test]
    fn test_dfs_document_shape() {
        let doc = execute(&Command::Dfs { start: "E".into() }, &sample(), &CancelToken::new())
            .unwrap();
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!({"dfs_order": ["E"]}));
    }

    #[test]
    fn test_widest_document_shape() {
        let cmd = Command::Widest {
            src: "A".into(),
            dest: "D".into(),
        };
        let doc = execute(&cmd, &sample(), &CancelToken::new()).unwrap();
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "widest_path": ["A", "C", "D"],
                "widest_path_edges": [{"from": "A", "to": "C"}, {"from": "C", "to": "D"}],
                "widest_path_capacity": 3.0
            })
        );
    }

    #[test]
    fn test_widest_self_document_keeps_unbounded() {
        let cmd = Command::Widest {
            src: "C".into(),
            dest: "C".into(),
        };
        let doc = execute(&cmd, &sample(), &CancelToken::new()).unwrap();
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["widest_path_capacity"], "unbounded");
    }

    #[test]
    fn test_engine_error_propagates() {
        let err = execute(&Command::Bfs { start: "Q".into() }, &sample(), &CancelToken::new())
            .unwrap_err();
        assert!(matches!(err, CliError::Engine(GraphError::NodeNotFound { .. })));
    }

    #[test]
    fn test_load_graph_missing_file() {
        let err = load_graph(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
