//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Breadth-first, depth-first and widest-path queries over a JSON graph document
#[derive(Parser, Debug)]
#[command(name = "graph-engine")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Graph document to read; `-` reads stdin
    #[arg(long, short, global = true, default_value = "-", env = "GRAPH_ENGINE_GRAPH")]
    pub graph: PathBuf,

    /// Write the result document to this file instead of stdout
    #[arg(long, short, global = true)]
    pub output: Option<PathBuf>,

    /// Pretty-print the result document
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Abort the query after this many milliseconds
    #[arg(long, global = true, env = "GRAPH_ENGINE_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// TOML settings file
    #[arg(long, global = true, env = "GRAPH_ENGINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log engine timings at debug level
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter (e.g. `debug`, `graph_engine_core=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Breadth-first visitation order from START
    Bfs {
        /// Node to start from
        start: String,
    },

    /// Depth-first (preorder) visitation order from START
    Dfs {
        /// Node to start from
        start: String,
    },

    /// Maximum-bottleneck path from SRC to DEST
    Widest {
        /// Source node
        src: String,
        /// Destination node
        dest: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_widest_with_globals() {
        let cli = Cli::try_parse_from([
            "graph-engine",
            "widest",
            "A",
            "D",
            "--graph",
            "g.json",
            "--pretty",
            "--timeout-ms",
            "250",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::Widest {
                src: "A".into(),
                dest: "D".into()
            }
        );
        assert_eq!(cli.graph, PathBuf::from("g.json"));
        assert!(cli.pretty);
        assert_eq!(cli.timeout_ms, Some(250));
    }

    #[test]
    fn test_graph_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["graph-engine", "bfs", "A"]).unwrap();
        assert_eq!(cli.graph, PathBuf::from("-"));
        assert_eq!(cli.command, Command::Bfs { start: "A".into() });
    }

    #[test]
    fn test_widest_requires_dest() {
        assert!(Cli::try_parse_from(["graph-engine", "widest", "A"]).is_err());
    }
}
