//! Error types and exit codes for graph-engine
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (I/O)
//! - 2: Usage error (bad flags/args, missing or bad config file)
//! - 3: Data error (unreadable graph document, unknown node, malformed graph, bad weight)
//! - 4: Cancelled (Ctrl-C or timeout)

use std::path::Path;

use graph_engine_core::GraphError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    Failure = 1,
    Usage = 2,
    Data = 3,
    Cancelled = 4,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] GraphError),

    #[error("failed to {operation} {target}: {source}")]
    Io {
        operation: &'static str,
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid graph document: {0}")]
    InvalidGraph(#[source] serde_json::Error),

    #[error("failed to encode result: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl CliError {
    pub fn io(operation: &'static str, target: &Path, source: std::io::Error) -> Self {
        CliError::Io {
            operation,
            target: target.display().to_string(),
            source,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Engine(GraphError::Cancelled) => ExitCode::Cancelled,
            CliError::Engine(_) | CliError::InvalidGraph(_) => ExitCode::Data,
            CliError::Config { .. } | CliError::ConfigRead { .. } => ExitCode::Usage,
            CliError::Io { .. } | CliError::Encode(_) => ExitCode::Failure,
        }
    }
}
