//! Settings file and flag layering.
//!
//! Precedence, lowest first: built-in defaults, the TOML file named by
//! `--config` / `GRAPH_ENGINE_CONFIG`, then command-line flags and their
//! environment variables.

use std::fs;
use std::path::Path;
use std::time::Duration;

use graph_engine_core::CancelToken;
use serde::Deserialize;

use crate::cli::Cli;
use crate::error::CliError;

/// Contents of the settings file.
///
/// ```toml
/// timeout_ms = 5000
/// pretty = true
/// log_level = "debug"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub pretty: bool,
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, CliError> {
        toml::from_str(text).map_err(|source| CliError::Config {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Effective settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub timeout: Option<Duration>,
    pub pretty: bool,
    pub verbose: bool,
    pub log_level: Option<String>,
    pub log_json: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: FileConfig) -> Self {
        Self {
            timeout: cli
                .timeout_ms
                .or(file.timeout_ms)
                .map(Duration::from_millis),
            pretty: cli.pretty || file.pretty,
            verbose: cli.verbose,
            log_level: cli.log_level.clone().or(file.log_level),
            log_json: cli.log_json,
        }
    }

    /// Fresh token carrying the configured timeout, if any.
    pub fn cancel_token(&self) -> CancelToken {
        match self.timeout {
            Some(timeout) => CancelToken::new().with_timeout(timeout),
            None => CancelToken::new(),
        }
    }
}
