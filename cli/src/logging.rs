use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crates whose events the default filter lets through.
const TARGETS: [&str; 2] = ["graph_engine", "graph_engine_core"];

/// Initialize structured logging on stderr.
///
/// `GRAPH_ENGINE_LOG` (or `RUST_LOG`) overrides everything. Otherwise an
/// explicit `log_level` wins, then `verbose` selects debug, else warn.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = match (verbose, log_level) {
        (_, Some(level)) => level,
        (true, None) => "debug",
        (false, None) => "warn",
    };

    let filter = EnvFilter::try_from_env("GRAPH_ENGINE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(directives(level)));

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_span_events(fmt::format::FmtSpan::CLOSE),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

/// Expand a bare level into per-crate directives; pass full filters through.
fn directives(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        TARGETS
            .iter()
            .map(|t| format!("{}={}", t, level))
            .collect::<Vec<_>>()
            .join(",")
    }
}
