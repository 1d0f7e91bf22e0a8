use std::env;

use tracing_subscriber::{EnvFilter, fmt};

/// Filter directive checked before `RUST_LOG`.
pub const LOG_ENV: &str = "UNITY_MCP_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

pub fn init_tracing() {
    let directive = filter_directive(|k| env::var(k).ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    // stdout belongs to the stdio transport
    let installed = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// First non-blank value of `UNITY_MCP_LOG`, then `RUST_LOG`, else `info`.
fn filter_directive<F>(get: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    [LOG_ENV, EnvFilter::DEFAULT_ENV]
        .into_iter()
        .filter_map(|key| get(key))
        .map(|raw| raw.trim().to_string())
        .find(|d| !d.is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string())
}
