//! Tracing setup. Output goes to stderr because stdout is the protocol channel.

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `directive` wins over `RUST_LOG`; with neither set the level is `info`.
pub fn init_tracing(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(d) => EnvFilter::try_new(d).with_context(|| format!("invalid log filter '{d}'"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
