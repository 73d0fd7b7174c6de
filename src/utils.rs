use tracing_subscriber::EnvFilter;

/// Installs a global `tracing` subscriber that writes to stderr. The verbosity is read from
/// `RUST_LOG` and defaults to `info`.
///
/// This fails if a global subscriber has already been installed.
pub fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}
