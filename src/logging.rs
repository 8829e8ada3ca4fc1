/// Route tracing diagnostics to stderr, filtered by `RUST_LOG`.
///
/// Command results go to stdout; only diagnostics flow through tracing, so a
/// caller piping stdout sees clean one-line outcomes.
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
