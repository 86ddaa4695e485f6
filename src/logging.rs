use tracing_subscriber::EnvFilter;

/// Send tracing logs to stderr, filtered by `WHIRL_LOG` (e.g. `whirl=debug`).
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_env("WHIRL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
