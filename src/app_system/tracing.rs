use tracing_subscriber::EnvFilter;

/// Configure tracing once at application startup.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (the `log.level`
/// setting) is used.
pub fn setup_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Stdout belongs to the interactive view.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
