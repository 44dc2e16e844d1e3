//! tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Pick the filter directive: RUST_LOG wins, then --verbose, then config.
/// The dashboard caps at `error` unless verbose so log lines stay off the screen.
pub fn filter_directive(env: Option<&str>, verbose: bool, configured: &str, tui: bool) -> String {
    if let Some(env) = env.filter(|e| !e.trim().is_empty()) {
        return env.to_string();
    }
    if verbose {
        return "debug".to_string();
    }
    if tui {
        return "error".to_string();
    }
    configured.to_string()
}

/// Install the global stderr subscriber (no-op if one is already set)
pub fn init(verbose: bool, configured: &str, tui: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(env.as_deref(), verbose, configured, tui);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
