use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
pub const LOG_VAR: &str = "KEEL_LOG";

const CRATES: [&str; 3] = ["keel_fs", "keel_api", "keel_main"];

fn default_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { "info" };
    let directives = CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    EnvFilter::new(directives)
}

/// Installs a stderr subscriber. Logs are flushed when the guard drops.
pub fn init_tracing(verbose: bool) -> anyhow::Result<Guard> {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| default_filter(verbose)))
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_target(false)
        .with_writer(writer)
        .try_init()
        .map_err(|error| anyhow::anyhow!("Failed to initialize logging: {error}"))?;

    debug!("Logging initialized");
    Ok(Guard(guard))
}

pub struct Guard(#[allow(dead_code)] WorkerGuard);
