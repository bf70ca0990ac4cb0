use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "MCX_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install a compact stderr subscriber so stdout stays clean for command
/// output. The filter comes from `MCX_LOG` (e.g. `MCX_LOG=debug`).
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match std::env::var(LOG_ENV) {
        Ok(value) => EnvFilter::try_new(&value)
            .map_err(|e| format!("invalid {LOG_ENV} directive '{value}': {e}"))?,
        Err(_) => EnvFilter::new(DEFAULT_FILTER),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
}
