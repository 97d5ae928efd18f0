use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global `fmt` subscriber. `RUST_LOG` wins over the defaults.
pub fn init(debug: bool) {
    let fallback = if debug {
        "debug,sea_orm=info,sqlx=warn,hyper=info"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // Already installed when several commands run in one process (tests).
    let _ = fmt().with_env_filter(filter).try_init();
}
