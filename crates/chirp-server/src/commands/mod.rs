pub mod bootstrap;
pub mod migrate;
pub mod serve;
pub mod sql;
pub mod status;
pub mod wait_db;

pub use bootstrap::cmd_bootstrap;
pub use migrate::cmd_migrate;
pub use serve::cmd_serve;
pub use sql::{SqlBackend, cmd_sql};
pub use status::cmd_status;
pub use wait_db::cmd_wait_db;

use anyhow::{Context, Result};
use tokio::runtime::{Builder, Runtime};

/// Multi-threaded runtime; `workers` defaults to the number of cores.
pub fn runtime(workers: Option<usize>) -> Result<Runtime> {
    let mut builder = Builder::new_multi_thread();
    builder.enable_all();
    if let Some(workers) = workers {
        builder.worker_threads(workers);
    }
    builder.build().context("build tokio runtime")
}
