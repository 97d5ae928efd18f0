use anyhow::Result;
use chirp_config::DatabaseConfig;
use colored::Colorize;

use chirp_server::wait_for_database;

use super::runtime;

pub fn cmd_wait_db(database: DatabaseConfig) -> Result<()> {
    runtime(None)?.block_on(async {
        let db = wait_for_database(&database).await;
        db.close().await?;
        println!("{}", "Database is ready.".bright_green());
        Ok::<(), anyhow::Error>(())
    })
}
