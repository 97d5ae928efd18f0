use anyhow::Result;
use chirp_config::DatabaseConfig;
use colored::Colorize;

use chirp_server::{bootstrap::apply_migrations, wait_for_database};

use super::runtime;

pub fn cmd_migrate(database: DatabaseConfig) -> Result<()> {
    runtime(None)?.block_on(async {
        let db = wait_for_database(&database).await;
        let report = apply_migrations(&db).await?;

        if report.applied.is_empty() {
            println!(
                "{} {}",
                "No pending migrations.".bright_green(),
                format!("({} already applied)", report.already_applied.len()).bright_white()
            );
        } else {
            println!(
                "{} {}",
                "Applied migrations:".bright_cyan().bold(),
                report.applied.len().to_string().bright_yellow()
            );
            for version in &report.applied {
                println!("  {} {}", "-".bright_white(), format!("{version:04}").bright_magenta());
            }
        }
        Ok::<(), anyhow::Error>(())
    })
}
