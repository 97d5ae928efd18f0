use anyhow::{Context, Result};
use chirp_config::AppConfig;
use chirp_migrate::{embedded_migrations, migration_status};
use chirp_store::{connect, connect_options};
use colored::Colorize;

use super::runtime;

pub fn cmd_status(config: AppConfig) -> Result<()> {
    println!("{}", "Configuration:".bright_cyan().bold());
    let settings = serde_json::to_string_pretty(&config).context("serialize configuration")?;
    for line in settings.lines() {
        println!("  {}", line.bright_white());
    }
    println!(
        "  {} {}",
        "Database:".cyan(),
        config.database.display_url().bright_white()
    );
    println!();

    let plans = embedded_migrations()?;
    let statuses = runtime(None)?.block_on(async {
        let db = connect(connect_options(&config.database))
            .await
            .context("connect to database")?;
        migration_status(&db, &plans)
            .await
            .context("read applied migrations")
    })?;

    let applied = statuses.iter().filter(|s| s.applied_at.is_some()).count();
    println!(
        "{} {}/{}",
        "Applied migrations:".bright_cyan().bold(),
        applied.to_string().bright_yellow(),
        statuses.len().to_string().bright_yellow()
    );
    for status in &statuses {
        match status.applied_at {
            Some(at) => println!(
                "  {} {} {}",
                "applied".bright_green(),
                status.label.bright_white(),
                format!("at {}", at.to_rfc3339()).bright_black()
            ),
            None => println!("  {} {}", "pending".bright_yellow(), status.label.bright_white()),
        }
    }
    Ok(())
}
