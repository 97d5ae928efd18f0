use anyhow::Result;
use chirp_config::AppConfig;
use colored::Colorize;

use chirp_server::startup;

use super::runtime;

pub fn cmd_bootstrap(config: AppConfig) -> Result<()> {
    runtime(None)?.block_on(async {
        let ready = startup(&config).await?;
        println!(
            "{} {}",
            "Migrations applied:".bright_cyan(),
            ready.migrations.applied.len().to_string().bright_yellow()
        );
        println!(
            "{} {} {}",
            "Demo account:".bright_cyan(),
            ready.demo.username.bright_green(),
            format!("(id {})", ready.demo.id).bright_white()
        );
        Ok::<(), anyhow::Error>(())
    })
}
