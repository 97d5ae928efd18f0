use std::path::PathBuf;

use anyhow::{Context, Result};
use chirp_migrate::{embedded_migrations, load_migrations_from_dir};
use chirp_query::{DatabaseBackend, build_plan_queries};
use clap::ValueEnum;
use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SqlBackend {
    Postgres,
    Sqlite,
}

impl From<SqlBackend> for DatabaseBackend {
    fn from(backend: SqlBackend) -> Self {
        match backend {
            SqlBackend::Postgres => DatabaseBackend::Postgres,
            SqlBackend::Sqlite => DatabaseBackend::Sqlite,
        }
    }
}

/// Prints the DDL of every migration plan without touching a database.
pub fn cmd_sql(backend: SqlBackend, dir: Option<PathBuf>) -> Result<()> {
    let plans = match &dir {
        Some(dir) => load_migrations_from_dir(dir)
            .with_context(|| format!("load migrations from {}", dir.display()))?,
        None => embedded_migrations()?,
    };

    if plans.is_empty() {
        println!("{}", "No migrations found.".bright_yellow());
        return Ok(());
    }

    let backend = DatabaseBackend::from(backend);
    for plan in &plans {
        let queries = build_plan_queries(backend, plan)
            .with_context(|| format!("build SQL for {}", plan.label()))?;

        println!(
            "{} {}",
            "Migration:".bright_cyan().bold(),
            plan.label().bright_magenta()
        );
        if let Some(created_at) = &plan.created_at {
            println!("{} {}", "Created at:".bright_cyan(), created_at.bright_white());
        }
        for (i, query) in queries.iter().enumerate() {
            println!(
                "{}. {};",
                (i + 1).to_string().bright_magenta().bold(),
                query.build(backend).trim().bright_white()
            );
        }
        println!();
    }
    Ok(())
}
