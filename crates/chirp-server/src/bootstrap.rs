//! Startup sequence: readiness gate, migrations, demo account.

use anyhow::{Context, Result};
use chirp_config::{AppConfig, DatabaseConfig};
use chirp_core::{Account, TweetService};
use chirp_migrate::{MigrationReport, embedded_migrations, run_migrations};
use chirp_store::{FsMediaStore, SeaStore, connect, connect_options};
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::readiness::ReadinessGate;

/// Everything `serve` needs once the database is usable.
#[derive(Debug)]
pub struct Bootstrapped {
    pub db: DatabaseConnection,
    pub migrations: MigrationReport,
    pub demo: Account,
}

/// Polls the configured database until a connection can be opened and pinged.
pub async fn wait_for_database(config: &DatabaseConfig) -> DatabaseConnection {
    let gate = ReadinessGate::new(config.poll_interval());
    info!(database = %config.display_url(), "waiting for database");
    gate.wait("database", || connect(connect_options(config)))
        .await
}

pub async fn apply_migrations(db: &DatabaseConnection) -> Result<MigrationReport> {
    let plans = embedded_migrations().context("load embedded migrations")?;
    run_migrations(db, &plans)
        .await
        .context("apply migrations")
}

pub async fn ensure_demo_account(db: &DatabaseConnection, config: &AppConfig) -> Result<Account> {
    let service = TweetService::new(
        SeaStore::new(db.clone()),
        FsMediaStore::new(&config.media_root),
    );
    service
        .ensure_demo_account()
        .await
        .context("provision demo account")
}

/// Runs the full sequence. Only the readiness gate retries; any later failure
/// is returned to the caller as fatal.
pub async fn startup(config: &AppConfig) -> Result<Bootstrapped> {
    let db = wait_for_database(&config.database).await;
    let migrations = apply_migrations(&db).await?;
    let demo = ensure_demo_account(&db, config).await?;

    tokio::fs::create_dir_all(&config.media_root)
        .await
        .with_context(|| format!("create media root {}", config.media_root.display()))?;

    info!(
        applied = migrations.applied.len(),
        demo = %demo.username,
        "startup sequence complete"
    );
    Ok(Bootstrapped {
        db,
        migrations,
        demo,
    })
}
