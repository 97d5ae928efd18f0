use std::collections::BTreeMap;

use chirp_query::{DatabaseBackend, build_plan_queries, build_version_table};
use chirp_schema::MigrationPlan;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, Set,
    TransactionTrait,
};
use tracing::{debug, info};

use crate::error::MigrationError;
use crate::version::{self, VERSION_TABLE};

/// Outcome of one [`run_migrations`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub applied: Vec<u32>,
    pub already_applied: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub version: u32,
    pub label: String,
    pub applied_at: Option<DateTime<FixedOffset>>,
}

pub fn to_query_backend(backend: DbBackend) -> Result<DatabaseBackend, MigrationError> {
    match backend {
        DbBackend::Postgres => Ok(DatabaseBackend::Postgres),
        DbBackend::Sqlite => Ok(DatabaseBackend::Sqlite),
        other => Err(MigrationError::UnsupportedBackend(format!("{other:?}"))),
    }
}

/// Applies every plan whose version is not yet recorded, in order.
///
/// Each plan runs in its own transaction together with its version row, so a
/// failing plan leaves no partial schema behind and earlier plans stay applied.
pub async fn run_migrations(
    db: &DatabaseConnection,
    plans: &[MigrationPlan],
) -> Result<MigrationReport, MigrationError> {
    let backend = to_query_backend(db.get_database_backend())?;
    ensure_version_table(db, backend).await?;
    let applied = applied_versions(db).await?;

    let mut report = MigrationReport::default();
    for plan in plans {
        if applied.contains_key(&plan.version) {
            report.already_applied.push(plan.version);
            continue;
        }
        apply_plan(db, backend, plan).await?;
        info!(version = plan.version, migration = %plan.label(), "applied migration");
        report.applied.push(plan.version);
    }

    if report.applied.is_empty() {
        info!("no pending migrations");
    }
    Ok(report)
}

/// Lists every plan with the time it was applied, if it was.
pub async fn migration_status(
    db: &DatabaseConnection,
    plans: &[MigrationPlan],
) -> Result<Vec<MigrationStatus>, MigrationError> {
    let backend = to_query_backend(db.get_database_backend())?;
    ensure_version_table(db, backend).await?;
    let applied = applied_versions(db).await?;

    Ok(plans
        .iter()
        .map(|plan| MigrationStatus {
            version: plan.version,
            label: plan.label(),
            applied_at: applied.get(&plan.version).copied(),
        })
        .collect())
}

async fn ensure_version_table(
    db: &DatabaseConnection,
    backend: DatabaseBackend,
) -> Result<(), DbErr> {
    let sql = build_version_table(VERSION_TABLE).build(backend);
    db.execute_unprepared(&sql).await?;
    Ok(())
}

async fn applied_versions(
    db: &DatabaseConnection,
) -> Result<BTreeMap<u32, DateTime<FixedOffset>>, DbErr> {
    let rows = version::Entity::find().all(db).await?;
    Ok(rows
        .into_iter()
        .map(|row| (row.version as u32, row.applied_at))
        .collect())
}

async fn apply_plan(
    db: &DatabaseConnection,
    backend: DatabaseBackend,
    plan: &MigrationPlan,
) -> Result<(), MigrationError> {
    let queries = build_plan_queries(backend, plan)?;
    let label = plan.label();
    let failed = |source| MigrationError::Apply {
        label: label.clone(),
        source,
    };

    let txn = db.begin().await.map_err(failed)?;
    for query in &queries {
        let sql = query.build(backend);
        debug!(%sql, "executing migration statement");
        txn.execute_unprepared(&sql).await.map_err(failed)?;
    }

    version::ActiveModel {
        version: Set(plan.version as i32),
        comment: Set(plan.comment.clone()),
        applied_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await
    .map_err(failed)?;

    txn.commit().await.map_err(failed)?;
    Ok(())
}
