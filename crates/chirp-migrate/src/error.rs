use std::path::PathBuf;

use chirp_query::QueryError;
use chirp_schema::SchemaError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to read migrations from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse migration {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid migration history: {0}")]
    Schema(#[from] SchemaError),
    #[error("failed to build SQL: {0}")]
    Query(#[from] QueryError),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("unsupported database backend: {0}")]
    UnsupportedBackend(String),
    #[error("migration {label} failed: {source}")]
    Apply {
        label: String,
        #[source]
        source: DbErr,
    },
}
