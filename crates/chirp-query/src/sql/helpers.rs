use sea_query::{
    Alias, ColumnDef as SeaColumnDef, ForeignKeyAction, PostgresQueryBuilder,
    SchemaStatementBuilder, SimpleExpr, SqliteQueryBuilder,
};

use chirp_schema::{ColumnDef, ColumnType, ComplexColumnType, ReferenceAction, SimpleColumnType};

use super::types::DatabaseBackend;

/// Helper function to convert a schema statement to SQL for a specific backend
pub fn build_schema_statement<T: SchemaStatementBuilder>(
    stmt: &T,
    backend: DatabaseBackend,
) -> String {
    match backend {
        DatabaseBackend::Postgres => stmt.to_string(PostgresQueryBuilder),
        DatabaseBackend::Sqlite => stmt.to_string(SqliteQueryBuilder),
    }
}

/// Apply a schema ColumnType to a sea_query ColumnDef
pub fn apply_column_type(col: &mut SeaColumnDef, ty: &ColumnType) {
    match ty {
        ColumnType::Simple(simple) => match simple {
            SimpleColumnType::SmallInt => {
                col.small_integer();
            }
            SimpleColumnType::Integer => {
                col.integer();
            }
            SimpleColumnType::BigInt => {
                col.big_integer();
            }
            SimpleColumnType::Text => {
                col.text();
            }
            SimpleColumnType::Boolean => {
                col.boolean();
            }
            SimpleColumnType::Timestamp => {
                col.timestamp();
            }
            SimpleColumnType::Timestamptz => {
                col.timestamp_with_time_zone();
            }
        },
        ColumnType::Complex(complex) => match complex {
            ComplexColumnType::Varchar { length } => {
                col.string_len(*length);
            }
            ComplexColumnType::Custom { custom_type } => {
                col.custom(Alias::new(custom_type));
            }
        },
    }
}

pub fn to_sea_fk_action(action: &ReferenceAction) -> ForeignKeyAction {
    match action {
        ReferenceAction::Cascade => ForeignKeyAction::Cascade,
        ReferenceAction::Restrict => ForeignKeyAction::Restrict,
        ReferenceAction::SetNull => ForeignKeyAction::SetNull,
        ReferenceAction::SetDefault => ForeignKeyAction::SetDefault,
        ReferenceAction::NoAction => ForeignKeyAction::NoAction,
    }
}

/// Portable spelling of the few default expressions migrations use.
pub fn convert_default_for_backend(default: &str, backend: DatabaseBackend) -> String {
    match default {
        "current_timestamp()" | "now()" | "CURRENT_TIMESTAMP" => "CURRENT_TIMESTAMP".to_string(),
        "true" | "TRUE" => match backend {
            DatabaseBackend::Postgres => "TRUE".to_string(),
            DatabaseBackend::Sqlite => "1".to_string(),
        },
        "false" | "FALSE" => match backend {
            DatabaseBackend::Postgres => "FALSE".to_string(),
            DatabaseBackend::Sqlite => "0".to_string(),
        },
        other => other.to_string(),
    }
}

/// Build a sea_query ColumnDef for `backend`. Primary key and uniqueness
/// are applied by the caller since they depend on the surrounding table.
pub fn build_sea_column_def(backend: DatabaseBackend, column: &ColumnDef) -> SeaColumnDef {
    let mut col = SeaColumnDef::new(Alias::new(&column.name));
    apply_column_type(&mut col, &column.r#type);

    if !column.nullable {
        col.not_null();
    }

    if column.is_auto_increment() {
        col.auto_increment();
    }

    if let Some(default) = &column.default {
        let converted = convert_default_for_backend(default, backend);
        col.default(Into::<SimpleExpr>::into(sea_query::Expr::cust(converted)));
    }

    col
}
