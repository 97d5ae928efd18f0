pub mod add_column;
pub mod add_constraint;
pub mod create_table;
pub mod delete_table;
pub mod helpers;
pub mod raw_sql;
pub mod types;
pub mod version_table;

pub use types::{BuiltQuery, DatabaseBackend};
pub use version_table::build_version_table;

use chirp_schema::MigrationAction;

use crate::error::QueryError;

use self::{
    add_column::build_add_column, add_constraint::build_add_constraint,
    create_table::build_create_table, delete_table::build_delete_table, raw_sql::build_raw_sql,
};

pub fn build_action_queries(
    backend: DatabaseBackend,
    action: &MigrationAction,
) -> Result<Vec<BuiltQuery>, QueryError> {
    match action {
        MigrationAction::CreateTable {
            table,
            columns,
            constraints,
        } => Ok(build_create_table(backend, table, columns, constraints)),

        MigrationAction::DeleteTable { table } => Ok(vec![build_delete_table(table)]),

        MigrationAction::AddColumn { table, column } => {
            Ok(vec![build_add_column(backend, table, column)])
        }

        MigrationAction::AddConstraint { table, constraint } => {
            Ok(vec![build_add_constraint(table, constraint)?])
        }

        MigrationAction::RawSql { sql } => Ok(vec![build_raw_sql(sql.clone())]),
    }
}
