use sea_query::{Alias, Table};

use chirp_schema::ColumnDef;

use super::helpers::build_sea_column_def;
use super::types::{BuiltQuery, DatabaseBackend};

pub fn build_add_column(backend: DatabaseBackend, table: &str, column: &ColumnDef) -> BuiltQuery {
    let col_def = build_sea_column_def(backend, column);
    let stmt = Table::alter()
        .table(Alias::new(table))
        .add_column(col_def)
        .to_owned();
    BuiltQuery::AlterTable(Box::new(stmt))
}
