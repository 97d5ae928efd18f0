use sea_query::{Alias, ColumnDef as SeaColumnDef, Table};

use super::types::BuiltQuery;

/// `CREATE TABLE IF NOT EXISTS` for the applied-migrations bookkeeping table.
pub fn build_version_table(table: &str) -> BuiltQuery {
    let stmt = Table::create()
        .table(Alias::new(table))
        .if_not_exists()
        .col(
            SeaColumnDef::new(Alias::new("version"))
                .integer()
                .not_null()
                .primary_key(),
        )
        .col(SeaColumnDef::new(Alias::new("comment")).text())
        .col(
            SeaColumnDef::new(Alias::new("applied_at"))
                .timestamp_with_time_zone()
                .not_null(),
        )
        .to_owned();
    BuiltQuery::CreateTable(Box::new(stmt))
}
