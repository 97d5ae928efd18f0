use sea_query::{Alias, Table};

use super::types::BuiltQuery;

pub fn build_delete_table(table: &str) -> BuiltQuery {
    let stmt = Table::drop().table(Alias::new(table)).to_owned();
    BuiltQuery::DropTable(Box::new(stmt))
}
