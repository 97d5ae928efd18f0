use sea_query::{Alias, Index, IndexCreateStatement};

use chirp_schema::TableConstraint;

use super::types::BuiltQuery;
use crate::error::QueryError;
use crate::naming::{build_index_name, build_unique_constraint_name};

/// `CREATE [UNIQUE] INDEX` for index-like constraints, `None` otherwise.
pub fn build_index_statement(
    table: &str,
    constraint: &TableConstraint,
) -> Option<IndexCreateStatement> {
    let (name, columns, unique) = match constraint {
        TableConstraint::Unique { name, columns } => (
            build_unique_constraint_name(table, columns, name.as_deref()),
            columns,
            true,
        ),
        TableConstraint::Index { name, columns } => (
            build_index_name(table, columns, name.as_deref()),
            columns,
            false,
        ),
        TableConstraint::PrimaryKey { .. } | TableConstraint::ForeignKey { .. } => return None,
    };

    let mut idx = Index::create();
    idx.name(&name).table(Alias::new(table));
    for col in columns {
        idx.col(Alias::new(col));
    }
    if unique {
        idx.unique();
    }
    Some(idx)
}

pub fn build_add_constraint(
    table: &str,
    constraint: &TableConstraint,
) -> Result<BuiltQuery, QueryError> {
    build_index_statement(table, constraint)
        .map(|idx| BuiltQuery::CreateIndex(Box::new(idx)))
        .ok_or_else(|| QueryError::UnsupportedConstraint(table.to_string()))
}
