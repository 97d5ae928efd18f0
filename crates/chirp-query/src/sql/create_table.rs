use sea_query::{Alias, ForeignKey, Index, Table, TableCreateStatement};

use chirp_schema::{ColumnDef, TableConstraint};

use super::add_constraint::build_index_statement;
use super::helpers::{build_sea_column_def, to_sea_fk_action};
use super::types::{BuiltQuery, DatabaseBackend};
use crate::naming::build_foreign_key_name;

fn build_create_table_for_backend(
    backend: DatabaseBackend,
    table: &str,
    columns: &[ColumnDef],
    constraints: &[TableConstraint],
) -> TableCreateStatement {
    let mut stmt = Table::create().table(Alias::new(table)).to_owned();

    let has_table_primary_key = constraints
        .iter()
        .any(|c| matches!(c, TableConstraint::PrimaryKey { .. }));

    for column in columns {
        let mut col = build_sea_column_def(backend, column);

        if column.is_primary_key() && !has_table_primary_key {
            col.primary_key();
        }

        if column.is_unique() {
            col.unique_key();
        }

        stmt.col(col);
    }

    for constraint in constraints {
        match constraint {
            TableConstraint::PrimaryKey {
                columns: pk_cols, ..
            } => {
                let mut pk_idx = Index::create();
                for c in pk_cols {
                    pk_idx.col(Alias::new(c));
                }
                stmt.primary_key(&mut pk_idx);
            }
            TableConstraint::ForeignKey {
                name,
                columns: fk_cols,
                ref_table,
                ref_columns,
                on_delete,
                on_update,
            } => {
                let mut fk = ForeignKey::create();
                fk.name(build_foreign_key_name(table, fk_cols, name.as_deref()))
                    .from_tbl(Alias::new(table))
                    .to_tbl(Alias::new(ref_table));
                for col in fk_cols {
                    fk.from_col(Alias::new(col));
                }
                for col in ref_columns {
                    fk.to_col(Alias::new(col));
                }
                if let Some(action) = on_delete {
                    fk.on_delete(to_sea_fk_action(action));
                }
                if let Some(action) = on_update {
                    fk.on_update(to_sea_fk_action(action));
                }
                stmt.foreign_key(&mut fk);
            }
            // Emitted as separate CREATE INDEX statements.
            TableConstraint::Unique { .. } | TableConstraint::Index { .. } => {}
        }
    }

    stmt
}

/// `CREATE TABLE` followed by one `CREATE [UNIQUE] INDEX` per index-like
/// table constraint.
pub fn build_create_table(
    backend: DatabaseBackend,
    table: &str,
    columns: &[ColumnDef],
    constraints: &[TableConstraint],
) -> Vec<BuiltQuery> {
    let mut queries = vec![BuiltQuery::CreateTable(Box::new(
        build_create_table_for_backend(backend, table, columns, constraints),
    ))];

    queries.extend(
        constraints
            .iter()
            .filter_map(|c| build_index_statement(table, c))
            .map(|idx| BuiltQuery::CreateIndex(Box::new(idx))),
    );

    queries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_schema::{
        ColumnType, ComplexColumnType, PrimaryKeyDef, PrimaryKeySyntax, ReferenceAction,
        SimpleColumnType,
    };
    use rstest::rstest;

    fn col(name: &str, ty: ColumnType) -> ColumnDef {
        ColumnDef {
            name: name.to_string(),
            r#type: ty,
            nullable: true,
            default: None,
            primary_key: None,
            unique: None,
        }
    }

    fn serial(name: &str) -> ColumnDef {
        ColumnDef {
            nullable: false,
            primary_key: Some(PrimaryKeySyntax::Object(PrimaryKeyDef {
                auto_increment: true,
            })),
            ..col(name, ColumnType::Simple(SimpleColumnType::Integer))
        }
    }

    #[rstest]
    #[case::postgres(DatabaseBackend::Postgres, &["CREATE TABLE \"users\"", "\"id\" integer"])]
    #[case::sqlite(DatabaseBackend::Sqlite, &["CREATE TABLE \"users\"", "\"id\" integer"])]
    fn test_create_table(#[case] backend: DatabaseBackend, #[case] expected: &[&str]) {
        let result = build_create_table(
            backend,
            "users",
            &[col("id", ColumnType::Simple(SimpleColumnType::Integer))],
            &[],
        );
        assert_eq!(result.len(), 1);
        let sql = result[0].build(backend);
        for exp in expected {
            assert!(
                sql.contains(exp),
                "Expected SQL to contain '{}', got: {}",
                exp,
                sql
            );
        }
    }

    #[test]
    fn auto_increment_primary_key_per_backend() {
        let result = build_create_table(DatabaseBackend::Postgres, "account", &[serial("id")], &[]);
        let pg = result[0].build(DatabaseBackend::Postgres);
        assert!(pg.contains("serial"), "got: {pg}");
        assert!(pg.contains("PRIMARY KEY"), "got: {pg}");

        let sqlite = result[0].build(DatabaseBackend::Sqlite);
        assert!(sqlite.contains("AUTOINCREMENT"), "got: {sqlite}");
        assert!(sqlite.contains("PRIMARY KEY"), "got: {sqlite}");
    }

    #[test]
    fn inline_unique_column() {
        let username = ColumnDef {
            nullable: false,
            unique: Some(true),
            ..col(
                "username",
                ColumnType::Complex(ComplexColumnType::Varchar { length: 150 }),
            )
        };
        let result = build_create_table(
            DatabaseBackend::Postgres,
            "account",
            &[serial("id"), username],
            &[],
        );
        let sql = result[0].build(DatabaseBackend::Postgres);
        assert!(sql.contains("\"username\" varchar(150)"), "got: {sql}");
        assert!(sql.contains("UNIQUE"), "got: {sql}");
    }

    #[test]
    fn foreign_key_with_cascade_is_named() {
        let result = build_create_table(
            DatabaseBackend::Postgres,
            "tweet",
            &[
                serial("id"),
                col("author_id", ColumnType::Simple(SimpleColumnType::Integer)),
            ],
            &[TableConstraint::ForeignKey {
                name: None,
                columns: vec!["author_id".into()],
                ref_table: "account".into(),
                ref_columns: vec!["id".into()],
                on_delete: Some(ReferenceAction::Cascade),
                on_update: None,
            }],
        );
        let pg = result[0].build(DatabaseBackend::Postgres);
        assert!(pg.contains("\"fk_tweet__author_id\""), "got: {pg}");
        for backend in [DatabaseBackend::Postgres, DatabaseBackend::Sqlite] {
            let sql = result[0].build(backend);
            assert!(sql.contains("REFERENCES \"account\""), "got: {sql}");
            assert!(sql.contains("ON DELETE CASCADE"), "got: {sql}");
        }
    }

    #[test]
    fn table_level_unique_becomes_index_statement() {
        let result = build_create_table(
            DatabaseBackend::Postgres,
            "account",
            &[
                serial("id"),
                col("username", ColumnType::Simple(SimpleColumnType::Text)),
            ],
            &[TableConstraint::Unique {
                name: None,
                columns: vec!["username".into()],
            }],
        );
        assert_eq!(result.len(), 2);
        let sql = result[1].build(DatabaseBackend::Postgres);
        assert!(sql.contains("CREATE UNIQUE INDEX"), "got: {sql}");
        assert!(sql.contains("\"uq_account__username\""), "got: {sql}");
    }
}
