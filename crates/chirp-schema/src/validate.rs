use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::action::{MigrationAction, MigrationPlan};
use crate::schema::{ColumnDef, ColumnName, TableConstraint, TableName};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("migration version must be positive")]
    ZeroVersion,
    #[error("duplicate migration version: {0}")]
    DuplicateVersion(u32),
    #[error("migration versions out of order: {0} follows {1}")]
    OutOfOrder(u32, u32),
    #[error("table already exists: {0}")]
    TableExists(String),
    #[error("table not found: {0}")]
    TableNotFound(String),
    #[error("table '{0}' has no columns")]
    EmptyTable(String),
    #[error("table '{0}' must have a primary key")]
    MissingPrimaryKey(String),
    #[error("column already exists: {0}.{1}")]
    ColumnExists(String, String),
    #[error("constraint references non-existent column: {0}.{1}")]
    ConstraintColumnNotFound(String, String),
    #[error("constraint has empty column list on table {0}")]
    EmptyConstraintColumns(String),
    #[error("foreign key references non-existent column: {0}.{1} -> {2}.{3}")]
    ForeignKeyColumnNotFound(String, String, String, String),
    #[error("auto_increment requires an integer column: {0}.{1}")]
    AutoIncrementType(String, String),
    #[error("only index and unique constraints can be added to existing table {0}")]
    UnsupportedAddConstraint(String),
}

/// Replays `plans` in order against an empty schema and checks that every
/// action is applicable.
pub fn validate_plans(plans: &[MigrationPlan]) -> Result<(), SchemaError> {
    let mut previous: Option<u32> = None;
    for plan in plans {
        if plan.version == 0 {
            return Err(SchemaError::ZeroVersion);
        }
        if let Some(prev) = previous {
            if plan.version == prev {
                return Err(SchemaError::DuplicateVersion(plan.version));
            }
            if plan.version < prev {
                return Err(SchemaError::OutOfOrder(plan.version, prev));
            }
        }
        previous = Some(plan.version);
    }

    let mut tables: BTreeMap<TableName, BTreeSet<ColumnName>> = BTreeMap::new();
    for plan in plans {
        for action in &plan.actions {
            apply(&mut tables, action)?;
        }
    }
    Ok(())
}

fn apply(
    tables: &mut BTreeMap<TableName, BTreeSet<ColumnName>>,
    action: &MigrationAction,
) -> Result<(), SchemaError> {
    match action {
        MigrationAction::CreateTable {
            table,
            columns,
            constraints,
        } => {
            if tables.contains_key(table) {
                return Err(SchemaError::TableExists(table.clone()));
            }
            let names = check_columns(table, columns)?;

            let has_inline_pk = columns.iter().any(ColumnDef::is_primary_key);
            let has_table_pk = constraints
                .iter()
                .any(|c| matches!(c, TableConstraint::PrimaryKey { .. }));
            if !has_inline_pk && !has_table_pk {
                return Err(SchemaError::MissingPrimaryKey(table.clone()));
            }

            for constraint in constraints {
                check_constraint(table, &names, constraint, tables)?;
            }
            tables.insert(table.clone(), names);
        }
        MigrationAction::DeleteTable { table } => {
            if tables.remove(table).is_none() {
                return Err(SchemaError::TableNotFound(table.clone()));
            }
        }
        MigrationAction::AddColumn { table, column } => {
            let names = tables
                .get_mut(table)
                .ok_or_else(|| SchemaError::TableNotFound(table.clone()))?;
            if !names.insert(column.name.clone()) {
                return Err(SchemaError::ColumnExists(table.clone(), column.name.clone()));
            }
        }
        MigrationAction::AddConstraint { table, constraint } => {
            if !constraint.is_index_like() {
                return Err(SchemaError::UnsupportedAddConstraint(table.clone()));
            }
            let names = tables
                .get(table)
                .ok_or_else(|| SchemaError::TableNotFound(table.clone()))?;
            check_constraint(table, names, constraint, tables)?;
        }
        MigrationAction::RawSql { .. } => {}
    }
    Ok(())
}

fn check_columns(table: &str, columns: &[ColumnDef]) -> Result<BTreeSet<ColumnName>, SchemaError> {
    if columns.is_empty() {
        return Err(SchemaError::EmptyTable(table.to_string()));
    }
    let mut names = BTreeSet::new();
    for column in columns {
        if !names.insert(column.name.clone()) {
            return Err(SchemaError::ColumnExists(
                table.to_string(),
                column.name.clone(),
            ));
        }
        if column.is_auto_increment() && !column.r#type.supports_auto_increment() {
            return Err(SchemaError::AutoIncrementType(
                table.to_string(),
                column.name.clone(),
            ));
        }
    }
    Ok(names)
}

fn check_constraint(
    table: &str,
    names: &BTreeSet<ColumnName>,
    constraint: &TableConstraint,
    tables: &BTreeMap<TableName, BTreeSet<ColumnName>>,
) -> Result<(), SchemaError> {
    let columns = constraint.columns();
    if columns.is_empty() {
        return Err(SchemaError::EmptyConstraintColumns(table.to_string()));
    }
    if let Some(missing) = columns.iter().find(|c| !names.contains(*c)) {
        return Err(SchemaError::ConstraintColumnNotFound(
            table.to_string(),
            missing.clone(),
        ));
    }

    if let TableConstraint::ForeignKey {
        ref_table,
        ref_columns,
        ..
    } = constraint
    {
        // Self references are resolved against the table being created.
        let target = if ref_table == table {
            Some(names)
        } else {
            tables.get(ref_table)
        };
        let target = target.ok_or_else(|| SchemaError::TableNotFound(ref_table.clone()))?;
        if let Some(missing) = ref_columns.iter().find(|c| !target.contains(*c)) {
            return Err(SchemaError::ForeignKeyColumnNotFound(
                table.to_string(),
                columns.join(","),
                ref_table.clone(),
                missing.clone(),
            ));
        }
    }
    Ok(())
}
