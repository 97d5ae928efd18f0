//! Naming conventions for indexes and constraints.
//!
//! Names always include the table so that the same column list on two tables
//! never collides. A double underscore separates the table from the rest.

/// Format: ix_{table}__{key} or ix_{table}__{col1}_{col2}...
pub fn build_index_name(table: &str, columns: &[String], key: Option<&str>) -> String {
    match key {
        Some(k) => format!("ix_{}__{}", table, k),
        None => format!("ix_{}__{}", table, columns.join("_")),
    }
}

/// Format: uq_{table}__{key} or uq_{table}__{col1}_{col2}...
pub fn build_unique_constraint_name(table: &str, columns: &[String], key: Option<&str>) -> String {
    match key {
        Some(k) => format!("uq_{}__{}", table, k),
        None => format!("uq_{}__{}", table, columns.join("_")),
    }
}

/// Format: fk_{table}__{key} or fk_{table}__{col1}_{col2}...
pub fn build_foreign_key_name(table: &str, columns: &[String], key: Option<&str>) -> String {
    match key {
        Some(k) => format!("fk_{}__{}", table, k),
        None => format!("fk_{}__{}", table, columns.join("_")),
    }
}
