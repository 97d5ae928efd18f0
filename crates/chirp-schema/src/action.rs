use serde::{Deserialize, Serialize};

use crate::schema::{ColumnDef, TableConstraint, TableName};

/// One versioned migration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MigrationPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub version: u32,
    pub actions: Vec<MigrationAction>,
}

impl MigrationPlan {
    /// Short label used in logs and CLI output: `0001 create account and tweet`.
    pub fn label(&self) -> String {
        match &self.comment {
            Some(comment) => format!("{:04} {}", self.version, comment),
            None => format!("{:04}", self.version),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum MigrationAction {
    CreateTable {
        table: TableName,
        columns: Vec<ColumnDef>,
        #[serde(default)]
        constraints: Vec<TableConstraint>,
    },
    DeleteTable {
        table: TableName,
    },
    AddColumn {
        table: TableName,
        column: ColumnDef,
    },
    /// Only `index` and `unique` constraints can be added after table creation.
    AddConstraint {
        table: TableName,
        constraint: TableConstraint,
    },
    RawSql {
        sql: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnType, SimpleColumnType};

    #[test]
    fn parses_tagged_actions() {
        let json = r#"{
            "version": 3,
            "comment": "add index",
            "actions": [
                {"type": "add_constraint", "table": "tweet",
                 "constraint": {"type": "index", "columns": ["created_at"]}},
                {"type": "raw_sql", "sql": "SELECT 1"},
                {"type": "add_column", "table": "tweet",
                 "column": {"name": "lang", "type": "text", "nullable": true}}
            ]
        }"#;

        let plan: MigrationPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.version, 3);
        assert_eq!(plan.label(), "0003 add index");
        assert!(matches!(
            &plan.actions[0],
            MigrationAction::AddConstraint {
                constraint: TableConstraint::Index { name: None, .. },
                ..
            }
        ));
        assert!(matches!(&plan.actions[1], MigrationAction::RawSql { sql } if sql == "SELECT 1"));
        match &plan.actions[2] {
            MigrationAction::AddColumn { column, .. } => {
                assert_eq!(column.r#type, ColumnType::Simple(SimpleColumnType::Text));
                assert!(column.nullable);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn label_without_comment_is_version_only() {
        let plan = MigrationPlan {
            comment: None,
            created_at: None,
            version: 12,
            actions: vec![],
        };
        assert_eq!(plan.label(), "0012");
    }

    #[test]
    fn create_table_constraints_default_to_empty() {
        let json = r#"{"version": 1, "actions": [
            {"type": "create_table", "table": "t",
             "columns": [{"name": "id", "type": "integer", "nullable": false, "primary_key": true}]}
        ]}"#;
        let plan: MigrationPlan = serde_json::from_str(json).unwrap();
        match &plan.actions[0] {
            MigrationAction::CreateTable { constraints, .. } => assert!(constraints.is_empty()),
            other => panic!("unexpected action {other:?}"),
        }
    }
}
