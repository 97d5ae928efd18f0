pub mod action;
pub mod schema;
pub mod validate;

pub use action::{MigrationAction, MigrationPlan};
pub use schema::{
    ColumnDef, ColumnName, ColumnType, ComplexColumnType, IndexName, PrimaryKeyDef, PrimaryKeySyntax,
    ReferenceAction, SimpleColumnType, TableConstraint, TableName,
};
pub use validate::{SchemaError, validate_plans};
