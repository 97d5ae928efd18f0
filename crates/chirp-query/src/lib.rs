pub mod builder;
pub mod error;
pub mod naming;
pub mod sql;

pub use builder::build_plan_queries;
pub use error::QueryError;
pub use sql::{BuiltQuery, DatabaseBackend, build_action_queries, build_version_table};
