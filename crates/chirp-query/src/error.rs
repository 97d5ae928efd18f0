use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("constraint cannot be added to existing table {0}; declare it in create_table")]
    UnsupportedConstraint(String),
    #[error("{0}")]
    Other(String),
}
