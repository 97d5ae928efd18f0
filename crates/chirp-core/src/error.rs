use thiserror::Error;

use crate::form::FormErrors;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[source] BoxError),
    #[error("media storage error: {0}")]
    Media(#[from] std::io::Error),
    #[error("password hashing failed: {0}")]
    Password(#[from] password_hash::Error),
    #[error("{0}")]
    Other(String),
}

impl StoreError {
    pub fn database(err: impl Into<BoxError>) -> Self {
        StoreError::Database(err.into())
    }
}

#[derive(Debug, Error)]
pub enum CreateTweetError {
    #[error("invalid tweet: {0}")]
    Invalid(FormErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
}
