use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chirp_core::StoreError;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    MultipartRejection(#[from] MultipartRejection),

    #[error(transparent)]
    FormRejection(#[from] FormRejection),

    #[error("store error: {source}")]
    Store {
        #[source]
        source: StoreError,
        expose: bool,
    },
}

impl AppError {
    /// A store failure; `expose` puts the error text in the response body.
    pub fn store(source: StoreError, expose: bool) -> Self {
        AppError::Store { source, expose }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Multipart(err) => (err.status(), err.body_text()).into_response(),
            AppError::MultipartRejection(rejection) => rejection.into_response(),
            AppError::FormRejection(rejection) => rejection.into_response(),
            AppError::Store { source, expose } => {
                error!(error = %source, "request failed");
                let body = if expose {
                    format!("Internal Server Error\n\n{source}")
                } else {
                    "Internal Server Error".to_string()
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
