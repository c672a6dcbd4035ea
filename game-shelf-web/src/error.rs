use std::any::Any;

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use game_shelf_db::OperationError;
use serde_json::json;

/// Status code reported in the body of request validation failures.
pub const VALIDATION_STATUS_CODE: u32 = 10422;

/// Errors a request handler can fail with.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("Game not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(OperationError),

    #[error("Template error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WebError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<OperationError> for WebError {
    fn from(e: OperationError) -> Self {
        if e.is_not_found() {
            Self::NotFound
        } else {
            Self::Database(e)
        }
    }
}

impl From<rusqlite::Error> for WebError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(OperationError::from(e))
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Game not found" })),
            )
                .into_response(),
            Self::Validation(message) => {
                log::error!("Request validation failed: {}", message);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({
                        "status_code": VALIDATION_STATUS_CODE,
                        "message": message,
                        "data": null,
                    })),
                )
                    .into_response()
            }
            other => {
                log::error!("{}", other);
                plain_error(other.to_string())
            }
        }
    }
}

fn plain_error(body: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}

/// Render a handler panic as a 500 carrying the panic message.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    log::error!("Handler panicked: {}", detail);
    plain_error(format!("Internal error: handler panicked: {detail}"))
}
