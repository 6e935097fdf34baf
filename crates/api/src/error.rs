use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Error surface of the HTTP layer. Validation failures become client
/// errors with a bare `error` field; everything else is logged and mapped to
/// a server error carrying the underlying message.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Upstream {
        context: &'static str,
        source: shared::Error,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    /// Wrap a failure from the wallet/transaction/health layers. Validation
    /// kinds raised below the HTTP surface still map to client errors.
    pub fn upstream(context: &'static str, source: shared::Error) -> Self {
        if source.is_validation() {
            ApiError::Validation(source.to_string())
        } else {
            ApiError::Upstream { context, source }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Upstream { context, source } => {
                error!("{}: {}", context, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": context, "message": source.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
