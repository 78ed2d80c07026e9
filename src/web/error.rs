use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::core::error::AppError;

/// Error type returned by the HTTP handlers.
///
/// Everything unexpected collapses into `Internal`; the underlying cause is
/// logged server-side and never serialized into the response body.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal,
}

impl ApiError {
    /// Log the cause and return the generic 500 variant.
    pub fn internal(context: &str, err: impl std::fmt::Display) -> Self {
        log::error!("{}: {}", context, err);
        ApiError::Internal
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(msg) => ApiError::BadRequest(msg),
            other => ApiError::internal("Request failed", other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string()),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ApiError::from(AppError::Validation("id, name and status are required".to_string()));
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn database_errors_map_to_internal_without_detail() {
        let err = ApiError::from(AppError::Database(rusqlite::Error::InvalidQuery));
        assert!(matches!(err, ApiError::Internal));
    }
}
