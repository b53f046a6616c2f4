use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Errors surfaced at the HTTP boundary.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Error communicating with LM Studio: {0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_names_the_endpoint() {
        let error = ApiError::Upstream("connection refused".to_string());
        assert_eq!(
            error.to_string(),
            "Error communicating with LM Studio: connection refused"
        );
    }

    #[test]
    fn test_passthrough_messages() {
        assert_eq!(
            ApiError::BadRequest("File already exists".to_string()).to_string(),
            "File already exists"
        );
        assert_eq!(
            ApiError::NotFound("Directory not found: x".to_string()).to_string(),
            "Directory not found: x"
        );
    }
}
