use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// Error body shared by the whole API: a human-readable `message`, plus the
/// underlying store error detail on unexpected failures. Passing that detail
/// through mirrors the original service and is a known information-leak
/// trade-off.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub type ApiFailure = (StatusCode, Json<ApiError>);

pub fn not_found(message: &str) -> ApiFailure {
    (StatusCode::NOT_FOUND, Json(ApiError { message: message.to_string(), error: None }))
}

pub fn bad_request(message: impl Into<String>) -> ApiFailure {
    (StatusCode::BAD_REQUEST, Json(ApiError { message: message.into(), error: None }))
}

pub fn store_failure(message: &str, error: impl std::fmt::Display) -> ApiFailure {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError { message: message.to_string(), error: Some(error.to_string()) }),
    )
}
