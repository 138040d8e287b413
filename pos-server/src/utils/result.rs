//! Success response helpers

use axum::Json;
use serde::Serialize;
use shared::error::ApiResponse;

/// Handler result type
pub use shared::error::AppResult;

/// Wrap data in the success envelope
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// Wrap data in the success envelope with a custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success_with_message(message, data))
}
