//! Utilities - error conversions, extractors, logging, response helpers, validation

pub mod error;
pub mod extract;
pub mod logger;
pub mod result;
pub mod validation;

pub use extract::{AppJson, AppQuery};
pub use result::{AppResult, ok, ok_with_message};
pub use shared::error::{ApiResponse, AppError, ErrorCategory, ErrorCode};
