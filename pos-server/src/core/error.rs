//! Startup errors
//!
//! Failures that stop the server before or while it serves. Request-level
//! failures use [`AppError`](shared::error::AppError) instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<sqlx::Error> for ServerError {
    fn from(err: sqlx::Error) -> Self {
        ServerError::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for ServerError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        ServerError::Database(format!("Failed to apply migrations: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
