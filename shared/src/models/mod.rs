//! Data models
//!
//! Shared between pos-server and its tools (and the SPA via the API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod category;
pub mod dining_table;
pub mod dish;

// Re-exports
pub use category::*;
pub use dining_table::*;
pub use dish::*;
