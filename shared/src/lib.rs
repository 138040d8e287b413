//! Shared types for the POS server
//!
//! Wire models, the unified error system and small utilities used by the
//! server crate and its tools.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
