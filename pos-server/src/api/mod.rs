//! HTTP API
//!
//! Each resource module exposes `router()`; handlers live in `handler.rs`.

pub mod categories;
pub mod dishes;
pub mod health;
pub mod tables;
