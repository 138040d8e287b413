//! POS Server - restaurant catalog backend
//!
//! Categories, dishes with inline images, and dining tables over SQLite.
//!
//! # Module layout
//!
//! ```text
//! pos-server/src/
//! ├── core/          # config, state, errors, server
//! ├── auth/          # JWT verification and extractors
//! ├── services/      # catalog rules, default menu
//! ├── api/           # HTTP routes and handlers
//! ├── utils/         # logging, validation, response helpers
//! └── db/            # SQLite pool and repositories
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{AdminUser, CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_app};
pub use db::DbService;
pub use services::{CatalogService, DeactivationPolicy};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// Security event on the `security` tracing target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and start logging from the resulting configuration
pub fn setup_environment() -> core::Result<Config> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    Ok(config)
}
