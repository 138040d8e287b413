//! Server configuration
//!
//! Built once in `main` from the environment and handed to [`ServerState`](super::ServerState).

use std::str::FromStr;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};
use crate::services::DeactivationPolicy;

/// Development-only JWT secret; rejected outside `development`
const DEV_JWT_SECRET: &str = "dev-JWT_SECRET-not-for-production-0123456789";

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | DATABASE_PATH | pos.db | SQLite database file |
/// | ENVIRONMENT | development | development / staging / production |
/// | JWT_SECRET | dev secret (development only) | HS256 signing secret |
/// | JWT_ISSUER | pos-server | expected `iss` claim |
/// | JWT_AUDIENCE | pos-clients | expected `aud` claim |
/// | CATEGORY_DEACTIVATION_POLICY | cascade | cascade / reject |
/// | STATIC_DIR | public | directory served under `/images` |
/// | DEFAULT_DISH_IMAGE_URL | /images/default-dish.svg | placeholder image |
/// | CORS_ORIGIN | unset | allowed SPA origin |
/// | LOG_LEVEL | info | log filter |
/// | LOG_DIR | unset | daily rolling log directory |
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub database_path: String,
    /// development | staging | production
    pub environment: String,
    pub jwt: JwtConfig,
    pub deactivation_policy: DeactivationPolicy,
    /// Static assets root, mounted at `/images`
    pub static_dir: String,
    /// Where dishes without an image point to
    pub default_dish_image_url: String,
    pub cors_origin: Option<String>,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            database_path: "pos.db".into(),
            environment: "development".into(),
            jwt: JwtConfig {
                secret: DEV_JWT_SECRET.into(),
                expiration_minutes: 1440,
                issuer: "pos-server".into(),
                audience: "pos-clients".into(),
            },
            deactivation_policy: DeactivationPolicy::Cascade,
            static_dir: "public".into(),
            default_dish_image_url: "/images/default-dish.svg".into(),
            cors_origin: None,
            log_level: "info".into(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults. Malformed values are errors.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let environment = std::env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let http_port = match std::env::var("HTTP_PORT") {
            Ok(p) => p
                .parse()
                .map_err(|_| ServerError::Config(format!("HTTP_PORT is not a valid port: {p}")))?,
            Err(_) => defaults.http_port,
        };

        let deactivation_policy = match std::env::var("CATEGORY_DEACTIVATION_POLICY") {
            Ok(v) => DeactivationPolicy::from_str(&v).map_err(ServerError::Config)?,
            Err(_) => defaults.deactivation_policy,
        };

        let jwt = JwtConfig {
            secret: require_secret("JWT_SECRET", &environment)?,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.jwt.expiration_minutes),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.jwt.issuer),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or(defaults.jwt.audience),
        };

        Ok(Self {
            http_port,
            database_path: std::env::var("DATABASE_PATH").unwrap_or(defaults.database_path),
            environment,
            jwt,
            deactivation_policy,
            static_dir: std::env::var("STATIC_DIR").unwrap_or(defaults.static_dir),
            default_dish_image_url: std::env::var("DEFAULT_DISH_IMAGE_URL")
                .unwrap_or(defaults.default_dish_image_url),
            cors_origin: std::env::var("CORS_ORIGIN").ok().filter(|s| !s.is_empty()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

/// Require a secret env var: must be set and non-empty outside development.
fn require_secret(name: &str, environment: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ if environment == "development" => {
            tracing::warn!("{name} not set, using development secret");
            Ok(DEV_JWT_SECRET.into())
        }
        _ => Err(ServerError::Config(format!(
            "{name} must be set in {environment} environment"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.deactivation_policy, DeactivationPolicy::Cascade);
        assert_eq!(config.default_dish_image_url, "/images/default-dish.svg");
        assert!(config.is_development());
    }

    #[test]
    fn test_require_secret_in_production() {
        // Name no real deployment would set
        let result = require_secret("POS_TEST_UNSET_SECRET_VAR", "production");
        assert!(matches!(result, Err(ServerError::Config(_))));

        let result = require_secret("POS_TEST_UNSET_SECRET_VAR", "development");
        assert_eq!(result.unwrap(), DEV_JWT_SECRET);
    }
}
