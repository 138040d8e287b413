use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::DbService;
use crate::services::CatalogService;

/// Server state - shared handles for every handler
///
/// Cheap to clone: everything inside is a pool handle or an `Arc`.
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Arc<Config> | configuration (immutable) |
/// | db | DbService | SQLite pool |
/// | catalog | CatalogService | category and dish rules |
/// | jwt | Arc<JwtService> | token verification |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub catalog: CatalogService,
    pub jwt: Arc<JwtService>,
}

impl ServerState {
    /// Wire services around an already-open database
    pub fn new(config: Config, db: DbService) -> Self {
        let catalog = CatalogService::new(
            db.clone(),
            config.deactivation_policy,
            config.default_dish_image_url.clone(),
        );
        let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self {
            config: Arc::new(config),
            db,
            catalog,
            jwt,
        }
    }

    /// Open the configured database file and build the state
    pub async fn initialize(config: Config) -> Result<Self> {
        let db = DbService::new(&config.database_path).await?;
        tracing::info!(
            policy = %config.deactivation_policy,
            environment = %config.environment,
            "Server state initialized"
        );
        Ok(Self::new(config, db))
    }
}
