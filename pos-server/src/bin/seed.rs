//! Load the default menu into the configured database
//!
//! ```text
//! DATABASE_PATH=pos.db cargo run --bin seed
//! ```

use pos_server::services::seed_default_menu;
use pos_server::{CatalogService, DbService, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = setup_environment()?;
    let db = DbService::new(&config.database_path).await?;
    let catalog = CatalogService::new(
        db,
        config.deactivation_policy,
        config.default_dish_image_url.clone(),
    );

    let report = seed_default_menu(&catalog).await?;
    println!(
        "Seeded {} categories and {} dishes ({} already present)",
        report.categories_created, report.dishes_created, report.skipped
    );
    Ok(())
}
