//! Business services

pub mod catalog_service;
pub mod seed;

pub use catalog_service::{
    CatalogError, CatalogResult, CatalogService, DeactivationPolicy, DishImageSource, Entity,
};
pub use seed::{SeedReport, seed_default_menu};
