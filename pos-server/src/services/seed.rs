//! Default menu
//!
//! Idempotent: names that already exist are left untouched.

use shared::models::{CategoryCreate, DishCreate};

use super::{CatalogError, CatalogResult, CatalogService};

/// (name, description)
const CATEGORIES: &[(&str, &str)] = &[
    ("Starters", "Delicious appetizers to start your meal"),
    ("Main Course", "Hearty main dishes"),
    ("Beverages", "Refreshing drinks"),
    ("Soups", "Warm and comforting soups"),
    ("Desserts", "Sweet endings to your meal"),
    ("Pizzas", "Freshly baked pizzas"),
    ("Alcoholic Drinks", "Fine selection of alcoholic beverages"),
    ("Salads", "Fresh and healthy salads"),
];

/// (name, price, category, description)
const DISHES: &[(&str, f64, &str, &str)] = &[
    ("Paneer Tikka", 250.0, "Starters", "Grilled cottage cheese with spices"),
    ("Chicken Tikka", 300.0, "Starters", "Grilled chicken with spices"),
    ("Tandoori Chicken", 350.0, "Starters", "Tandoor roasted chicken"),
    ("Samosa", 100.0, "Starters", "Spiced potato filled pastry"),
    ("Aloo Tikki", 120.0, "Starters", "Spiced potato patties"),
    ("Hara Bhara Kebab", 220.0, "Starters", "Green vegetable kebabs"),
    ("Butter Chicken", 400.0, "Main Course", "Tender chicken in rich tomato gravy"),
    ("Paneer Butter Masala", 350.0, "Main Course", "Cottage cheese in creamy tomato sauce"),
    ("Chicken Biryani", 450.0, "Main Course", "Fragrant rice with chicken"),
    ("Dal Makhani", 180.0, "Main Course", "Creamy black lentils"),
    ("Kadai Paneer", 300.0, "Main Course", "Cottage cheese in spiced gravy"),
    ("Rogan Josh", 500.0, "Main Course", "Aromatic lamb curry"),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub categories_created: usize,
    pub dishes_created: usize,
    pub skipped: usize,
}

/// Insert the default categories and dishes
pub async fn seed_default_menu(catalog: &CatalogService) -> CatalogResult<SeedReport> {
    let mut report = SeedReport::default();

    for (name, description) in CATEGORIES {
        let result = catalog
            .create_category(CategoryCreate {
                name: name.to_string(),
                description: Some(description.to_string()),
            })
            .await;
        match result {
            Ok(_) => report.categories_created += 1,
            Err(CatalogError::DuplicateName { .. }) => report.skipped += 1,
            Err(e) => return Err(e),
        }
    }

    let categories = catalog.list_categories(true).await?;
    for (name, price, category_name, description) in DISHES {
        let Some(category) = categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(category_name))
        else {
            tracing::warn!(dish = name, category = category_name, "Seed category missing, dish skipped");
            report.skipped += 1;
            continue;
        };

        let result = catalog
            .create_dish(DishCreate {
                name: Some(name.to_string()),
                price: Some(*price),
                category_id: Some(category.id),
                description: Some(description.to_string()),
                ..Default::default()
            })
            .await;
        match result {
            Ok(_) => report.dishes_created += 1,
            Err(CatalogError::DuplicateName { .. }) => report.skipped += 1,
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        categories = report.categories_created,
        dishes = report.dishes_created,
        skipped = report.skipped,
        "Default menu seeded"
    );
    Ok(report)
}
