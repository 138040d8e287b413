//! Dish Model

use super::category::{Category, CategoryInfo};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Dish entity as stored, image bytes included
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category_id: i64,
    pub description: Option<String>,
    pub is_available: bool,
    #[serde(skip)]
    pub image_data: Option<Vec<u8>>,
    pub image_content_type: Option<String>,
    pub image_size: Option<i64>,
    pub image_filename: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Dish {
    /// Stored image, if any
    pub fn image(&self) -> Option<(&[u8], &str)> {
        match (&self.image_data, &self.image_content_type) {
            (Some(data), Some(ct)) if !data.is_empty() => Some((data.as_slice(), ct.as_str())),
            _ => None,
        }
    }
}

/// Uploaded image payload
#[derive(Clone, PartialEq, Eq)]
pub struct DishImage {
    pub data: Vec<u8>,
    pub content_type: String,
    /// Declared size in bytes
    pub size: u64,
    pub filename: Option<String>,
}

impl std::fmt::Debug for DishImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DishImage")
            .field("content_type", &self.content_type)
            .field("size", &self.size)
            .field("len", &self.data.len())
            .field("filename", &self.filename)
            .finish()
    }
}

/// Create dish payload
///
/// Required fields are optional here so that a missing field is reported
/// as a validation failure by the catalog service.
#[derive(Debug, Clone, Default)]
pub struct DishCreate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub is_available: Option<bool>,
    pub image: Option<DishImage>,
}

/// Update dish payload
///
/// Absent fields are left unchanged. A supplied image replaces the stored one.
#[derive(Debug, Clone, Default)]
pub struct DishUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub is_available: Option<bool>,
    pub image: Option<DishImage>,
}

/// List filters and paging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishQuery {
    pub category: Option<i64>,
    pub available: Option<bool>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// List item: no image bytes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DishSummary {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category_id: i64,
    pub description: Option<String>,
    pub is_available: bool,
    pub has_image: bool,
    pub image_content_type: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,

    // -- Projections (populated by application code, skipped by FromRow) --

    /// Image endpoint, or the placeholder URL when no image is stored
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub image_url: String,
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub category_info: Option<CategoryInfo>,
}

/// One page of dishes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishPage {
    pub items: Vec<DishSummary>,
    pub total: i64,
    pub count: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Full dish view with the image inlined as a data URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishDetail {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category_id: i64,
    pub description: Option<String>,
    pub is_available: bool,
    pub image_url: String,
    pub image_content_type: Option<String>,
    pub image_size: Option<i64>,
    pub image_filename: Option<String>,
    pub category_info: Option<CategoryInfo>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl DishDetail {
    /// Project a stored dish for display.
    ///
    /// `placeholder_url` is used when the dish has no image.
    pub fn project(dish: Dish, category: Option<&Category>, placeholder_url: &str) -> Self {
        let image_url = match dish.image() {
            Some((data, ct)) => format!("data:{};base64,{}", ct, STANDARD.encode(data)),
            None => placeholder_url.to_string(),
        };
        Self {
            id: dish.id,
            name: dish.name,
            price: dish.price,
            category_id: dish.category_id,
            description: dish.description,
            is_available: dish.is_available,
            image_url,
            image_content_type: dish.image_content_type,
            image_size: dish.image_size,
            image_filename: dish.image_filename,
            category_info: category.map(CategoryInfo::from),
            created_at: dish.created_at,
            updated_at: dish.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(image: Option<(&[u8], &str)>) -> Dish {
        Dish {
            id: 7,
            name: "Margherita".into(),
            price: 8.5,
            category_id: 1,
            description: None,
            is_available: true,
            image_data: image.map(|(d, _)| d.to_vec()),
            image_content_type: image.map(|(_, ct)| ct.to_string()),
            image_size: image.map(|(d, _)| d.len() as i64),
            image_filename: image.map(|_| "pizza.png".to_string()),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_project_inlines_image_as_data_url() {
        let detail = DishDetail::project(dish(Some((b"abc", "image/png"))), None, "/p.jpg");
        assert_eq!(detail.image_url, "data:image/png;base64,YWJj");
        assert_eq!(detail.image_filename.as_deref(), Some("pizza.png"));
    }

    #[test]
    fn test_project_falls_back_to_placeholder() {
        let detail = DishDetail::project(dish(None), None, "/images/default-dish.svg");
        assert_eq!(detail.image_url, "/images/default-dish.svg");
    }

    #[test]
    fn test_project_embeds_category_info() {
        let category = Category {
            id: 1,
            name: "Pizza".into(),
            description: None,
            is_active: false,
            created_at: 0,
            updated_at: 0,
        };
        let detail = DishDetail::project(dish(None), Some(&category), "/p.jpg");
        let info = detail.category_info.unwrap();
        assert_eq!(info.name, "Pizza");
        assert!(!info.is_active);
    }

    #[test]
    fn test_empty_image_data_counts_as_absent() {
        let d = dish(Some((b"", "image/png")));
        assert!(d.image().is_none());
    }

    #[test]
    fn test_image_debug_omits_bytes() {
        let img = DishImage {
            data: vec![0u8; 64],
            content_type: "image/png".into(),
            size: 64,
            filename: None,
        };
        let s = format!("{:?}", img);
        assert!(s.contains("len: 64"));
        assert!(!s.contains("data"));
    }

    #[test]
    fn test_dish_serialize_skips_bytes() {
        let json = serde_json::to_string(&dish(Some((b"abc", "image/png")))).unwrap();
        assert!(!json.contains("image_data"));
        assert!(json.contains("\"image_content_type\":\"image/png\""));
    }
}
