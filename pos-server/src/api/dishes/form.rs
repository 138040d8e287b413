//! Multipart dish form
//!
//! Text fields: `name`, `price`, `category`, `description`, `isAvailable`.
//! File field: `image`. Unknown fields are ignored.

use axum::extract::Multipart;
use shared::models::{DishCreate, DishImage, DishUpdate};

use crate::utils::AppError;
use crate::utils::error::multipart_error;

/// Raw form values before service-level validation
#[derive(Debug, Default)]
pub struct DishForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub is_available: Option<String>,
    pub image: Option<DishImage>,
}

impl DishForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = DishForm::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(field_name) = field.name().map(str::to_string) else {
                continue;
            };

            if field_name == "image" {
                let filename = field.file_name().map(str::to_string);
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                // Browsers send an empty part when no file was picked
                if data.is_empty() {
                    continue;
                }
                form.image = Some(DishImage {
                    size: data.len() as u64,
                    data: data.to_vec(),
                    content_type,
                    filename,
                });
                continue;
            }

            let value = field.text().await.map_err(multipart_error)?;
            match field_name.as_str() {
                "name" => form.name = Some(value),
                "price" => form.price = Some(value),
                "category" | "category_id" => form.category = Some(value),
                "description" => form.description = Some(value),
                "isAvailable" | "is_available" => form.is_available = Some(value),
                other => tracing::debug!(field = other, "Ignoring unknown dish form field"),
            }
        }

        Ok(form)
    }

    /// Create payload. Blank text counts as missing.
    pub fn into_create(self) -> Result<DishCreate, AppError> {
        Ok(DishCreate {
            name: non_blank(self.name),
            price: parse_price(non_blank(self.price))?,
            category_id: parse_category(non_blank(self.category))?,
            description: self.description,
            is_available: self.is_available.as_deref().map(parse_flag),
            image: self.image,
        })
    }

    /// Update payload. Blank name, price or category are left unchanged;
    /// an empty description clears it.
    pub fn into_update(self) -> Result<DishUpdate, AppError> {
        Ok(DishUpdate {
            name: non_blank(self.name),
            price: parse_price(non_blank(self.price))?,
            category_id: parse_category(non_blank(self.category))?,
            description: self.description,
            is_available: self.is_available.as_deref().map(parse_flag),
            image: self.image,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_price(value: Option<String>) -> Result<Option<f64>, AppError> {
    value
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| AppError::validation(format!("Price must be a number, got '{v}'")))
        })
        .transpose()
}

fn parse_category(value: Option<String>) -> Result<Option<i64>, AppError> {
    value
        .map(|v| {
            v.trim()
                .parse::<i64>()
                .map_err(|_| AppError::validation(format!("Invalid category id '{v}'")))
        })
        .transpose()
}

/// Only an explicit "false" or "0" turns availability off
fn parse_flag(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "false" | "0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("on"));
        assert!(parse_flag(""));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" FALSE "));
        assert!(!parse_flag("0"));
    }

    #[test]
    fn test_into_create() {
        let form = DishForm {
            name: Some("Paneer Tikka".into()),
            price: Some(" 250.5 ".into()),
            category: Some("3".into()),
            is_available: Some("false".into()),
            ..Default::default()
        };
        let create = form.into_create().unwrap();
        assert_eq!(create.name.as_deref(), Some("Paneer Tikka"));
        assert_eq!(create.price, Some(250.5));
        assert_eq!(create.category_id, Some(3));
        assert_eq!(create.is_available, Some(false));
        assert!(create.image.is_none());
    }

    #[test]
    fn test_bad_numbers_rejected() {
        let form = DishForm {
            price: Some("cheap".into()),
            ..Default::default()
        };
        assert!(form.into_create().is_err());

        let form = DishForm {
            category: Some("starters".into()),
            ..Default::default()
        };
        assert!(form.into_update().is_err());
    }

    #[test]
    fn test_update_blank_fields_are_absent() {
        let form = DishForm {
            name: Some("  ".into()),
            price: Some(String::new()),
            description: Some(String::new()),
            ..Default::default()
        };
        let update = form.into_update().unwrap();
        assert!(update.name.is_none());
        assert!(update.price.is_none());
        assert_eq!(update.description.as_deref(), Some(""));
    }
}
