//! Input validation helpers
//!
//! Every write path (create and update alike) runs its input through these
//! before touching the store.

use shared::models::DishImage;
use thiserror::Error;

// ── Limits ──────────────────────────────────────────────────────────

/// Entity names: category, dish
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Dish image payload ceiling (5 MiB)
pub const MAX_IMAGE_SIZE: u64 = 5 * 1024 * 1024;

/// Accepted dish image content types
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/svg+xml", "image/webp"];

/// A rejected input value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl From<ValidationError> for shared::error::AppError {
    fn from(err: ValidationError) -> Self {
        shared::error::AppError::validation(err.0)
    }
}

type Result<T> = std::result::Result<T, ValidationError>;

// ── Generic text helpers ────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
///
/// Returns the trimmed value.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > max_len {
        return Err(ValidationError(format!(
            "{field} is too long ({} chars, max {max_len})",
            trimmed.chars().count()
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate an optional string; blank collapses to `None`.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.chars().count() > max_len => Err(ValidationError(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        ))),
        Some(v) => Ok(Some(v.to_string())),
    }
}

// ── Catalog rules ───────────────────────────────────────────────────

pub fn validate_category_name(name: &str) -> Result<String> {
    validate_required_text(name, "Category name", MAX_NAME_LEN)
}

pub fn validate_dish_name(name: &str) -> Result<String> {
    validate_required_text(name, "Dish name", MAX_NAME_LEN)
}

pub fn validate_description(description: Option<&str>) -> Result<Option<String>> {
    validate_optional_text(description, "Description", MAX_NOTE_LEN)
}

/// Price must be a finite, non-negative number
pub fn validate_price(price: f64) -> Result<f64> {
    if !price.is_finite() {
        return Err(ValidationError("Price must be a finite number".into()));
    }
    if price < 0.0 {
        return Err(ValidationError("Price cannot be negative".into()));
    }
    Ok(price)
}

/// Size (declared and actual) within [`MAX_IMAGE_SIZE`], type in [`ALLOWED_IMAGE_TYPES`]
pub fn validate_image(image: &DishImage) -> Result<()> {
    if image.data.is_empty() {
        return Err(ValidationError("Image file is empty".into()));
    }
    let size = image.size.max(image.data.len() as u64);
    if size > MAX_IMAGE_SIZE {
        return Err(ValidationError(format!(
            "Image size must be at most 5MB ({size} bytes)"
        )));
    }
    if !ALLOWED_IMAGE_TYPES.contains(&image.content_type.as_str()) {
        return Err(ValidationError(format!(
            "Unsupported file type: {}",
            image.content_type
        )));
    }
    Ok(())
}

// ── Floor rules ─────────────────────────────────────────────────────

pub fn validate_positive(value: i64, field: &str) -> Result<i64> {
    if value <= 0 {
        return Err(ValidationError(format!("{field} must be a positive number")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(content_type: &str, size: u64, len: usize) -> DishImage {
        DishImage {
            data: vec![0u8; len],
            content_type: content_type.into(),
            size,
            filename: Some("dish.bin".into()),
        }
    }

    #[test]
    fn test_required_text_trims() {
        assert_eq!(validate_category_name("  Pizza ").unwrap(), "Pizza");
        assert!(validate_category_name("   ").is_err());
        assert!(validate_dish_name("").is_err());
    }

    #[test]
    fn test_required_text_too_long() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let err = validate_dish_name(&long).unwrap_err();
        assert!(err.0.contains("too long"));
    }

    #[test]
    fn test_optional_text_blank_is_none() {
        assert_eq!(validate_description(None).unwrap(), None);
        assert_eq!(validate_description(Some("  ")).unwrap(), None);
        assert_eq!(
            validate_description(Some(" crispy ")).unwrap().as_deref(),
            Some("crispy")
        );
    }

    #[test]
    fn test_price() {
        assert_eq!(validate_price(0.0).unwrap(), 0.0);
        assert_eq!(validate_price(12.5).unwrap(), 12.5);
        assert!(validate_price(-0.01).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_image_declared_size_over_limit() {
        let img = image("image/png", 6 * 1024 * 1024, 16);
        assert!(validate_image(&img).is_err());
    }

    #[test]
    fn test_image_actual_size_over_limit() {
        let img = image("image/png", 10, (MAX_IMAGE_SIZE + 1) as usize);
        assert!(validate_image(&img).is_err());
    }

    #[test]
    fn test_image_type_allow_list() {
        assert!(validate_image(&image("image/gif", 16, 16)).is_err());
        for ct in ALLOWED_IMAGE_TYPES {
            assert!(validate_image(&image(ct, 16, 16)).is_ok(), "{ct} should pass");
        }
    }

    #[test]
    fn test_image_exact_limit_passes() {
        let img = image("image/webp", MAX_IMAGE_SIZE, 16);
        assert!(validate_image(&img).is_ok());
    }

    #[test]
    fn test_image_empty_rejected() {
        assert!(validate_image(&image("image/png", 0, 0)).is_err());
    }

    #[test]
    fn test_positive() {
        assert_eq!(validate_positive(4, "Seats").unwrap(), 4);
        assert!(validate_positive(0, "Seats").is_err());
        assert!(validate_positive(-3, "Table number").is_err());
    }
}
