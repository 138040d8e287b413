//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity
///
/// Never hard-deleted: removal flips `is_active` to false.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    pub description: Option<String>,
}

/// Update category payload
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Category projection embedded in dish views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
}

impl From<&Category> for CategoryInfo {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            is_active: c.is_active,
        }
    }
}

/// Result of a deactivation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDeactivation {
    pub category: Category,
    /// Dishes flipped to unavailable by this call (0 when already inactive)
    pub dishes_marked_unavailable: u64,
}
