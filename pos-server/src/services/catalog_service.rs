//! Catalog Service - category and dish consistency rules
//!
//! Owns every rule that spans the two tables:
//! - case-insensitive category names, exact dish names (both also backed by unique indexes)
//! - category references resolved at write time
//! - deactivation of a category, under one [`DeactivationPolicy`]
//! - dishes written under an inactive category are stored unavailable
//!
//! Multi-statement writes run inside one `BEGIN IMMEDIATE` transaction.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use shared::error::{AppError, ErrorCode};
use shared::models::{
    Category, CategoryCreate, CategoryDeactivation, CategoryInfo, CategoryUpdate, DishCreate,
    DishDetail, DishPage, DishQuery, DishUpdate,
};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};
use thiserror::Error;

use crate::db::DbService;
use crate::db::repository::dish::{DishFilter, DishWrite};
use crate::db::repository::{RepoError, category, dish};
use crate::utils::validation::{
    ValidationError, validate_category_name, validate_description, validate_dish_name,
    validate_image, validate_price,
};

/// Default page size for dish listings
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Largest page size a client may request
pub const MAX_PAGE_SIZE: u32 = 100;

// =============================================================================
// Policy
// =============================================================================

/// What deactivating a category does to its available dishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeactivationPolicy {
    /// Deactivate and mark every referencing dish unavailable
    #[default]
    Cascade,
    /// Refuse while any referencing dish is available
    Reject,
}

impl FromStr for DeactivationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cascade" => Ok(Self::Cascade),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "unknown category deactivation policy '{other}' (expected cascade or reject)"
            )),
        }
    }
}

impl fmt::Display for DeactivationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cascade => f.write_str("cascade"),
            Self::Reject => f.write_str("reject"),
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Category,
    Dish,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => f.write_str("Category"),
            Self::Dish => f.write_str("Dish"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    #[error("{entity} '{name}' already exists")]
    DuplicateName { entity: Entity, name: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i64 },

    /// A dish points at a category that does not exist
    #[error("Category {0} not found")]
    CategoryNotFound(i64),

    #[error("Category {id} has {available_dishes} available dishes")]
    CategoryInUse { id: i64, available_dishes: i64 },

    #[error("Database error: {0}")]
    Database(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::Validation(err.0)
    }
}

impl From<RepoError> for CatalogError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Validation(msg) => CatalogError::Validation(msg),
            RepoError::NotFound(msg) | RepoError::Duplicate(msg) | RepoError::Database(msg) => {
                CatalogError::Database(msg)
            }
        }
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        CatalogError::Database(err.to_string())
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::Validation(_) => AppError::validation(message),
            CatalogError::DuplicateName { entity, name } => {
                let code = match entity {
                    Entity::Category => ErrorCode::CategoryNameExists,
                    Entity::Dish => ErrorCode::DishNameExists,
                };
                AppError::with_message(code, message).with_detail("name", name)
            }
            CatalogError::NotFound { entity, id } => {
                let code = match entity {
                    Entity::Category => ErrorCode::NotFound,
                    Entity::Dish => ErrorCode::DishNotFound,
                };
                AppError::with_message(code, message).with_detail("id", id)
            }
            CatalogError::CategoryNotFound(id) => {
                AppError::with_message(ErrorCode::CategoryNotFound, message)
                    .with_detail("category", id)
            }
            CatalogError::CategoryInUse {
                id,
                available_dishes,
            } => AppError::with_message(ErrorCode::CategoryInUse, message)
                .with_detail("id", id)
                .with_detail("available_dishes", available_dishes),
            CatalogError::Database(_) => AppError::database(message),
        }
    }
}

/// Map a unique-index violation on a name column to `DuplicateName`
fn duplicate_as(entity: Entity, name: &str) -> impl FnOnce(RepoError) -> CatalogError + '_ {
    move |err| match err {
        RepoError::Duplicate(_) => CatalogError::DuplicateName {
            entity,
            name: name.to_string(),
        },
        other => other.into(),
    }
}

/// Map a dish write failure: duplicate name, or a dangling category reference
fn dish_write_error(name: &str, category_id: i64) -> impl FnOnce(RepoError) -> CatalogError + '_ {
    move |err| match err {
        RepoError::Duplicate(_) => CatalogError::DuplicateName {
            entity: Entity::Dish,
            name: name.to_string(),
        },
        RepoError::Validation(msg) if msg.contains("FOREIGN KEY") => {
            CatalogError::CategoryNotFound(category_id)
        }
        other => other.into(),
    }
}

fn required<T>(value: Option<T>, field: &str) -> CatalogResult<T> {
    value.ok_or_else(|| CatalogError::Validation(format!("{field} is required")))
}

// =============================================================================
// Service
// =============================================================================

/// Where a dish image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DishImageSource {
    Stored { data: Vec<u8>, content_type: String },
    /// No stored image; clients should load this URL instead
    Placeholder(String),
}

#[derive(Clone)]
pub struct CatalogService {
    db: DbService,
    policy: DeactivationPolicy,
    placeholder_url: String,
}

impl CatalogService {
    pub fn new(db: DbService, policy: DeactivationPolicy, placeholder_url: impl Into<String>) -> Self {
        Self {
            db,
            policy,
            placeholder_url: placeholder_url.into(),
        }
    }

    pub fn policy(&self) -> DeactivationPolicy {
        self.policy
    }

    pub fn placeholder_url(&self) -> &str {
        &self.placeholder_url
    }

    fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    pub async fn create_category(&self, data: CategoryCreate) -> CatalogResult<Category> {
        let name = validate_category_name(&data.name)?;
        let description = validate_description(data.description.as_deref())?;

        if category::find_by_name(self.pool(), &name).await?.is_some() {
            return Err(CatalogError::DuplicateName {
                entity: Entity::Category,
                name,
            });
        }

        let created = category::create(self.pool(), &name, description.as_deref(), now_millis())
            .await
            .map_err(duplicate_as(Entity::Category, &name))?;

        tracing::info!(id = created.id, name = %created.name, "Category created");
        Ok(created)
    }

    /// Ordered by name; active only unless `include_inactive`
    pub async fn list_categories(&self, include_inactive: bool) -> CatalogResult<Vec<Category>> {
        Ok(category::find_all(self.pool(), include_inactive).await?)
    }

    pub async fn get_category(&self, id: i64) -> CatalogResult<Category> {
        category::find_by_id(self.pool(), id)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: Entity::Category,
                id,
            })
    }

    /// Partial update. `is_active: false` runs the deactivation protocol,
    /// `is_active: true` reactivates without touching dish availability.
    pub async fn update_category(&self, id: i64, data: CategoryUpdate) -> CatalogResult<Category> {
        let name = data.name.as_deref().map(validate_category_name).transpose()?;
        let description = match data.description.as_deref() {
            Some(d) => Some(validate_description(Some(d))?),
            None => None,
        };

        let mut tx = self.db.begin_write().await?;
        let current = category::find_by_id(&mut *tx, id)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: Entity::Category,
                id,
            })?;

        if let Some(name) = &name
            && let Some(other) = category::find_by_name(&mut *tx, name).await?
            && other.id != id
        {
            return Err(CatalogError::DuplicateName {
                entity: Entity::Category,
                name: name.clone(),
            });
        }

        let now = now_millis();
        if name.is_some() || description.is_some() {
            let new_name = name.as_deref().unwrap_or(&current.name);
            let new_description = match &description {
                Some(d) => d.as_deref(),
                None => current.description.as_deref(),
            };
            category::update_fields(&mut *tx, id, new_name, new_description, now)
                .await
                .map_err(duplicate_as(Entity::Category, new_name))?;
        }

        match data.is_active {
            Some(false) if current.is_active => {
                self.deactivate_in(&mut *tx, id, now).await?;
            }
            Some(true) if !current.is_active => {
                category::set_active(&mut *tx, id, true, now).await?;
                tracing::info!(id, "Category reactivated");
            }
            _ => {}
        }

        let updated = category::find_by_id(&mut *tx, id)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: Entity::Category,
                id,
            })?;
        tx.commit().await?;

        tracing::info!(id, name = %updated.name, "Category updated");
        Ok(updated)
    }

    /// Soft delete. Already-inactive categories are a no-op success.
    pub async fn deactivate_category(&self, id: i64) -> CatalogResult<CategoryDeactivation> {
        let mut tx = self.db.begin_write().await?;
        let current = category::find_by_id(&mut *tx, id)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: Entity::Category,
                id,
            })?;

        if !current.is_active {
            tx.commit().await?;
            return Ok(CategoryDeactivation {
                category: current,
                dishes_marked_unavailable: 0,
            });
        }

        let marked = self.deactivate_in(&mut *tx, id, now_millis()).await?;
        let category = category::find_by_id(&mut *tx, id)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: Entity::Category,
                id,
            })?;
        tx.commit().await?;

        Ok(CategoryDeactivation {
            category,
            dishes_marked_unavailable: marked,
        })
    }

    /// Deactivate an active category inside the caller's transaction.
    ///
    /// Under [`DeactivationPolicy::Reject`] nothing is written when an
    /// available dish still references the category.
    async fn deactivate_in(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        now: i64,
    ) -> CatalogResult<u64> {
        let available = dish::count_available_in_category(&mut *conn, id).await?;
        if self.policy == DeactivationPolicy::Reject && available > 0 {
            tracing::info!(id, available, "Category deactivation rejected");
            return Err(CatalogError::CategoryInUse {
                id,
                available_dishes: available,
            });
        }

        category::set_active(&mut *conn, id, false, now).await?;
        let marked = dish::mark_unavailable_by_category(&mut *conn, id, now).await?;

        tracing::info!(id, policy = %self.policy, dishes_marked_unavailable = marked, "Category deactivated");
        Ok(marked)
    }

    // -------------------------------------------------------------------------
    // Dishes
    // -------------------------------------------------------------------------

    pub async fn create_dish(&self, data: DishCreate) -> CatalogResult<DishDetail> {
        let name = validate_dish_name(&required(data.name, "Dish name")?)?;
        let price = validate_price(required(data.price, "Price")?)?;
        let category_id = required(data.category_id, "Category")?;
        let description = validate_description(data.description.as_deref())?;
        if let Some(image) = &data.image {
            validate_image(image)?;
        }

        let mut tx = self.db.begin_write().await?;
        let category = category::find_by_id(&mut *tx, category_id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(category_id))?;

        if dish::find_id_by_name(&mut *tx, &name).await?.is_some() {
            return Err(CatalogError::DuplicateName {
                entity: Entity::Dish,
                name,
            });
        }

        let write = DishWrite {
            name: &name,
            price,
            category_id,
            description: description.as_deref(),
            is_available: data.is_available.unwrap_or(true) && category.is_active,
            image: data.image.as_ref(),
        };
        let created = dish::create(&mut *tx, &write, now_millis())
            .await
            .map_err(dish_write_error(&name, category_id))?;
        tx.commit().await?;

        tracing::info!(id = created.id, name = %created.name, category_id, "Dish created");
        Ok(DishDetail::project(created, Some(&category), &self.placeholder_url))
    }

    /// Filtered page of dishes, ordered by name, without image bytes
    pub async fn list_dishes(&self, query: DishQuery) -> CatalogResult<DishPage> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let filter = DishFilter {
            category_id: query.category,
            available: query.available,
            search: query
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        };

        let total = dish::count(self.pool(), &filter).await?;
        let offset = i64::from(page - 1) * i64::from(limit);
        let mut items = dish::list(self.pool(), &filter, offset, i64::from(limit)).await?;

        let categories: HashMap<i64, CategoryInfo> = category::find_all(self.pool(), true)
            .await?
            .iter()
            .map(|c| (c.id, CategoryInfo::from(c)))
            .collect();

        for item in &mut items {
            item.image_url = if item.has_image {
                format!("/api/dishes/{}/image", item.id)
            } else {
                self.placeholder_url.clone()
            };
            item.category_info = categories.get(&item.category_id).cloned();
        }

        let total_pages = ((total.max(0) as u64).div_ceil(u64::from(limit))) as u32;
        Ok(DishPage {
            count: items.len(),
            items,
            total,
            page,
            limit,
            total_pages,
        })
    }

    pub async fn get_dish(&self, id: i64) -> CatalogResult<DishDetail> {
        let found = dish::find_by_id(self.pool(), id)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: Entity::Dish,
                id,
            })?;
        let category = category::find_by_id(self.pool(), found.category_id).await?;
        Ok(DishDetail::project(found, category.as_ref(), &self.placeholder_url))
    }

    /// Partial update. A new category is re-validated; a new image replaces the old one.
    pub async fn update_dish(&self, id: i64, data: DishUpdate) -> CatalogResult<DishDetail> {
        let name = data.name.as_deref().map(validate_dish_name).transpose()?;
        let price = data.price.map(validate_price).transpose()?;
        let description = match data.description.as_deref() {
            Some(d) => Some(validate_description(Some(d))?),
            None => None,
        };
        if let Some(image) = &data.image {
            validate_image(image)?;
        }

        let mut tx = self.db.begin_write().await?;
        let current = dish::find_by_id(&mut *tx, id)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: Entity::Dish,
                id,
            })?;

        let category_id = data.category_id.unwrap_or(current.category_id);
        let category = category::find_by_id(&mut *tx, category_id).await?;
        let category = match (category, data.category_id) {
            (Some(c), _) => Some(c),
            (None, Some(requested)) => return Err(CatalogError::CategoryNotFound(requested)),
            // Stored reference is not re-validated
            (None, None) => None,
        };

        let name = name.unwrap_or_else(|| current.name.clone());
        if name != current.name
            && let Some(other) = dish::find_id_by_name(&mut *tx, &name).await?
            && other != id
        {
            return Err(CatalogError::DuplicateName {
                entity: Entity::Dish,
                name,
            });
        }

        let category_active = category.as_ref().is_none_or(|c| c.is_active);
        let write = DishWrite {
            name: &name,
            price: price.unwrap_or(current.price),
            category_id,
            description: match &description {
                Some(d) => d.as_deref(),
                None => current.description.as_deref(),
            },
            is_available: data.is_available.unwrap_or(current.is_available) && category_active,
            image: data.image.as_ref(),
        };
        let updated = dish::update(&mut *tx, id, &write, now_millis())
            .await
            .map_err(dish_write_error(&name, category_id))?;
        tx.commit().await?;

        tracing::info!(id, name = %updated.name, image_replaced = data.image.is_some(), "Dish updated");
        Ok(DishDetail::project(updated, category.as_ref(), &self.placeholder_url))
    }

    /// Hard delete
    pub async fn delete_dish(&self, id: i64) -> CatalogResult<()> {
        if !dish::delete(self.pool(), id).await? {
            return Err(CatalogError::NotFound {
                entity: Entity::Dish,
                id,
            });
        }
        tracing::info!(id, "Dish deleted");
        Ok(())
    }

    pub async fn get_dish_image(&self, id: i64) -> CatalogResult<DishImageSource> {
        match dish::find_image(self.pool(), id).await? {
            None => Err(CatalogError::NotFound {
                entity: Entity::Dish,
                id,
            }),
            Some(None) => Ok(DishImageSource::Placeholder(self.placeholder_url.clone())),
            Some(Some((data, content_type))) => Ok(DishImageSource::Stored { data, content_type }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!("cascade".parse(), Ok(DeactivationPolicy::Cascade));
        assert_eq!(" Reject ".parse(), Ok(DeactivationPolicy::Reject));
        assert!("hybrid".parse::<DeactivationPolicy>().is_err());
        assert_eq!(DeactivationPolicy::default(), DeactivationPolicy::Cascade);
    }

    #[test]
    fn test_error_codes() {
        let err: AppError = CatalogError::DuplicateName {
            entity: Entity::Category,
            name: "Starters".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::CategoryNameExists);
        assert_eq!(err.message, "Category 'Starters' already exists");

        let err: AppError = CatalogError::DuplicateName {
            entity: Entity::Dish,
            name: "Tiramisu".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::DishNameExists);

        let err: AppError = CatalogError::CategoryNotFound(42).into();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);

        let err: AppError = CatalogError::NotFound {
            entity: Entity::Dish,
            id: 9,
        }
        .into();
        assert_eq!(err.code, ErrorCode::DishNotFound);
        assert_eq!(err.http_status(), http::StatusCode::NOT_FOUND);

        let err: AppError = CatalogError::NotFound {
            entity: Entity::Category,
            id: 9,
        }
        .into();
        assert_eq!(err.http_status(), http::StatusCode::NOT_FOUND);

        let err: AppError = CatalogError::CategoryInUse {
            id: 1,
            available_dishes: 3,
        }
        .into();
        assert_eq!(err.code, ErrorCode::CategoryInUse);
        assert_eq!(err.http_status(), http::StatusCode::CONFLICT);

        let err: AppError = CatalogError::Database("disk I/O error".into()).into();
        assert_eq!(err.http_status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_dish_write_error_mapping() {
        let err = dish_write_error("Tiramisu", 4)(RepoError::Duplicate("UNIQUE constraint failed: dish.name".into()));
        assert!(matches!(
            err,
            CatalogError::DuplicateName { entity: Entity::Dish, ref name } if name == "Tiramisu"
        ));

        let err = dish_write_error("Tiramisu", 4)(RepoError::Validation("FOREIGN KEY constraint failed".into()));
        assert!(matches!(err, CatalogError::CategoryNotFound(4)));

        let err = dish_write_error("Tiramisu", 4)(RepoError::Database("disk I/O error".into()));
        assert!(matches!(err, CatalogError::Database(_)));
    }
}
