//! Category Repository

use super::{RepoError, RepoResult};
use shared::models::Category;
use sqlx::SqliteExecutor;

const COLUMNS: &str = "id, name, description, is_active, created_at, updated_at";

/// Case-folded form stored in `name_key` (unique index)
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

pub async fn find_all<'e, E: SqliteExecutor<'e>>(
    exec: E,
    include_inactive: bool,
) -> RepoResult<Vec<Category>> {
    let sql = if include_inactive {
        format!("SELECT {COLUMNS} FROM category ORDER BY name COLLATE NOCASE, id")
    } else {
        format!("SELECT {COLUMNS} FROM category WHERE is_active = 1 ORDER BY name COLLATE NOCASE, id")
    };
    let categories = sqlx::query_as::<_, Category>(&sql).fetch_all(exec).await?;
    Ok(categories)
}

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(exec: E, id: i64) -> RepoResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(&format!("SELECT {COLUMNS} FROM category WHERE id = ?"))
        .bind(id)
        .fetch_optional(exec)
        .await?;
    Ok(category)
}

/// Lookup by case-insensitive name, active or not
pub async fn find_by_name<'e, E: SqliteExecutor<'e>>(
    exec: E,
    name: &str,
) -> RepoResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(&format!(
        "SELECT {COLUMNS} FROM category WHERE name_key = ? LIMIT 1"
    ))
    .bind(name_key(name))
    .fetch_optional(exec)
    .await?;
    Ok(category)
}

pub async fn create<'e, E: SqliteExecutor<'e>>(
    exec: E,
    name: &str,
    description: Option<&str>,
    now: i64,
) -> RepoResult<Category> {
    let category = sqlx::query_as::<_, Category>(&format!(
        "INSERT INTO category (name, name_key, description, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, 1, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(name)
    .bind(name_key(name))
    .bind(description)
    .bind(now)
    .bind(now)
    .fetch_one(exec)
    .await?;
    Ok(category)
}

/// Overwrite name and description (caller merges partial updates)
pub async fn update_fields<'e, E: SqliteExecutor<'e>>(
    exec: E,
    id: i64,
    name: &str,
    description: Option<&str>,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE category SET name = ?, name_key = ?, description = ?, updated_at = ? WHERE id = ?",
    )
    .bind(name)
    .bind(name_key(name))
    .bind(description)
    .bind(now)
    .bind(id)
    .execute(exec)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    Ok(())
}

pub async fn set_active<'e, E: SqliteExecutor<'e>>(
    exec: E,
    id: i64,
    is_active: bool,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE category SET is_active = ?, updated_at = ? WHERE id = ?")
        .bind(is_active)
        .bind(now)
        .bind(id)
        .execute(exec)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    Ok(())
}
