//! Dish Repository

use super::{RepoError, RepoResult, escape_like};
use shared::models::{Dish, DishImage, DishSummary};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, name, price, category_id, description, is_available, \
    image_data, image_content_type, image_size, image_filename, created_at, updated_at";

/// List projection: everything but the image bytes
const SUMMARY_COLUMNS: &str = "id, name, price, category_id, description, is_available, \
    (image_data IS NOT NULL AND length(image_data) > 0) AS has_image, image_content_type, \
    created_at, updated_at";

/// Column values for an insert or a full-row update
#[derive(Debug)]
pub struct DishWrite<'a> {
    pub name: &'a str,
    pub price: f64,
    pub category_id: i64,
    pub description: Option<&'a str>,
    pub is_available: bool,
    pub image: Option<&'a DishImage>,
}

/// List filters, combined with AND
#[derive(Debug, Default, Clone)]
pub struct DishFilter {
    pub category_id: Option<i64>,
    pub available: Option<bool>,
    /// Substring of name or description, ASCII case-insensitive
    pub search: Option<String>,
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &DishFilter) {
    qb.push(" WHERE 1 = 1");
    if let Some(category_id) = filter.category_id {
        qb.push(" AND category_id = ").push_bind(category_id);
    }
    if let Some(available) = filter.available {
        qb.push(" AND is_available = ").push_bind(available);
    }
    if let Some(search) = &filter.search {
        // LIKE folds ASCII case itself; the pattern is left unfolded
        let pattern = format!("%{}%", escape_like(search));
        qb.push(" AND (name LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR coalesce(description, '') LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
}

/// One page of summaries ordered by name
pub async fn list(
    pool: &SqlitePool,
    filter: &DishFilter,
    offset: i64,
    limit: i64,
) -> RepoResult<Vec<DishSummary>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {SUMMARY_COLUMNS} FROM dish"));
    push_filters(&mut qb, filter);
    qb.push(" ORDER BY name COLLATE NOCASE, id LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    let dishes = qb.build_query_as::<DishSummary>().fetch_all(pool).await?;
    Ok(dishes)
}

pub async fn count(pool: &SqlitePool, filter: &DishFilter) -> RepoResult<i64> {
    let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM dish");
    push_filters(&mut qb, filter);
    let total = qb.build_query_scalar::<i64>().fetch_one(pool).await?;
    Ok(total)
}

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(exec: E, id: i64) -> RepoResult<Option<Dish>> {
    let dish = sqlx::query_as::<_, Dish>(&format!("SELECT {COLUMNS} FROM dish WHERE id = ?"))
        .bind(id)
        .fetch_optional(exec)
        .await?;
    Ok(dish)
}

/// Id of the dish holding exactly this name, if any
pub async fn find_id_by_name<'e, E: SqliteExecutor<'e>>(
    exec: E,
    name: &str,
) -> RepoResult<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM dish WHERE name = ? LIMIT 1")
        .bind(name)
        .fetch_optional(exec)
        .await?;
    Ok(id)
}

/// Stored image bytes and content type.
///
/// `None` when the dish does not exist; `Some(None)` when it has no image.
pub async fn find_image<'e, E: SqliteExecutor<'e>>(
    exec: E,
    id: i64,
) -> RepoResult<Option<Option<(Vec<u8>, String)>>> {
    let row = sqlx::query_as::<_, (Option<Vec<u8>>, Option<String>)>(
        "SELECT image_data, image_content_type FROM dish WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(exec)
    .await?;
    Ok(row.map(|(data, content_type)| match (data, content_type) {
        (Some(data), Some(ct)) if !data.is_empty() => Some((data, ct)),
        _ => None,
    }))
}

pub async fn create<'e, E: SqliteExecutor<'e>>(
    exec: E,
    data: &DishWrite<'_>,
    now: i64,
) -> RepoResult<Dish> {
    let dish = sqlx::query_as::<_, Dish>(&format!(
        "INSERT INTO dish (name, price, category_id, description, is_available, \
         image_data, image_content_type, image_size, image_filename, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(data.name)
    .bind(data.price)
    .bind(data.category_id)
    .bind(data.description)
    .bind(data.is_available)
    .bind(data.image.map(|i| i.data.as_slice()))
    .bind(data.image.map(|i| i.content_type.as_str()))
    .bind(data.image.map(|i| i.size as i64))
    .bind(data.image.and_then(|i| i.filename.as_deref()))
    .bind(now)
    .bind(now)
    .fetch_one(exec)
    .await?;
    Ok(dish)
}

/// Overwrite scalar columns; image columns change only when `data.image` is set
pub async fn update<'e, E: SqliteExecutor<'e>>(
    exec: E,
    id: i64,
    data: &DishWrite<'_>,
    now: i64,
) -> RepoResult<Dish> {
    let replace_image = data.image.is_some();
    let dish = sqlx::query_as::<_, Dish>(&format!(
        "UPDATE dish SET name = ?1, price = ?2, category_id = ?3, description = ?4, is_available = ?5, \
         image_data = CASE WHEN ?6 THEN ?7 ELSE image_data END, \
         image_content_type = CASE WHEN ?6 THEN ?8 ELSE image_content_type END, \
         image_size = CASE WHEN ?6 THEN ?9 ELSE image_size END, \
         image_filename = CASE WHEN ?6 THEN ?10 ELSE image_filename END, \
         updated_at = ?11 \
         WHERE id = ?12 RETURNING {COLUMNS}"
    ))
    .bind(data.name)
    .bind(data.price)
    .bind(data.category_id)
    .bind(data.description)
    .bind(data.is_available)
    .bind(replace_image)
    .bind(data.image.map(|i| i.data.as_slice()))
    .bind(data.image.map(|i| i.content_type.as_str()))
    .bind(data.image.map(|i| i.size as i64))
    .bind(data.image.and_then(|i| i.filename.as_deref()))
    .bind(now)
    .bind(id)
    .fetch_optional(exec)
    .await?;
    dish.ok_or_else(|| RepoError::NotFound(format!("Dish {id} not found")))
}

/// Hard delete; returns whether a row was removed
pub async fn delete<'e, E: SqliteExecutor<'e>>(exec: E, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM dish WHERE id = ?")
        .bind(id)
        .execute(exec)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn count_available_in_category<'e, E: SqliteExecutor<'e>>(
    exec: E,
    category_id: i64,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM dish WHERE category_id = ? AND is_available = 1",
    )
    .bind(category_id)
    .fetch_one(exec)
    .await?;
    Ok(count)
}

/// Bulk-mark every available dish in a category unavailable; returns rows changed
pub async fn mark_unavailable_by_category<'e, E: SqliteExecutor<'e>>(
    exec: E,
    category_id: i64,
    now: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE dish SET is_available = 0, updated_at = ? WHERE category_id = ? AND is_available = 1",
    )
    .bind(now)
    .bind(category_id)
    .execute(exec)
    .await?;
    Ok(rows.rows_affected())
}
