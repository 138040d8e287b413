//! Dining Table Repository

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, table_no, seats, status, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_table ORDER BY table_no"
    ))
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_table WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

pub async fn create(pool: &SqlitePool, data: &DiningTableCreate, now: i64) -> RepoResult<DiningTable> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "INSERT INTO dining_table (table_no, seats, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(data.table_no)
    .bind(data.seats)
    .bind(data.status.unwrap_or_default())
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(table)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: &DiningTableUpdate,
    now: i64,
) -> RepoResult<DiningTable> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "UPDATE dining_table SET table_no = COALESCE(?1, table_no), seats = COALESCE(?2, seats), \
         status = COALESCE(?3, status), updated_at = ?4 WHERE id = ?5 RETURNING {COLUMNS}"
    ))
    .bind(data.table_no)
    .bind(data.seats)
    .bind(data.status)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    table.ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM dining_table WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
