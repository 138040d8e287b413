//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use shared::util::now_millis;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, dining_table};
use crate::utils::validation::validate_positive;
use crate::utils::{ApiResponse, AppError, AppJson, AppResult, ErrorCode, ok, ok_with_message};

fn table_error(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::TableNumberExists),
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::TableNotFound, msg),
        other => other.into(),
    }
}

/// GET /api/tables - ordered by table number
pub async fn list(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<DiningTable>>>> {
    let tables = dining_table::find_all(&state.db.pool).await?;
    Ok(ok(tables))
}

/// POST /api/tables
pub async fn create(
    State(state): State<ServerState>,
    _user: CurrentUser,
    AppJson(payload): AppJson<DiningTableCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<DiningTable>>)> {
    validate_positive(payload.table_no, "Table number")?;
    validate_positive(payload.seats, "Seats")?;

    let table = dining_table::create(&state.db.pool, &payload, now_millis())
        .await
        .map_err(table_error)?;

    tracing::info!(id = table.id, table_no = table.table_no, "Table created");
    Ok((StatusCode::CREATED, ok_with_message(table, "Table created")))
}

/// PUT /api/tables/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<DiningTableUpdate>,
) -> AppResult<Json<ApiResponse<DiningTable>>> {
    if let Some(table_no) = payload.table_no {
        validate_positive(table_no, "Table number")?;
    }
    if let Some(seats) = payload.seats {
        validate_positive(seats, "Seats")?;
    }

    let table = dining_table::update(&state.db.pool, id, &payload, now_millis())
        .await
        .map_err(table_error)?;

    tracing::info!(id, status = ?table.status, "Table updated");
    Ok(ok_with_message(table, "Table updated"))
}

/// DELETE /api/tables/{id}
pub async fn delete(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !dining_table::delete(&state.db.pool, id).await.map_err(table_error)? {
        return Err(AppError::with_message(
            ErrorCode::TableNotFound,
            format!("Table {id} not found"),
        ));
    }
    tracing::info!(id, "Table deleted");
    Ok(ok_with_message((), "Table deleted"))
}
