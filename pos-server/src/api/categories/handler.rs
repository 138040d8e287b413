//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{Category, CategoryCreate, CategoryDeactivation, CategoryUpdate};

use crate::auth::{AdminUser, CurrentUser};
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppJson, AppResult, ok, ok_with_message};

/// GET /api/categories - active categories by name
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let categories = state.catalog.list_categories(false).await?;
    Ok(ok(categories))
}

/// GET /api/categories/all - including inactive
pub async fn list_all(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let categories = state.catalog.list_categories(true).await?;
    Ok(ok(categories))
}

/// GET /api/categories/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let category = state.catalog.get_category(id).await?;
    Ok(ok(category))
}

/// POST /api/categories
pub async fn create(
    State(state): State<ServerState>,
    _admin: AdminUser,
    AppJson(payload): AppJson<CategoryCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    let category = state.catalog.create_category(payload).await?;
    Ok((
        StatusCode::CREATED,
        ok_with_message(category, "Category created"),
    ))
}

/// PUT /api/categories/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<CategoryUpdate>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let category = state.catalog.update_category(id, payload).await?;
    Ok(ok_with_message(category, "Category updated"))
}

/// DELETE /api/categories/{id} - deactivate (soft delete)
pub async fn delete(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<CategoryDeactivation>>> {
    let outcome = state.catalog.deactivate_category(id).await?;
    Ok(ok_with_message(outcome, "Category deactivated"))
}
