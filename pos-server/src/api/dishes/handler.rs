//! Dish API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use shared::models::{DishDetail, DishPage, DishQuery};

use super::form::DishForm;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::DishImageSource;
use crate::utils::{ApiResponse, AppQuery, AppResult, ok, ok_with_message};

/// GET /api/dishes - filtered page (`category`, `available`, `search`, `page`, `limit`)
pub async fn list(
    State(state): State<ServerState>,
    AppQuery(query): AppQuery<DishQuery>,
) -> AppResult<Json<ApiResponse<DishPage>>> {
    let page = state.catalog.list_dishes(query).await?;
    Ok(ok(page))
}

/// GET /api/dishes/{id} - detail with inline image
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<DishDetail>>> {
    let dish = state.catalog.get_dish(id).await?;
    Ok(ok(dish))
}

/// POST /api/dishes - multipart create
pub async fn create(
    State(state): State<ServerState>,
    _user: CurrentUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<DishDetail>>)> {
    let payload = DishForm::read(multipart).await?.into_create()?;
    let dish = state.catalog.create_dish(payload).await?;
    Ok((StatusCode::CREATED, ok_with_message(dish, "Dish created")))
}

/// PUT /api/dishes/{id} - multipart partial update
pub async fn update(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<DishDetail>>> {
    let payload = DishForm::read(multipart).await?.into_update()?;
    let dish = state.catalog.update_dish(id, payload).await?;
    Ok(ok_with_message(dish, "Dish updated"))
}

/// DELETE /api/dishes/{id}
pub async fn delete(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.catalog.delete_dish(id).await?;
    Ok(ok_with_message((), "Dish deleted"))
}

/// GET /api/dishes/{id}/image - raw bytes, or a redirect to the placeholder
pub async fn image(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Response> {
    let response = match state.catalog.get_dish_image(id).await? {
        DishImageSource::Stored { data, content_type } => (
            [
                (header::CONTENT_TYPE, content_type),
                (header::CACHE_CONTROL, "public, max-age=86400".to_string()),
            ],
            data,
        )
            .into_response(),
        DishImageSource::Placeholder(url) => Redirect::temporary(&url).into_response(),
    };
    Ok(response)
}
