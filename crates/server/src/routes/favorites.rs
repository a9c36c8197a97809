use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::favorite;
use service::favorite_service;
use tracing::info;

use crate::{
    errors::JsonApiError,
    extract::JsonBody,
    metrics,
    routes::{parse_id, ServerState},
};

#[utoipa::path(
    get, path = "/favorites", tag = "favorites", operation_id = "list_favorites",
    responses((status = 200, description = "All favorites"))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<favorite::Model>>, JsonApiError> {
    let list = favorite_service::list_favorites(&state.db).await?;
    info!(count = list.len(), "list favorites");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/favorites", tag = "favorites", operation_id = "create_favorite",
    request_body = crate::openapi::FavoriteInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(fields): JsonBody<favorite::FavoriteFields>,
) -> Result<(StatusCode, Json<favorite::Model>), JsonApiError> {
    let created = favorite_service::create_favorite(&state.db, fields).await?;
    metrics::record_created("favorite");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/favorites/{id}", tag = "favorites", operation_id = "get_favorite",
    params(("id" = String, Path, description = "Favorite id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<favorite::Model>, JsonApiError> {
    let id = parse_id("favorite", &id)?;
    Ok(Json(favorite_service::get_favorite(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/favorites/{id}", tag = "favorites", operation_id = "update_favorite",
    params(("id" = String, Path, description = "Favorite id")),
    request_body = crate::openapi::FavoriteInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonBody(fields): JsonBody<favorite::FavoriteFields>,
) -> Result<Json<favorite::Model>, JsonApiError> {
    let id = parse_id("favorite", &id)?;
    Ok(Json(favorite_service::update_favorite(&state.db, id, fields).await?))
}

#[utoipa::path(
    delete, path = "/favorites/{id}", tag = "favorites", operation_id = "delete_favorite",
    params(("id" = String, Path, description = "Favorite id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = parse_id("favorite", &id)?;
    favorite_service::delete_favorite(&state.db, id).await?;
    metrics::record_deleted("favorite");
    Ok(StatusCode::NO_CONTENT)
}
