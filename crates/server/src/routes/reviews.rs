use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::review;
use service::review_service;
use tracing::info;

use crate::{
    errors::JsonApiError,
    extract::JsonBody,
    metrics,
    routes::{parse_id, ServerState},
};

#[utoipa::path(
    get, path = "/reviews", tag = "reviews", operation_id = "list_reviews",
    responses((status = 200, description = "All reviews"))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<review::Model>>, JsonApiError> {
    let list = review_service::list_reviews(&state.db).await?;
    info!(count = list.len(), "list reviews");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/reviews/recipe/{recipe_id}", tag = "reviews", operation_id = "list_reviews_by_recipe",
    params(("recipe_id" = String, Path, description = "Recipe id")),
    responses((status = 200, description = "Reviews of the recipe"))
)]
pub async fn list_by_recipe(
    State(state): State<ServerState>,
    Path(recipe_id): Path<String>,
) -> Result<Json<Vec<review::Model>>, JsonApiError> {
    let list = review_service::list_by_recipe(&state.db, &recipe_id).await?;
    info!(%recipe_id, count = list.len(), "list reviews by recipe");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/reviews", tag = "reviews", operation_id = "create_review",
    request_body = crate::openapi::ReviewInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(fields): JsonBody<review::ReviewFields>,
) -> Result<(StatusCode, Json<review::Model>), JsonApiError> {
    let created = review_service::create_review(&state.db, fields).await?;
    metrics::record_created("review");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/reviews/{id}", tag = "reviews", operation_id = "get_review",
    params(("id" = String, Path, description = "Review id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<review::Model>, JsonApiError> {
    let id = parse_id("review", &id)?;
    Ok(Json(review_service::get_review(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/reviews/{id}", tag = "reviews", operation_id = "update_review",
    params(("id" = String, Path, description = "Review id")),
    request_body = crate::openapi::ReviewInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorBody),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonBody(fields): JsonBody<review::ReviewFields>,
) -> Result<Json<review::Model>, JsonApiError> {
    let id = parse_id("review", &id)?;
    Ok(Json(review_service::update_review(&state.db, id, fields).await?))
}

#[utoipa::path(
    delete, path = "/reviews/{id}", tag = "reviews", operation_id = "delete_review",
    params(("id" = String, Path, description = "Review id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = parse_id("review", &id)?;
    review_service::delete_review(&state.db, id).await?;
    metrics::record_deleted("review");
    Ok(StatusCode::NO_CONTENT)
}
