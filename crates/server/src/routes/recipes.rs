use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use common::types::StoredImage;
use models::{recipe, review};
use service::{recipe_service, review_service, storage};
use tracing::info;

use crate::{
    errors::JsonApiError,
    extract::{ImageUpload, JsonBody, Submission},
    metrics,
    routes::{image_response, parse_id, ServerState},
};

#[utoipa::path(
    get, path = "/recipes", tag = "recipes", operation_id = "list_recipes",
    responses((status = 200, description = "All recipes"))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<recipe::Model>>, JsonApiError> {
    let list = recipe_service::list_recipes(&state.db).await?;
    info!(count = list.len(), "list recipes");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/recipes", tag = "recipes", operation_id = "create_recipe",
    request_body = crate::openapi::RecipeInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorBody),
        (status = 415, description = "Unsupported Media Type")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    submission: Submission<recipe::RecipeFields>,
) -> Result<(StatusCode, Json<recipe::Model>), JsonApiError> {
    let with_upload = submission.image.is_some();
    let created =
        recipe_service::create_recipe(&state.db, &state.recipe_images, submission.fields, submission.image).await?;
    metrics::record_created("recipe");
    if with_upload {
        metrics::image_stored("recipe");
    }
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/recipes/{id}", tag = "recipes", operation_id = "get_recipe",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<recipe::Model>, JsonApiError> {
    let id = parse_id("recipe", &id)?;
    Ok(Json(recipe_service::get_recipe(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/recipes/{id}", tag = "recipes", operation_id = "update_recipe",
    params(("id" = String, Path, description = "Recipe id")),
    request_body = crate::openapi::RecipeInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorBody),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    submission: Submission<recipe::RecipeFields>,
) -> Result<Json<recipe::Model>, JsonApiError> {
    let id = parse_id("recipe", &id)?;
    let with_upload = submission.image.is_some();
    let updated =
        recipe_service::update_recipe(&state.db, &state.recipe_images, id, submission.fields, submission.image).await?;
    if with_upload {
        metrics::image_stored("recipe");
    }
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/recipes/{id}", tag = "recipes", operation_id = "delete_recipe",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = parse_id("recipe", &id)?;
    recipe_service::delete_recipe(&state.db, &state.recipe_images, id).await?;
    metrics::record_deleted("recipe");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post, path = "/recipes/images", tag = "recipes", operation_id = "upload_recipe_image",
    request_body(content_type = "multipart/form-data", content = crate::openapi::ImageUploadDoc),
    responses(
        (status = 201, description = "Stored", body = crate::openapi::StoredImageDoc),
        (status = 400, description = "No file part", body = crate::openapi::ErrorBody)
    )
)]
pub async fn upload_image(
    State(state): State<ServerState>,
    ImageUpload(upload): ImageUpload,
) -> Result<(StatusCode, Json<StoredImage>), JsonApiError> {
    let file_name = storage::store_image(&state.recipe_images, &upload, "recipe").await?;
    metrics::image_stored("recipe");
    Ok((StatusCode::CREATED, Json(StoredImage { file_name })))
}

#[utoipa::path(
    get, path = "/recipes/images/{filename}", tag = "recipes", operation_id = "get_recipe_image",
    params(("filename" = String, Path, description = "Stored file name")),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 400, description = "Invalid file name", body = crate::openapi::ErrorBody),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get_image(State(state): State<ServerState>, Path(filename): Path<String>) -> Result<Response, JsonApiError> {
    let bytes = storage::load_image(&state.recipe_images, &filename).await?;
    metrics::image_served("recipe");
    Ok(image_response(&filename, bytes))
}

#[utoipa::path(
    get, path = "/recipes/{id}/reviews", tag = "recipes", operation_id = "list_recipe_reviews",
    params(("id" = String, Path, description = "Recipe id")),
    responses((status = 200, description = "Reviews of the recipe"))
)]
pub async fn list_reviews(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<review::Model>>, JsonApiError> {
    let list = review_service::list_by_recipe(&state.db, &id).await?;
    info!(recipe_id = %id, count = list.len(), "list recipe reviews");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/recipes/{id}/reviews", tag = "recipes", operation_id = "create_recipe_review",
    params(("id" = String, Path, description = "Recipe id")),
    request_body = crate::openapi::ReviewInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create_review(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonBody(fields): JsonBody<review::ReviewFields>,
) -> Result<(StatusCode, Json<review::Model>), JsonApiError> {
    let created = review_service::create_for_recipe(&state.db, &id, fields).await?;
    metrics::record_created("review");
    Ok((StatusCode::CREATED, Json(created)))
}
