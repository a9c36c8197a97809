use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use common::types::StoredImage;
use models::cooking_challenge as challenge;
use service::{challenge_service, storage};
use tracing::info;

use crate::{
    errors::JsonApiError,
    extract::{ImageUpload, Submission},
    metrics,
    routes::{image_response, parse_id, ServerState},
};

#[utoipa::path(
    get, path = "/challenges", tag = "challenges", operation_id = "list_challenges",
    responses((status = 200, description = "All challenges"))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<challenge::Model>>, JsonApiError> {
    let list = challenge_service::list_challenges(&state.db).await?;
    info!(count = list.len(), "list challenges");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/challenges", tag = "challenges", operation_id = "create_challenge",
    request_body = crate::openapi::ChallengeInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    submission: Submission<challenge::ChallengeFields>,
) -> Result<(StatusCode, Json<challenge::Model>), JsonApiError> {
    let with_upload = submission.image.is_some();
    let created = challenge_service::create_challenge(
        &state.db,
        &state.challenge_images,
        submission.fields,
        submission.image,
    )
    .await?;
    metrics::record_created("challenge");
    if with_upload {
        metrics::image_stored("challenge");
    }
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/challenges/{id}", tag = "challenges", operation_id = "get_challenge",
    params(("id" = String, Path, description = "Challenge id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<challenge::Model>, JsonApiError> {
    let id = parse_id("challenge", &id)?;
    Ok(Json(challenge_service::get_challenge(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/challenges/{id}", tag = "challenges", operation_id = "update_challenge",
    params(("id" = String, Path, description = "Challenge id")),
    request_body = crate::openapi::ChallengeInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorBody),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    submission: Submission<challenge::ChallengeFields>,
) -> Result<Json<challenge::Model>, JsonApiError> {
    let id = parse_id("challenge", &id)?;
    let with_upload = submission.image.is_some();
    let updated = challenge_service::update_challenge(
        &state.db,
        &state.challenge_images,
        id,
        submission.fields,
        submission.image,
    )
    .await?;
    if with_upload {
        metrics::image_stored("challenge");
    }
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/challenges/{id}", tag = "challenges", operation_id = "delete_challenge",
    params(("id" = String, Path, description = "Challenge id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = parse_id("challenge", &id)?;
    challenge_service::delete_challenge(&state.db, &state.challenge_images, id).await?;
    metrics::record_deleted("challenge");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post, path = "/challenges/images", tag = "challenges", operation_id = "upload_challenge_image",
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
    let file_name = storage::store_image(&state.challenge_images, &upload, "challenge").await?;
    metrics::image_stored("challenge");
    Ok((StatusCode::CREATED, Json(StoredImage { file_name })))
}

#[utoipa::path(
    get, path = "/challenges/images/{filename}", tag = "challenges", operation_id = "get_challenge_image",
    params(("filename" = String, Path, description = "Stored file name")),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get_image(State(state): State<ServerState>, Path(filename): Path<String>) -> Result<Response, JsonApiError> {
    let bytes = storage::load_image(&state.challenge_images, &filename).await?;
    metrics::image_served("challenge");
    Ok(image_response(&filename, bytes))
}
