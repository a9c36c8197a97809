use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::reminder;
use service::reminder_service;
use tracing::info;

use crate::{
    errors::JsonApiError,
    extract::JsonBody,
    metrics,
    routes::{parse_id, ServerState},
};

#[utoipa::path(
    get, path = "/reminders", tag = "reminders", operation_id = "list_reminders",
    responses((status = 200, description = "All reminders"))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<reminder::Model>>, JsonApiError> {
    let list = reminder_service::list_reminders(&state.db).await?;
    info!(count = list.len(), "list reminders");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/reminders/user/{user_id}", tag = "reminders", operation_id = "list_reminders_by_user",
    params(("user_id" = String, Path, description = "User id")),
    responses((status = 200, description = "Reminders of the user"))
)]
pub async fn list_by_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<reminder::Model>>, JsonApiError> {
    let list = reminder_service::list_by_user(&state.db, &user_id).await?;
    info!(%user_id, count = list.len(), "list reminders by user");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/reminders", tag = "reminders", operation_id = "create_reminder",
    request_body = crate::openapi::ReminderInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(fields): JsonBody<reminder::ReminderFields>,
) -> Result<(StatusCode, Json<reminder::Model>), JsonApiError> {
    let created = reminder_service::create_reminder(&state.db, fields).await?;
    metrics::record_created("reminder");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/reminders/{id}", tag = "reminders", operation_id = "get_reminder",
    params(("id" = String, Path, description = "Reminder id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<reminder::Model>, JsonApiError> {
    let id = parse_id("reminder", &id)?;
    Ok(Json(reminder_service::get_reminder(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/reminders/{id}", tag = "reminders", operation_id = "update_reminder",
    params(("id" = String, Path, description = "Reminder id")),
    request_body = crate::openapi::ReminderInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonBody(fields): JsonBody<reminder::ReminderFields>,
) -> Result<Json<reminder::Model>, JsonApiError> {
    let id = parse_id("reminder", &id)?;
    Ok(Json(reminder_service::update_reminder(&state.db, id, fields).await?))
}

#[utoipa::path(
    delete, path = "/reminders/{id}", tag = "reminders", operation_id = "delete_reminder",
    params(("id" = String, Path, description = "Reminder id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = parse_id("reminder", &id)?;
    reminder_service::delete_reminder(&state.db, id).await?;
    metrics::record_deleted("reminder");
    Ok(StatusCode::NO_CONTENT)
}
