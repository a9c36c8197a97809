use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sea_orm::DatabaseConnection;
use service::{errors::ServiceError, storage::{content_type_for, FileStore}};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use uuid::Uuid;

use common::types::Health;

use crate::{errors::JsonApiError, metrics, openapi::ApiDoc};

pub mod challenges;
pub mod favorites;
pub mod recipes;
pub mod reminders;
pub mod reviews;

/// Shared handler state: the database pool and one image store per resource.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub recipe_images: Arc<FileStore>,
    pub challenge_images: Arc<FileStore>,
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "OK", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics_text() -> impl IntoResponse {
    let (status, body) = metrics::encode_metrics();
    (status, [(CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Parse a record id from the path. Anything that is not a UUID cannot
/// name a record, so it is reported as not found.
pub(crate) fn parse_id(entity: &str, raw: &str) -> Result<Uuid, JsonApiError> {
    Uuid::parse_str(raw).map_err(|_| ServiceError::not_found(entity, raw).into())
}

pub(crate) fn image_response(name: &str, bytes: Vec<u8>) -> Response {
    ([(CONTENT_TYPE, content_type_for(name))], bytes).into_response()
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer, max_upload_bytes: usize) -> Router {
    let meta = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/api-docs/openapi.json", get(openapi_json));

    let recipes = Router::new()
        .route("/recipes", get(recipes::list).post(recipes::create))
        .route("/recipes/images", axum::routing::post(recipes::upload_image))
        .route("/recipes/images/:filename", get(recipes::get_image))
        .route("/recipes/:id", get(recipes::get).put(recipes::update).delete(recipes::delete))
        .route("/recipes/:id/reviews", get(recipes::list_reviews).post(recipes::create_review));

    let challenges = Router::new()
        .route("/challenges", get(challenges::list).post(challenges::create))
        .route("/challenges/images", axum::routing::post(challenges::upload_image))
        .route("/challenges/images/:filename", get(challenges::get_image))
        .route("/challenges/:id", get(challenges::get).put(challenges::update).delete(challenges::delete));

    let reviews = Router::new()
        .route("/reviews", get(reviews::list).post(reviews::create))
        .route("/reviews/recipe/:recipe_id", get(reviews::list_by_recipe))
        .route("/reviews/:id", get(reviews::get).put(reviews::update).delete(reviews::delete));

    let favorites = Router::new()
        .route("/favorites", get(favorites::list).post(favorites::create))
        .route("/favorites/:id", get(favorites::get).put(favorites::update).delete(favorites::delete));

    let reminders = Router::new()
        .route("/reminders", get(reminders::list).post(reminders::create))
        .route("/reminders/user/:user_id", get(reminders::list_by_user))
        .route("/reminders/:id", get(reminders::get).put(reminders::update).delete(reminders::delete));

    meta.merge(recipes)
        .merge(challenges)
        .merge(reviews)
        .merge(favorites)
        .merge(reminders)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::{Request, StatusCode}};
    use tower::ServiceExt;

    use super::*;

    async fn router() -> anyhow::Result<Router> {
        let dir = std::env::temp_dir().join(format!("cookhub_routes_{}", Uuid::new_v4()));
        let state = ServerState {
            db: models::db::connect_in_memory().await?,
            recipe_images: Arc::new(FileStore::new(dir.join("recipes"))),
            challenge_images: Arc::new(FileStore::new(dir.join("challenges"))),
        };
        Ok(build_router(state, CorsLayer::very_permissive(), 1024))
    }

    #[tokio::test]
    async fn health_is_ok() -> anyhow::Result<()> {
        let res = router().await?.oneshot(Request::get("/health").body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::OK);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_id_is_not_found() -> anyhow::Result<()> {
        let res = router().await?.oneshot(Request::get("/favorites/123").body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn body_over_limit_is_rejected() -> anyhow::Result<()> {
        let big = format!(r#"{{"recipeName":"{}"}}"#, "x".repeat(4096));
        let req = Request::post("/favorites").header(CONTENT_TYPE, "application/json").body(Body::from(big))?;
        let res = router().await?.oneshot(req).await?;
        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
        Ok(())
    }

    #[test]
    fn image_response_sets_content_type() {
        let res = image_response("a.jpeg", b"jpg".to_vec());
        assert_eq!(res.headers()[CONTENT_TYPE], "image/jpeg");
    }
}
