//! Request body extractors shared by the resource handlers.
//!
//! Recipes and challenges accept either a JSON body or a multipart form
//! whose text parts carry the same keys as the JSON object and whose first
//! file part is the image.

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use service::storage::Upload;

use crate::errors::JsonApiError;

/// Record fields plus an optional uploaded image.
#[derive(Debug)]
pub struct Submission<T> {
    pub fields: T,
    pub image: Option<Upload>,
}

#[async_trait]
impl<S, T> FromRequest<S> for Submission<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state).await?;
            return read_form(multipart).await;
        }
        if content_type.starts_with("application/json") {
            let Json(fields) = Json::<T>::from_request(req, state).await?;
            return Ok(Self { fields, image: None });
        }
        Err(JsonApiError::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Unsupported Media Type",
            Some("expected application/json or multipart/form-data".into()),
        ))
    }
}

async fn read_form<T: DeserializeOwned>(mut multipart: Multipart) -> Result<Submission<T>, JsonApiError> {
    let mut map = Map::new();
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if let Some(file_name) = field.file_name().map(str::to_string) {
            let bytes = field.bytes().await?;
            // browsers send an empty part when no file was chosen
            if image.is_none() && !bytes.is_empty() {
                image = Some(Upload::new(file_name, bytes.to_vec()));
            }
            continue;
        }
        let text = field.text().await?;
        if !name.is_empty() {
            map.insert(name, Value::String(text));
        }
    }

    let fields = serde_json::from_value(Value::Object(map))
        .map_err(|e| JsonApiError::bad_request(format!("invalid form fields: {e}")))?;
    Ok(Submission { fields, image })
}

/// JSON body whose rejections use the API error shape.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// First non-empty file part of a multipart form.
#[derive(Debug)]
pub struct ImageUpload(pub Upload);

#[async_trait]
impl<S> FromRequest<S> for ImageUpload
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await?;
        while let Some(field) = multipart.next_field().await? {
            let Some(file_name) = field.file_name().map(str::to_string) else {
                continue;
            };
            let bytes = field.bytes().await?;
            if !bytes.is_empty() {
                return Ok(Self(Upload::new(file_name, bytes.to_vec())));
            }
        }
        Err(JsonApiError::bad_request("multipart form contains no file"))
    }
}
