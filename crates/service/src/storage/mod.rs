//! File-reference storage for uploaded images.
//!
//! Records keep only the generated file name; the bytes live in a flat
//! directory owned by a [`FileStore`]. A file belongs to at most one record,
//! so removing a record may remove its file.

pub mod file_store;

pub use file_store::{content_type_for, sanitize_file_name, FileStore, StorageError, Upload};

use std::future::Future;

use tracing::{info, warn};

use crate::errors::ServiceError;

/// Outcome of resolving the image part of a create or update request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageChange {
    /// No image supplied.
    Keep,
    /// A new file was written as part of this request.
    Stored(String),
    /// The request named a file uploaded earlier.
    Referenced(String),
}

impl ImageChange {
    pub fn name(&self) -> Option<&str> {
        match self {
            ImageChange::Keep => None,
            ImageChange::Stored(n) | ImageChange::Referenced(n) => Some(n),
        }
    }

    /// Image the record carries after this change: the new one if any, else `current`.
    pub fn or_keep(&self, current: Option<&str>) -> Option<String> {
        self.name().or(current).map(str::to_string)
    }
}

/// Rejection for a referenced image another record already points at.
pub fn already_claimed(name: &str) -> ServiceError {
    ServiceError::Validation(format!("image {name} is already used by another record"))
}

/// Store an uploaded file, or check that a referenced one exists.
///
/// An upload takes precedence over a referenced name.
pub async fn prepare_image(
    store: &FileStore,
    upload: Option<&Upload>,
    referenced: Option<&str>,
) -> Result<ImageChange, ServiceError> {
    if let Some(upload) = upload.filter(|u| !u.is_empty()) {
        let name = store.store(upload).await?;
        return Ok(ImageChange::Stored(name));
    }
    match referenced.map(str::trim).filter(|r| !r.is_empty()) {
        Some(name) => {
            if store.exists(name).await? {
                Ok(ImageChange::Referenced(name.to_string()))
            } else {
                Err(ServiceError::Validation(format!("image {name} does not exist")))
            }
        }
        None => Ok(ImageChange::Keep),
    }
}

/// Await the database write for a request carrying `change`.
///
/// When the write fails, a file stored for this request is removed again.
pub async fn commit<T, E>(
    store: &FileStore,
    change: &ImageChange,
    write: impl Future<Output = Result<T, E>>,
) -> Result<T, ServiceError>
where
    ServiceError: From<E>,
{
    match write.await {
        Ok(value) => Ok(value),
        Err(e) => {
            rollback(store, change).await;
            Err(e.into())
        }
    }
}

/// Remove `old` once the record has moved on to `current`.
pub async fn retire(store: &FileStore, old: Option<&str>, current: Option<&str>) {
    if let Some(old) = old.filter(|o| current != Some(*o)) {
        discard(store, old).await;
    }
}

/// Store a standalone upload for `kind` records and return its generated name.
pub async fn store_image(store: &FileStore, upload: &Upload, kind: &str) -> Result<String, ServiceError> {
    if upload.is_empty() {
        return Err(ServiceError::Validation("image file is empty".into()));
    }
    let name = store.store(upload).await?;
    info!(kind, file = %name, "image stored");
    Ok(name)
}

/// Bytes of a stored image, `NotFound` when the file is absent.
pub async fn load_image(store: &FileStore, name: &str) -> Result<Vec<u8>, ServiceError> {
    store.resolve(name).await.map_err(|e| match e {
        StorageError::NotFound(_) => ServiceError::not_found("image", name),
        other => other.into(),
    })
}

/// Undo a file written for a request whose database write failed.
pub async fn rollback(store: &FileStore, change: &ImageChange) {
    if let ImageChange::Stored(name) = change {
        discard(store, name).await;
    }
}

/// Best-effort removal of a file no record points at any more.
pub async fn discard(store: &FileStore, name: &str) {
    match store.delete(name).await {
        Ok(_) => {}
        Err(e) => warn!(file = %name, error = %e, "failed to remove image"),
    }
}
