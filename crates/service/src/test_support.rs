#![cfg(test)]
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::storage::FileStore;

/// Fresh in-memory database with migrations applied; one per test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}

/// File store rooted in a unique temp directory.
pub fn temp_store(label: &str) -> FileStore {
    FileStore::new(std::env::temp_dir().join(format!("cookhub_{label}_{}", Uuid::new_v4())))
}

pub async fn cleanup(store: &FileStore) {
    let _ = tokio::fs::remove_dir_all(store.root()).await;
}
