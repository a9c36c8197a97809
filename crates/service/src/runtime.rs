//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server crate can prepare the
//! upload directories without depending on `common` for it.

/// Ensure every upload directory exists before serving requests.
pub async fn ensure_env(upload_dirs: &[&str]) -> anyhow::Result<()> {
    common::env::ensure_upload_dirs(upload_dirs).await
}
