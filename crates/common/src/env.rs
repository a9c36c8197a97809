//! Environment/runtime helpers
//!
//! Sanity checks to ensure upload directories exist at startup.

use tracing::{info, warn};

/// Create every upload directory that is missing.
///
/// A directory that cannot be created fails startup, since every image
/// upload into it would fail later anyway.
pub async fn ensure_upload_dirs(dirs: &[&str]) -> anyhow::Result<()> {
    for dir in dirs {
        if tokio::fs::metadata(dir).await.is_ok() {
            continue;
        }
        warn!(%dir, "upload directory missing; creating it");
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {dir}: {e}"))?;
        info!(%dir, "upload directory created");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_dirs_and_tolerates_existing() -> anyhow::Result<()> {
        let base = std::env::temp_dir().join(format!("cookhub_env_{}", uuid::Uuid::new_v4()));
        let a = base.join("a");
        let b = base.join("b");
        tokio::fs::create_dir_all(&b).await?;

        let a_str = a.to_string_lossy().to_string();
        let b_str = b.to_string_lossy().to_string();
        ensure_upload_dirs(&[a_str.as_str(), b_str.as_str()]).await?;

        assert!(tokio::fs::metadata(&a).await?.is_dir());
        assert!(tokio::fs::metadata(&b).await?.is_dir());

        let _ = tokio::fs::remove_dir_all(&base).await;
        Ok(())
    }
}
