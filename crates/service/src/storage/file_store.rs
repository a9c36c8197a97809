use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("file {0} not found")]
    NotFound(String),
    #[error("invalid file name: {0:?}")]
    InvalidName(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// An uploaded file as received from the client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Upload {
    /// Name the client sent; only used to derive the stored name.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { file_name: file_name.into(), bytes: bytes.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Flat directory of uploaded files addressed by generated names.
///
/// Stored names have the form `<uuid>_<sanitised original name>` and are
/// never reused, so two uploads with the same original name coexist.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write the upload under a fresh name and return that name.
    pub async fn store(&self, upload: &Upload) -> Result<String, StorageError> {
        fs::create_dir_all(&self.root).await?;
        let name = format!("{}_{}", Uuid::new_v4().simple(), sanitize_file_name(&upload.file_name));
        let path = self.root.join(&name);

        let mut file = fs::OpenOptions::new().write(true).create_new(true).open(&path).await?;
        file.write_all(&upload.bytes).await?;
        file.flush().await?;

        debug!(file = %name, bytes = upload.bytes.len(), "stored upload");
        Ok(name)
    }

    /// Read the bytes of a stored file.
    pub async fn resolve(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(name)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a stored file. Returns `false` when it was already absent.
    pub async fn delete(&self, name: &str) -> Result<bool, StorageError> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn exists(&self, name: &str) -> Result<bool, StorageError> {
        let path = self.path_for(name)?;
        Ok(fs::metadata(&path).await.map(|m| m.is_file()).unwrap_or(false))
    }

    // Only a single plain component is accepted so lookups stay inside `root`.
    fn path_for(&self, name: &str) -> Result<PathBuf, StorageError> {
        let mut components = Path::new(name).components();
        let single = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(c)), None) if c == name
        );
        if !single || name.contains('\\') {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

/// Longest stem kept from a client-supplied name, in bytes.
pub const MAX_STEM_LEN: usize = 100;
/// Longest extension kept, in bytes and without the dot.
pub const MAX_EXT_LEN: usize = 16;

/// Reduce a client-supplied name to a safe single component of bounded length.
///
/// The stem is cut to [`MAX_STEM_LEN`] bytes and the extension to [`MAX_EXT_LEN`],
/// so `<uuid>_<name>` stays well under common file-name limits.
pub fn sanitize_file_name(original: &str) -> String {
    let last = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        return "upload".to_string();
    }
    // only ASCII remains, so byte slicing stays on char boundaries
    match trimmed.rfind('.') {
        Some(dot) => {
            let (stem, ext) = (&trimmed[..dot], &trimmed[dot + 1..]);
            format!("{}.{}", &stem[..stem.len().min(MAX_STEM_LEN)], &ext[..ext.len().min(MAX_EXT_LEN)])
        }
        None => trimmed[..trimmed.len().min(MAX_STEM_LEN)].to_string(),
    }
}

/// Guess a `Content-Type` from the file extension.
pub fn content_type_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> FileStore {
        FileStore::new(std::env::temp_dir().join(format!("cookhub_store_{}", Uuid::new_v4())))
    }

    #[tokio::test]
    async fn store_then_resolve_returns_original_bytes() -> Result<(), anyhow::Error> {
        let store = temp_store();
        let name = store.store(&Upload::new("soup.png", b"\x89PNG data".to_vec())).await?;
        assert!(name.ends_with("_soup.png"));
        assert_eq!(store.resolve(&name).await?, b"\x89PNG data");
        let _ = fs::remove_dir_all(store.root()).await;
        Ok(())
    }

    #[tokio::test]
    async fn same_original_name_never_overwrites() -> Result<(), anyhow::Error> {
        let store = temp_store();
        let a = store.store(&Upload::new("a.jpg", b"first".to_vec())).await?;
        let b = store.store(&Upload::new("a.jpg", b"second".to_vec())).await?;
        assert_ne!(a, b);
        assert_eq!(store.resolve(&a).await?, b"first");
        assert_eq!(store.resolve(&b).await?, b"second");
        let _ = fs::remove_dir_all(store.root()).await;
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_is_not_found_and_delete_is_idempotent() -> Result<(), anyhow::Error> {
        let store = temp_store();
        assert!(matches!(store.resolve("nope.png").await, Err(StorageError::NotFound(_))));
        assert!(!store.delete("nope.png").await?);

        let name = store.store(&Upload::new("x.gif", b"gif".to_vec())).await?;
        assert!(store.exists(&name).await?);
        assert!(store.delete(&name).await?);
        assert!(!store.exists(&name).await?);
        assert!(!store.delete(&name).await?);
        let _ = fs::remove_dir_all(store.root()).await;
        Ok(())
    }

    #[tokio::test]
    async fn traversal_names_are_rejected() {
        let store = temp_store();
        for bad in ["../secret", "a/b.png", "..", ".", "", "/etc/passwd", "a\\b.png"] {
            assert!(
                matches!(store.resolve(bad).await, Err(StorageError::InvalidName(_))),
                "{bad:?} should be rejected"
            );
            assert!(matches!(store.delete(bad).await, Err(StorageError::InvalidName(_))));
        }
    }

    #[test]
    fn sanitize_keeps_last_component_and_safe_chars() {
        assert_eq!(sanitize_file_name("C:\\photos\\my pic.png"), "my_pic.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(""), "upload");
        assert_eq!(sanitize_file_name("..."), "upload");
        assert_eq!(sanitize_file_name("crème brûlée.jpg"), "cr_me_br_l_e.jpg");
    }

    #[test]
    fn sanitize_caps_long_names_and_keeps_extension() {
        let long = format!("{}.jpg", "a".repeat(300));
        let name = sanitize_file_name(&long);
        assert_eq!(name.len(), MAX_STEM_LEN + 4);
        assert!(name.ends_with(".jpg"));

        let long_ext = format!("photo.{}", "x".repeat(300));
        assert_eq!(sanitize_file_name(&long_ext).len(), "photo.".len() + MAX_EXT_LEN);

        assert_eq!(sanitize_file_name(&"b".repeat(300)).len(), MAX_STEM_LEN);
        assert_eq!(sanitize_file_name("short.png"), "short.png");
    }

    #[tokio::test]
    async fn store_accepts_very_long_original_name() -> Result<(), anyhow::Error> {
        let store = temp_store();
        let original = format!("{}.jpg", "a".repeat(300));
        let name = store.store(&Upload::new(original, b"jpeg".to_vec())).await?;
        assert!(name.len() < 255);
        assert!(name.ends_with(".jpg"));
        assert_eq!(store.resolve(&name).await?, b"jpeg");
        let _ = fs::remove_dir_all(store.root()).await;
        Ok(())
    }

    #[test]
    fn content_type_from_extension() {
        assert_eq!(content_type_for("x.PNG"), "image/png");
        assert_eq!(content_type_for("x.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("x.svg"), "image/svg+xml");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }
}
