use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Single allowed CORS origin; any origin when unset.
    #[serde(default)]
    pub cors_origin: Option<String>,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(4),
            cors_origin: None,
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            run_migrations: true,
        }
    }
}

/// Flat directories holding uploaded images, one per image-bearing resource.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_recipe_dir")]
    pub recipe_dir: String,
    #[serde(default = "default_challenge_dir")]
    pub challenge_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { recipe_dir: default_recipe_dir(), challenge_dir: default_challenge_dir() }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_true() -> bool { true }
fn default_max_upload_bytes() -> usize { 10 * 1024 * 1024 }
fn default_database_url() -> String { "sqlite://cookhub.db?mode=rwc".into() }
fn default_recipe_dir() -> String { "recipe-uploads".into() }
fn default_challenge_dir() -> String { "uploads".into() }

impl AppConfig {
    /// Build a config from environment variables only, used when no config file exists.
    pub fn from_env() -> Self {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.server.worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .or(cfg.server.worker_threads);
        if let Ok(origin) = std::env::var("CORS_ORIGIN") {
            cfg.server.cors_origin = Some(origin);
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            cfg.database.url = url;
        }
        if let Ok(dir) = std::env::var("RECIPE_UPLOAD_DIR") {
            cfg.storage.recipe_dir = dir;
        }
        if let Ok(dir) = std::env::var("CHALLENGE_UPLOAD_DIR") {
            cfg.storage.challenge_dir = dir;
        }
        cfg
    }

    /// Load from `CONFIG_PATH` (default `config.toml`). Only a missing file falls back to
    /// the environment; an unreadable or invalid file is an error.
    pub fn load_or_env() -> Result<Self> {
        load_from_file_or_env(&config_path())
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("server.port must be non-zero");
        }
        if self.database.url.trim().is_empty() {
            anyhow::bail!("database.url must not be empty");
        }
        if self.storage.recipe_dir.trim().is_empty() || self.storage.challenge_dir.trim().is_empty() {
            anyhow::bail!("storage directories must not be empty");
        }
        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!("database.min_connections exceeds max_connections");
        }
        Ok(())
    }
}

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

/// A missing file yields the environment-only config; a present file must parse and validate.
pub fn load_from_file_or_env(path: &str) -> Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse(&content).with_context(|| format!("invalid config file {path}")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::from_env()),
        Err(e) => Err(anyhow::Error::new(e).context(format!("cannot read config file {path}"))),
    }
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.storage.recipe_dir, "recipe-uploads");
        assert_eq!(cfg.storage.challenge_dir, "uploads");
        assert!(cfg.database.run_migrations);
        assert_eq!(cfg.server.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn sections_override_defaults() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            cors_origin = "http://localhost:3000"

            [database]
            url = "postgres://u:p@localhost/cook"
            max_connections = 5

            [storage]
            recipe_dir = "/var/lib/cookhub/recipes"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.cors_origin.as_deref(), Some("http://localhost:3000"));
        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.database.min_connections, 2);
        assert_eq!(cfg.storage.recipe_dir, "/var/lib/cookhub/recipes");
        assert_eq!(cfg.storage.challenge_dir, "uploads");
    }

    #[test]
    fn rejects_inverted_pool_bounds() {
        let res = parse(
            r#"
            [database]
            url = "sqlite::memory:"
            max_connections = 1
            min_connections = 4
            "#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn partial_server_section_keeps_defaults() {
        let cfg = parse("[server]\nport = 9000\n").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 9000);

        let cfg = parse("[server]\nhost = \"0.0.0.0\"\n").unwrap();
        assert_eq!(cfg.server.port, 8080);
    }

    #[test]
    fn database_section_without_url_uses_default_url() {
        let cfg = parse("[database]\nmax_connections = 5\n").unwrap();
        assert_eq!(cfg.database.url, "sqlite://cookhub.db?mode=rwc");
        assert_eq!(cfg.database.max_connections, 5);
    }

    #[test]
    fn missing_file_falls_back_to_env() {
        let path = std::env::temp_dir().join(format!("cookhub-absent-{}.toml", std::process::id()));
        assert!(load_from_file_or_env(path.to_str().unwrap()).is_ok());
    }

    #[test]
    fn invalid_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("cookhub-invalid-{}.toml", std::process::id()));
        std::fs::write(&path, "[server]\nport = \"not a number\"\n").unwrap();
        let res = load_from_file_or_env(path.to_str().unwrap());
        std::fs::remove_file(&path).unwrap();
        let err = res.unwrap_err();
        assert!(format!("{err:#}").contains("invalid config file"));
    }

    #[test]
    fn unreadable_path_is_an_error() {
        // a directory exists but cannot be read as a file
        let dir = std::env::temp_dir();
        assert!(load_from_file_or_env(dir.to_str().unwrap()).is_err());
    }
}
