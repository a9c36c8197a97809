use std::future::Future;
use std::sync::Arc;

use axum::{http::HeaderValue, Router};
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::{Any, CorsLayer};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::{runtime, storage::FileStore};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

/// Any origin unless a single one is configured.
fn build_cors(origin: Option<&str>) -> Result<CorsLayer, StartupError> {
    match origin.map(str::trim).filter(|o| !o.is_empty()) {
        None => Ok(CorsLayer::very_permissive()),
        Some(o) => {
            let value = HeaderValue::from_str(o)
                .map_err(|e| StartupError::InvalidConfig(format!("server.cors_origin {o:?}: {e}")))?;
            Ok(CorsLayer::new().allow_origin(value).allow_methods(Any).allow_headers(Any))
        }
    }
}

/// `config.toml` (or `CONFIG_PATH`) when present, otherwise the environment.
pub fn load_config() -> Result<AppConfig, StartupError> {
    let cfg = AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(format!("{e:#}")))?;
    cfg.validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(cfg)
}

/// `host:port` to bind, as configured
pub fn load_bind_addr(cfg: &AppConfig) -> String {
    format!("{}:{}", cfg.server.host, cfg.server.port)
}

/// Prepare upload directories, connect the database and build the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    runtime::ensure_env(&[cfg.storage.recipe_dir.as_str(), cfg.storage.challenge_dir.as_str()]).await?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        models::db::migrate(&db).await?;
        info!("database migrations applied");
    }

    let state = ServerState {
        db,
        recipe_images: Arc::new(FileStore::new(&cfg.storage.recipe_dir)),
        challenge_images: Arc::new(FileStore::new(&cfg.storage.challenge_dir)),
    };
    let cors = build_cors(cfg.server.cors_origin.as_deref())?;
    Ok(routes::build_router(state, cors, cfg.server.max_upload_bytes))
}

/// Serve `app` until `shutdown` resolves, then let in-flight requests finish.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server drained");
    Ok(())
}

/// Build the app for `cfg`, bind and serve until `shutdown` resolves.
pub async fn run_with_config<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;

    let addr = load_bind_addr(&cfg);
    info!(%addr, recipe_dir = %cfg.storage.recipe_dir, challenge_dir = %cfg.storage.challenge_dir, "starting server");
    let listener = TcpListener::bind(addr.as_str()).await?;
    serve(listener, app, shutdown).await
}

/// Public entry: load config, then run the HTTP server until `shutdown` resolves
pub async fn run<F>(shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    dotenv().ok();
    init_logging();

    let cfg = load_config()?;
    run_with_config(cfg, shutdown).await
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C"),
            Err(e) => {
                warn!(error = %e, "cannot listen for Ctrl+C");
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("received SIGTERM");
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
