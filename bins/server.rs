use std::process::ExitCode;

use dotenvy::dotenv;
use tokio::runtime::{Builder, Runtime};
use tracing::{error, info};

fn build_runtime(worker_threads: Option<usize>) -> std::io::Result<Runtime> {
    let mut builder = Builder::new_multi_thread();
    builder.enable_all().thread_name("cookhub-worker");
    if let Some(n) = worker_threads {
        builder.worker_threads(n);
    }
    builder.build()
}

fn main() -> ExitCode {
    // .env before the subscriber so RUST_LOG and LOG_FORMAT take effect
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    std::panic::set_hook(Box::new(|info| {
        error!(message = %info, "panic");
    }));

    let cfg = match server::startup::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "refusing to start");
            return ExitCode::FAILURE;
        }
    };

    let workers = cfg.server.worker_threads;
    let rt = match build_runtime(workers) {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "cannot build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(version = env!("CARGO_PKG_VERSION"), pid = std::process::id(), ?workers, "cookhub starting");

    match rt.block_on(server::run_with_config(cfg, server::shutdown_signal())) {
        Ok(()) => {
            info!("cookhub stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "cookhub exited with an error");
            ExitCode::FAILURE
        }
    }
}
