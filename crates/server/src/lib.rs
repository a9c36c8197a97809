pub mod errors;
pub mod extract;
pub mod metrics;
pub mod openapi;
pub mod routes;
pub mod startup;

pub use startup::{build_app, run, run_with_config, serve, shutdown_signal};
