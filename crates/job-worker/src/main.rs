//! partwright worker: polls a job server for declarative part definitions,
//! builds each part into a solid, and uploads the exported artifacts.

mod client;
mod config;
mod error;
mod worker;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::WorkerConfig;
use crate::worker::Worker;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match WorkerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };
    info!(server = %config.server_url, builds = config.max_builds, "worker starting");

    if let Err(e) = Worker::new(config).run() {
        error!("worker stopped: {e}");
        std::process::exit(1);
    }
    info!("end of application, normal termination");
}
