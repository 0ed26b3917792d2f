//! `stage-wsmon [CONFIG]`
//!
//! Binds the workspace status socket named in the configuration and logs
//! each update the compositor publishes.

mod listener;

use anyhow::{Context, Result};
use listener::{describe, StatusListener};
use stage_core::config::ConfigLoader;
use std::path::PathBuf;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ConfigLoader::load_or_default(config_path.as_deref())
        .context("Failed to load configuration")?;
    stage_core::init_logging(&config.logging, false).context("Failed to initialize logging")?;

    let listener = StatusListener::bind(&config.ipc.status_socket)?;
    info!("stage-wsmon listening on {:?}", config.ipc.status_socket);

    loop {
        tokio::select! {
            received = listener.next() => match received {
                Ok(status) => info!("{} ({})", describe(&status), status.to_wire()),
                Err(e) => error!("{:#}", e),
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                break;
            }
        }
    }
    Ok(())
}
