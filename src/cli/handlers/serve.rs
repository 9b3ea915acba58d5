use crate::api;
use crate::config::Config;
use crate::error::Result;
use crate::storage::Stores;
use std::path::Path;
use tracing::info;

/// Handle the `serve` command
///
/// Command-line host and port take precedence over configuration.
pub fn handle_serve_command(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = Config::load(config_path)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let stores = Stores::open(&config.storage)?;
    info!(
        "Using {:?} storage at {}",
        config.storage.backend,
        config.storage.path.display()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(api::serve(&config, &stores))
}
