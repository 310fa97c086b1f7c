//! Binary crate for the `deploy-mcp` stdio server.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging and configuration setup
//! - The request/response loop over stdin/stdout

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use deploy_core::{Config, OpenMeteoService, WeatherGatedDeployment};

mod cli;
mod handler;
mod logging;
mod protocol;
mod server;
#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(log_file) = &cli.log_file {
        config.log_file = log_file.clone();
    }

    let _guard = logging::init(&config.log_file)?;
    info!(version = env!("CARGO_PKG_VERSION"), "deployment advisor starting");

    let weather = Arc::new(OpenMeteoService::new(&config)?);
    let deployment = Arc::new(WeatherGatedDeployment::new(weather.clone()));
    let handler = handler::Handler::new(weather, deployment);

    server::Server::new(handler, cli.mode()).run().await
}
