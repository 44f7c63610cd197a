//! Mesa console binary
//!
//! Run: cargo run -p mesa-console -- --api-url http://127.0.0.1:5000

use std::sync::Arc;

use clap::Parser;
use mesa_console::{Args, ConsoleConfig, logging, shell};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ConsoleConfig::from(Args::parse());
    let _guard = logging::init(&config.log_dir)?;

    let client = config.client_config().build()?;
    tracing::info!(
        base_url = %client.base_url(),
        timeout_secs = ?config.timeout_secs,
        "Mesa console starting"
    );

    shell::run(Arc::new(client), config.tick).await?;

    tracing::info!("Mesa console stopped");
    Ok(())
}
