//! SMS Relay server binary.

use clap::Parser;
use sms_relay_server::{init_logging, load_config, RelayServer};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Receives forwarded SMS over a webhook and lists them", long_about = None)]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short = 'c', long = "config", default_value = "config.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration
    let config = load_config(&args.config)?;

    // Initialize tracing; the guard flushes the log file on exit
    let _guard = init_logging(&config)?;

    // Create and run server
    let server = RelayServer::new(config);
    server.run().await?;

    Ok(())
}
