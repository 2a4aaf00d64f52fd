//! geodir Server Binary
//!
//! Serves the country directory to a single client.

use std::time::Duration;

use clap::Parser;
use geodir::network::Server;
use geodir::{Config, CsvDirectory};
use tracing_subscriber::{fmt, EnvFilter};

/// geodir Server
#[derive(Parser, Debug)]
#[command(name = "geodir-server")]
#[command(about = "Country capital/population lookup server")]
#[command(version)]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "127.0.0.1")]
    address: String,

    /// Listen port (0-65535)
    #[arg(short, long, default_value = "6000")]
    port: u16,

    /// Directory file with a `Country,City` header
    #[arg(short, long, default_value = "countries_capitals.csv")]
    file: String,

    /// Seconds to wait for the client before giving up
    #[arg(long, default_value = "30")]
    accept_timeout_secs: u64,

    /// Largest frame accepted in one read, in bytes
    #[arg(long, default_value = "1024")]
    buffer_size: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,geodir=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    tracing::info!("geodir Server v{}", geodir::VERSION);
    tracing::info!("Directory file: {}", args.file);

    // Build config from args
    let config = Config::builder()
        .address(&args.address)
        .port(args.port)
        .directory_path(&args.file)
        .accept_timeout(Duration::from_secs(args.accept_timeout_secs))
        .buffer_size(args.buffer_size)
        .build();

    if let Err(e) = serve(config) {
        if e.is_terminal() {
            tracing::warn!("Session ended: {}", e);
        } else {
            tracing::error!("Server failed to start: {}", e);
        }
        eprintln!("{}", e.diagnostic());
        std::process::exit(e.exit_code());
    }
}

fn serve(config: Config) -> geodir::Result<()> {
    config.validate()?;
    let directory = CsvDirectory::open(&config.directory_path)?;
    let server = Server::bind(config, directory)?;
    server.run()
}
