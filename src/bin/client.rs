//! geodir Client Binary
//!
//! Interactive prompt for querying a geodir server.

use std::io;

use clap::Parser;
use geodir::dispatch::Console;
use geodir::network::Client;
use geodir::Config;
use tracing_subscriber::{fmt, EnvFilter};

/// geodir CLI
#[derive(Parser, Debug)]
#[command(name = "geodir-client")]
#[command(about = "Interactive client for the geodir server")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1")]
    address: String,

    /// Server port (0-65535)
    #[arg(short, long, default_value = "6000")]
    port: u16,

    /// Largest reply accepted in one read, in bytes
    #[arg(long, default_value = "1024")]
    buffer_size: usize,
}

fn main() {
    // Logs go to stderr; the console owns stdout
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::builder()
        .address(&args.address)
        .port(args.port)
        .buffer_size(args.buffer_size)
        .build();

    let mut client = match Client::connect(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e.diagnostic());
            std::process::exit(e.exit_code());
        }
    };
    println!("Connection successfully established with server!");

    let mut console = Console::new(io::stdin().lock(), io::stdout());
    if let Err(e) = client.run(&mut console) {
        if e.is_terminal() {
            tracing::warn!("Connection lost: {}", e);
        }
        eprintln!("{}", e.diagnostic());
        std::process::exit(e.exit_code());
    }

    eprintln!("[!] Program terminated.");
}
