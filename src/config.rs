//! Configuration for geodir
//!
//! Centralized configuration with sensible defaults, shared by the server
//! and the client binaries.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{GeoError, Result};

/// Main configuration for a geodir server or client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Listen (server) or connect (client) address
    pub address: String,

    /// TCP port
    pub port: u16,

    /// Receive buffer capacity; a frame must fit in one read of this size
    pub buffer_size: usize,

    /// How long the server waits for its single client
    pub accept_timeout: Duration,

    /// Listen backlog passed to the socket
    pub listen_backlog: i32,

    // -------------------------------------------------------------------------
    // Directory Configuration
    // -------------------------------------------------------------------------
    /// Path of the `Country,City` file backing the directory (server only)
    pub directory_path: PathBuf,

    /// Multiplier for population replies
    pub population_seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 6000,
            buffer_size: 1024,
            accept_timeout: Duration::from_secs(30),
            listen_backlog: 2,
            directory_path: PathBuf::from("countries_capitals.csv"),
            population_seed: 3_404_867,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Resolve `address:port` into a socket address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.address.trim().parse().map_err(|_| {
            GeoError::InvalidAddress(format!(
                "Inputted IP address {:?} is not valid. Ensure the IP address is correct and try again.",
                self.address
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Reject settings that would make every session fail
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(GeoError::Config(
                "buffer_size must be greater than 0".to_string(),
            ));
        }
        if self.accept_timeout.is_zero() {
            return Err(GeoError::Config(
                "accept_timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the listen/connect address
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.config.address = address.into();
        self
    }

    /// Set the TCP port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the receive buffer capacity (in bytes)
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.config.buffer_size = size;
        self
    }

    /// Set the accept timeout
    pub fn accept_timeout(mut self, timeout: Duration) -> Self {
        self.config.accept_timeout = timeout;
        self
    }

    /// Set the listen backlog
    pub fn listen_backlog(mut self, backlog: i32) -> Self {
        self.config.listen_backlog = backlog;
        self
    }

    /// Set the directory file path
    pub fn directory_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.directory_path = path.into();
        self
    }

    /// Set the population multiplier
    pub fn population_seed(mut self, seed: u64) -> Self {
        self.config.population_seed = seed;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
