//! Error types for geodir
//!
//! Provides a unified error type for all operations. Every variant carries
//! a kind tag (see [`GeoError::kind`]) so the binaries can print a uniform
//! diagnostic when a terminal condition ends the process.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Result type alias using GeoError
pub type Result<T> = std::result::Result<T, GeoError>;

/// Unified error type for geodir operations
#[derive(Debug, Error)]
pub enum GeoError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    #[error("Malformed frame: {0}")]
    Framing(String),

    #[error("Received {received} bytes, exceeded buffer size of {capacity}")]
    Oversize { received: usize, capacity: usize },

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Disconnected(String),

    #[error("{0}")]
    ConnectionReset(String),

    // -------------------------------------------------------------------------
    // Connect-time Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    ConnectionRefused(String),

    #[error("{0}")]
    InvalidAddress(String),

    #[error("No client connected within {0:?}. Ensure client and server have matching IP addresses and port numbers.")]
    AcceptTimeout(Duration),

    // -------------------------------------------------------------------------
    // Directory Errors
    // -------------------------------------------------------------------------
    #[error("Directory error: {0}")]
    Directory(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GeoError {
    /// Name of the condition that produced this error
    pub fn kind(&self) -> &'static str {
        match self {
            GeoError::Io(_) => "Io",
            GeoError::Framing(_) => "Framing",
            GeoError::Oversize { .. } => "Oversize",
            GeoError::Disconnected(_) => "Disconnected",
            GeoError::ConnectionReset(_) => "ConnectionReset",
            GeoError::ConnectionRefused(_) => "ConnectionRefused",
            GeoError::InvalidAddress(_) => "InvalidAddress",
            GeoError::AcceptTimeout(_) => "AcceptTimeout",
            GeoError::Directory(_) => "Directory",
            GeoError::Csv(_) => "Csv",
            GeoError::Config(_) => "Config",
        }
    }

    /// Human-readable line printed when this error ends the process
    pub fn diagnostic(&self) -> String {
        format!("[!] {} detected: {}", self.kind(), self)
    }

    /// Whether this error ends a session (never retried)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GeoError::Io(_)
                | GeoError::Framing(_)
                | GeoError::Oversize { .. }
                | GeoError::Disconnected(_)
                | GeoError::ConnectionReset(_)
                | GeoError::AcceptTimeout(_)
        )
    }

    /// Process exit status for a binary that stops on this error
    ///
    /// 1 when a session ended on a terminal condition, 2 when the process
    /// never got that far (bad config, missing directory, refused connect).
    pub fn exit_code(&self) -> i32 {
        if self.is_terminal() {
            1
        } else {
            2
        }
    }

    /// Translate a socket-level failure into its protocol meaning
    ///
    /// `context` describes what the peer was doing, e.g. "Connection was
    /// forcibly closed by server".
    pub fn from_transport(err: io::Error, context: &str) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe => {
                GeoError::ConnectionReset(format!("{}: {}", context, err))
            }
            io::ErrorKind::ConnectionRefused => GeoError::ConnectionRefused(format!(
                "Connection refused. Ensure the server is running and port numbers are matching. ({})",
                err
            )),
            io::ErrorKind::AddrNotAvailable | io::ErrorKind::InvalidInput => {
                GeoError::InvalidAddress(format!(
                    "Address is not valid in the current context. Ensure the IP address is correct and try again. ({})",
                    err
                ))
            }
            _ => GeoError::Io(err),
        }
    }
}
