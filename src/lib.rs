//! # geodir
//!
//! A minimal country directory served over TCP:
//! - Zlib-compressed `command|payload` frames, one frame per read
//! - Single-character server command codes (`c`, `p`, `a`, `h`)
//! - One client connection per server run
//! - File-backed `Country,City` directory with an in-memory index
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐   (command, text)   ┌──────────────┐
//! │  Client loop │ ──────────────────► │ Packet codec │
//! └──────▲───────┘                     └──────┬───────┘
//!        │ reply                              │ frame
//!        │                             ┌──────▼───────┐
//! ┌──────┴───────┐                     │   Session    │
//! │ Packet codec │ ◄────── frame ───── │  (one TCP)   │
//! └──────────────┘                     └──────┬───────┘
//!                                             │
//!                                      ┌──────▼───────┐
//!                                      │  Dispatcher  │
//!                                      └──────┬───────┘
//!                                             │
//!                                      ┌──────▼───────┐
//!                                      │  Directory   │
//!                                      └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod directory;
pub mod dispatch;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{GeoError, Result};
pub use config::Config;
pub use directory::{CsvDirectory, Directory, MemoryDirectory};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of geodir
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
