//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Fully synchronous, blocking sockets
//! - The server accepts one connection per run
//! - Every request/reply crosses a [`Session`]

mod connection;
mod server;
mod client;

pub use connection::Session;
pub use server::{Server, ServerState};
pub use client::{Client, ClientState};
