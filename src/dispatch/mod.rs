//! Dispatch Module
//!
//! Routes a command identifier to its handler. Both tables are static
//! `match`es over the command enums in [`crate::protocol`]; an unknown
//! identifier is answered, never fatal.
//!
//! - [`ServerDispatcher`]: wire code → directory-backed reply text
//! - [`client::resolve`]: menu command → prompted request packet

pub mod client;
mod server;

pub use client::{ClientAction, Console};
pub use server::{
    ServerDispatcher, CITY_NOT_FOUND, COUNTRY_EXISTS, HEARTBEAT_REPLY, INVALID_COMMAND,
    INVALID_ENTRY, POPULATION_NOT_FOUND,
};
