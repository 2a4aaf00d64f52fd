//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Frame Format
//!
//! A frame is the zlib-compressed UTF-8 text
//! ```text
//! ┌───────────┬─────┬─────────────────────────────┐
//! │  Command  │  |  │          Payload            │
//! └───────────┴─────┴─────────────────────────────┘
//! ```
//! Only the first `|` is significant, so payloads may contain `|` freely.
//! There is no length header: one transport read carries exactly one frame.
//!
//! ### Commands
//! - `c`: get capital    - Payload: country
//! - `p`: get population - Payload: country
//! - `a`: add country    - Payload: `country,city`
//! - `h`: heartbeat      - Payload: ignored
//!
//! Server replies carry an empty command.

mod packet;
mod command;
mod codec;

pub use packet::Packet;
pub use command::{ClientCommand, ServerCommand};
pub use codec::{decode, encode, DELIMITER};
