//! Packet definition
//!
//! A transient (command, payload) pair, built per message and dropped once
//! serialized.

use crate::error::Result;

/// One protocol message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Packet {
    /// Command token; empty for server replies
    pub command: String,

    /// Free-form text payload
    pub payload: String,
}

impl Packet {
    /// Create a packet from a command token and payload
    pub fn new(command: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            payload: payload.into(),
        }
    }

    /// Create a client request for a server command code
    pub fn request(code: char, payload: impl Into<String>) -> Self {
        Self::new(code.to_string(), payload)
    }

    /// Create a server reply (empty command)
    pub fn reply(payload: impl Into<String>) -> Self {
        Self::new(String::new(), payload)
    }

    /// Uncompressed size in bytes (command + payload), for diagnostics
    pub fn size(&self) -> usize {
        self.command.len() + self.payload.len()
    }

    /// Serialize into a compressed frame
    pub fn encode(&self) -> Result<Vec<u8>> {
        super::encode(&self.command, &self.payload)
    }
}
