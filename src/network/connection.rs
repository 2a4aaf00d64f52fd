//! Connection Session
//!
//! Owns one stream and moves whole frames across it.
//!
//! ## Framing limitation
//! One `read` is assumed to carry exactly one complete frame. There is no
//! length header, so nothing is reassembled: a read that returns more than
//! `capacity` bytes is rejected as oversize, and a frame split across reads
//! fails to decode. Every failure here is terminal for the session.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};

use bytes::BytesMut;

use crate::error::{GeoError, Result};
use crate::protocol::{self, Packet};

/// A single peer connection speaking the frame protocol
pub struct Session<S = TcpStream> {
    /// Underlying transport
    stream: S,

    /// Largest frame accepted in one read
    capacity: usize,

    /// Receive buffer, `capacity + 1` bytes so an oversize read is visible
    buffer: BytesMut,

    /// Peer address for logging
    peer: String,
}

impl Session<TcpStream> {
    /// Wrap a connected TCP stream
    pub fn new(stream: TcpStream, capacity: usize) -> Result<Self> {
        let peer = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Request/reply traffic: don't wait to coalesce small writes
        stream.set_nodelay(true)?;

        Ok(Self::with_stream(stream, capacity, peer))
    }

    /// Close both directions, ignoring errors
    pub fn close(&self) {
        if self.stream.shutdown(Shutdown::Both).is_ok() {
            tracing::info!(peer = %self.peer, "Connection closed");
        }
    }
}

impl<S: Read + Write> Session<S> {
    /// Wrap any byte stream
    pub fn with_stream(stream: S, capacity: usize, peer: impl Into<String>) -> Self {
        Self {
            stream,
            capacity,
            buffer: BytesMut::zeroed(capacity + 1),
            peer: peer.into(),
        }
    }

    /// Encode and write one frame
    pub fn send(&mut self, command: &str, payload: &str) -> Result<()> {
        let frame = protocol::encode(command, payload)?;

        self.stream
            .write_all(&frame)
            .and_then(|_| self.stream.flush())
            .map_err(|e| GeoError::from_transport(e, "Connection was forcibly closed by peer"))?;

        tracing::debug!(peer = %self.peer, bytes = frame.len(), "Message transmitted");
        Ok(())
    }

    /// Send a packet
    pub fn send_packet(&mut self, packet: &Packet) -> Result<()> {
        self.send(&packet.command, &packet.payload)
    }

    /// Read and decode one frame
    pub fn receive(&mut self) -> Result<Packet> {
        let received = loop {
            match self.stream.read(&mut self.buffer[..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(GeoError::from_transport(
                        e,
                        "Connection was forcibly closed by peer",
                    ))
                }
            }
        };

        if received == 0 {
            return Err(GeoError::Disconnected(format!(
                "No message received, {} may have been disconnected.",
                self.peer
            )));
        }

        if received > self.capacity {
            return Err(GeoError::Oversize {
                received,
                capacity: self.capacity,
            });
        }

        tracing::debug!(peer = %self.peer, bytes = received, "Received message (compressed)");

        protocol::decode(&self.buffer[..received])?.ok_or_else(|| {
            GeoError::Disconnected(format!("Null packet received from {}", self.peer))
        })
    }

    /// Peer address string
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Frame capacity in bytes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}
