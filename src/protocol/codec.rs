//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//! ```text
//! zlib( utf8( command + "|" + payload ) )
//! ```
//! Decoding splits on the first delimiter only.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};

use crate::error::{GeoError, Result};
use super::Packet;

/// Separator between command and payload
pub const DELIMITER: char = '|';

/// Encode a command and payload into a compressed frame
///
/// Fails if the command itself contains the delimiter, since the frame
/// could not be split back into the same pair.
pub fn encode(command: &str, payload: &str) -> Result<Vec<u8>> {
    if command.contains(DELIMITER) {
        return Err(GeoError::Framing(format!(
            "command {:?} contains the delimiter '{}'",
            command, DELIMITER
        )));
    }

    let mut text = String::with_capacity(command.len() + 1 + payload.len());
    text.push_str(command);
    text.push(DELIMITER);
    text.push_str(payload);

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes())?;
    Ok(encoder.finish()?)
}

/// Decode a compressed frame
///
/// Returns `Ok(None)` for empty input, which callers treat as the peer
/// having closed the connection.
pub fn decode(bytes: &[u8]) -> Result<Option<Packet>> {
    if bytes.is_empty() {
        return Ok(None);
    }

    let text = String::from_utf8(inflate(bytes)?)
        .map_err(|e| GeoError::Framing(format!("frame is not UTF-8: {}", e)))?;

    match text.split_once(DELIMITER) {
        Some((command, payload)) => Ok(Some(Packet::new(command, payload))),
        None => Err(GeoError::Framing(format!(
            "no '{}' delimiter in {} decompressed bytes",
            DELIMITER,
            text.len()
        ))),
    }
}

/// Inflate a complete zlib stream; a stream that ends early is an error
fn inflate(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(bytes.len().saturating_mul(4).max(64));

    loop {
        let consumed = inflater.total_in() as usize;
        let status = inflater
            .decompress_vec(&bytes[consumed..], &mut out, FlushDecompress::Finish)
            .map_err(|e| GeoError::Framing(format!("could not decompress frame: {}", e)))?;

        match status {
            Status::StreamEnd => return Ok(out),
            // Output full: grow and keep inflating
            _ if out.len() == out.capacity() => out.reserve(out.capacity()),
            _ => {
                return Err(GeoError::Framing(format!(
                    "truncated frame after {} of {} bytes",
                    inflater.total_in(),
                    bytes.len()
                )))
            }
        }
    }
}
