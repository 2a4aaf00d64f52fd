//! Session Tests
//!
//! Tests for the send/receive cycle over an in-memory stream, including
//! every terminal condition the session reports.

use std::io::{self, Cursor, Read, Write};

use geodir::network::Session;
use geodir::protocol::{decode, encode, Packet};
use geodir::GeoError;

const CAPACITY: usize = 1024;

// =============================================================================
// Helper Types
// =============================================================================

/// Stream that reads from a fixed buffer and records writes
#[derive(Default)]
struct MockStream {
    input: Cursor<Vec<u8>>,
    output: Vec<u8>,
    read_error: Option<io::ErrorKind>,
    write_error: Option<io::ErrorKind>,
}

impl MockStream {
    fn with_input(bytes: Vec<u8>) -> Self {
        Self {
            input: Cursor::new(bytes),
            ..Self::default()
        }
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.read_error {
            Some(kind) => Err(kind.into()),
            None => self.input.read(buf),
        }
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.write_error {
            Some(kind) => Err(kind.into()),
            None => self.output.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn session(stream: MockStream) -> Session<MockStream> {
    Session::with_stream(stream, CAPACITY, "mock")
}

// =============================================================================
// Send Tests
// =============================================================================

#[test]
fn test_send_writes_one_frame() {
    let mut session = session(MockStream::default());

    session.send("c", "France").unwrap();

    let written = &session.get_ref().output;
    assert_eq!(decode(written).unwrap(), Some(Packet::request('c', "France")));
}

#[test]
fn test_send_packet() {
    let mut session = session(MockStream::default());

    session.send_packet(&Packet::reply("beat")).unwrap();

    let written = session.into_inner().output;
    assert_eq!(decode(&written).unwrap(), Some(Packet::reply("beat")));
}

#[test]
fn test_send_reset_is_terminal() {
    let stream = MockStream {
        write_error: Some(io::ErrorKind::ConnectionReset),
        ..MockStream::default()
    };
    let mut session = session(stream);

    let err = session.send("h", "").unwrap_err();

    assert!(matches!(err, GeoError::ConnectionReset(_)));
    assert!(err.is_terminal());
}

#[test]
fn test_send_broken_pipe_is_reset() {
    let stream = MockStream {
        write_error: Some(io::ErrorKind::BrokenPipe),
        ..MockStream::default()
    };
    let mut session = session(stream);

    assert!(matches!(
        session.send("h", ""),
        Err(GeoError::ConnectionReset(_))
    ));
}

// =============================================================================
// Receive Tests
// =============================================================================

#[test]
fn test_receive_decodes_frame() {
    let frame = encode("a", "Wakanda,Birnin Zana").unwrap();
    let mut session = session(MockStream::with_input(frame));

    let packet = session.receive().unwrap();

    assert_eq!(packet, Packet::request('a', "Wakanda,Birnin Zana"));
}

#[test]
fn test_receive_zero_bytes_is_disconnect() {
    let mut session = session(MockStream::with_input(Vec::new()));

    let err = session.receive().unwrap_err();

    assert!(matches!(err, GeoError::Disconnected(_)));
    assert_eq!(err.kind(), "Disconnected");
}

#[test]
fn test_receive_oversize_is_rejected() {
    let mut session = session(MockStream::with_input(vec![b'x'; CAPACITY + 76]));

    let err = session.receive().unwrap_err();

    match err {
        GeoError::Oversize { received, capacity } => {
            assert!(received > CAPACITY);
            assert_eq!(capacity, CAPACITY);
        }
        other => panic!("Expected oversize, got {:?}", other),
    }
}

#[test]
fn test_receive_frame_of_exactly_capacity_is_decoded() {
    let frame = encode("c", "Bosnia and Herzegovina").unwrap();
    let capacity = frame.len();
    let mut session = Session::with_stream(MockStream::with_input(frame), capacity, "mock");

    let packet = session.receive().unwrap();

    assert_eq!(packet.payload, "Bosnia and Herzegovina");
}

#[test]
fn test_receive_one_byte_over_capacity_is_oversize() {
    let frame = encode("c", "Bosnia and Herzegovina").unwrap();
    let capacity = frame.len() - 1;
    let mut session = Session::with_stream(MockStream::with_input(frame), capacity, "mock");

    assert!(matches!(
        session.receive(),
        Err(GeoError::Oversize { received, .. }) if received == capacity + 1
    ));
}

#[test]
fn test_receive_garbage_is_framing_error() {
    let mut session = session(MockStream::with_input(b"plain text".to_vec()));

    assert!(matches!(session.receive(), Err(GeoError::Framing(_))));
}

#[test]
fn test_receive_reset_is_terminal() {
    let stream = MockStream {
        read_error: Some(io::ErrorKind::ConnectionAborted),
        ..MockStream::default()
    };
    let mut session = session(stream);

    assert!(matches!(
        session.receive(),
        Err(GeoError::ConnectionReset(_))
    ));
}

#[test]
fn test_session_accessors() {
    let session = session(MockStream::default());

    assert_eq!(session.peer(), "mock");
    assert_eq!(session.capacity(), CAPACITY);
}
