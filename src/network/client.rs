//! TCP Client
//!
//! Connects once, then turns menu commands into requests.
//!
//! ```text
//! Connecting ──► Ready ◄──► AwaitingReply
//!     │            │              │
//!     └────────────┴── STOP / EOF / disconnect ──► Terminated
//! ```

use std::io::{BufRead, Write};
use std::net::TcpStream;

use crate::config::Config;
use crate::dispatch::client::{self, ClientAction, Console};
use crate::error::{GeoError, Result};
use crate::network::Session;
use crate::protocol::{ClientCommand, Packet};

/// Client lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Connecting,
    Ready,
    AwaitingReply,
    Terminated,
}

/// Interactive client over one connection
pub struct Client {
    session: Session,
    state: ClientState,
}

impl Client {
    /// Connect to the configured server
    pub fn connect(config: &Config) -> Result<Self> {
        tracing::debug!(state = ?ClientState::Connecting, "Client state");
        if config.buffer_size == 0 {
            return Err(GeoError::Config(
                "buffer_size must be greater than 0".to_string(),
            ));
        }
        let addr = config.socket_addr()?;
        let stream = TcpStream::connect(addr).map_err(|e| GeoError::from_transport(e, "connect"))?;
        let session = Session::new(stream, config.buffer_size)?;

        tracing::info!(server = %addr, "Connected");
        Ok(Self {
            session,
            state: ClientState::Ready,
        })
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    /// Send one request and wait for its reply
    pub fn request(&mut self, packet: &Packet) -> Result<Packet> {
        self.transition(ClientState::AwaitingReply);
        self.session.send_packet(packet)?;
        let reply = self.session.receive()?;
        self.transition(ClientState::Ready);
        Ok(reply)
    }

    /// Prompt loop: runs until `STOP`, end of input, or a terminal error
    pub fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let result = self.prompt_loop(console);
        self.transition(ClientState::Terminated);
        result
    }

    fn prompt_loop<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.print(&client::menu())?;

        loop {
            let Some(line) = console.prompt("Enter command: ")? else {
                return Ok(());
            };

            let Some(command) = ClientCommand::parse(&line) else {
                console.print("Invalid command entered")?;
                continue;
            };

            match client::resolve(command, console)? {
                ClientAction::ShowMenu => console.print(&client::menu())?,
                ClientAction::Stop => return Ok(()),
                ClientAction::Send(packet) => {
                    let reply = self.request(&packet)?;
                    console.print(&format!("Response from server: {}\n", reply.payload))?;
                }
            }
        }
    }

    fn transition(&mut self, next: ClientState) {
        tracing::trace!(from = ?self.state, to = ?next, "Client state");
        self.state = next;
    }
}
