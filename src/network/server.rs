//! TCP Server
//!
//! Binds, waits for exactly one client, and serves it until a terminal
//! condition. There is no return to accepting afterwards.
//!
//! ```text
//! Binding ──► Listening ──► Accepting ──► Serving ──► Terminated
//!    │                          │             │
//!    └──── bad address ─────────┴─ timeout ───┴─► Terminated
//! ```

use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;
use std::time::{Duration, Instant};

use socket2::{Domain, Protocol, Socket, Type};

use crate::config::Config;
use crate::directory::Directory;
use crate::dispatch::ServerDispatcher;
use crate::error::{GeoError, Result};
use crate::network::Session;

/// How often a pending accept is retried before the deadline
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Server lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Binding,
    Listening,
    Accepting,
    Serving,
    Terminated,
}

/// Single-connection TCP server
#[derive(Debug)]
pub struct Server<D> {
    config: Config,
    listener: TcpListener,
    local_addr: SocketAddr,
    dispatcher: ServerDispatcher<D>,
    state: ServerState,
}

impl<D: Directory> Server<D> {
    /// Normalize the directory, then bind and listen
    pub fn bind(config: Config, directory: D) -> Result<Self> {
        config.validate()?;

        tracing::info!("Preprocessing directory...");
        let split = directory.normalize()?;
        tracing::info!(split, records = directory.len(), "Directory ready");

        tracing::debug!(state = ?ServerState::Binding, "Server state");
        let addr = config.socket_addr()?;
        let listener = Self::listen(addr, config.listen_backlog)?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Server started on {}", local_addr);

        let dispatcher = ServerDispatcher::new(directory, config.population_seed);
        Ok(Self {
            config,
            listener,
            local_addr,
            dispatcher,
            state: ServerState::Listening,
        })
    }

    /// Create the listening socket with SO_REUSEADDR
    fn listen(addr: SocketAddr, backlog: i32) -> Result<TcpListener> {
        let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
        socket.set_reuse_address(true)?;
        socket
            .bind(&addr.into())
            .map_err(|e| GeoError::from_transport(e, "bind"))?;
        socket.listen(backlog)?;

        let listener: TcpListener = socket.into();
        // Polled accept enforces the timeout
        listener.set_nonblocking(true)?;
        Ok(listener)
    }

    /// Bound address (resolves port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    pub fn dispatcher(&self) -> &ServerDispatcher<D> {
        &self.dispatcher
    }

    /// Accept one client and serve it
    ///
    /// Only returns once the session has ended; the error is the terminal
    /// condition that ended it.
    pub fn run(mut self) -> Result<()> {
        let result = self.accept_and_serve();
        self.transition(ServerState::Terminated);
        if let Err(e) = &result {
            tracing::warn!("Server terminated: {}", e);
        }
        result
    }

    fn accept_and_serve(&mut self) -> Result<()> {
        self.transition(ServerState::Accepting);
        tracing::info!("Waiting for client connection...");
        let (stream, peer) = self.accept()?;
        tracing::info!("Connection established from {}", peer);

        let mut session = Session::new(stream, self.config.buffer_size)?;
        self.transition(ServerState::Serving);
        let result = self.serve(&mut session);
        session.close();
        result
    }

    /// Wait for one inbound connection until the accept timeout
    fn accept(&self) -> Result<(TcpStream, SocketAddr)> {
        let deadline = Instant::now() + self.config.accept_timeout;

        loop {
            match self.listener.accept() {
                Ok((stream, peer)) => {
                    stream.set_nonblocking(false)?;
                    return Ok((stream, peer));
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(GeoError::AcceptTimeout(self.config.accept_timeout));
                    }
                    thread::sleep(ACCEPT_POLL_INTERVAL.min(deadline - now));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Receive → dispatch → reply, until the session fails
    fn serve(&self, session: &mut Session) -> Result<()> {
        loop {
            let packet = session.receive()?;
            tracing::debug!(
                command = %packet.command,
                payload = %packet.payload,
                size = packet.size(),
                "Message contents (uncompressed)"
            );

            let reply = self.dispatcher.dispatch(&packet.command, &packet.payload);
            session.send("", &reply)?;
        }
    }

    fn transition(&mut self, next: ServerState) {
        tracing::debug!(from = ?self.state, to = ?next, "Server state");
        self.state = next;
    }
}
