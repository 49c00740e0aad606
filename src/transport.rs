//! Transport Adapters
//!
//! Thin wrappers around the reliable stream socket (TCP) and the unreliable
//! datagram socket (UDP). All protocol logic lives elsewhere; this module
//! owns only byte I/O.
//!
//! During the handshake the stream socket is blocking; once the session is
//! active it is switched to non-blocking so the dispatch loop can poll it
//! from the simulation tick without ever stalling.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, UdpSocket};
use std::time::Duration;

use tracing::warn;

/// Interval between listener bind attempts while the port is busy.
pub const BIND_RETRY_INTERVAL: Duration = Duration::from_secs(10);

/// Largest datagram the unreliable channel will receive.
pub const MAX_DATAGRAM: usize = 1024;

// =============================================================================
// RELIABLE STREAM
// =============================================================================

/// Reliable, ordered, connection-oriented channel.
#[derive(Debug)]
pub struct StreamChannel {
    stream: TcpStream,
}

impl StreamChannel {
    /// Connect to a remote endpoint (blocking).
    pub fn connect(addr: SocketAddr) -> io::Result<Self> {
        let stream = TcpStream::connect(addr)?;
        Ok(Self { stream })
    }

    /// Wrap an accepted connection.
    pub fn from_accepted(stream: TcpStream) -> Self {
        Self { stream }
    }

    /// Switch the socket to non-blocking mode for steady-state polling.
    pub fn set_nonblocking(&self) -> io::Result<()> {
        self.stream.set_nonblocking(true)
    }

    /// Write a complete encoded frame.
    pub fn send_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.stream.write_all(bytes)
    }

    /// Read exactly one length-prefixed frame (blocking; handshake only).
    ///
    /// Returns the bytes after the length prefix (`[tag][payload]`). A peer
    /// that closes mid-frame surfaces as `UnexpectedEof`.
    pub fn read_frame_blocking(&mut self) -> io::Result<Vec<u8>> {
        let mut len_bytes = [0u8; 2];
        self.stream.read_exact(&mut len_bytes)?;
        let len = u16::from_be_bytes(len_bytes) as usize;
        let mut frame = vec![0u8; len];
        self.stream.read_exact(&mut frame)?;
        Ok(frame)
    }

    /// Non-blocking read of whatever bytes are currently available.
    ///
    /// Returns `Ok(None)` when nothing is readable, `Ok(Some(0))` when the
    /// peer has closed the connection, and `Ok(Some(n))` otherwise.
    pub fn poll_read(&mut self, buf: &mut [u8]) -> io::Result<Option<usize>> {
        match self.stream.read(buf) {
            Ok(n) => Ok(Some(n)),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// The remote endpoint's address.
    pub fn peer_addr(&self) -> io::Result<SocketAddr> {
        self.stream.peer_addr()
    }
}

// =============================================================================
// LISTENER
// =============================================================================

/// Listening endpoint for the acceptor role.
#[derive(Debug)]
pub struct StreamListener {
    listener: TcpListener,
}

impl StreamListener {
    /// Bind the listening port, retrying every [`BIND_RETRY_INTERVAL`] until
    /// it becomes available. The process is expected to wait indefinitely.
    pub fn bind_with_retry(port: u16) -> Self {
        loop {
            match TcpListener::bind(("0.0.0.0", port)) {
                Ok(listener) => return Self { listener },
                Err(e) => {
                    warn!(port, error = %e, "bind failed, retrying in 10 seconds");
                    std::thread::sleep(BIND_RETRY_INTERVAL);
                }
            }
        }
    }

    /// Bind without retry. Used by tests that need an ephemeral port.
    pub fn bind(port: u16) -> io::Result<Self> {
        let listener = TcpListener::bind(("0.0.0.0", port))?;
        Ok(Self { listener })
    }

    /// Accept one incoming connection (blocking).
    pub fn accept(&self) -> io::Result<(StreamChannel, SocketAddr)> {
        let (stream, addr) = self.listener.accept()?;
        Ok((StreamChannel::from_accepted(stream), addr))
    }

    /// The locally bound address.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

// =============================================================================
// UNRELIABLE DATAGRAMS
// =============================================================================

/// Connectionless channel for high-frequency updates; may lose, duplicate,
/// or reorder packets.
#[derive(Debug)]
pub struct DatagramChannel {
    socket: UdpSocket,
}

impl DatagramChannel {
    /// Bind the well-known datagram port, non-blocking from the start.
    pub fn bind(port: u16) -> io::Result<Self> {
        let socket = UdpSocket::bind(("0.0.0.0", port))?;
        socket.set_nonblocking(true)?;
        Ok(Self { socket })
    }

    /// Send one datagram to the fixed remote endpoint.
    pub fn send_to(&self, bytes: &[u8], addr: SocketAddr) -> io::Result<()> {
        self.socket.send_to(bytes, addr)?;
        Ok(())
    }

    /// Non-blocking receive of one queued datagram.
    ///
    /// Returns `Ok(None)` when the queue is empty.
    pub fn poll_recv(&self, buf: &mut [u8]) -> io::Result<Option<(usize, SocketAddr)>> {
        match self.socket.recv_from(buf) {
            Ok((n, addr)) => Ok(Some((n, addr))),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// The locally bound address.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}
