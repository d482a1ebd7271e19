//! Connectionless UDP transport: socket lifecycle and fire-and-forget sends.

use opengauge_protocol::PACKET_SIZE;
use std::io;
use std::net::{Ipv4Addr, SocketAddrV4, UdpSocket};

/// Owns the outbound datagram socket. Knows nothing about packet semantics;
/// it moves byte images.
///
/// Lifecycle: `Unopened → open() → Working → close() → Unopened`. A failed
/// `open` leaves no partial state, and `close` is idempotent.
#[derive(Debug, Default)]
pub struct OutGaugeTransport {
    socket: Option<UdpSocket>,
}

impl OutGaugeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the send socket: bound to no meaningful local address
    /// (ephemeral port on the wildcard interface) and set non-blocking so a
    /// full kernel buffer drops the datagram instead of stalling the frame
    /// loop.
    ///
    /// # Errors
    ///
    /// Propagates the platform error (resource exhaustion, permission
    /// denial). The transport stays unopened; `open` may be retried.
    pub fn open(&mut self) -> io::Result<()> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        socket.set_nonblocking(true)?;
        self.socket = Some(socket);
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.socket.is_some()
    }

    /// Fire one datagram at `addr:port`. Returns false without side effects
    /// when the transport is not open.
    ///
    /// Transmission failures are swallowed: UDP gives no delivery guarantee,
    /// so a failed send is indistinguishable from a datagram that was sent
    /// and lost, and logging here would flood at simulation-tick rates.
    pub fn send(&self, payload: &[u8; PACKET_SIZE], addr: Ipv4Addr, port: u16) -> bool {
        let Some(socket) = &self.socket else {
            return false;
        };
        let _ = socket.send_to(payload, SocketAddrV4::new(addr, port));
        true
    }

    /// Release the socket if open. Safe to call repeatedly; subsequent
    /// `send` calls become no-ops.
    pub fn close(&mut self) {
        self.socket = None;
    }
}
