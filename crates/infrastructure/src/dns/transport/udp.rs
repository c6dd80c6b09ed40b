//! UDP transport for relayed queries (RFC 1035 §4.2.1).
//!
//! Messages are sent as-is, one datagram out and one datagram back. No
//! truncation handling: a reply with TC set is relayed like any other.

use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Largest reply accepted from an upstream.
const MAX_UDP_RESPONSE_SIZE: usize = 65_535;

/// One-shot UDP exchange with a single server.
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    /// Sends `message` over a fresh ephemeral socket and waits for one reply.
    /// `timeout` bounds the whole exchange, send and receive together.
    pub async fn exchange(&self, message: &[u8], timeout: Duration) -> io::Result<Vec<u8>> {
        tokio::time::timeout(timeout, self.exchange_inner(message))
            .await
            .map_err(|_| {
                io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("no reply from {} within {:?}", self.server_addr, timeout),
                )
            })?
    }

    async fn exchange_inner(&self, message: &[u8]) -> io::Result<Vec<u8>> {
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr).await?;
        // Connected sockets only accept datagrams from the server itself.
        socket.connect(self.server_addr).await?;

        let bytes_sent = socket.send(message).await?;
        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let bytes_received = socket.recv(&mut recv_buf).await?;
        recv_buf.truncate(bytes_received);

        debug!(server = %self.server_addr, bytes_received, "UDP response received");
        Ok(recv_buf)
    }
}
