pub mod udp;

use async_trait::async_trait;
use dnsrelay_domain::DomainError;
use std::net::SocketAddr;

pub use udp::UdpTransport;

/// Largest datagram the relay will read.
pub const MAX_DATAGRAM_SIZE: usize = 4096;

/// A socket that exchanges whole datagrams with arbitrary peers.
#[async_trait]
pub trait DatagramTransport: Send + Sync {
    async fn send(&self, bytes: &[u8], to: SocketAddr) -> Result<(), DomainError>;

    /// Waits for the next datagram and returns it with its source address.
    async fn receive(&self) -> Result<(Vec<u8>, SocketAddr), DomainError>;

    fn local_addr(&self) -> Result<SocketAddr, DomainError>;
}
