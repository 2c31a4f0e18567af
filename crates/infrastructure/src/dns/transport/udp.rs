//! The relay's single UDP socket.
//!
//! Bound once, used both for client traffic and for the upstream resolver.
//! An IPv6 wildcard bind is made dual-stack so IPv4 clients are served on
//! the same socket. Peer addresses of the form `::ffff:a.b.c.d` are reported
//! as plain IPv4 and mapped back on send, so callers only ever see and pass
//! canonical addresses.

use super::{DatagramTransport, MAX_DATAGRAM_SIZE};
use async_trait::async_trait;
use dnsrelay_domain::DomainError;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::{IpAddr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::debug;

const SOCKET_BUFFER_SIZE: usize = 256 * 1024;

pub struct UdpTransport {
    socket: UdpSocket,
    dual_stack: bool,
}

impl UdpTransport {
    /// Binds `addr`. Must be called from within a Tokio runtime.
    pub fn bind(addr: SocketAddr) -> Result<Self, DomainError> {
        let domain = if addr.is_ipv4() {
            Domain::IPV4
        } else {
            Domain::IPV6
        };

        let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))
            .map_err(|e| io_error("create UDP socket", addr, e))?;
        if addr.is_ipv6() {
            socket
                .set_only_v6(false)
                .map_err(|e| io_error("enable dual-stack on", addr, e))?;
        }
        socket
            .set_reuse_address(true)
            .map_err(|e| io_error("set SO_REUSEADDR on", addr, e))?;
        // Kernel may clamp these; a smaller buffer is not fatal.
        let _ = socket.set_recv_buffer_size(SOCKET_BUFFER_SIZE);
        let _ = socket.set_send_buffer_size(SOCKET_BUFFER_SIZE);
        socket
            .bind(&addr.into())
            .map_err(|e| io_error("bind", addr, e))?;
        socket
            .set_nonblocking(true)
            .map_err(|e| io_error("set non-blocking on", addr, e))?;

        let std_socket: std::net::UdpSocket = socket.into();
        let socket = UdpSocket::from_std(std_socket)
            .map_err(|e| io_error("register with runtime", addr, e))?;

        debug!(bind_address = %addr, "UDP transport bound");

        Ok(Self {
            socket,
            dual_stack: addr.is_ipv6(),
        })
    }

    fn outgoing_addr(&self, to: SocketAddr) -> SocketAddr {
        match to.ip() {
            IpAddr::V4(v4) if self.dual_stack => {
                SocketAddr::new(IpAddr::V6(v4.to_ipv6_mapped()), to.port())
            }
            _ => to,
        }
    }
}

#[async_trait]
impl DatagramTransport for UdpTransport {
    async fn send(&self, bytes: &[u8], to: SocketAddr) -> Result<(), DomainError> {
        self.socket
            .send_to(bytes, self.outgoing_addr(to))
            .await
            .map_err(|e| {
                DomainError::IoError(format!(
                    "Failed to send {} bytes to {}: {}",
                    bytes.len(),
                    to,
                    e
                ))
            })?;
        Ok(())
    }

    async fn receive(&self) -> Result<(Vec<u8>, SocketAddr), DomainError> {
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        let (len, from) = self
            .socket
            .recv_from(&mut buf)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to receive datagram: {}", e)))?;
        buf.truncate(len);
        Ok((buf, canonical(from)))
    }

    fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.socket.local_addr().map_err(DomainError::from)
    }
}

#[inline]
fn canonical(addr: SocketAddr) -> SocketAddr {
    SocketAddr::new(addr.ip().to_canonical(), addr.port())
}

fn io_error(action: &str, addr: SocketAddr, e: std::io::Error) -> DomainError {
    DomainError::IoError(format!("Failed to {} {}: {}", action, addr, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_canonical_unwraps_mapped_ipv4() {
        let mapped = SocketAddr::new(
            IpAddr::V6(Ipv4Addr::new(10, 0, 0, 7).to_ipv6_mapped()),
            5353,
        );
        assert_eq!(canonical(mapped), "10.0.0.7:5353".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_canonical_keeps_real_ipv6() {
        let addr = SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), 53);
        assert_eq!(canonical(addr), addr);
    }

    #[tokio::test]
    async fn test_ipv4_bind_sends_ipv4_unchanged() {
        let transport = UdpTransport::bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let to: SocketAddr = "127.0.0.1:53".parse().unwrap();
        assert_eq!(transport.outgoing_addr(to), to);
    }
}
