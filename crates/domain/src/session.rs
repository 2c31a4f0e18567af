use std::net::SocketAddr;

/// Who asked: the client's address and the transaction id it used.
///
/// Recorded when a query is forwarded upstream so that the response can be
/// handed back with the id the client expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub client_addr: SocketAddr,
    pub client_id: u16,
}

impl Session {
    pub fn new(client_addr: SocketAddr, client_id: u16) -> Self {
        Self {
            client_addr,
            client_id,
        }
    }
}
