#![allow(dead_code)]
use async_trait::async_trait;
use dnsrelay_domain::DomainError;
use dnsrelay_infrastructure::dns::DatagramTransport;
use std::net::SocketAddr;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// In-memory transport: records everything sent, and hands out datagrams
/// pushed with `push_incoming`.
pub struct MockTransport {
    local: SocketAddr,
    sent: Mutex<Vec<(Vec<u8>, SocketAddr)>>,
    incoming_tx: mpsc::UnboundedSender<(Vec<u8>, SocketAddr)>,
    incoming_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<(Vec<u8>, SocketAddr)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        let (incoming_tx, incoming_rx) = mpsc::unbounded_channel();
        Self {
            local: "127.0.0.1:53".parse().unwrap(),
            sent: Mutex::new(Vec::new()),
            incoming_tx,
            incoming_rx: tokio::sync::Mutex::new(incoming_rx),
        }
    }

    pub fn push_incoming(&self, datagram: Vec<u8>, from: SocketAddr) {
        self.incoming_tx.send((datagram, from)).unwrap();
    }

    pub fn sent(&self) -> Vec<(Vec<u8>, SocketAddr)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_sent(&self) -> (Vec<u8>, SocketAddr) {
        self.sent.lock().unwrap().last().cloned().expect("nothing sent")
    }
}

#[async_trait]
impl DatagramTransport for MockTransport {
    async fn send(&self, bytes: &[u8], to: SocketAddr) -> Result<(), DomainError> {
        self.sent.lock().unwrap().push((bytes.to_vec(), to));
        Ok(())
    }

    async fn receive(&self) -> Result<(Vec<u8>, SocketAddr), DomainError> {
        self.incoming_rx
            .lock()
            .await
            .recv()
            .await
            .ok_or_else(|| DomainError::IoError("mock transport closed".to_string()))
    }

    fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        Ok(self.local)
    }
}
