use dnsrelay_infrastructure::dns::{DatagramTransport, UdpTransport};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;

#[tokio::test]
async fn test_receive_and_send_over_loopback() {
    let transport = UdpTransport::bind("127.0.0.1:0".parse().unwrap()).unwrap();
    let relay_addr = transport.local_addr().unwrap();

    let peer = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let peer_addr = peer.local_addr().unwrap();
    peer.send_to(b"hello relay", relay_addr).await.unwrap();

    let (datagram, from) = tokio::time::timeout(Duration::from_secs(2), transport.receive())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(datagram, b"hello relay");
    assert_eq!(from, peer_addr);

    transport.send(b"hello peer", from).await.unwrap();
    let mut buf = [0u8; 64];
    let (len, from) = tokio::time::timeout(Duration::from_secs(2), peer.recv_from(&mut buf))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(&buf[..len], b"hello peer");
    assert_eq!(from, relay_addr);
}

#[tokio::test]
async fn test_receive_keeps_full_datagram() {
    let transport = UdpTransport::bind("127.0.0.1:0".parse().unwrap()).unwrap();
    let relay_addr = transport.local_addr().unwrap();
    let peer = UdpSocket::bind("127.0.0.1:0").await.unwrap();

    let payload = vec![0xA5u8; 1400];
    peer.send_to(&payload, relay_addr).await.unwrap();

    let (datagram, _) = tokio::time::timeout(Duration::from_secs(2), transport.receive())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(datagram.len(), 1400);
}

#[tokio::test]
async fn test_dual_stack_reports_ipv4_peers_canonically() {
    // Hosts without IPv6 cannot bind [::]; nothing to check there.
    let Ok(transport) = UdpTransport::bind("[::]:0".parse().unwrap()) else {
        return;
    };
    let port = transport.local_addr().unwrap().port();
    let relay_v4: SocketAddr = SocketAddr::from(([127, 0, 0, 1], port));

    let peer = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let peer_addr = peer.local_addr().unwrap();
    if peer.send_to(b"v4", relay_v4).await.is_err() {
        return;
    }

    let Ok(Ok((_, from))) =
        tokio::time::timeout(Duration::from_secs(2), transport.receive()).await
    else {
        return;
    };
    assert_eq!(from, peer_addr);

    transport.send(b"back", from).await.unwrap();
    let mut buf = [0u8; 16];
    let (len, _) = tokio::time::timeout(Duration::from_secs(2), peer.recv_from(&mut buf))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(&buf[..len], b"back");
}
