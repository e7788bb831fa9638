//! UDP transport used by the `sntp` binary.
//!
//! This is the consumer side of the codec: it owns the socket, sends one request and decodes
//! one reply. The codec modules never call into it. No retries are made; a caller that wants
//! them loops around [`query`].

use std::{
    io,
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
    time::Duration,
};

use thiserror::Error;
use tokio::{net::UdpSocket, time::timeout};

use crate::{
    packets::{Authenticator, NtpPacket, PacketError, NTP_PACKET_SIZE},
    timestamp::Timestamp,
};

/// Errors that can occur while querying a time server.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Cannot resolve {0}")]
    Resolve(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("No reply within {0:?}")]
    Timeout(Duration),
    #[error("Invalid reply: {0}")]
    Packet(#[from] PacketError),
}

/// Decoded reply together with what the transport observed.
#[derive(Debug, Clone)]
pub struct Reply {
    /// Decoded header.
    pub packet: NtpPacket,
    /// Size of the received datagram.
    pub received_bytes: usize,
    /// Address the reply came from.
    pub source: SocketAddr,
    /// Key identifier and digest trailing the header, if the server sent them.
    pub authenticator: Option<Authenticator>,
    /// Transmit timestamp placed in the request.
    pub request_transmit: Timestamp,
}

/// Resolves `host` to the first socket address it maps to.
pub async fn resolve(host: &str, port: u16) -> Result<SocketAddr, ClientError> {
    let mut addrs = tokio::net::lookup_host((host, port))
        .await
        .map_err(|_| ClientError::Resolve(host.to_string()))?;
    addrs
        .next()
        .ok_or_else(|| ClientError::Resolve(host.to_string()))
}

/// Sends one client request to `server` and waits up to `wait` for the reply.
///
/// Only datagrams coming from `server` are accepted as the reply.
///
/// # Errors
/// Returns [`ClientError::Timeout`] when nothing arrives in time and
/// [`ClientError::Packet`] when the datagram is shorter than the header.
pub async fn query(server: SocketAddr, wait: Duration) -> Result<Reply, ClientError> {
    let local_addr: SocketAddr = match server.ip() {
        IpAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
        IpAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
    };
    let socket = UdpSocket::bind(local_addr).await?;
    // Datagrams from any other address are dropped by the connected socket.
    socket.connect(server).await?;

    let request_transmit = Timestamp::now();
    let request = NtpPacket::request_with_transmit(request_transmit);

    log::debug!("Sending {} byte request to {}", NTP_PACKET_SIZE, server);
    socket.send(&request.to_bytes()).await?;

    // Room for the header, an authenticator and any extension a server might append.
    let mut buf = [0u8; 1024];
    let len = timeout(wait, socket.recv(&mut buf))
        .await
        .map_err(|_| ClientError::Timeout(wait))??;
    let datagram = &buf[..len];

    log::debug!("Received {} bytes from {}", len, server);
    if len < NTP_PACKET_SIZE {
        log::warn!(
            "Short reply from {}: {} out of {} bytes",
            server,
            len,
            NTP_PACKET_SIZE
        );
    }

    let packet = NtpPacket::from_bytes(datagram)?;
    if packet.originate_timestamp != request_transmit {
        log::warn!(
            "Originate timestamp {:#018x} does not echo request {:#018x}",
            packet.originate_timestamp.raw(),
            request_transmit.raw()
        );
    }

    let authenticator = Authenticator::from_trailer(datagram);
    if let Some(auth) = &authenticator {
        log::debug!("Reply carries key identifier {}", auth.key_identifier);
    }

    Ok(Reply {
        packet,
        received_bytes: len,
        source: server,
        authenticator,
        request_transmit,
    })
}
