//! SNTP header structure as defined in RFC 4330 Section 4.
//!
//! The layout is described purely by byte offsets; serialization is explicit big-endian
//! and never depends on the in-memory layout of [`NtpPacket`].
//!
//! Wire format:
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |LI | VN  |Mode |    Stratum    |     Poll      |   Precision   |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          Root Delay                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                       Root Dispersion                         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                     Reference Identifier                      |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                   Reference Timestamp (64)                    |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                   Originate Timestamp (64)                    |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                    Receive Timestamp (64)                     |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                    Transmit Timestamp (64)                    |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                 Key Identifier (optional) (32)                |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                 Message Digest (optional) (128)               |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use std::fmt;

use thiserror::Error;

use crate::{
    fixed_point::{SignedFixed16_16, UnsignedFixed16_16},
    status::StatusByte,
    stratum::{classify_stratum, StratumClass},
    timestamp::Timestamp,
};

/// Size of the SNTP header without the authenticator.
pub const NTP_PACKET_SIZE: usize = 48;
/// Size of the optional key identifier and message digest trailer.
pub const AUTHENTICATOR_SIZE: usize = 20;
/// Well-known NTP UDP port.
pub const NTP_PORT: u16 = 123;

/// Errors that can occur when decoding a packet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    /// Buffer is shorter than the 48-byte header.
    #[error("Buffer too small for NtpPacket: need {NTP_PACKET_SIZE} bytes, got {len}")]
    Truncated { len: usize },
}

/// Four-byte reference identifier.
///
/// For stratum 0 and 1 it holds a left-justified, zero-padded ASCII code (a kiss code or a
/// clock source such as `GPS`); for higher strata it usually holds an IPv4 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ReferenceId(pub [u8; 4]);

impl ReferenceId {
    /// Raw bytes in wire order.
    #[must_use]
    pub const fn bytes(&self) -> [u8; 4] {
        self.0
    }

    /// ASCII rendering with trailing NULs dropped and non-printable bytes shown as `.`.
    #[must_use]
    pub fn as_ascii(&self) -> String {
        let end = self
            .0
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |pos| pos + 1);
        self.0[..end]
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect()
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_ascii())
    }
}

impl From<[u8; 4]> for ReferenceId {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

/// SNTP header, 48 bytes on the wire.
///
/// Field values are kept verbatim; unknown modes, versions and strata are not rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct NtpPacket {
    /// Leap indicator, version and mode.
    pub status: StatusByte,
    /// Distance from the reference clock.
    pub stratum: u8,
    /// Maximum interval between successive messages, log2 seconds.
    pub poll: u8,
    /// Precision of the system clock, log2 seconds.
    pub precision: i8,
    /// Round-trip delay to the primary reference source.
    pub root_delay: SignedFixed16_16,
    /// Nominal error relative to the primary reference source.
    pub root_dispersion: UnsignedFixed16_16,
    /// Reference clock or upstream server identifier.
    pub reference_id: ReferenceId,
    /// Time the system clock was last set or corrected.
    pub reference_timestamp: Timestamp,
    /// Time the request departed the client.
    pub originate_timestamp: Timestamp,
    /// Time the request arrived at the server.
    pub receive_timestamp: Timestamp,
    /// Time the reply departed the server.
    pub transmit_timestamp: Timestamp,
}

impl NtpPacket {
    /// Client request: LI = no warning, VN = 4, Mode = client, everything else zero.
    #[must_use]
    pub fn request() -> Self {
        Self {
            status: StatusByte::REQUEST,
            ..Self::default()
        }
    }

    /// Client request carrying the optional transmit timestamp.
    ///
    /// A server copies it into the originate timestamp of its reply.
    #[must_use]
    pub fn request_with_transmit(transmit_timestamp: Timestamp) -> Self {
        Self {
            transmit_timestamp,
            ..Self::request()
        }
    }

    /// Classification of the stratum field.
    #[must_use]
    pub fn stratum_class(&self) -> StratumClass {
        classify_stratum(self.stratum)
    }

    /// Serializes the packet to a 48-byte array in big-endian wire format.
    pub fn to_bytes(&self) -> [u8; NTP_PACKET_SIZE] {
        let mut buf = [0u8; NTP_PACKET_SIZE];
        buf[0] = self.status.to_wire();
        buf[1] = self.stratum;
        buf[2] = self.poll;
        buf[3] = self.precision as u8;
        buf[4..8].copy_from_slice(&self.root_delay.raw().to_be_bytes());
        buf[8..12].copy_from_slice(&self.root_dispersion.raw().to_be_bytes());
        buf[12..16].copy_from_slice(&self.reference_id.bytes());
        buf[16..24].copy_from_slice(&self.reference_timestamp.raw().to_be_bytes());
        buf[24..32].copy_from_slice(&self.originate_timestamp.raw().to_be_bytes());
        buf[32..40].copy_from_slice(&self.receive_timestamp.raw().to_be_bytes());
        buf[40..48].copy_from_slice(&self.transmit_timestamp.raw().to_be_bytes());
        buf
    }

    /// Deserializes a packet from big-endian wire format.
    ///
    /// Bytes past the header (such as an authenticator) are ignored.
    ///
    /// # Errors
    /// Returns [`PacketError::Truncated`] if the buffer is smaller than 48 bytes. Nothing is
    /// read from a short buffer.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, PacketError> {
        let header: &[u8; NTP_PACKET_SIZE] = buf
            .get(..NTP_PACKET_SIZE)
            .and_then(|h| h.try_into().ok())
            .ok_or(PacketError::Truncated { len: buf.len() })?;

        Ok(Self {
            status: StatusByte::from_wire(header[0]),
            stratum: header[1],
            poll: header[2],
            precision: header[3] as i8,
            root_delay: SignedFixed16_16::from_raw(i32::from_be_bytes(array_at(header, 4))),
            root_dispersion: UnsignedFixed16_16::from_raw(u32::from_be_bytes(array_at(
                header, 8,
            ))),
            reference_id: ReferenceId(array_at(header, 12)),
            reference_timestamp: read_timestamp(header, 16),
            originate_timestamp: read_timestamp(header, 24),
            receive_timestamp: read_timestamp(header, 32),
            transmit_timestamp: read_timestamp(header, 40),
        })
    }
}

/// Key identifier and message digest that may trail the header.
///
/// SNTP does not use them; they are carried verbatim and never verified.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Authenticator {
    /// Key identifier.
    pub key_identifier: u32,
    /// Message digest.
    pub message_digest: [u8; 16],
}

impl Authenticator {
    /// Reads the authenticator following the header of a received datagram.
    ///
    /// Returns `None` when the datagram has no complete trailer.
    #[must_use]
    pub fn from_trailer(datagram: &[u8]) -> Option<Self> {
        let trailer: &[u8; AUTHENTICATOR_SIZE] = datagram
            .get(NTP_PACKET_SIZE..NTP_PACKET_SIZE + AUTHENTICATOR_SIZE)?
            .try_into()
            .ok()?;

        Some(Self {
            key_identifier: u32::from_be_bytes(array_at(trailer, 0)),
            message_digest: array_at(trailer, 4),
        })
    }

    /// Serializes the trailer to its 20-byte wire format.
    pub fn to_bytes(&self) -> [u8; AUTHENTICATOR_SIZE] {
        let mut buf = [0u8; AUTHENTICATOR_SIZE];
        buf[0..4].copy_from_slice(&self.key_identifier.to_be_bytes());
        buf[4..20].copy_from_slice(&self.message_digest);
        buf
    }
}

fn array_at<const N: usize, const M: usize>(buf: &[u8; M], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&buf[offset..offset + N]);
    out
}

fn read_timestamp(header: &[u8; NTP_PACKET_SIZE], offset: usize) -> Timestamp {
    Timestamp::from_raw(u64::from_be_bytes(array_at(header, offset)))
}
