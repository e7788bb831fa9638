//! SNTP header codec - Simple Network Time Protocol wire format per RFC 4330.
//!
//! This crate builds client requests, decodes server replies and turns their fixed-point
//! fields and 64-bit timestamps into usable values: delay and dispersion, time of day and a
//! calendar date. The codec itself never touches the network; the `client` module and the
//! `sntp` binary are a thin transport on top of it.
//!
//! # Usage
//!
//! Query a server:
//! ```bash
//! sntp pool.ntp.org
//! sntp --output-format json --timeout-ms 2000 time.example.org
//! ```
//!
//! Decode a reply buffer:
//! ```
//! use sntp_header::packets::NtpPacket;
//! let reply = [0x24u8; 48];
//! let packet = NtpPacket::from_bytes(&reply).unwrap();
//! let tod = packet.transmit_timestamp.time_of_day();
//! assert!(tod.hours < 24);
//! ```

/// Calendar date decoding from day counts since 1900.
pub mod calendar;
/// UDP transport for querying a time server.
pub mod client;
/// Command-line configuration and validation.
pub mod configuration;
/// Fixed-point 16.16 and 32.32 numerics.
pub mod fixed_point;
/// SNTP packet structure and serialization.
pub mod packets;
/// Text and JSON reports of decoded replies.
pub mod report;
/// Leap indicator, version and mode accessors.
pub mod status;
/// Stratum classification.
pub mod stratum;
/// NTP timestamps and time-of-day decomposition.
pub mod timestamp;
