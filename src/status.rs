//! Status byte accessors (RFC 4330 Section 4).
//!
//! The first header byte packs three fields: LI (2 bits) | VN (3 bits) | Mode (3 bits)
//!
//! - LI (bits 7-6): Leap indicator, warning of an impending leap second.
//! - VN (bits 5-3): Protocol version number. Currently 4.
//! - Mode (bits 2-0): Association mode.
//!
//! Every 8-bit value decodes to some status; nothing is rejected here so that a caller can
//! inspect odd replies verbatim.

use std::fmt;

use serde::Serialize;

const LI_MASK: u8 = 0b1100_0000;
const LI_SHIFT: u8 = 6;
const VN_MASK: u8 = 0b0011_1000;
const VN_SHIFT: u8 = 3;
const MODE_MASK: u8 = 0b0000_0111;

/// Version number put into requests.
pub const SNTP_VERSION: u8 = 4;

/// Leap indicator warning of an impending leap second.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
pub enum LeapIndicator {
    /// No warning.
    #[default]
    NoWarning = 0,
    /// Last minute of the day has 61 seconds.
    LastMinuteHas61Seconds = 1,
    /// Last minute of the day has 59 seconds.
    LastMinuteHas59Seconds = 2,
    /// Alarm condition, clock not synchronized.
    AlarmCondition = 3,
}

impl LeapIndicator {
    /// Decodes the two low bits of `value`.
    #[must_use]
    pub fn from_bits(value: u8) -> Self {
        match value & 0b11 {
            0 => LeapIndicator::NoWarning,
            1 => LeapIndicator::LastMinuteHas61Seconds,
            2 => LeapIndicator::LastMinuteHas59Seconds,
            _ => LeapIndicator::AlarmCondition,
        }
    }
}

impl fmt::Display for LeapIndicator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LeapIndicator::NoWarning => write!(f, "no warning"),
            LeapIndicator::LastMinuteHas61Seconds => write!(f, "last minute has 61 seconds"),
            LeapIndicator::LastMinuteHas59Seconds => write!(f, "last minute has 59 seconds"),
            LeapIndicator::AlarmCondition => write!(f, "alarm condition"),
        }
    }
}

/// Association mode.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
pub enum Mode {
    /// Reserved (0).
    #[default]
    Reserved = 0,
    /// Symmetric active (1).
    SymmetricActive = 1,
    /// Symmetric passive (2).
    SymmetricPassive = 2,
    /// Client (3).
    Client = 3,
    /// Server (4).
    Server = 4,
    /// Broadcast (5).
    Broadcast = 5,
    /// Reserved for NTP control messages (6).
    Reserved6 = 6,
    /// Reserved for private use (7).
    Reserved7 = 7,
}

impl Mode {
    /// Decodes the three low bits of `value`.
    #[must_use]
    pub fn from_bits(value: u8) -> Self {
        match value & MODE_MASK {
            0 => Mode::Reserved,
            1 => Mode::SymmetricActive,
            2 => Mode::SymmetricPassive,
            3 => Mode::Client,
            4 => Mode::Server,
            5 => Mode::Broadcast,
            6 => Mode::Reserved6,
            _ => Mode::Reserved7,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Reserved => write!(f, "reserved"),
            Mode::SymmetricActive => write!(f, "symmetric active"),
            Mode::SymmetricPassive => write!(f, "symmetric passive"),
            Mode::Client => write!(f, "client"),
            Mode::Server => write!(f, "server"),
            Mode::Broadcast => write!(f, "broadcast"),
            Mode::Reserved6 => write!(f, "reserved (6)"),
            Mode::Reserved7 => write!(f, "reserved (7)"),
        }
    }
}

/// Decoded status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
pub struct StatusByte {
    /// Leap indicator (LI).
    pub leap_indicator: LeapIndicator,
    /// Version number (VN), 0-7. Kept verbatim even for unknown versions.
    pub version: u8,
    /// Association mode.
    pub mode: Mode,
}

impl StatusByte {
    /// Status byte of a client request: LI = no warning, VN = 4, Mode = client.
    pub const REQUEST: StatusByte = StatusByte {
        leap_indicator: LeapIndicator::NoWarning,
        version: SNTP_VERSION,
        mode: Mode::Client,
    };

    /// Decodes a status byte from its wire value.
    #[must_use]
    pub fn from_wire(value: u8) -> Self {
        Self {
            leap_indicator: leap_indicator(value),
            version: version(value),
            mode: mode(value),
        }
    }

    /// Encodes the status byte. The version is masked to 3 bits.
    #[must_use]
    pub fn to_wire(&self) -> u8 {
        let li_bits = (self.leap_indicator as u8) << LI_SHIFT;
        let vn_bits = (self.version << VN_SHIFT) & VN_MASK;
        let mode_bits = self.mode as u8;

        li_bits | vn_bits | mode_bits
    }
}

impl From<u8> for StatusByte {
    fn from(value: u8) -> Self {
        Self::from_wire(value)
    }
}

impl From<StatusByte> for u8 {
    fn from(status: StatusByte) -> Self {
        status.to_wire()
    }
}

/// Extracts the leap indicator from a raw status byte.
#[must_use]
pub fn leap_indicator(status: u8) -> LeapIndicator {
    LeapIndicator::from_bits((status & LI_MASK) >> LI_SHIFT)
}

/// Extracts the version number from a raw status byte.
#[must_use]
pub fn version(status: u8) -> u8 {
    (status & VN_MASK) >> VN_SHIFT
}

/// Extracts the mode from a raw status byte.
#[must_use]
pub fn mode(status: u8) -> Mode {
    Mode::from_bits(status & MODE_MASK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_request_byte() {
        let status = StatusByte::from_wire(0b00_100_011);
        assert_eq!(status.leap_indicator, LeapIndicator::NoWarning);
        assert_eq!(status.version, 4);
        assert_eq!(status.mode, Mode::Client);
    }

    #[test]
    fn test_request_constant_encodes_to_0x23() {
        assert_eq!(StatusByte::REQUEST.to_wire(), 0x23);
        assert_eq!(u8::from(StatusByte::REQUEST), 0b00_100_011);
    }

    #[test]
    fn test_typical_server_reply() {
        // LI = 0, VN = 4, Mode = 4
        let status = StatusByte::from_wire(0x24);
        assert_eq!(status.mode, Mode::Server);
        assert_eq!(status.version, 4);

        // LI = 3 (unsynchronized), VN = 3, Mode = 4
        let status = StatusByte::from_wire(0xDC);
        assert_eq!(status.leap_indicator, LeapIndicator::AlarmCondition);
        assert_eq!(status.version, 3);
        assert_eq!(status.mode, Mode::Server);
    }

    #[test]
    fn test_every_byte_roundtrips() {
        for value in 0..=u8::MAX {
            assert_eq!(
                StatusByte::from_wire(value).to_wire(),
                value,
                "roundtrip failed for {:#010b}",
                value
            );
        }
    }

    #[test]
    fn test_accessors_are_independent() {
        assert_eq!(leap_indicator(0b1000_0000), LeapIndicator::LastMinuteHas59Seconds);
        assert_eq!(leap_indicator(0b0100_0000), LeapIndicator::LastMinuteHas61Seconds);
        assert_eq!(version(0b0011_1000), 7);
        assert_eq!(version(0b1100_0111), 0);
        assert_eq!(mode(0b1111_1000), Mode::Reserved);
        assert_eq!(mode(0b0000_0111), Mode::Reserved7);
        assert_eq!(mode(0b0000_0101), Mode::Broadcast);
    }

    #[test]
    fn test_version_masked_on_encode() {
        let status = StatusByte {
            leap_indicator: LeapIndicator::NoWarning,
            version: 0xFF,
            mode: Mode::Reserved,
        };
        assert_eq!(status.to_wire(), 0b0011_1000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Mode::Client.to_string(), "client");
        assert_eq!(LeapIndicator::AlarmCondition.to_string(), "alarm condition");
    }
}
