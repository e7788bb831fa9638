//! Fixed-point numeric formats carried in the SNTP header.
//!
//! Root delay and root dispersion use a 16.16 format (signed and unsigned respectively),
//! timestamps use unsigned 32.32. All values stored here are in host order; big-endian
//! conversion happens in [`crate::packets`]. Splitting and recomposing are exact bit
//! reinterpretations, only the `f64` helpers lose precision.

use serde::Serialize;

/// Signed 16.16 fixed-point value, used for the root delay.
///
/// The root delay can be negative when the measurement is skewed.
///
/// ```
/// use sntp_header::fixed_point::SignedFixed16_16;
/// let delay = SignedFixed16_16::from_parts(-1, 0x8000);
/// assert_eq!(delay.as_seconds_f64(), -0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
pub struct SignedFixed16_16 {
    raw: i32,
}

impl SignedFixed16_16 {
    /// Wraps a raw host-order value.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self { raw }
    }

    /// Builds the value from its integer and fraction halves.
    #[must_use]
    pub const fn from_parts(integer: i16, fraction: u16) -> Self {
        Self {
            raw: ((integer as i32) << 16) | fraction as i32,
        }
    }

    /// Raw 32-bit value.
    #[must_use]
    pub const fn raw(&self) -> i32 {
        self.raw
    }

    /// Upper 16 bits, sign included.
    #[must_use]
    pub const fn integer(&self) -> i16 {
        (self.raw >> 16) as i16
    }

    /// Lower 16 bits, in units of 2^-16 seconds.
    #[must_use]
    pub const fn fraction(&self) -> u16 {
        self.raw as u16
    }

    /// Lossy conversion to seconds.
    #[must_use]
    pub fn as_seconds_f64(&self) -> f64 {
        self.raw as f64 / 65536.0
    }

    /// Lossy conversion to milliseconds.
    #[must_use]
    pub fn as_millis_f64(&self) -> f64 {
        self.as_seconds_f64() * 1000.0
    }
}

/// Unsigned 16.16 fixed-point value, used for the root dispersion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
pub struct UnsignedFixed16_16 {
    raw: u32,
}

impl UnsignedFixed16_16 {
    /// Wraps a raw host-order value.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self { raw }
    }

    /// Builds the value from its integer and fraction halves.
    #[must_use]
    pub const fn from_parts(integer: u16, fraction: u16) -> Self {
        Self {
            raw: ((integer as u32) << 16) | fraction as u32,
        }
    }

    /// Raw 32-bit value.
    #[must_use]
    pub const fn raw(&self) -> u32 {
        self.raw
    }

    /// Upper 16 bits.
    #[must_use]
    pub const fn integer(&self) -> u16 {
        (self.raw >> 16) as u16
    }

    /// Lower 16 bits, in units of 2^-16 seconds.
    #[must_use]
    pub const fn fraction(&self) -> u16 {
        self.raw as u16
    }

    /// Lossy conversion to seconds.
    #[must_use]
    pub fn as_seconds_f64(&self) -> f64 {
        self.raw as f64 / 65536.0
    }

    /// Lossy conversion to milliseconds.
    #[must_use]
    pub fn as_millis_f64(&self) -> f64 {
        self.as_seconds_f64() * 1000.0
    }
}

/// Unsigned 32.32 fixed-point value. The base representation of NTP timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Serialize)]
pub struct UnsignedFixed32_32 {
    raw: u64,
}

impl UnsignedFixed32_32 {
    /// Wraps a raw host-order value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self { raw }
    }

    /// Builds the value from its integer and fraction halves.
    #[must_use]
    pub const fn from_parts(integer: u32, fraction: u32) -> Self {
        Self {
            raw: ((integer as u64) << 32) | fraction as u64,
        }
    }

    /// Raw 64-bit value.
    #[must_use]
    pub const fn raw(&self) -> u64 {
        self.raw
    }

    /// Upper 32 bits.
    #[must_use]
    pub const fn integer(&self) -> u32 {
        (self.raw >> 32) as u32
    }

    /// Lower 32 bits, in units of 2^-32.
    #[must_use]
    pub const fn fraction(&self) -> u32 {
        self.raw as u32
    }

    /// Lossy conversion of the whole value to `f64`.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.integer() as f64 + self.fraction() as f64 / 4_294_967_296.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_split_positive() {
        let v = SignedFixed16_16::from_raw(0x0001_8000);
        assert_eq!(v.integer(), 1);
        assert_eq!(v.fraction(), 0x8000);
        assert_eq!(v.as_seconds_f64(), 1.5);
    }

    #[test]
    fn test_signed_split_negative() {
        let v = SignedFixed16_16::from_raw(-0x8000);
        assert_eq!(v.integer(), -1);
        assert_eq!(v.fraction(), 0x8000);
        assert_eq!(v.as_seconds_f64(), -0.5);
        assert_eq!(v.as_millis_f64(), -500.0);
    }

    #[test]
    fn test_signed_parts_recompose() {
        for &raw in &[0i32, 1, -1, i32::MIN, i32::MAX, 0x1234_5678, -0x1234_5678] {
            let v = SignedFixed16_16::from_raw(raw);
            assert_eq!(
                SignedFixed16_16::from_parts(v.integer(), v.fraction()).raw(),
                raw,
                "recompose failed for {:#x}",
                raw
            );
        }
    }

    #[test]
    fn test_unsigned_16_16_split() {
        let v = UnsignedFixed16_16::from_raw(0xFFFF_0001);
        assert_eq!(v.integer(), 0xFFFF);
        assert_eq!(v.fraction(), 1);
        assert!(v.as_seconds_f64() > 0.0);
        assert_eq!(UnsignedFixed16_16::from_parts(0xFFFF, 1), v);
    }

    #[test]
    fn test_unsigned_16_16_quarter_second() {
        let v = UnsignedFixed16_16::from_parts(0, 0x4000);
        assert_eq!(v.as_millis_f64(), 250.0);
    }

    #[test]
    fn test_unsigned_32_32_split() {
        let v = UnsignedFixed32_32::from_raw(0xDEAD_BEEF_0000_0001);
        assert_eq!(v.integer(), 0xDEAD_BEEF);
        assert_eq!(v.fraction(), 1);
        assert_eq!(UnsignedFixed32_32::from_parts(0xDEAD_BEEF, 1), v);
    }

    #[test]
    fn test_unsigned_32_32_half() {
        let v = UnsignedFixed32_32::from_parts(10, 0x8000_0000);
        assert_eq!(v.as_f64(), 10.5);
    }

    #[test]
    fn test_defaults_are_zero() {
        assert_eq!(SignedFixed16_16::default().raw(), 0);
        assert_eq!(UnsignedFixed16_16::default().raw(), 0);
        assert_eq!(UnsignedFixed32_32::default().raw(), 0);
    }
}
