//! Classification of the stratum byte.

use std::fmt;

use serde::Serialize;

/// Highest stratum value that still denotes a secondary reference.
pub const LAST_SECONDARY_REFERENCE: u8 = 15;

/// Classification of the stratum byte of a reply.
///
/// Stratum is never treated as an error; the caller decides what to do with, for example,
/// a kiss-of-death reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "class", content = "stratum", rename_all = "snake_case")]
pub enum StratumClass {
    /// Stratum 0: kiss-of-death advisory, the reference identifier carries a kiss code.
    KissOfDeath,
    /// Stratum 1: primary reference (e.g. GPS, radio clock).
    PrimaryReference,
    /// Stratum 2-15: secondary reference synchronized over NTP.
    SecondaryReference(u8),
    /// Stratum 16-255: reserved or unsynchronized.
    Unknown(u8),
}

/// Classifies a raw stratum value.
#[must_use]
pub fn classify_stratum(stratum: u8) -> StratumClass {
    match stratum {
        0 => StratumClass::KissOfDeath,
        1 => StratumClass::PrimaryReference,
        2..=LAST_SECONDARY_REFERENCE => StratumClass::SecondaryReference(stratum),
        _ => StratumClass::Unknown(stratum),
    }
}

impl fmt::Display for StratumClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StratumClass::KissOfDeath => write!(f, "kiss-o'-death"),
            StratumClass::PrimaryReference => write!(f, "primary reference"),
            StratumClass::SecondaryReference(n) => write!(f, "secondary reference ({})", n),
            StratumClass::Unknown(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_table() {
        assert_eq!(classify_stratum(0), StratumClass::KissOfDeath);
        assert_eq!(classify_stratum(1), StratumClass::PrimaryReference);
        assert_eq!(classify_stratum(2), StratumClass::SecondaryReference(2));
        assert_eq!(classify_stratum(15), StratumClass::SecondaryReference(15));
        assert_eq!(classify_stratum(16), StratumClass::Unknown(16));
        assert_eq!(classify_stratum(255), StratumClass::Unknown(255));
    }

    #[test]
    fn test_display() {
        assert_eq!(classify_stratum(0).to_string(), "kiss-o'-death");
        assert_eq!(classify_stratum(3).to_string(), "secondary reference (3)");
        assert_eq!(classify_stratum(42).to_string(), "42");
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_string(&classify_stratum(2)).unwrap();
        assert_eq!(json, r#"{"class":"secondary_reference","stratum":2}"#);
        let json = serde_json::to_string(&classify_stratum(1)).unwrap();
        assert_eq!(json, r#"{"class":"primary_reference"}"#);
    }
}
