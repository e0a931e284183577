//! QUIC version identifiers

/// Wire versions this codec knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    /// The all-zero sentinel carried by version negotiation packets.
    Negotiating,
    Draft27,
    Draft28,
    Draft29,
    /// QUIC version 1 (RFC 9000).
    One,
}

impl Version {
    /// The 32-bit wire value.
    pub fn value(self) -> u32 {
        match self {
            Version::Negotiating => 0x0000_0000,
            Version::Draft27 => 0xff00_001b,
            Version::Draft28 => 0xff00_001c,
            Version::Draft29 => 0xff00_001d,
            Version::One => 0x0000_0001,
        }
    }

    pub fn from_value(value: u32) -> Option<Self> {
        match value {
            0x0000_0000 => Some(Version::Negotiating),
            0xff00_001b => Some(Version::Draft27),
            0xff00_001c => Some(Version::Draft28),
            0xff00_001d => Some(Version::Draft29),
            0x0000_0001 => Some(Version::One),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        assert_eq!(Version::Negotiating.value(), 0);
        assert_eq!(Version::Draft29.value(), 0xff00001d);
        assert_eq!(Version::One.value(), 1);
    }

    #[test]
    fn test_from_value_round_trip() {
        for version in [
            Version::Negotiating,
            Version::Draft27,
            Version::Draft28,
            Version::Draft29,
            Version::One,
        ] {
            assert_eq!(Version::from_value(version.value()), Some(version));
        }
        assert_eq!(Version::from_value(0xdead_beef), None);
    }
}
