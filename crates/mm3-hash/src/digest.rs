//! Fixed-width digest bytes and their hex rendering
//!
//! The byte layout is the contract:
//!   - x86_32:  `h1` little-endian (4 bytes)
//!   - x86_128: `h1 h2 h3 h4`, each little-endian (16 bytes)
//!   - x64_128: `h2 h1`, each little-endian (16 bytes)
//!
//! Hex strings are uppercase and only a presentation of those bytes; see
//! [`HexOrder`] for the direction.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use mm3_core::{HexOrder, Mm3Error, Mm3Result};

/// A finalized MurmurHash3 digest of `N` bytes
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest<const N: usize>([u8; N]);

/// 32-bit digest
pub type Digest32 = Digest<4>;
/// 128-bit digest
pub type Digest128 = Digest<16>;

impl<const N: usize> Digest<N> {
    pub const LEN: usize = N;

    pub const fn from_bytes(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    pub const fn into_bytes(self) -> [u8; N] {
        self.0
    }

    /// Uppercase hex, first byte first
    pub fn to_hex(&self) -> String {
        self.to_hex_ordered(HexOrder::Increasing)
    }

    pub fn to_hex_ordered(&self, order: HexOrder) -> String {
        match order {
            HexOrder::Increasing => hex::encode_upper(self.0),
            HexOrder::Decreasing => {
                let mut reversed = self.0;
                reversed.reverse();
                hex::encode_upper(reversed)
            }
        }
    }

    /// Parse a hex string in either case, first byte first.
    pub fn from_hex(s: &str) -> Mm3Result<Self> {
        Self::from_hex_ordered(s, HexOrder::Increasing)
    }

    pub fn from_hex_ordered(s: &str, order: HexOrder) -> Mm3Result<Self> {
        let mut bytes = [0u8; N];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| match e {
            hex::FromHexError::InvalidStringLength => Mm3Error::DigestLength {
                expected: N,
                actual: s.len() / 2,
            },
            other => Mm3Error::InvalidHex(format!("'{s}': {other}")),
        })?;
        if order == HexOrder::Decreasing {
            bytes.reverse();
        }
        Ok(Self(bytes))
    }
}

impl Digest<4> {
    /// The 32-bit hash value `h1`
    pub const fn as_u32(&self) -> u32 {
        u32::from_le_bytes(self.0)
    }
}

impl Digest<16> {
    /// Accumulator words of an x86_128 digest, `[h1, h2, h3, h4]`
    pub fn words_x86(&self) -> [u32; 4] {
        let mut words = [0u32; 4];
        for (word, chunk) in words.iter_mut().zip(self.0.chunks_exact(4)) {
            *word = crate::block::le_u32(chunk, 0);
        }
        words
    }

    /// Accumulator words of an x64_128 digest as `(h1, h2)`, the order the
    /// reference implementation writes them in.
    pub fn words_x64(&self) -> (u64, u64) {
        let h2 = crate::block::le_u64(&self.0, 0);
        let h1 = crate::block::le_u64(&self.0, 8);
        (h1, h2)
    }
}

impl<const N: usize> AsRef<[u8]> for Digest<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> From<[u8; N]> for Digest<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> From<Digest<N>> for [u8; N] {
    fn from(digest: Digest<N>) -> Self {
        digest.0
    }
}

impl<const N: usize> fmt::Debug for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl<const N: usize> fmt::Display for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(self, f)
    }
}

impl<const N: usize> fmt::UpperHex for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{b:02X}"))
    }
}

impl<const N: usize> fmt::LowerHex for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{b:02x}"))
    }
}

impl<const N: usize> Serialize for Digest<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de, const N: usize> Deserialize<'de> for Digest<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hex_is_uppercase_and_forward() {
        let d = Digest::from_bytes([0x0f, 0xa0, 0x12, 0xbc]);
        assert_eq!(d.to_hex(), "0FA012BC");
        assert_eq!(d.to_string(), "0FA012BC");
        assert_eq!(format!("{d:x}"), "0fa012bc");
        assert_eq!(d.to_hex_ordered(HexOrder::Decreasing), "BC12A00F");
    }

    #[test]
    fn decreasing_hex_of_32bit_digest_is_the_integer() {
        let d = Digest32::from_bytes(0x5e92_8f0f_u32.to_le_bytes());
        assert_eq!(d.as_u32(), 0x5e92_8f0f);
        assert_eq!(d.to_hex_ordered(HexOrder::Decreasing), "5E928F0F");
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = Digest32::from_hex("00112233445566").unwrap_err();
        assert!(matches!(
            err,
            Mm3Error::DigestLength {
                expected: 4,
                actual: 7
            }
        ));
    }

    #[test]
    fn from_hex_rejects_non_hex() {
        assert!(matches!(
            Digest32::from_hex("0011223Z").unwrap_err(),
            Mm3Error::InvalidHex(_)
        ));
        assert!(matches!(
            Digest32::from_hex("0011223").unwrap_err(),
            Mm3Error::InvalidHex(_)
        ));
    }

    #[test]
    fn x64_words_follow_h2_h1_layout() {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&0x2222_u64.to_le_bytes());
        bytes[8..].copy_from_slice(&0x1111_u64.to_le_bytes());
        assert_eq!(Digest128::from_bytes(bytes).words_x64(), (0x1111, 0x2222));
    }

    #[test]
    fn serde_uses_hex_string() {
        let d = Digest32::from_bytes([1, 2, 0xab, 4]);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"0102AB04\"");
        let back: Digest32 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
        assert!(serde_json::from_str::<Digest32>("\"0102\"").is_err());
    }

    proptest! {
        #[test]
        fn hex_roundtrip(bytes in proptest::array::uniform16(any::<u8>())) {
            let d = Digest128::from_bytes(bytes);
            prop_assert_eq!(Digest128::from_hex(&d.to_hex()).unwrap(), d);
            prop_assert_eq!(Digest128::from_hex(&format!("{d:x}")).unwrap(), d);
            let rev = d.to_hex_ordered(HexOrder::Decreasing);
            prop_assert_eq!(Digest128::from_hex_ordered(&rev, HexOrder::Decreasing).unwrap(), d);
        }
    }
}
