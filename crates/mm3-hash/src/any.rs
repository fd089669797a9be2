//! Variant chosen at runtime (config files, CLI flags)

use serde::{Serialize, Serializer};
use std::fmt;
use std::io;

use mm3_core::{HexOrder, Mm3Error, Mm3Result, Variant};

use crate::digest::{Digest128, Digest32};
use crate::x64_128::StreamX64_128;
use crate::x86_128::StreamX86_128;
use crate::x86_32::StreamX86_32;

/// A streaming hasher of any of the three variants
#[derive(Debug)]
pub enum AnyHasher {
    X86_32(StreamX86_32),
    X86_128(StreamX86_128),
    X64_128(StreamX64_128),
}

/// Digest produced by an [`AnyHasher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnyDigest {
    Bits32(Digest32),
    Bits128(Digest128),
}

impl AnyHasher {
    /// Build a hasher for `variant`, rejecting seeds wider than the variant
    /// accepts.
    pub fn new(variant: Variant, seed: u64) -> Mm3Result<Self> {
        if seed > variant.max_seed() {
            return Err(Mm3Error::Config(format!(
                "seed {seed:#x} does not fit variant {variant}"
            )));
        }
        Ok(match variant {
            Variant::X86_32 => Self::X86_32(StreamX86_32::with_seed(seed as u32)),
            Variant::X86_128 => Self::X86_128(StreamX86_128::with_seed(seed as u32)),
            Variant::X64_128 => Self::X64_128(StreamX64_128::with_seed(seed)),
        })
    }

    pub fn variant(&self) -> Variant {
        match self {
            Self::X86_32(_) => Variant::X86_32,
            Self::X86_128(_) => Variant::X86_128,
            Self::X64_128(_) => Variant::X64_128,
        }
    }

    pub fn start(&mut self) {
        match self {
            Self::X86_32(h) => h.start(),
            Self::X86_128(h) => h.start(),
            Self::X64_128(h) => h.start(),
        }
    }

    pub fn put(&mut self, data: &[u8]) {
        match self {
            Self::X86_32(h) => h.put(data),
            Self::X86_128(h) => h.put(data),
            Self::X64_128(h) => h.put(data),
        }
    }

    pub fn finish(&mut self) -> AnyDigest {
        match self {
            Self::X86_32(h) => AnyDigest::Bits32(h.finish()),
            Self::X86_128(h) => AnyDigest::Bits128(h.finish()),
            Self::X64_128(h) => AnyDigest::Bits128(h.finish()),
        }
    }

    pub fn total_len(&self) -> u64 {
        match self {
            Self::X86_32(h) => h.total_len(),
            Self::X86_128(h) => h.total_len(),
            Self::X64_128(h) => h.total_len(),
        }
    }
}

impl io::Write for AnyHasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.put(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl AnyDigest {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Bits32(d) => d.as_ref(),
            Self::Bits128(d) => d.as_ref(),
        }
    }

    pub fn to_hex(&self) -> String {
        self.to_hex_ordered(HexOrder::Increasing)
    }

    pub fn to_hex_ordered(&self, order: HexOrder) -> String {
        match self {
            Self::Bits32(d) => d.to_hex_ordered(order),
            Self::Bits128(d) => d.to_hex_ordered(order),
        }
    }
}

impl AsRef<[u8]> for AnyDigest {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for AnyDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bits32(d) => fmt::Display::fmt(d, f),
            Self::Bits128(d) => fmt::Display::fmt(d, f),
        }
    }
}

impl Serialize for AnyDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bits32(d) => d.serialize(serializer),
            Self::Bits128(d) => d.serialize(serializer),
        }
    }
}

/// One-shot hash of `data` with a runtime-selected variant.
pub fn hash_bytes(variant: Variant, seed: u64, data: &[u8]) -> Mm3Result<AnyDigest> {
    let mut hasher = AnyHasher::new(variant, seed)?;
    hasher.put(data);
    Ok(hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_to_matching_variant() {
        let data = b"dispatch";
        assert_eq!(
            hash_bytes(Variant::X86_32, 9, data).unwrap(),
            AnyDigest::Bits32(crate::murmur3_x86_32(data, 9))
        );
        assert_eq!(
            hash_bytes(Variant::X86_128, 9, data).unwrap(),
            AnyDigest::Bits128(crate::murmur3_x86_128(data, 9))
        );
        assert_eq!(
            hash_bytes(Variant::X64_128, 9, data).unwrap(),
            AnyDigest::Bits128(crate::murmur3_x64_128(data, 9))
        );
    }

    #[test]
    fn digest_len_follows_variant() {
        for variant in Variant::ALL {
            let d = hash_bytes(variant, 0, b"width").unwrap();
            assert_eq!(d.as_bytes().len(), variant.digest_len());
        }
    }

    #[test]
    fn wide_seed_rejected_for_x86() {
        let err = AnyHasher::new(Variant::X86_32, 1 << 32).unwrap_err();
        assert!(matches!(err, Mm3Error::Config(_)));
        assert!(AnyHasher::new(Variant::X64_128, 1 << 32).is_ok());
    }

    #[test]
    fn start_reuses_hasher() {
        let mut h = AnyHasher::new(Variant::X86_128, 1).unwrap();
        h.put(b"first");
        let first = h.finish();
        h.start();
        h.put(b"first");
        assert_eq!(h.finish(), first);
        assert_eq!(h.variant(), Variant::X86_128);
    }
}
