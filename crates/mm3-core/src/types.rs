use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Mm3Error;

/// MurmurHash3 flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Variant {
    /// 32-bit digest, one 32-bit lane, 4-byte blocks
    #[serde(rename = "x86_32")]
    X86_32,
    /// 128-bit digest, four 32-bit lanes, 16-byte blocks
    #[serde(rename = "x86_128")]
    X86_128,
    /// 128-bit digest, two 64-bit lanes, 16-byte blocks
    #[default]
    #[serde(rename = "x64_128")]
    X64_128,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::X86_32, Variant::X86_128, Variant::X64_128];

    /// Digest width in bytes
    pub const fn digest_len(self) -> usize {
        match self {
            Variant::X86_32 => 4,
            Variant::X86_128 | Variant::X64_128 => 16,
        }
    }

    /// Largest seed the variant accepts as a single value
    pub const fn max_seed(self) -> u64 {
        match self {
            Variant::X86_32 | Variant::X86_128 => u32::MAX as u64,
            Variant::X64_128 => u64::MAX,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Variant::X86_32 => "x86_32",
            Variant::X86_128 => "x86_128",
            Variant::X64_128 => "x64_128",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = Mm3Error;

    /// Accepts the canonical names only, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x86_32" => Ok(Variant::X86_32),
            "x86_128" => Ok(Variant::X86_128),
            "x64_128" => Ok(Variant::X64_128),
            _ => Err(Mm3Error::UnknownVariant(s.to_string())),
        }
    }
}

/// Byte direction used when rendering a digest as hex.
///
/// The raw digest bytes are the normative output; hex is for humans.
/// `Increasing` prints the first digest byte first. `Decreasing` prints the
/// last byte first, which for the 32-bit variant is the usual big-endian
/// rendering of the hash as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HexOrder {
    #[default]
    Increasing,
    Decreasing,
}

/// How `mm3sum` prints results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_parses_canonical_names() {
        for v in Variant::ALL {
            assert_eq!(v.as_str().parse::<Variant>().unwrap(), v);
        }
        assert_eq!("X86_32".parse::<Variant>().unwrap(), Variant::X86_32);
    }

    #[test]
    fn unknown_variant_is_rejected() {
        let err = "sha256".parse::<Variant>().unwrap_err();
        assert!(matches!(err, Mm3Error::UnknownVariant(ref s) if s == "sha256"));
    }

    #[test]
    fn width_only_names_are_rejected() {
        for alias in ["32", "128", "x86", "64_128"] {
            assert!(alias.parse::<Variant>().is_err(), "{alias}");
        }
    }

    #[test]
    fn parse_agrees_with_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            variant: Variant,
        }
        for v in Variant::ALL {
            let w: Wrapper = toml::from_str(&format!("variant = \"{v}\"")).unwrap();
            assert_eq!(w.variant, v.as_str().parse::<Variant>().unwrap());
        }
        assert!(toml::from_str::<Wrapper>("variant = \"128\"").is_err());
    }

    #[test]
    fn widths_match_variant() {
        assert_eq!(Variant::X86_32.digest_len(), 4);
        assert_eq!(Variant::X86_128.digest_len(), 16);
        assert_eq!(Variant::X64_128.digest_len(), 16);
        assert_eq!(Variant::X64_128.max_seed(), u64::MAX);
    }
}
