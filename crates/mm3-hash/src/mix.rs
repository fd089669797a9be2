//! Bit-mixing primitives shared by every MurmurHash3 variant
//!
//! All arithmetic wraps at the word width. `update` is the per-block-word
//! step; the variants differ only in the constants they pass and in which
//! accumulator they feed in as `mix_with`.

use std::ops::{BitXor, Shl, Shr};

/// Unsigned word the mixing functions operate on (`u32` or `u64`).
pub trait MixWord:
    Copy + Eq + BitXor<Output = Self> + Shl<u32, Output = Self> + Shr<u32, Output = Self>
{
    const BITS: u32;

    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    fn rotate_left(self, r: u32) -> Self;
    fn from_u8(v: u8) -> Self;
}

macro_rules! impl_mix_word {
    ($($t:ty),*) => {$(
        impl MixWord for $t {
            const BITS: u32 = <$t>::BITS;

            #[inline(always)]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            #[inline(always)]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$t>::wrapping_mul(self, rhs)
            }

            #[inline(always)]
            fn rotate_left(self, r: u32) -> Self {
                <$t>::rotate_left(self, r)
            }

            #[inline(always)]
            fn from_u8(v: u8) -> Self {
                v as $t
            }
        }
    )*};
}

impl_mix_word!(u32, u64);

/// Rotate `x` left by `r` bits, `0 <= r <= W`. Both ends are the identity.
#[inline(always)]
pub fn rotl<W: MixWord>(x: W, r: u32) -> W {
    debug_assert!(r <= W::BITS, "rotation {r} exceeds word width {}", W::BITS);
    x.rotate_left(r % W::BITS)
}

/// `rotl(k * c1, r1) * c2`
#[inline(always)]
pub fn shuffle<W: MixWord>(k: W, c1: W, c2: W, r1: u32) -> W {
    rotl(k.wrapping_mul(c1), r1).wrapping_mul(c2)
}

/// Fold block word `k` into accumulator `h`.
#[allow(clippy::too_many_arguments)]
#[inline(always)]
pub fn update<W: MixWord>(h: W, k: W, mix_with: W, c1: W, c2: W, r1: u32, r2: u32, n: W) -> W {
    let h = h ^ shuffle(k, c1, c2, r1);
    let h = rotl(h, r2).wrapping_add(mix_with);
    h.wrapping_mul(W::from_u8(5)).wrapping_add(n)
}

/// 32-bit avalanche finalizer
#[inline]
pub fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// 64-bit avalanche finalizer
#[inline]
pub fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^= k >> 33;
    k
}

/// Pack up to `size_of::<W>()` bytes little-endian by position.
///
/// Missing high bytes are zero, so a short tail decodes the same way the
/// reference fall-through switch assembles it.
#[inline]
pub fn pack_le<W: MixWord>(bytes: &[u8]) -> W {
    debug_assert!(bytes.len() * 8 <= W::BITS as usize);
    bytes
        .iter()
        .rev()
        .fold(W::from_u8(0), |acc, &b| (acc << 8) ^ W::from_u8(b))
}
