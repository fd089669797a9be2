//! MurmurHash3_x64_128: two 64-bit lanes, 16-byte blocks, 16-byte digest

use crate::block::{le_u64, BlockHasher, Stage};
use crate::digest::Digest128;
use crate::mix::{fmix64, pack_le, shuffle, update};
use crate::stream::Streaming;

const C1: u64 = 0x87c3_7b91_1142_53d5;
const C2: u64 = 0x4cf5_ad43_2745_937f;

/// Accumulator for the two-lane 64-bit variant.
#[derive(Debug)]
pub struct Murmur3x64_128 {
    seeds: [u64; 2],
    h1: u64,
    h2: u64,
    total_len: u64,
    stage: Stage,
}

impl Murmur3x64_128 {
    pub const fn new(seed: u64) -> Self {
        Self::with_seeds([seed; 2])
    }

    /// One seed per accumulator word, `[h1, h2]`
    pub const fn with_seeds(seeds: [u64; 2]) -> Self {
        Self {
            seeds,
            h1: seeds[0],
            h2: seeds[1],
            total_len: 0,
            stage: Stage::Blocks,
        }
    }
}

impl Default for Murmur3x64_128 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl BlockHasher for Murmur3x64_128 {
    const BLOCK_BYTES: usize = 16;
    type Block = [u64; 2];
    type Buffer = [u8; 16];
    type Seed = u64;
    type Output = Digest128;

    fn with_seed(seed: u64) -> Self {
        Self::new(seed)
    }

    fn reset(&mut self) {
        *self = Self::with_seeds(self.seeds);
    }

    #[inline(always)]
    fn decode_block(bytes: &[u8]) -> [u64; 2] {
        [le_u64(bytes, 0), le_u64(bytes, 8)]
    }

    #[inline(always)]
    fn put_block(&mut self, [k1, k2]: [u64; 2]) {
        debug_assert_eq!(self.stage, Stage::Blocks, "block after remainder or finalize");
        self.h1 = update(self.h1, k1, self.h2, C1, C2, 31, 27, 0x52dc_e729);
        self.h2 = update(self.h2, k2, self.h1, C2, C1, 33, 31, 0x3849_5ab5);
        self.total_len += Self::BLOCK_BYTES as u64;
    }

    fn put_remainder(&mut self, tail: &[u8]) {
        self.stage.enter_tail(tail.len(), Self::BLOCK_BYTES);
        if tail.len() > 8 {
            self.h2 ^= shuffle(pack_le::<u64>(&tail[8..]), C2, C1, 33);
        }
        if !tail.is_empty() {
            self.h1 ^= shuffle(pack_le::<u64>(&tail[..tail.len().min(8)]), C1, C2, 31);
        }
        self.total_len += tail.len() as u64;
    }

    fn finalize(&mut self) {
        self.stage.enter_finalized();
        self.h1 ^= self.total_len;
        self.h2 ^= self.total_len;

        self.h1 = self.h1.wrapping_add(self.h2);
        self.h2 = self.h2.wrapping_add(self.h1);

        self.h1 = fmix64(self.h1);
        self.h2 = fmix64(self.h2);

        self.h1 = self.h1.wrapping_add(self.h2);
        self.h2 = self.h2.wrapping_add(self.h1);
    }

    fn digest(&self) -> Digest128 {
        debug_assert_eq!(self.stage, Stage::Finalized, "digest before finalize");
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&self.h2.to_le_bytes());
        out[8..].copy_from_slice(&self.h1.to_le_bytes());
        Digest128::from_bytes(out)
    }
}

/// Streaming MurmurHash3_x64_128
pub type StreamX64_128 = Streaming<Murmur3x64_128>;

impl StreamX64_128 {
    /// Streaming hasher with one seed per accumulator word
    pub fn with_seeds(seeds: [u64; 2]) -> Self {
        Streaming::from_hasher(Murmur3x64_128::with_seeds(seeds))
    }
}

/// One-shot MurmurHash3_x64_128 of `data`.
#[must_use]
pub fn murmur3_x64_128(data: &[u8], seed: u64) -> Digest128 {
    let mut hasher = StreamX64_128::with_seed(seed);
    hasher.put(data);
    hasher.finish()
}
