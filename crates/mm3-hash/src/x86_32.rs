//! MurmurHash3_x86_32: one 32-bit lane, 4-byte blocks, 4-byte digest

use crate::block::{le_u32, BlockHasher, Stage};
use crate::digest::Digest32;
use crate::mix::{fmix32, pack_le, shuffle, update};
use crate::stream::Streaming;

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

/// Accumulator for the 32-bit variant.
#[derive(Debug)]
pub struct Murmur3x86_32 {
    seed: u32,
    h1: u32,
    total_len: u64,
    stage: Stage,
}

impl Murmur3x86_32 {
    pub const fn new(seed: u32) -> Self {
        Self {
            seed,
            h1: seed,
            total_len: 0,
            stage: Stage::Blocks,
        }
    }
}

impl Default for Murmur3x86_32 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl BlockHasher for Murmur3x86_32 {
    const BLOCK_BYTES: usize = 4;
    type Block = u32;
    type Buffer = [u8; 4];
    type Seed = u32;
    type Output = Digest32;

    fn with_seed(seed: u32) -> Self {
        Self::new(seed)
    }

    fn reset(&mut self) {
        *self = Self::new(self.seed);
    }

    #[inline(always)]
    fn decode_block(bytes: &[u8]) -> u32 {
        le_u32(bytes, 0)
    }

    #[inline(always)]
    fn put_block(&mut self, k1: u32) {
        debug_assert_eq!(self.stage, Stage::Blocks, "block after remainder or finalize");
        self.h1 = update(self.h1, k1, 0, C1, C2, 15, 13, 0xe654_6b64);
        self.total_len += Self::BLOCK_BYTES as u64;
    }

    fn put_remainder(&mut self, tail: &[u8]) {
        self.stage.enter_tail(tail.len(), Self::BLOCK_BYTES);
        if !tail.is_empty() {
            // the tail only gets the shuffle, never the rotate/add/multiply
            self.h1 ^= shuffle(pack_le::<u32>(tail), C1, C2, 15);
        }
        self.total_len += tail.len() as u64;
    }

    fn finalize(&mut self) {
        self.stage.enter_finalized();
        self.h1 ^= self.total_len as u32;
        self.h1 = fmix32(self.h1);
    }

    fn digest(&self) -> Digest32 {
        debug_assert_eq!(self.stage, Stage::Finalized, "digest before finalize");
        Digest32::from_bytes(self.h1.to_le_bytes())
    }
}

/// Streaming MurmurHash3_x86_32
pub type StreamX86_32 = Streaming<Murmur3x86_32>;

/// One-shot MurmurHash3_x86_32 of `data`.
#[must_use]
pub fn murmur3_x86_32(data: &[u8], seed: u32) -> Digest32 {
    let mut hasher = StreamX86_32::with_seed(seed);
    hasher.put(data);
    hasher.finish()
}
