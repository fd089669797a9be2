//! MurmurHash3_x86_128: four 32-bit lanes, 16-byte blocks, 16-byte digest

use crate::block::{le_u32, BlockHasher, Stage};
use crate::digest::Digest128;
use crate::mix::{fmix32, pack_le, shuffle, update};
use crate::stream::Streaming;

const C1: u32 = 0x239b_961b;
const C2: u32 = 0xab0e_9789;
const C3: u32 = 0x38b3_4ae5;
const C4: u32 = 0xa1e3_8b93;

/// Accumulator for the four-lane 128-bit variant.
#[derive(Debug)]
pub struct Murmur3x86_128 {
    seeds: [u32; 4],
    h: [u32; 4],
    total_len: u64,
    stage: Stage,
}

impl Murmur3x86_128 {
    pub const fn new(seed: u32) -> Self {
        Self::with_seeds([seed; 4])
    }

    /// One seed per accumulator word, `[h1, h2, h3, h4]`
    pub const fn with_seeds(seeds: [u32; 4]) -> Self {
        Self {
            seeds,
            h: seeds,
            total_len: 0,
            stage: Stage::Blocks,
        }
    }

    fn cross_add(&mut self) {
        let [h1, h2, h3, h4] = &mut self.h;
        *h1 = h1.wrapping_add(*h2);
        *h1 = h1.wrapping_add(*h3);
        *h1 = h1.wrapping_add(*h4);
        *h2 = h2.wrapping_add(*h1);
        *h3 = h3.wrapping_add(*h1);
        *h4 = h4.wrapping_add(*h1);
    }
}

impl Default for Murmur3x86_128 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl BlockHasher for Murmur3x86_128 {
    const BLOCK_BYTES: usize = 16;
    type Block = [u32; 4];
    type Buffer = [u8; 16];
    type Seed = u32;
    type Output = Digest128;

    fn with_seed(seed: u32) -> Self {
        Self::new(seed)
    }

    fn reset(&mut self) {
        *self = Self::with_seeds(self.seeds);
    }

    #[inline(always)]
    fn decode_block(bytes: &[u8]) -> [u32; 4] {
        [
            le_u32(bytes, 0),
            le_u32(bytes, 4),
            le_u32(bytes, 8),
            le_u32(bytes, 12),
        ]
    }

    #[inline(always)]
    fn put_block(&mut self, [k1, k2, k3, k4]: [u32; 4]) {
        debug_assert_eq!(self.stage, Stage::Blocks, "block after remainder or finalize");
        let [h1, h2, h3, h4] = &mut self.h;
        *h1 = update(*h1, k1, *h2, C1, C2, 15, 19, 0x561c_cd1b);
        *h2 = update(*h2, k2, *h3, C2, C3, 16, 17, 0x0bca_a747);
        *h3 = update(*h3, k3, *h4, C3, C4, 17, 15, 0x96cd_1c35);
        *h4 = update(*h4, k4, *h1, C4, C1, 18, 13, 0x32ac_3b17);
        self.total_len += Self::BLOCK_BYTES as u64;
    }

    fn put_remainder(&mut self, tail: &[u8]) {
        self.stage.enter_tail(tail.len(), Self::BLOCK_BYTES);
        let [h1, h2, h3, h4] = &mut self.h;
        // groups fold highest first; a group counts once its first byte is present
        if tail.len() > 12 {
            *h4 ^= shuffle(pack_le::<u32>(&tail[12..]), C4, C1, 18);
        }
        if tail.len() > 8 {
            *h3 ^= shuffle(pack_le::<u32>(&tail[8..tail.len().min(12)]), C3, C4, 17);
        }
        if tail.len() > 4 {
            *h2 ^= shuffle(pack_le::<u32>(&tail[4..tail.len().min(8)]), C2, C3, 16);
        }
        if !tail.is_empty() {
            *h1 ^= shuffle(pack_le::<u32>(&tail[..tail.len().min(4)]), C1, C2, 15);
        }
        self.total_len += tail.len() as u64;
    }

    fn finalize(&mut self) {
        self.stage.enter_finalized();
        let len = self.total_len as u32;
        for h in &mut self.h {
            *h ^= len;
        }
        self.cross_add();
        for h in &mut self.h {
            *h = fmix32(*h);
        }
        self.cross_add();
    }

    fn digest(&self) -> Digest128 {
        debug_assert_eq!(self.stage, Stage::Finalized, "digest before finalize");
        let mut out = [0u8; 16];
        for (chunk, h) in out.chunks_exact_mut(4).zip(self.h) {
            chunk.copy_from_slice(&h.to_le_bytes());
        }
        Digest128::from_bytes(out)
    }
}

/// Streaming MurmurHash3_x86_128
pub type StreamX86_128 = Streaming<Murmur3x86_128>;

impl StreamX86_128 {
    /// Streaming hasher with one seed per accumulator word
    pub fn with_seeds(seeds: [u32; 4]) -> Self {
        Streaming::from_hasher(Murmur3x86_128::with_seeds(seeds))
    }
}

/// One-shot MurmurHash3_x86_128 of `data`.
#[must_use]
pub fn murmur3_x86_128(data: &[u8], seed: u32) -> Digest128 {
    let mut hasher = StreamX86_128::with_seed(seed);
    hasher.put(data);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_brown_fox() {
        let d = murmur3_x86_128(b"The quick brown fox jumps over the lazy dog", 0);
        assert_eq!(d.words_x86(), [0x2f15_83c3, 0xecee_2c67, 0x5d7b_f66c, 0xe5e9_1d2c]);
    }

    #[test]
    fn uniform_seeds_equal_single_seed() {
        let data = b"0123456789abcdefXYZ";
        let mut h = StreamX86_128::with_seeds([7; 4]);
        h.put(data);
        assert_eq!(h.finish(), murmur3_x86_128(data, 7));
    }

    #[test]
    fn per_word_seeds_matter() {
        let data = b"seeded";
        let mut h = StreamX86_128::with_seeds([0, 0, 0, 1]);
        h.put(data);
        assert_ne!(h.finish(), murmur3_x86_128(data, 0));
    }

    #[test]
    fn every_tail_group_boundary() {
        // 16..=31 bytes: one block plus every tail length
        let data: Vec<u8> = (0u8..32).collect();
        for len in 16..32 {
            let mut h = Murmur3x86_128::new(0);
            h.put_blocks(&data[..16]);
            h.put_remainder(&data[16..len]);
            h.finalize();
            assert_eq!(h.digest(), murmur3_x86_128(&data[..len], 0), "len {len}");
        }
    }
}
