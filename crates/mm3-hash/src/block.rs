//! Capability contract between the streaming wrapper and a hash variant
//!
//! A block hasher only ever sees whole blocks followed by at most one short
//! tail. Everything about arbitrary chunking lives in [`crate::stream`].

use std::fmt;

/// A MurmurHash3 accumulator that consumes fixed-width blocks.
pub trait BlockHasher {
    /// Block width in bytes (the alignment unit)
    const BLOCK_BYTES: usize;

    /// One decoded block of little-endian words
    type Block: Copy;

    /// Byte array of exactly `BLOCK_BYTES`, used by the streaming buffer
    type Buffer: AsRef<[u8]> + AsMut<[u8]> + Default + Copy + fmt::Debug;

    /// Single seed applied to every accumulator word
    type Seed: Copy;

    /// Finalized digest
    type Output: Copy + AsRef<[u8]>;

    fn with_seed(seed: Self::Seed) -> Self;

    /// Return to the construction-time seeded state.
    fn reset(&mut self);

    /// Decode the first `BLOCK_BYTES` of `bytes` as a block.
    fn decode_block(bytes: &[u8]) -> Self::Block;

    fn put_block(&mut self, block: Self::Block);

    /// Ingest a run of whole blocks. `bytes.len()` must be a multiple of
    /// `BLOCK_BYTES`; the slice may have any alignment.
    fn put_blocks(&mut self, bytes: &[u8]) {
        debug_assert_eq!(
            bytes.len() % Self::BLOCK_BYTES,
            0,
            "put_blocks needs whole blocks"
        );
        for chunk in bytes.chunks_exact(Self::BLOCK_BYTES) {
            self.put_block(Self::decode_block(chunk));
        }
    }

    /// Fold the final partial block. Shorter than one block, at most once,
    /// and only right before [`finalize`](Self::finalize).
    fn put_remainder(&mut self, tail: &[u8]);

    fn finalize(&mut self);

    /// Digest of a finalized accumulator.
    fn digest(&self) -> Self::Output;
}

/// Where an accumulator is in its lifecycle. Only checked by debug assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Stage {
    #[default]
    Blocks,
    Tail,
    Finalized,
}

impl Stage {
    #[inline(always)]
    pub(crate) fn enter_tail(&mut self, tail_len: usize, block_bytes: usize) {
        debug_assert!(
            tail_len < block_bytes,
            "remainder of {tail_len} bytes is not shorter than a {block_bytes}-byte block"
        );
        debug_assert_eq!(*self, Stage::Blocks, "remainder already ingested or finalized");
        *self = Stage::Tail;
    }

    #[inline(always)]
    pub(crate) fn enter_finalized(&mut self) {
        debug_assert_ne!(*self, Stage::Finalized, "accumulator finalized twice");
        *self = Stage::Finalized;
    }
}

#[inline(always)]
pub(crate) fn le_u32(bytes: &[u8], at: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[at..at + 4]);
    u32::from_le_bytes(word)
}

#[inline(always)]
pub(crate) fn le_u64(bytes: &[u8], at: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[at..at + 8]);
    u64::from_le_bytes(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x64_128::Murmur3x64_128;
    use crate::x86_32::Murmur3x86_32;

    #[test]
    fn stage_walks_blocks_tail_finalized() {
        let mut stage = Stage::default();
        assert_eq!(stage, Stage::Blocks);
        stage.enter_tail(3, 4);
        assert_eq!(stage, Stage::Tail);
        stage.enter_finalized();
        assert_eq!(stage, Stage::Finalized);
    }

    #[test]
    fn finalize_without_tail_is_allowed() {
        let mut stage = Stage::Blocks;
        stage.enter_finalized();
        assert_eq!(stage, Stage::Finalized);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not shorter than a 4-byte block")]
    fn full_block_remainder_panics_in_debug() {
        let mut h = Murmur3x86_32::new(0);
        h.put_remainder(b"abcd");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "remainder already ingested")]
    fn second_remainder_panics_in_debug() {
        let mut h = Murmur3x64_128::new(0);
        h.put_remainder(b"abc");
        h.put_remainder(b"d");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "finalized twice")]
    fn second_finalize_panics_in_debug() {
        let mut h = Murmur3x86_32::new(0);
        h.finalize();
        h.finalize();
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "put_blocks needs whole blocks")]
    fn partial_block_run_panics_in_debug() {
        let mut h = Murmur3x64_128::new(0);
        h.put_blocks(&[0u8; 17]);
    }
}
