//! Incremental hashing over arbitrarily chunked input
//!
//! [`Streaming`] wraps any [`BlockHasher`] and accepts byte slices of any
//! length and alignment. Whole blocks go straight from the caller's slice
//! to the hasher; only a block that straddles two `put` calls is assembled
//! in the one-block buffer. The digest never depends on how the input was
//! split.
//!
//! Instances are independent: there is no way to merge the state of two
//! hashers, so one logical input cannot be hashed in parallel pieces.

use std::io;

use crate::block::BlockHasher;

/// Streaming front end for a block hasher
#[derive(Debug)]
pub struct Streaming<H: BlockHasher> {
    hasher: H,
    buffer: H::Buffer,
    /// Invariant: always `< H::BLOCK_BYTES` between calls
    buffered: usize,
    total_len: u64,
    finished: bool,
}

impl<H: BlockHasher> Streaming<H> {
    /// Wrap an already seeded hasher.
    pub fn from_hasher(hasher: H) -> Self {
        Self {
            hasher,
            buffer: H::Buffer::default(),
            buffered: 0,
            total_len: 0,
            finished: false,
        }
    }

    pub fn with_seed(seed: H::Seed) -> Self {
        Self::from_hasher(H::with_seed(seed))
    }

    /// Discard all input and return to the seeded initial state.
    pub fn start(&mut self) {
        self.hasher.reset();
        self.buffer = H::Buffer::default();
        self.buffered = 0;
        self.total_len = 0;
        self.finished = false;
    }

    /// Feed the next piece of input.
    pub fn put(&mut self, mut data: &[u8]) {
        debug_assert!(!self.finished, "put after finish without start");
        self.total_len += data.len() as u64;

        if self.buffered > 0 {
            let take = (H::BLOCK_BYTES - self.buffered).min(data.len());
            let (head, rest) = data.split_at(take);
            self.buffer.as_mut()[self.buffered..self.buffered + take].copy_from_slice(head);
            self.buffered += take;
            data = rest;

            if self.buffered < H::BLOCK_BYTES {
                return;
            }
            self.hasher.put_blocks(self.buffer.as_ref());
            self.buffered = 0;
        }

        let whole = data.len() - data.len() % H::BLOCK_BYTES;
        let (blocks, rest) = data.split_at(whole);
        if !blocks.is_empty() {
            self.hasher.put_blocks(blocks);
        }

        self.buffer.as_mut()[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Fold the buffered tail, finalize, and return the digest.
    ///
    /// Call [`start`](Self::start) before hashing anything else with this
    /// instance.
    pub fn finish(&mut self) -> H::Output {
        debug_assert!(!self.finished, "finish called twice without start");
        self.finished = true;

        if self.buffered > 0 {
            self.hasher.put_remainder(&self.buffer.as_ref()[..self.buffered]);
        }
        self.hasher.finalize();
        self.hasher.digest()
    }

    /// Bytes waiting in the block buffer
    pub fn buffered_len(&self) -> usize {
        self.buffered
    }

    /// Bytes accepted since the last `start`
    pub fn total_len(&self) -> u64 {
        self.total_len
    }
}

impl<H: BlockHasher> Default for Streaming<H>
where
    H::Seed: Default,
{
    fn default() -> Self {
        Self::with_seed(H::Seed::default())
    }
}

impl<H: BlockHasher> io::Write for Streaming<H> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.put(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
