//! mm3-hash: MurmurHash3 digests with an incremental streaming engine
//!
//! # Overview
//! - `mix`: rotate, shuffle, per-word update and the fmix finalizers
//! - `x86_32`, `x86_128`, `x64_128`: the three block accumulators
//! - `stream`: [`Streaming`], chunk- and alignment-independent front end
//! - `digest`: fixed-width digest bytes and hex rendering
//! - `any`: variant selected at runtime
//! - `io`: hashing readers and files
//!
//! ```
//! use mm3_hash::{murmur3_x64_128, StreamX64_128};
//!
//! let mut h = StreamX64_128::with_seed(0);
//! h.put(b"hello ");
//! h.put(b"world");
//! assert_eq!(h.finish(), murmur3_x64_128(b"hello world", 0));
//! ```
//!
//! MurmurHash3 is not a cryptographic hash and must not be used as a MAC.

pub mod any;
pub mod block;
pub mod digest;
pub mod io;
pub mod mix;
pub mod stream;
pub mod x64_128;
pub mod x86_128;
pub mod x86_32;

// Convenience re-exports for the most common operations
pub use any::{hash_bytes, AnyDigest, AnyHasher};
pub use block::BlockHasher;
pub use digest::{Digest, Digest128, Digest32};
pub use io::{digest_reader, hash_file, hash_file_with_buffer, hash_reader, HashedFile};
pub use stream::Streaming;
pub use x64_128::{murmur3_x64_128, Murmur3x64_128, StreamX64_128};
pub use x86_128::{murmur3_x86_128, Murmur3x86_128, StreamX86_128};
pub use x86_32::{murmur3_x86_32, Murmur3x86_32, StreamX86_32};

pub use mm3_core::{HexOrder, Mm3Error, Mm3Result, Variant};
