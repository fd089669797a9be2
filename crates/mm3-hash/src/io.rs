//! Hashing readers and files through the streaming engine
//!
//! Input is read in fixed-size buffers and fed to an [`AnyHasher`], so memory
//! use does not grow with the input.

use anyhow::Context;
use std::io::{ErrorKind, Read};
use std::path::Path;

use mm3_core::config::DEFAULT_READ_BUFFER;
use mm3_core::{Mm3Error, Mm3Result, Variant};

use crate::any::{AnyDigest, AnyHasher};

/// Feed everything `reader` yields into `hasher`, `buf_size` bytes at a time.
///
/// Returns the number of bytes read. The hasher is not finished.
pub fn hash_reader<R: Read>(
    hasher: &mut AnyHasher,
    reader: &mut R,
    buf_size: usize,
) -> Mm3Result<u64> {
    if buf_size == 0 {
        return Err(Mm3Error::Config("read buffer size must be > 0".into()));
    }
    let mut buf = vec![0u8; buf_size];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        hasher.put(&buf[..n]);
        total += n as u64;
    }

    Ok(total)
}

/// Hash a whole reader with a fresh hasher.
pub fn digest_reader<R: Read>(
    variant: Variant,
    seed: u64,
    reader: &mut R,
    buf_size: usize,
) -> Mm3Result<AnyDigest> {
    let mut hasher = AnyHasher::new(variant, seed)?;
    hash_reader(&mut hasher, reader, buf_size)?;
    Ok(hasher.finish())
}

/// Digest of a file together with how many bytes were hashed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashedFile {
    pub digest: AnyDigest,
    pub bytes: u64,
}

/// Hash a file from disk with the default 64KB read buffer.
pub fn hash_file(path: &Path, variant: Variant, seed: u64) -> Mm3Result<HashedFile> {
    hash_file_with_buffer(path, variant, seed, DEFAULT_READ_BUFFER)
}

/// Hash a file from disk, streaming it through a `buf_size` read buffer.
pub fn hash_file_with_buffer(
    path: &Path,
    variant: Variant,
    seed: u64,
    buf_size: usize,
) -> Mm3Result<HashedFile> {
    let mut hasher = AnyHasher::new(variant, seed)?;
    let mut file = std::fs::File::open(path)
        .with_context(|| format!("opening file for hashing: {}", path.display()))?;

    let bytes = hash_reader(&mut hasher, &mut file, buf_size)
        .with_context(|| format!("reading {}", path.display()))?;
    let digest = hasher.finish();

    tracing::debug!(
        path = %path.display(),
        %variant,
        bytes,
        digest = %digest,
        "hashed file"
    );
    Ok(HashedFile { digest, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::any::hash_bytes;
    use proptest::prelude::*;

    /// Reader that returns at most `step` bytes per call
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn file_hash_matches_bytes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("input.bin");
        let data: Vec<u8> = (0u8..=255).cycle().take(200_000).collect();
        std::fs::write(&path, &data).unwrap();

        for variant in Variant::ALL {
            let hashed = hash_file(&path, variant, 17).unwrap();
            assert_eq!(hashed.digest, hash_bytes(variant, 17, &data).unwrap());
            assert_eq!(hashed.bytes, 200_000);
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let err =
            hash_file(Path::new("/nonexistent/mm3/input"), Variant::X86_32, 0).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/mm3/input"));
    }

    #[test]
    fn small_buffer_reports_same_file_digest() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("odd.bin");
        std::fs::write(&path, b"seventeen bytes!!").unwrap();

        let hashed = hash_file_with_buffer(&path, Variant::X86_128, 4, 3).unwrap();
        assert_eq!(hashed.bytes, 17);
        assert_eq!(hashed, hash_file(&path, Variant::X86_128, 4).unwrap());
    }

    #[test]
    fn zero_buffer_rejected_for_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("empty.bin");
        std::fs::write(&path, b"").unwrap();
        assert!(hash_file_with_buffer(&path, Variant::X86_32, 0, 0).is_err());
    }

    #[test]
    fn zero_buffer_rejected() {
        let mut hasher = AnyHasher::new(Variant::X86_32, 0).unwrap();
        let err = hash_reader(&mut hasher, &mut &b"abc"[..], 0).unwrap_err();
        assert!(matches!(err, Mm3Error::Config(_)));
    }

    proptest! {
        #[test]
        fn short_reads_do_not_change_digest(
            data in proptest::collection::vec(any::<u8>(), 0..=2048),
            step in 1usize..=40,
            buf_size in 1usize..=64,
        ) {
            for variant in Variant::ALL {
                let mut reader = Trickle { data: &data, step };
                let streamed = digest_reader(variant, 0, &mut reader, buf_size).unwrap();
                prop_assert_eq!(streamed, hash_bytes(variant, 0, &data).unwrap());
            }
        }
    }
}
