use thiserror::Error;

pub type Mm3Result<T> = Result<T, Mm3Error>;

#[derive(Debug, Error)]
pub enum Mm3Error {
    #[error("invalid hex digest: {0}")]
    InvalidHex(String),

    #[error("digest length mismatch: expected {expected} bytes, got {actual}")]
    DigestLength { expected: usize, actual: usize },

    #[error("unknown hash variant '{0}' (expected x86_32, x86_128 or x64_128)")]
    UnknownVariant(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
