//! mm3-core: types shared by the mm3 hashing crates and the `mm3sum` tool
//!
//! - `error`: the workspace error type
//! - `config`: TOML configuration schema
//! - `types`: variant and presentation enums

pub mod config;
pub mod error;
pub mod types;

pub use config::Mm3Config;
pub use error::{Mm3Error, Mm3Result};
pub use types::{HexOrder, OutputFormat, Variant};
