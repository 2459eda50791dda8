//! crates/madm_io/src/lib.rs
//! I/O crate: scenario loading, canonical JSON, schema validation, hashing.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - The engine crates stay I/O-free; everything that touches bytes or paths
//!   lives here.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for madm_io (used by canonical_json/loader/hasher/schema).
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (create_dir_all, rename, fsync, etc.)
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON serialization/deserialization errors with an optional JSON Pointer.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// JSON Schema validation failures (one line per violation).
    #[error("schema error: {0}")]
    Schema(String),

    /// Well-formed JSON that does not describe a usable scenario.
    #[error("invalid scenario: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json reports line/column, not a pointer.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;
pub mod schema;

/// Returns true if `s` looks like a URL (any `<scheme>://`, including `file://`).
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}

pub mod prelude {
    pub use crate::{looks_like_url_strict, IoError, IoResult};

    pub use crate::canonical_json::{to_canonical_bytes, write_canonical_file};
    pub use crate::hasher::{calc_id_from_canonical, sha256_canonical, sha256_hex};
    pub use crate::loader::{load_scenario_path, load_scenario_str, Scenario};
}
