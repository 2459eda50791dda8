//! crates/madm_io/src/hasher.rs
//!
//! Deterministic hashing and id builders for canonical artifacts.
//!
//! - Use `sha256_canonical(..)` for JSON values/structs (goes through canonical_json).
//! - Use `sha256_hex(..)` / `sha256_file(..)` for raw bytes/files.
//! - Hex digests are lowercase.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use madm_core::CalculationId;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes;
use crate::IoError;

/// SHA-256 over raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 over the canonical JSON bytes of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> Result<String, IoError> {
    Ok(sha256_hex(&to_canonical_bytes(value)?))
}

/// SHA-256 over a file's raw bytes.
pub fn sha256_file(path: &Path) -> Result<String, IoError> {
    let mut r = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = r.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// `CALC:<hex>` over the canonical bytes of `value`.
pub fn calc_id_from_canonical<T: Serialize>(value: &T) -> Result<CalculationId, IoError> {
    let hex = sha256_canonical(value)?;
    CalculationId::from_digest(&hex).map_err(|e| IoError::Invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn canonical_hash_ignores_key_order() {
        let a = json!({"method": "SAW", "results": [1, 2]});
        let b = json!({"results": [1, 2], "method": "SAW"});
        assert_eq!(sha256_canonical(&a).unwrap(), sha256_canonical(&b).unwrap());
        let id = calc_id_from_canonical(&a).unwrap();
        assert!(id.as_str().starts_with("CALC:"));
        assert_eq!(id.as_str().len(), 5 + 64);
    }

    #[test]
    fn file_hash_matches_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("s.json");
        std::fs::write(&p, b"{\"a\":1}").unwrap();
        assert_eq!(sha256_file(&p).unwrap(), sha256_hex(b"{\"a\":1}"));
    }
}
