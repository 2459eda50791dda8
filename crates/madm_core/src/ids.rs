//! crates/madm_core/src/ids.rs
//! Input ids (criteria, alternatives) and the output calculation id.
//! Deterministic, ASCII-only, strict shapes; no I/O.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

const HEX64_LEN: usize = 64;
const CALC_PREFIX: &str = "CALC:";

/// Lowercase hex (length must be exactly 64).
#[inline]
pub fn is_valid_sha256(s: &str) -> bool {
    s.len() == HEX64_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

macro_rules! numeric_id_newtype {
    ($(#[$m:meta])* $name:ident) => {
        $(#[$m])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl $name {
            #[inline] pub const fn get(self) -> u32 { self.0 }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
        }

        impl From<u32> for $name {
            #[inline]
            fn from(v: u32) -> Self { Self(v) }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(CoreError::InvalidId);
                }
                s.parse::<u32>().map(Self).map_err(|_| CoreError::InvalidId)
            }
        }
    };
}

numeric_id_newtype!(
    /// Criterion id, unique within a scenario.
    CriterionId
);
numeric_id_newtype!(
    /// Alternative id, unique within a scenario.
    AlternativeId
);

/// "CALC:" + 64-hex (lowercase), the fingerprint of a canonical result document.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct CalculationId(String);

impl CalculationId {
    /// Build from a 64-hex digest.
    pub fn from_digest(hex64: &str) -> Result<Self, CoreError> {
        if is_valid_sha256(hex64) {
            Ok(Self(format!("{CALC_PREFIX}{hex64}")))
        } else {
            Err(CoreError::InvalidHex)
        }
    }

    pub fn as_str(&self) -> &str { &self.0 }

    /// The digest part without the `CALC:` prefix.
    pub fn digest(&self) -> &str { &self.0[CALC_PREFIX.len()..] }
}

impl fmt::Display for CalculationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CalculationId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix(CALC_PREFIX).ok_or(CoreError::InvalidId)?;
        if is_valid_sha256(rest) { Ok(Self(s.to_string())) } else { Err(CoreError::InvalidId) }
    }
}

impl TryFrom<String> for CalculationId {
    type Error = CoreError;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<CalculationId> for String {
    fn from(id: CalculationId) -> Self { id.0 }
}
