//! variables.rs: engine variables with safe defaults.
//!
//! Wire tokens are explicit (snake_case). Precedence when assembling a final
//! `EngineParams` is decided by callers (CLI flags > scenario options > defaults);
//! this module only defines the domains and validates them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Define an enum with explicit wire tokens, `as_str`, and `FromStr`.
/// (No feature gate on the macro itself; inner derives remain feature-aware.)
macro_rules! token_enum {
    ($(#[$m:meta])* $name:ident => { $($variant:ident = $token:literal),+ $(,)? }) => {
        $(#[$m])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum $name {
            $(
                #[cfg_attr(feature = "serde", serde(rename = $token))]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self { $($name::$variant => $token,)+ }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($token => Ok($name::$variant),)+
                    _ => Err(CoreError::InvalidToken),
                }
            }
        }
    };
}

token_enum!(
    /// What to do when a normalization denominator is zero or a score is non-finite.
    DegeneratePolicy => {
        Lenient = "lenient",
        Strict = "strict",
    }
);

token_enum!(
    /// What to do with pairwise judgments that were never supplied.
    MissingJudgmentPolicy => {
        DefaultOne = "default_one",
        Reject = "reject",
    }
);

token_enum!(
    /// AHP flavour: full pairwise hierarchy, or supplied weights with sum-normalization.
    AhpMode => {
        Pairwise = "pairwise",
        Simple = "simple",
    }
);

impl Default for DegeneratePolicy {
    fn default() -> Self { DegeneratePolicy::Lenient }
}
impl Default for MissingJudgmentPolicy {
    fn default() -> Self { MissingJudgmentPolicy::DefaultOne }
}
impl Default for AhpMode {
    fn default() -> Self { AhpMode::Pairwise }
}

pub const DEFAULT_WEIGHT_TOLERANCE: f64 = 0.01;
pub const DEFAULT_CONSISTENCY_THRESHOLD: f64 = 0.1;
pub const DEFAULT_WP_EPSILON: f64 = 0.0001;

/// Engine knobs. Every field has a default so partial option blocks deserialize.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct EngineParams {
    /// |Σ weights − 1| allowed by the caller-side weight check.
    pub weight_tolerance: f64,
    /// CR strictly below this is reported as consistent (advisory only).
    pub consistency_threshold: f64,
    /// Substitute for missing/zero values in WP.
    pub wp_epsilon: f64,
    pub degenerate_policy: DegeneratePolicy,
    pub missing_judgment: MissingJudgmentPolicy,
    pub ahp_mode: AhpMode,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            weight_tolerance: DEFAULT_WEIGHT_TOLERANCE,
            consistency_threshold: DEFAULT_CONSISTENCY_THRESHOLD,
            wp_epsilon: DEFAULT_WP_EPSILON,
            degenerate_policy: DegeneratePolicy::default(),
            missing_judgment: MissingJudgmentPolicy::default(),
            ahp_mode: AhpMode::default(),
        }
    }
}

impl EngineParams {
    #[inline]
    pub fn is_strict(&self) -> bool { self.degenerate_policy == DegeneratePolicy::Strict }
}

/// Reject out-of-range knob values.
pub fn validate_domains(p: &EngineParams) -> Result<(), CoreError> {
    if !p.weight_tolerance.is_finite() || !(0.0..1.0).contains(&p.weight_tolerance) {
        return Err(CoreError::DomainOutOfRange("weight_tolerance"));
    }
    if !p.consistency_threshold.is_finite() || p.consistency_threshold <= 0.0 {
        return Err(CoreError::DomainOutOfRange("consistency_threshold"));
    }
    if !p.wp_epsilon.is_finite() || p.wp_epsilon <= 0.0 {
        return Err(CoreError::DomainOutOfRange("wp_epsilon"));
    }
    Ok(())
}
