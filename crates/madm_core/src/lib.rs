//! madm_core: Core types, engine variables, ordering helpers and trace model.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`madm_algo`, `madm_io`, `madm_pipeline`, `madm_report`, `madm_cli`).
//!
//! - Input ids: `CriterionId`, `AlternativeId`; output id: `CalculationId` (`CALC:`)
//! - Entities: `Criterion`, `Alternative`, `CriterionKind`, `Method`
//! - Pairwise judgments: `PairwiseMatrix`, `AhpJudgments` (dense, index-addressed)
//! - Engine variables: `EngineParams` and its policy enums
//! - Trace: `CalculationStep`, `StepData`, `StepRecorder`
//! - Deterministic score ordering for the ranker
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod determinism;
pub mod entities;
pub mod ids;
pub mod pairwise;
pub mod trace;
pub mod variables;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain validation & parsing.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub enum CoreError {
        InvalidId,
        InvalidHex,
        InvalidToken,
        /// Pairwise judgment outside the 1/9..=9 scale (or non-finite).
        JudgmentOutOfRange(f64),
        /// A diagonal judgment other than 1 was supplied.
        DiagonalNotOne,
        /// Index or id does not address a row of the matrix.
        IndexOutOfBounds { index: usize, size: usize },
        UnknownCriterion(u32),
        UnknownAlternative(u32),
        DomainOutOfRange(&'static str),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidId => write!(f, "invalid id"),
                CoreError::InvalidHex => write!(f, "invalid hex"),
                CoreError::InvalidToken => write!(f, "invalid token"),
                CoreError::JudgmentOutOfRange(v) => write!(f, "judgment out of range [1/9, 9]: {v}"),
                CoreError::DiagonalNotOne => write!(f, "diagonal judgment must be 1"),
                CoreError::IndexOutOfBounds { index, size } => {
                    write!(f, "index {index} out of bounds for size {size}")
                }
                CoreError::UnknownCriterion(id) => write!(f, "unknown criterion id {id}"),
                CoreError::UnknownAlternative(id) => write!(f, "unknown alternative id {id}"),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub use entities::{Alternative, Criterion, CriterionKind, Method, RankedResult};
pub use errors::CoreError;
pub use ids::{AlternativeId, CalculationId, CriterionId};
pub use pairwise::{AhpJudgments, PairwiseMatrix};
pub use trace::{CalculationStep, ConsistencyReport, StepData, StepRecorder};
pub use variables::{AhpMode, DegeneratePolicy, EngineParams, MissingJudgmentPolicy};
