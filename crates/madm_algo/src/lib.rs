// crates/madm_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Ranking engines for multi-attribute decision making.
//!
//! Every engine is a pure function of `(alternatives, criteria, params)` (plus
//! pairwise judgments for AHP) and returns a `Calculation`: the ranked results
//! and the ordered step trace that produced them. Row order of every matrix is
//! the order of the `alternatives` slice; column order is the `criteria` slice.

use madm_core::{
    AhpJudgments, Alternative, AlternativeId, CalculationStep, ConsistencyReport, CoreError,
    Criterion, CriterionId, EngineParams, Method, RankedResult,
};

pub mod consistency;
pub mod guard;
pub mod matrix;
pub mod normalize;
pub mod rank;

pub mod methods {
    pub mod ahp;
    pub mod saw;
    pub mod topsis;
    pub mod wp;
}

pub use guard::{DivGuard, GuardEvent};
pub use matrix::Matrix;

// ----------------------------- Errors ------------------------------------------------

/// Engine errors. Caller-side validation (weight sums, duplicate ids) happens
/// upstream; these cover what the engines themselves can detect.
#[derive(Clone, Debug, PartialEq)]
pub enum AlgoError {
    /// `alternatives` or `criteria` was empty.
    EmptyInput(&'static str),
    /// A zero denominator or non-finite score under the strict policy.
    Degenerate { stage: &'static str, column: Option<usize> },
    /// A pairwise matrix does not match the scenario size.
    DimensionMismatch { what: &'static str, expected: usize, got: usize },
    /// A pairwise judgment was never supplied and the policy rejects defaults.
    /// `criterion` is `None` for the criteria matrix.
    MissingJudgment { criterion: Option<CriterionId>, row: usize, col: usize },
    Core(CoreError),
}

impl core::fmt::Display for AlgoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AlgoError::EmptyInput(what) => write!(f, "no {what} supplied"),
            AlgoError::Degenerate { stage, column: Some(c) } => {
                write!(f, "degenerate input at {stage} (column {c})")
            }
            AlgoError::Degenerate { stage, column: None } => write!(f, "degenerate input at {stage}"),
            AlgoError::DimensionMismatch { what, expected, got } => {
                write!(f, "{what}: expected size {expected}, got {got}")
            }
            AlgoError::MissingJudgment { criterion: None, row, col } => {
                write!(f, "missing criteria judgment ({row}, {col})")
            }
            AlgoError::MissingJudgment { criterion: Some(c), row, col } => {
                write!(f, "missing alternative judgment ({row}, {col}) under criterion {c}")
            }
            AlgoError::Core(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AlgoError {}

impl From<CoreError> for AlgoError {
    fn from(e: CoreError) -> Self { AlgoError::Core(e) }
}

// ----------------------------- Output ------------------------------------------------

/// Consistency summary of an AHP pairwise run.
#[derive(Clone, Debug, PartialEq)]
pub struct AhpSummary {
    /// Derived criteria weights (priority vector), criteria order.
    pub criteria_weights: Vec<f64>,
    pub criteria: ConsistencyReport,
    /// Per-criterion local consistency, criteria order.
    pub local: Vec<(CriterionId, ConsistencyReport)>,
}

impl AhpSummary {
    /// True when the criteria matrix and every local matrix pass the threshold.
    pub fn all_consistent(&self) -> bool {
        self.criteria.consistent && self.local.iter().all(|(_, r)| r.consistent)
    }
}

/// Result of one engine run.
#[derive(Clone, Debug, PartialEq)]
pub struct Calculation {
    pub method: Method,
    /// Sorted by score descending; ties keep input order.
    pub results: Vec<RankedResult>,
    pub steps: Vec<CalculationStep>,
    /// Zero-denominator guards applied under the lenient policy.
    pub guards: Vec<GuardEvent>,
    pub ahp: Option<AhpSummary>,
}

impl Calculation {
    pub fn top(&self) -> Option<&RankedResult> { self.results.first() }

    pub fn score_of(&self, id: AlternativeId) -> Option<f64> {
        self.results.iter().find(|r| r.id == id).map(|r| r.score)
    }
}

// ----------------------------- Dispatch ----------------------------------------------

/// Run `method` over the scenario.
///
/// `judgments` is only read by AHP in pairwise mode; when absent, every
/// judgment is treated as missing and the missing-judgment policy applies.
pub fn calculate(
    method: Method,
    alternatives: &[Alternative],
    criteria: &[Criterion],
    judgments: Option<&AhpJudgments>,
    params: &EngineParams,
) -> Result<Calculation, AlgoError> {
    match method {
        Method::Saw => methods::saw::calculate(alternatives, criteria, params),
        Method::Wp => methods::wp::calculate(alternatives, criteria, params),
        Method::Topsis => methods::topsis::calculate(alternatives, criteria, params),
        Method::Ahp => match judgments {
            Some(j) => methods::ahp::calculate(alternatives, criteria, j, params),
            None => {
                let j = AhpJudgments::for_scenario(criteria, alternatives);
                methods::ahp::calculate(alternatives, criteria, &j, params)
            }
        },
    }
}

/// Shared precondition for all engines.
pub(crate) fn ensure_non_empty(alternatives: &[Alternative], criteria: &[Criterion]) -> Result<(), AlgoError> {
    if alternatives.is_empty() {
        return Err(AlgoError::EmptyInput("alternatives"));
    }
    if criteria.is_empty() {
        return Err(AlgoError::EmptyInput("criteria"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use madm_core::CriterionKind;

    fn scenario() -> (Vec<Alternative>, Vec<Criterion>) {
        let criteria = vec![
            Criterion::new(1, "C1", 0.6, CriterionKind::Benefit),
            Criterion::new(2, "C2", 0.4, CriterionKind::Cost),
        ];
        let alts = vec![
            Alternative::new(1, "A").with_value(1, 10.0).with_value(2, 8.0),
            Alternative::new(2, "B").with_value(1, 8.0).with_value(2, 10.0),
        ];
        (alts, criteria)
    }

    #[test]
    fn dispatch_covers_every_method() {
        let (alts, criteria) = scenario();
        let p = EngineParams::default();
        for m in Method::ALL {
            let calc = calculate(m, &alts, &criteria, None, &p).unwrap();
            assert_eq!(calc.method, m);
            assert_eq!(calc.results.len(), 2);
            assert!(!calc.steps.is_empty());
        }
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let (alts, criteria) = scenario();
        let p = EngineParams::default();
        assert_eq!(
            calculate(Method::Saw, &[], &criteria, None, &p),
            Err(AlgoError::EmptyInput("alternatives"))
        );
        assert_eq!(
            calculate(Method::Topsis, &alts, &[], None, &p),
            Err(AlgoError::EmptyInput("criteria"))
        );
    }

    #[test]
    fn engine_types_cross_threads() {
        fn send_sync<T: Send + Sync>() {}
        send_sync::<Calculation>();
        send_sync::<AlgoError>();
        send_sync::<AhpJudgments>();
        send_sync::<EngineParams>();
    }
}
