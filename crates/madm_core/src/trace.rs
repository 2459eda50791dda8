//! Calculation trace: ordered, append-only steps describing each stage.
//!
//! The recorder never participates in computation. Engines build a
//! `CalculationStep` from values they already computed and push it; there is
//! no way to reach back and edit a pushed step.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::CriterionId;

/// AHP consistency figures for one pairwise matrix.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConsistencyReport {
    pub size: usize,
    pub lambda_max: f64,
    pub ci: f64,
    pub ri: f64,
    pub cr: f64,
    pub consistent: bool,
}

/// Typed payload attached to a step (replaces an untyped "data" blob).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum StepData {
    /// Consistency of the criteria matrix.
    Consistency(ConsistencyReport),
    /// Local priority consistency for one criterion's alternatives matrix.
    LocalConsistency { criterion: CriterionId, report: ConsistencyReport },
    /// Per-column reference values (max/min divisors, Euclidean norms, sums).
    ColumnReference { label: String, values: Vec<f64> },
    IdealSolutions { positive: Vec<f64>, negative: Vec<f64> },
    Distances { positive: Vec<f64>, negative: Vec<f64> },
    Total { label: String, value: f64 },
}

/// One trace entry.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalculationStep {
    pub title: String,
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub matrix: Option<Vec<Vec<f64>>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub vector: Option<Vec<f64>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub headers: Option<Vec<String>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub formulas: Option<Vec<String>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub data: Option<StepData>,
}

impl CalculationStep {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), ..Self::default() }
    }

    pub fn with_matrix(mut self, m: Vec<Vec<f64>>) -> Self {
        self.matrix = Some(m);
        self
    }

    pub fn with_vector(mut self, v: Vec<f64>) -> Self {
        self.vector = Some(v);
        self
    }

    pub fn with_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_formulas(mut self, f: Vec<String>) -> Self {
        self.formulas = Some(f);
        self
    }

    pub fn with_data(mut self, d: StepData) -> Self {
        self.data = Some(d);
        self
    }
}

/// Append-only step log for one calculation.
#[derive(Clone, Debug, Default)]
pub struct StepRecorder {
    steps: Vec<CalculationStep>,
}

impl StepRecorder {
    pub fn new() -> Self { Self::default() }

    pub fn record(&mut self, step: CalculationStep) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize { self.steps.len() }

    pub fn is_empty(&self) -> bool { self.steps.is_empty() }

    pub fn steps(&self) -> &[CalculationStep] { &self.steps }

    pub fn finish(self) -> Vec<CalculationStep> { self.steps }
}
