//! build_result.rs
//! Assemble the idless result payload, hash its canonical bytes into
//! `CALC:<sha256>`, and return the finished `ResultDoc`.

use madm_algo::Calculation;
use madm_core::{
    CalculationId, CalculationStep, ConsistencyReport, Criterion, CriterionId, EngineParams,
    Method, RankedResult,
};
use madm_io::{hasher, IoError};
use serde::{Deserialize, Serialize};

use crate::validate::ValidationReport;

/// Calculation output document (`result.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDoc {
    pub id: CalculationId,
    pub method: Method,
    pub input_sha256: String,
    pub params: EngineParams,
    /// Criteria echo (names, weights, kinds) in column order.
    pub criteria: Vec<Criterion>,
    pub results: Vec<RankedResult>,
    pub steps: Vec<CalculationStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistency: Option<ConsistencyDoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degenerate: Vec<GuardDoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<WarningDoc>,
}

/// AHP pairwise consistency panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyDoc {
    pub criteria_weights: Vec<f64>,
    pub criteria: ConsistencyReport,
    pub local: Vec<LocalConsistencyDoc>,
    pub all_consistent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalConsistencyDoc {
    pub criterion: CriterionId,
    pub report: ConsistencyReport,
}

/// A zero denominator resolved to 0 under the lenient policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardDoc {
    pub stage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

/// A validation warning carried into the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningDoc {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
struct ResultNoId<'a> {
    method: Method,
    input_sha256: &'a str,
    params: &'a EngineParams,
    criteria: &'a [Criterion],
    results: &'a [RankedResult],
    steps: &'a [CalculationStep],
    #[serde(skip_serializing_if = "Option::is_none")]
    consistency: Option<&'a ConsistencyDoc>,
    #[serde(skip_serializing_if = "is_empty")]
    degenerate: &'a [GuardDoc],
    #[serde(skip_serializing_if = "is_empty")]
    warnings: &'a [WarningDoc],
}

fn is_empty<T>(s: &&[T]) -> bool {
    s.is_empty()
}

pub fn build_result(
    input_sha256: &str,
    params: &EngineParams,
    criteria: &[Criterion],
    calc: &Calculation,
    validation: &ValidationReport,
) -> Result<ResultDoc, IoError> {
    let consistency = calc.ahp.as_ref().map(|ahp| ConsistencyDoc {
        criteria_weights: ahp.criteria_weights.clone(),
        criteria: ahp.criteria.clone(),
        local: ahp
            .local
            .iter()
            .map(|(criterion, report)| LocalConsistencyDoc { criterion: *criterion, report: report.clone() })
            .collect(),
        all_consistent: ahp.all_consistent(),
    });
    let degenerate: Vec<GuardDoc> = calc
        .guards
        .iter()
        .map(|g| GuardDoc { stage: g.stage.to_string(), column: g.column })
        .collect();
    let warnings: Vec<WarningDoc> = validation
        .warnings()
        .map(|w| WarningDoc { code: w.code.to_string(), message: w.message.clone() })
        .collect();

    let no_id = ResultNoId {
        method: calc.method,
        input_sha256,
        params,
        criteria,
        results: &calc.results,
        steps: &calc.steps,
        consistency: consistency.as_ref(),
        degenerate: &degenerate,
        warnings: &warnings,
    };
    let id = hasher::calc_id_from_canonical(&no_id)?;

    Ok(ResultDoc {
        id,
        method: calc.method,
        input_sha256: input_sha256.to_string(),
        params: *params,
        criteria: criteria.to_vec(),
        results: calc.results.clone(),
        steps: calc.steps.clone(),
        consistency,
        degenerate,
        warnings,
    })
}

/// Recompute the id of a serialized result and compare it with the one it carries.
pub fn verify_result_id(doc: &serde_json::Value) -> Result<bool, IoError> {
    let claimed = doc
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| IoError::Invalid("result has no id".into()))?;
    let mut body = doc.clone();
    if let Some(obj) = body.as_object_mut() {
        obj.remove("id");
    }
    Ok(hasher::calc_id_from_canonical(&body)?.as_str() == claimed)
}
