//! Loader: read a local scenario JSON file, validate it against the embedded
//! schema, and lift it into typed engine inputs. No network I/O.
//!
//! Pairwise judgments arrive in two shapes and both end up in one
//! `AhpJudgments` arena:
//! - explicit lists (`criteria_comparison`, `alternative_comparisons`);
//! - legacy composite keys inside an alternative's `values`:
//!   `"<criterionId>_<otherAlternativeId>": v` means "under that criterion,
//!   this alternative is `v` times as preferred as the other one".
//!
//! Explicit lists are applied after the legacy keys, so they win on conflict.

use std::collections::BTreeMap;
use std::path::Path;

use madm_core::{
    AhpJudgments, Alternative, AlternativeId, Criterion, CriterionId, EngineParams, Method,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{hasher, schema, IoError};

// ----------------------------- Wire-facing types -----------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriteriaComparison {
    pub a: CriterionId,
    pub b: CriterionId,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeComparison {
    pub criterion: CriterionId,
    pub a: AlternativeId,
    pub b: AlternativeId,
    pub value: f64,
}

/// Alternative as written on the wire: `values` keys are strings so legacy
/// composite keys can sit next to plain criterion ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeRecord {
    pub id: AlternativeId,
    pub name: String,
    #[serde(default)]
    pub values: BTreeMap<String, f64>,
}

/// The scenario file (mirrors `schemas/scenario.schema.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub criteria: Vec<Criterion>,
    pub alternatives: Vec<AlternativeRecord>,
    #[serde(default)]
    pub criteria_comparison: Vec<CriteriaComparison>,
    #[serde(default)]
    pub alternative_comparisons: Vec<AlternativeComparison>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<EngineParams>,
}

// ----------------------------- Typed result -----------------------------

/// Loaded, validated, typed scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Method token exactly as written (parsed later by the dispatcher).
    pub method: Option<String>,
    pub criteria: Vec<Criterion>,
    pub alternatives: Vec<Alternative>,
    pub judgments: AhpJudgments,
    /// `options` block, if any (defaults filled in for missing fields).
    pub options: Option<EngineParams>,
    /// SHA-256 of the canonical JSON of the input document.
    pub input_sha256: String,
}

impl Scenario {
    /// Build a scenario in memory (no file, no judgments supplied). The digest
    /// covers the method, criteria and alternatives.
    pub fn from_parts(
        method: Option<Method>,
        criteria: Vec<Criterion>,
        alternatives: Vec<Alternative>,
    ) -> Result<Self, IoError> {
        let judgments = AhpJudgments::for_scenario(&criteria, &alternatives);
        #[derive(Serialize)]
        struct Parts<'a> {
            method: Option<Method>,
            criteria: &'a [Criterion],
            alternatives: &'a [Alternative],
        }
        let parts = Parts { method, criteria: &criteria, alternatives: &alternatives };
        let input_sha256 = hasher::sha256_canonical(&parts)?;
        Ok(Self {
            method: method.map(|m| m.as_str().to_string()),
            criteria,
            alternatives,
            judgments,
            options: None,
            input_sha256,
        })
    }
}

// ----------------------------- Entry points -----------------------------

/// Load a scenario from a local path.
pub fn load_scenario_path(path: &Path) -> Result<Scenario, IoError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read scenario");
    load_scenario_str(&text)
}

/// Parse, schema-validate and lift a scenario document.
pub fn load_scenario_str(text: &str) -> Result<Scenario, IoError> {
    let raw: Value = serde_json::from_str(text)?;
    schema::validate_scenario_value(&raw)?;
    let input_sha256 = hasher::sha256_canonical(&raw)?;
    let file: ScenarioFile = serde_json::from_value(raw)?;
    lift(file, input_sha256)
}

fn lift(file: ScenarioFile, input_sha256: String) -> Result<Scenario, IoError> {
    let criteria = file.criteria;
    let mut alternatives = Vec::with_capacity(file.alternatives.len());
    let mut legacy: Vec<(CriterionId, AlternativeId, AlternativeId, f64)> = Vec::new();

    for rec in &file.alternatives {
        let mut alt = Alternative::new(rec.id.get(), rec.name.clone());
        for (key, &v) in &rec.values {
            match parse_value_key(key)? {
                ValueKey::Criterion(c) => {
                    alt.values.insert(c, v);
                }
                ValueKey::Pairwise(c, other) => legacy.push((c, rec.id, other, v)),
            }
        }
        alternatives.push(alt);
    }

    let mut judgments = AhpJudgments::for_scenario(&criteria, &alternatives);
    for (c, a, b, v) in legacy {
        if a == b {
            // diagonal marker written by the legacy UI
            continue;
        }
        if let Err(e) = judgments.set_alternatives(c, a, b, v) {
            tracing::warn!(criterion = %c, a = %a, b = %b, value = v, error = %e, "skipping legacy pairwise entry");
        }
    }
    for cmp in &file.criteria_comparison {
        judgments
            .set_criteria(cmp.a, cmp.b, cmp.value)
            .map_err(|e| IoError::Invalid(format!("criteria_comparison {}/{}: {e}", cmp.a, cmp.b)))?;
    }
    for cmp in &file.alternative_comparisons {
        judgments
            .set_alternatives(cmp.criterion, cmp.a, cmp.b, cmp.value)
            .map_err(|e| {
                IoError::Invalid(format!(
                    "alternative_comparisons {}:{}/{}: {e}",
                    cmp.criterion, cmp.a, cmp.b
                ))
            })?;
    }

    if let Some(p) = &file.options {
        madm_core::variables::validate_domains(p)
            .map_err(|e| IoError::Invalid(format!("options: {e}")))?;
    }

    Ok(Scenario {
        method: file.method,
        criteria,
        alternatives,
        judgments,
        options: file.options,
        input_sha256,
    })
}

#[derive(Debug, PartialEq)]
enum ValueKey {
    Criterion(CriterionId),
    Pairwise(CriterionId, AlternativeId),
}

fn parse_value_key(key: &str) -> Result<ValueKey, IoError> {
    let bad = |_: madm_core::CoreError| IoError::Invalid(format!("values key '{key}'"));
    match key.split_once('_') {
        None => Ok(ValueKey::Criterion(key.parse().map_err(bad)?)),
        Some((c, a)) => Ok(ValueKey::Pairwise(c.parse().map_err(bad)?, a.parse().map_err(bad)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use madm_core::{CriterionKind, DegeneratePolicy};

    const LEGACY: &str = r#"{
        "method": "AHP",
        "criteria": [
            {"id": 1, "name": "Harga", "weight": 0.5, "type": "cost"},
            {"id": 2, "name": "Kualitas", "weight": 0.5, "type": "benefit"}
        ],
        "alternatives": [
            {"id": 1, "name": "A", "values": {"1": 10, "2": 8, "1_2": 3, "1_1": 1}},
            {"id": 2, "name": "B", "values": {"1": 20, "2": 10, "1_1": 0.3333333333333333, "1_2": 1}}
        ],
        "criteria_comparison": [{"a": 2, "b": 1, "value": 2}],
        "options": {"degenerate_policy": "strict"}
    }"#;

    #[test]
    fn legacy_keys_and_lists_are_lifted() {
        let s = load_scenario_str(LEGACY).unwrap();
        assert_eq!(s.method.as_deref(), Some("AHP"));
        assert_eq!(s.criteria[0].kind, CriterionKind::Cost);
        assert_eq!(s.alternatives[1].value(CriterionId(1)), Some(20.0));
        assert_eq!(s.alternatives[0].values.len(), 2);

        let j = &s.judgments;
        assert!((j.alternative_value(CriterionId(1), AlternativeId(1), AlternativeId(2)) - 3.0).abs() < 1e-12);
        assert_eq!(j.criteria.get(1, 0), 2.0);
        assert_eq!(j.criteria.get(0, 1), 0.5);
        assert_eq!(s.options.map(|o| o.degenerate_policy), Some(DegeneratePolicy::Strict));
        assert_eq!(s.input_sha256.len(), 64);
    }

    #[test]
    fn digest_ignores_formatting() {
        let compact: Value = serde_json::from_str(LEGACY).unwrap();
        let a = load_scenario_str(LEGACY).unwrap();
        let b = load_scenario_str(&serde_json::to_string(&compact).unwrap()).unwrap();
        assert_eq!(a.input_sha256, b.input_sha256);
    }

    #[test]
    fn out_of_scale_comparison_is_rejected() {
        let text = r#"{
            "criteria": [{"id": 1, "name": "C1", "weight": 0.5, "type": "benefit"},
                         {"id": 2, "name": "C2", "weight": 0.5, "type": "benefit"}],
            "alternatives": [{"id": 1, "name": "A"}],
            "criteria_comparison": [{"a": 1, "b": 2, "value": 12}]
        }"#;
        assert!(matches!(load_scenario_str(text), Err(IoError::Invalid(_))));
    }

    #[test]
    fn schema_errors_come_first() {
        let err = load_scenario_str(r#"{"criteria": [], "alternatives": []}"#).unwrap_err();
        assert!(matches!(err, IoError::Schema(_)));
        assert!(matches!(load_scenario_str("{not json"), Err(IoError::Json { .. })));
    }

    #[test]
    fn value_keys() {
        assert_eq!(parse_value_key("3").unwrap(), ValueKey::Criterion(CriterionId(3)));
        assert_eq!(parse_value_key("3_7").unwrap(), ValueKey::Pairwise(CriterionId(3), AlternativeId(7)));
        assert!(parse_value_key("a_b").is_err());
    }

    #[test]
    fn scenario_file_serializes_back() {
        let file: ScenarioFile = serde_json::from_str(LEGACY).unwrap();
        let back = serde_json::to_value(&file).unwrap();
        let expected: Value = serde_json::json!({
            "criteria_comparison": [{"a": 2, "b": 1, "value": 2.0}]
        });
        assert_json_diff::assert_json_include!(actual: back, expected: expected);
    }
}
