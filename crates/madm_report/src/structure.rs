//! Report model and its construction from a parsed `result.json`.
//!
//! Only well-known fields are read; nothing is recomputed. Scores and trace
//! numbers are formatted once here so every renderer shows the same text.

use madm_core::Method;
use serde::Serialize;
use serde_json::Value;

use crate::{ReportError, ResultArtifact, SCORE_DECIMALS};

#[derive(Clone, Debug, Serialize)]
pub struct ReportModel {
    pub cover: SectionCover,
    pub criteria: Vec<CriterionRow>,
    pub ranking: Vec<RankingRow>,
    pub steps: Vec<StepSection>,
    pub consistency: Option<SectionConsistency>,
    pub notes: Vec<String>,
    pub integrity: SectionIntegrity,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionCover {
    pub title: String,
    pub method: String,
    pub method_name: String,
    /// Name of the rank-1 alternative.
    pub best: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CriterionRow {
    pub id: u64,
    pub name: String,
    pub weight: String,
    pub kind: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct RankingRow {
    pub rank: u64,
    pub id: u64,
    pub name: String,
    pub score: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct StepSection {
    pub number: usize,
    pub title: String,
    pub description: String,
    pub headers: Vec<String>,
    pub matrix: Vec<Vec<String>>,
    pub vector: Vec<String>,
    pub formulas: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConsistencyRow {
    pub label: String,
    pub lambda_max: String,
    pub ci: String,
    pub ri: String,
    pub cr: String,
    pub consistent: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionConsistency {
    pub criteria: ConsistencyRow,
    pub local: Vec<ConsistencyRow>,
    pub all_consistent: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionIntegrity {
    pub result_id: String,
    pub input_sha256: String,
    pub params: Vec<(String, String)>,
    pub engine_version: String,
}

/// Build the report model from a result document.
pub fn build_model(result: &ResultArtifact) -> Result<ReportModel, ReportError> {
    let method_token = json_get_str(result, "/method")?;
    let method_name = method_token
        .parse::<Method>()
        .map(|m| m.long_name().to_string())
        .map_err(|_| ReportError::Inconsistent("method"))?;

    let criteria: Vec<CriterionRow> = json_get_array(result, "/criteria")?
        .iter()
        .map(|c| {
            Ok(CriterionRow {
                id: json_get_u64(c, "/id")?,
                name: json_get_str(c, "/name")?,
                weight: fmt_fixed(c.pointer("/weight"), 4),
                kind: json_get_str(c, "/type")?,
            })
        })
        .collect::<Result<_, ReportError>>()?;

    let ranking: Vec<RankingRow> = json_get_array(result, "/results")?
        .iter()
        .map(|r| {
            Ok(RankingRow {
                rank: json_get_u64(r, "/rank")?,
                id: json_get_u64(r, "/id")?,
                name: json_get_str(r, "/name")?,
                score: fmt_fixed(r.pointer("/score"), SCORE_DECIMALS),
            })
        })
        .collect::<Result<_, ReportError>>()?;
    if ranking.windows(2).any(|w| w[0].rank > w[1].rank) {
        return Err(ReportError::Inconsistent("results not in rank order"));
    }

    let steps = json_get_array(result, "/steps")?
        .iter()
        .enumerate()
        .map(|(i, s)| step_section(i + 1, s))
        .collect::<Result<Vec<_>, _>>()?;

    let consistency = match result.pointer("/consistency") {
        Some(c) if !c.is_null() => Some(consistency_section(c, &criteria)?),
        _ => None,
    };

    let mut notes: Vec<String> = Vec::new();
    for w in result.pointer("/warnings").and_then(Value::as_array).into_iter().flatten() {
        notes.push(format!(
            "{}: {}",
            json_get_str(w, "/code").unwrap_or_default(),
            json_get_str(w, "/message").unwrap_or_default()
        ));
    }
    for g in result.pointer("/degenerate").and_then(Value::as_array).into_iter().flatten() {
        let stage = json_get_str(g, "/stage").unwrap_or_default();
        notes.push(match g.pointer("/column").and_then(Value::as_u64) {
            Some(col) => format!("{stage}: zero denominator in column {} resolved to 0", col + 1),
            None => format!("{stage}: zero denominator resolved to 0"),
        });
    }

    let params = result
        .pointer("/params")
        .and_then(Value::as_object)
        .map(|o| o.iter().map(|(k, v)| (k.clone(), cell_to_string(v))).collect())
        .unwrap_or_default();

    Ok(ReportModel {
        cover: SectionCover {
            title: "Decision Ranking Report".to_string(),
            method: method_token,
            method_name,
            best: ranking.first().map(|r| r.name.clone()),
        },
        criteria,
        ranking,
        steps,
        consistency,
        notes,
        integrity: SectionIntegrity {
            result_id: json_get_str(result, "/id")?,
            input_sha256: json_get_str(result, "/input_sha256")?,
            params,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        },
    })
}

fn step_section(number: usize, s: &Value) -> Result<StepSection, ReportError> {
    let strings = |ptr: &str| -> Vec<String> {
        s.pointer(ptr)
            .and_then(Value::as_array)
            .map(|a| a.iter().map(cell_to_string).collect())
            .unwrap_or_default()
    };
    let matrix = s
        .pointer("/matrix")
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .map(|row| {
                    row.as_array()
                        .map(|cells| cells.iter().map(|c| fmt_fixed(Some(c), SCORE_DECIMALS)).collect())
                        .unwrap_or_default()
                })
                .collect()
        })
        .unwrap_or_default();
    let vector = s
        .pointer("/vector")
        .and_then(Value::as_array)
        .map(|v| v.iter().map(|c| fmt_fixed(Some(c), SCORE_DECIMALS)).collect())
        .unwrap_or_default();

    Ok(StepSection {
        number,
        title: json_get_str(s, "/title")?,
        description: json_get_str(s, "/description").unwrap_or_default(),
        headers: strings("/headers"),
        matrix,
        vector,
        formulas: strings("/formulas"),
    })
}

fn consistency_section(c: &Value, criteria: &[CriterionRow]) -> Result<SectionConsistency, ReportError> {
    let row = |label: String, r: &Value| -> Result<ConsistencyRow, ReportError> {
        Ok(ConsistencyRow {
            label,
            lambda_max: fmt_fixed(r.pointer("/lambda_max"), 4),
            ci: fmt_fixed(r.pointer("/ci"), 4),
            ri: fmt_fixed(r.pointer("/ri"), 2),
            cr: fmt_fixed(r.pointer("/cr"), 4),
            consistent: json_get_bool(r, "/consistent")?,
        })
    };
    let criteria_row = row(
        "Criteria".to_string(),
        c.pointer("/criteria").ok_or(ReportError::MissingField("/consistency/criteria"))?,
    )?;
    let local = json_get_array(c, "/local")?
        .iter()
        .map(|l| {
            let id = json_get_u64(l, "/criterion")?;
            let label = criteria
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| format!("criterion {id}"));
            row(label, l.pointer("/report").ok_or(ReportError::MissingField("/consistency/local/*/report"))?)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SectionConsistency {
        criteria: criteria_row,
        local,
        all_consistent: json_get_bool(c, "/all_consistent")?,
    })
}

// ===== Helpers =====

/// Fixed-point text for a JSON number; non-finite engine values arrive as `null`.
pub fn fmt_fixed(v: Option<&Value>, decimals: usize) -> String {
    match v.and_then(Value::as_f64) {
        Some(x) => format!("{x:.decimals$}"),
        None => "NaN".to_string(),
    }
}

fn cell_to_string(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => v.to_string(),
    }
}

fn json_get_str(root: &Value, ptr: &'static str) -> Result<String, ReportError> {
    root.pointer(ptr)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ReportError::MissingField(ptr))
}

fn json_get_u64(root: &Value, ptr: &'static str) -> Result<u64, ReportError> {
    root.pointer(ptr).and_then(Value::as_u64).ok_or(ReportError::MissingField(ptr))
}

fn json_get_bool(root: &Value, ptr: &'static str) -> Result<bool, ReportError> {
    root.pointer(ptr).and_then(Value::as_bool).ok_or(ReportError::MissingField(ptr))
}

fn json_get_array<'a>(root: &'a Value, ptr: &'static str) -> Result<&'a Vec<Value>, ReportError> {
    root.pointer(ptr).and_then(Value::as_array).ok_or(ReportError::MissingField(ptr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_support::sample_result;

    #[test]
    fn model_formats_scores_with_six_decimals() {
        let m = build_model(&sample_result()).unwrap();
        assert_eq!(m.cover.method_name, "Simple Additive Weighting");
        assert_eq!(m.cover.best.as_deref(), Some("A"));
        assert_eq!(m.ranking[0].score, "0.900000");
        assert_eq!(m.ranking[1].score, "0.750000");
        assert_eq!(m.steps[0].number, 1);
        assert_eq!(m.steps[0].matrix[1][0], "20.000000");
        assert_eq!(m.notes, vec!["Weights.NearMiss: weights sum to 0.999".to_string()]);
        assert!(m.consistency.is_none());
    }

    #[test]
    fn null_scores_render_as_nan() {
        assert_eq!(fmt_fixed(Some(&Value::Null), 6), "NaN");
        assert_eq!(fmt_fixed(Some(&serde_json::json!(1)), 2), "1.00");
    }

    #[test]
    fn missing_fields_are_reported() {
        let mut v = sample_result();
        v.as_object_mut().unwrap().remove("results");
        assert!(matches!(build_model(&v), Err(ReportError::MissingField("/results"))));

        let mut v = sample_result();
        v["method"] = serde_json::json!("ELECTRE");
        assert!(matches!(build_model(&v), Err(ReportError::Inconsistent("method"))));
    }

    #[test]
    fn consistency_rows_use_criterion_names() {
        let mut v = sample_result();
        let report = serde_json::json!({"size": 2, "lambda_max": 2.0, "ci": 0.0, "ri": 0.0, "cr": 0.0, "consistent": true});
        v["consistency"] = serde_json::json!({
            "criteria_weights": [0.5, 0.5],
            "criteria": report,
            "local": [{"criterion": 2, "report": report}],
            "all_consistent": true
        });
        let m = build_model(&v).unwrap();
        let c = m.consistency.unwrap();
        assert_eq!(c.local[0].label, "Kualitas");
        assert_eq!(c.criteria.cr, "0.0000");
    }
}
