//! SAW: Simple Additive Weighting.
//!
//! 1. decision matrix
//! 2. per-column normalization: benefit `x / max`, cost `min / x`
//! 3. `V_i = Σ_j w_j · r_ij`
//! 4. rank descending

use madm_core::{Alternative, CalculationStep, Criterion, EngineParams, Method, StepData, StepRecorder};

use crate::guard::DivGuard;
use crate::matrix::{alternative_names, criterion_names, decision_matrix, row_sums, weighted, weights_of};
use crate::normalize::{normalize_matrix, Normalization};
use crate::rank::{rank_results, ranking_step};
use crate::{ensure_non_empty, AlgoError, Calculation};

pub fn calculate(
    alternatives: &[Alternative],
    criteria: &[Criterion],
    params: &EngineParams,
) -> Result<Calculation, AlgoError> {
    ensure_non_empty(alternatives, criteria)?;
    let mut guard = DivGuard::new(params.degenerate_policy);
    let mut rec = StepRecorder::new();
    let headers = criterion_names(criteria);

    let x = decision_matrix(alternatives, criteria);
    rec.record(
        CalculationStep::new(
            "Decision Matrix",
            "Raw value of each alternative (rows) on each criterion (columns); missing values are 0.",
        )
        .with_matrix(x.clone())
        .with_headers(headers.clone()),
    );

    let strategies: Vec<Normalization> = criteria.iter().map(|c| Normalization::for_kind(c.kind)).collect();
    let (r, refs) = normalize_matrix(&x, &strategies, &mut guard, "saw.normalize")?;
    let formulas = criteria
        .iter()
        .zip(&refs)
        .map(|(c, v)| {
            if c.is_benefit() {
                format!("{}: r = x / max = x / {v}", c.name)
            } else {
                format!("{}: r = min / x = {v} / x", c.name)
            }
        })
        .collect();
    rec.record(
        CalculationStep::new(
            "Normalized Matrix (R)",
            "Benefit columns divide by the column maximum; cost columns divide the column minimum by the value.",
        )
        .with_matrix(r.clone())
        .with_headers(headers)
        .with_formulas(formulas)
        .with_data(StepData::ColumnReference { label: "max (benefit) / min (cost)".into(), values: refs }),
    );

    let scores = row_sums(&weighted(&r, &weights_of(criteria)));
    guard.check_scores(&scores, "saw.score")?;
    rec.record(
        CalculationStep::new("Preference Values (V)", "Weighted sum of the normalized row.")
            .with_vector(scores.clone())
            .with_headers(alternative_names(alternatives))
            .with_formulas(vec!["V_i = Σ_j w_j · r_ij".into()]),
    );

    let results = rank_results(alternatives, &scores);
    rec.record(ranking_step(&results, "preference value V"));

    Ok(Calculation {
        method: Method::Saw,
        results,
        steps: rec.finish(),
        guards: guard.into_events(),
        ahp: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use madm_core::{AlternativeId, CriterionKind, DegeneratePolicy};

    fn harga_kualitas() -> (Vec<Alternative>, Vec<Criterion>) {
        let criteria = vec![
            Criterion::new(1, "Harga", 0.5, CriterionKind::Cost),
            Criterion::new(2, "Kualitas", 0.5, CriterionKind::Benefit),
        ];
        let alts = vec![
            Alternative::new(1, "A").with_value(1, 10.0).with_value(2, 8.0),
            Alternative::new(2, "B").with_value(1, 20.0).with_value(2, 10.0),
        ];
        (alts, criteria)
    }

    #[test]
    fn price_quality_scenario() {
        let (alts, criteria) = harga_kualitas();
        let calc = calculate(&alts, &criteria, &EngineParams::default()).unwrap();
        assert_eq!(calc.steps.len(), 4);
        assert_eq!(calc.steps[1].matrix, Some(vec![vec![1.0, 0.8], vec![0.5, 1.0]]));
        assert_eq!(calc.results[0].id, AlternativeId(1));
        assert!((calc.results[0].score - 0.9).abs() < 1e-12);
        assert!((calc.results[1].score - 0.75).abs() < 1e-12);
        assert_eq!(calc.results[1].rank, 2);
        assert!(calc.guards.is_empty());
    }

    #[test]
    fn zero_column_lenient_vs_strict() {
        let criteria = vec![Criterion::new(1, "C", 1.0, CriterionKind::Benefit)];
        let alts = vec![Alternative::new(1, "A"), Alternative::new(2, "B")];
        let calc = calculate(&alts, &criteria, &EngineParams::default()).unwrap();
        assert_eq!(calc.score_of(AlternativeId(1)), Some(0.0));
        assert_eq!(calc.guards.len(), 1);
        // tie keeps input order
        assert_eq!(calc.results[0].id, AlternativeId(1));

        let strict = EngineParams { degenerate_policy: DegeneratePolicy::Strict, ..EngineParams::default() };
        assert_eq!(
            calculate(&alts, &criteria, &strict),
            Err(AlgoError::Degenerate { stage: "saw.normalize", column: Some(0) })
        );
    }

    #[test]
    fn repeated_runs_are_identical() {
        let (alts, criteria) = harga_kualitas();
        let p = EngineParams::default();
        assert_eq!(calculate(&alts, &criteria, &p), calculate(&alts, &criteria, &p));
    }
}
