//! TOPSIS: closeness to the ideal solution.
//!
//! 1. decision matrix
//! 2. vector normalization `r = x / sqrt(Σ x²)`
//! 3. weighting `y = r · w`
//! 4. ideal positive / negative per column (benefit: max / min, cost: min / max)
//! 5. Euclidean distances `D+`, `D−`
//! 6. closeness `C = D− / (D+ + D−)`
//! 7. rank descending

use madm_core::{Alternative, CalculationStep, Criterion, EngineParams, Method, StepData, StepRecorder};

use crate::guard::DivGuard;
use crate::matrix::{alternative_names, column_max, column_min, criterion_names, decision_matrix, weighted, weights_of, Matrix};
use crate::normalize::{normalize_matrix, Normalization};
use crate::rank::{rank_results, ranking_step};
use crate::{ensure_non_empty, AlgoError, Calculation};

/// Ideal positive and negative points of a weighted matrix.
pub fn ideal_solutions(y: &Matrix, criteria: &[Criterion]) -> (Vec<f64>, Vec<f64>) {
    criteria
        .iter()
        .enumerate()
        .map(|(j, c)| {
            let (max, min) = (column_max(y, j), column_min(y, j));
            if c.is_benefit() { (max, min) } else { (min, max) }
        })
        .unzip()
}

fn distance(row: &[f64], point: &[f64]) -> f64 {
    row.iter().zip(point).map(|(a, b)| (a - b) * (a - b)).sum::<f64>().sqrt()
}

pub fn calculate(
    alternatives: &[Alternative],
    criteria: &[Criterion],
    params: &EngineParams,
) -> Result<Calculation, AlgoError> {
    ensure_non_empty(alternatives, criteria)?;
    let mut guard = DivGuard::new(params.degenerate_policy);
    let mut rec = StepRecorder::new();
    let headers = criterion_names(criteria);
    let alt_names = alternative_names(alternatives);

    let x = decision_matrix(alternatives, criteria);
    rec.record(
        CalculationStep::new("Decision Matrix", "Raw values; missing entries are 0.")
            .with_matrix(x.clone())
            .with_headers(headers.clone()),
    );

    let strategies = vec![Normalization::Vector; criteria.len()];
    let (r, norms) = normalize_matrix(&x, &strategies, &mut guard, "topsis.normalize")?;
    rec.record(
        CalculationStep::new("Normalized Matrix (R)", "Each value divided by the Euclidean norm of its column.")
            .with_matrix(r.clone())
            .with_headers(headers.clone())
            .with_formulas(vec!["r_ij = x_ij / sqrt(Σ_k x_kj²)".into()])
            .with_data(StepData::ColumnReference { label: "column norm".into(), values: norms }),
    );

    let weights = weights_of(criteria);
    let y = weighted(&r, &weights);
    rec.record(
        CalculationStep::new("Weighted Normalized Matrix (Y)", "Normalized values multiplied by the criterion weight.")
            .with_matrix(y.clone())
            .with_headers(headers.clone())
            .with_formulas(vec!["y_ij = w_j · r_ij".into()])
            .with_data(StepData::ColumnReference { label: "weight".into(), values: weights }),
    );

    let (positive, negative) = ideal_solutions(&y, criteria);
    rec.record(
        CalculationStep::new(
            "Ideal Solutions",
            "A+ takes the best weighted value per column (max for benefit, min for cost); A− takes the worst.",
        )
        .with_matrix(vec![positive.clone(), negative.clone()])
        .with_headers(headers)
        .with_formulas(vec![
            "A+_j = max_i y_ij (benefit), min_i y_ij (cost)".into(),
            "A−_j = min_i y_ij (benefit), max_i y_ij (cost)".into(),
        ])
        .with_data(StepData::IdealSolutions { positive: positive.clone(), negative: negative.clone() }),
    );

    let d_pos: Vec<f64> = y.iter().map(|row| distance(row, &positive)).collect();
    let d_neg: Vec<f64> = y.iter().map(|row| distance(row, &negative)).collect();
    rec.record(
        CalculationStep::new("Distances to Ideal Solutions", "Euclidean distance of each alternative to A+ and A−.")
            .with_matrix(d_pos.iter().zip(&d_neg).map(|(p, n)| vec![*p, *n]).collect())
            .with_headers(["D+", "D-"])
            .with_formulas(vec![
                "D+_i = sqrt(Σ_j (y_ij − A+_j)²)".into(),
                "D−_i = sqrt(Σ_j (y_ij − A−_j)²)".into(),
            ])
            .with_data(StepData::Distances { positive: d_pos.clone(), negative: d_neg.clone() }),
    );

    let closeness = d_pos
        .iter()
        .zip(&d_neg)
        .map(|(p, n)| guard.div(*n, p + n, "topsis.closeness", None))
        .collect::<Result<Vec<f64>, _>>()?;
    guard.check_scores(&closeness, "topsis.score")?;
    rec.record(
        CalculationStep::new("Closeness Coefficient (C)", "Relative closeness to the ideal solution, in [0, 1].")
            .with_vector(closeness.clone())
            .with_headers(alt_names)
            .with_formulas(vec!["C_i = D−_i / (D+_i + D−_i)".into()]),
    );

    let results = rank_results(alternatives, &closeness);
    rec.record(ranking_step(&results, "closeness coefficient C"));

    Ok(Calculation {
        method: Method::Topsis,
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

    #[test]
    fn dominating_alternative_is_at_the_ideal() {
        let criteria = vec![
            Criterion::new(1, "Speed", 0.4, CriterionKind::Benefit),
            Criterion::new(2, "Range", 0.3, CriterionKind::Benefit),
            Criterion::new(3, "Price", 0.3, CriterionKind::Cost),
        ];
        let alts = vec![
            Alternative::new(1, "A").with_value(1, 5.0).with_value(2, 6.0).with_value(3, 30.0),
            Alternative::new(2, "B").with_value(1, 9.0).with_value(2, 9.0).with_value(3, 10.0),
            Alternative::new(3, "C").with_value(1, 7.0).with_value(2, 4.0).with_value(3, 20.0),
        ];
        let calc = calculate(&alts, &criteria, &EngineParams::default()).unwrap();
        assert_eq!(calc.steps.len(), 7);
        assert_eq!(calc.results[0].id, AlternativeId(2));
        assert_eq!(calc.results[0].score, 1.0);
        for r in &calc.results {
            assert!((0.0..=1.0).contains(&r.score));
        }
    }

    #[test]
    fn identical_alternatives_hit_the_closeness_guard() {
        let criteria = vec![Criterion::new(1, "C", 1.0, CriterionKind::Benefit)];
        let alts = vec![Alternative::new(1, "A").with_value(1, 3.0), Alternative::new(2, "B").with_value(1, 3.0)];
        let calc = calculate(&alts, &criteria, &EngineParams::default()).unwrap();
        assert_eq!(calc.results.iter().map(|r| r.score).collect::<Vec<_>>(), vec![0.0, 0.0]);
        assert_eq!(calc.results[0].id, AlternativeId(1));
        assert!(!calc.guards.is_empty());

        let strict = EngineParams { degenerate_policy: DegeneratePolicy::Strict, ..EngineParams::default() };
        assert_eq!(
            calculate(&alts, &criteria, &strict),
            Err(AlgoError::Degenerate { stage: "topsis.closeness", column: None })
        );
    }

    #[test]
    fn ideal_solutions_invert_for_cost() {
        let y = vec![vec![0.1, 0.4], vec![0.3, 0.2]];
        let criteria = vec![
            Criterion::new(1, "B", 0.5, CriterionKind::Benefit),
            Criterion::new(2, "C", 0.5, CriterionKind::Cost),
        ];
        let (pos, neg) = ideal_solutions(&y, &criteria);
        assert_eq!(pos, vec![0.3, 0.2]);
        assert_eq!(neg, vec![0.1, 0.4]);
    }
}
